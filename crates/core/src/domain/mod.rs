pub mod pain;
pub mod profile;
pub mod report;
pub mod use_case;
