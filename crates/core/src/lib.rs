pub mod animation;
pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod library;
pub mod roi;
pub mod wizard;

pub use animation::CountUp;
pub use audit::{AuditSink, InMemoryAuditSink, TracingAuditSink};
pub use domain::pain::{DataIssueFrequency, PainInputs};
pub use domain::profile::{CompanySize, CurrentState, Industry, Profile, Warehouse};
pub use domain::report::{DealStage, ReportId, ReportRecord, ReportStatus};
pub use domain::use_case::{UseCase, UseCaseId, UseCaseSelection};
pub use errors::{ApplicationError, DomainError};
pub use library::{IndustryFilter, LibraryKpis, ReportLibrary, ReportQuery, SortKey};
pub use roi::{
    BenchmarkRoiCalculator, BenchmarkTable, ReportBreakdown, RoiCalculator, RoiProjection,
    Scenario, ScenarioProjections,
};
pub use wizard::{ReportPayload, ReportView, WizardSession, WizardStep, WizardTransitionError};
