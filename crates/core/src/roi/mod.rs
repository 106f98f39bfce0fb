pub mod benchmarks;
pub mod breakdown;
pub mod calculator;
pub mod format;
pub mod scenario;

pub use benchmarks::{BenchmarkEntry, BenchmarkTable};
pub use breakdown::{PaybackPoint, ReportBreakdown, ValueCategory, ValueCategoryKind};
pub use calculator::{
    compute_projection, investment_cost, BenchmarkRoiCalculator, ProjectionInput, RoiCalculator,
    RoiProjection, ScenarioProjections,
};
pub use scenario::Scenario;
