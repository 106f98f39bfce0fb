use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::pain::PainInputs;
use crate::domain::profile::{CompanySize, Profile};
use crate::domain::use_case::UseCaseSelection;
use crate::roi::benchmarks::BenchmarkTable;
use crate::roi::scenario::Scenario;

pub const WEEKS_PER_YEAR: i64 = 52;
pub const DAYS_PER_YEAR: i64 = 365;
pub const CHURN_REDUCTION_BASE: i64 = 180_000;
pub const DATA_QUALITY_BASE: i64 = 45_000;

/// (minimum employees, annual investment), checked top to bottom.
const INVESTMENT_TIERS: [(u32, i64); 3] = [(5_000, 96_000), (1_000, 72_000), (501, 48_000)];
const BASE_INVESTMENT: i64 = 36_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiProjection {
    pub time_savings: Decimal,
    pub rev_impact: Decimal,
    pub churn_reduction: Decimal,
    pub data_quality: Decimal,
    pub total_value: Decimal,
    pub investment_cost: Decimal,
    pub roi_ratio: Decimal,
    pub payback_days: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ProjectionInput<'a> {
    pub profile: &'a Profile,
    pub pain: &'a PainInputs,
    pub use_cases: &'a UseCaseSelection,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProjections {
    pub conservative: RoiProjection,
    pub moderate: RoiProjection,
    pub aggressive: RoiProjection,
}

impl ScenarioProjections {
    pub fn get(&self, scenario: Scenario) -> &RoiProjection {
        match scenario {
            Scenario::Conservative => &self.conservative,
            Scenario::Moderate => &self.moderate,
            Scenario::Aggressive => &self.aggressive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scenario, &RoiProjection)> + '_ {
        Scenario::ALL.into_iter().map(move |scenario| (scenario, self.get(scenario)))
    }
}

pub trait RoiCalculator: Send + Sync {
    fn project(&self, input: ProjectionInput<'_>, scenario: Scenario) -> RoiProjection;

    fn project_all(&self, input: ProjectionInput<'_>) -> ScenarioProjections {
        ScenarioProjections {
            conservative: self.project(input, Scenario::Conservative),
            moderate: self.project(input, Scenario::Moderate),
            aggressive: self.project(input, Scenario::Aggressive),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BenchmarkRoiCalculator {
    benchmarks: BenchmarkTable,
}

impl BenchmarkRoiCalculator {
    pub fn new(benchmarks: BenchmarkTable) -> Self {
        Self { benchmarks }
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }
}

impl RoiCalculator for BenchmarkRoiCalculator {
    fn project(&self, input: ProjectionInput<'_>, scenario: Scenario) -> RoiProjection {
        compute_projection(&self.benchmarks, input.profile, input.pain, input.use_cases, scenario)
    }
}

pub fn investment_cost(size: CompanySize) -> Decimal {
    let employees = size.min_employees();
    let cost = INVESTMENT_TIERS
        .iter()
        .find(|(threshold, _)| employees >= *threshold)
        .map(|(_, cost)| *cost)
        .unwrap_or(BASE_INVESTMENT);
    Decimal::from(cost)
}

/// Projects annual value for one scenario. Every component is linear in the
/// scenario multiplier; nothing here is cached.
pub fn compute_projection(
    benchmarks: &BenchmarkTable,
    profile: &Profile,
    pain: &PainInputs,
    use_cases: &UseCaseSelection,
    scenario: Scenario,
) -> RoiProjection {
    let benchmark = benchmarks.lookup(profile.industry);
    let multiplier = scenario.multiplier();

    let time_savings = Decimal::from(pain.hours_per_week)
        * Decimal::from(pain.hourly_cost)
        * Decimal::from(WEEKS_PER_YEAR)
        * multiplier;
    let rev_impact = Decimal::from(pain.revenue_lost)
        * benchmark.rev_impact_fraction()
        * multiplier
        * Decimal::from(use_cases.len());
    let churn_reduction = if use_cases.includes_churn_reduction() {
        multiplier * Decimal::from(CHURN_REDUCTION_BASE)
    } else {
        Decimal::ZERO
    };
    let data_quality = Decimal::from(DATA_QUALITY_BASE) * multiplier;
    let total_value = time_savings + rev_impact + churn_reduction + data_quality;

    let investment_cost = investment_cost(profile.size);
    let roi_ratio = total_value.checked_div(investment_cost).unwrap_or(Decimal::ZERO);
    let payback_days = (Decimal::from(DAYS_PER_YEAR) * investment_cost)
        .checked_div(total_value)
        .map(|days| days.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|days| days.to_u32())
        .unwrap_or(u32::MAX);

    RoiProjection {
        time_savings: time_savings.normalize(),
        rev_impact: rev_impact.normalize(),
        churn_reduction: churn_reduction.normalize(),
        data_quality: data_quality.normalize(),
        total_value: total_value.normalize(),
        investment_cost,
        roi_ratio: roi_ratio.normalize(),
        payback_days,
    }
}
