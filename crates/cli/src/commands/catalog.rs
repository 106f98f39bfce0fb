use std::path::Path;

use activateroi_core::domain::pain::{DataIssueFrequency, HOURLY_COST_OPTIONS};
use activateroi_core::domain::profile::{CompanySize, CurrentState, Industry, Warehouse};
use activateroi_core::domain::use_case::{catalog, UseCase};
use activateroi_core::roi::calculator::investment_cost;
use activateroi_core::roi::Scenario;
use activateroi_core::wizard::WizardStep;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::{load_config, to_data, CommandResult};

const COMMAND: &str = "catalog";

#[derive(Serialize)]
struct IndustryEntry {
    label: &'static str,
    rev_impact_pct: Decimal,
    benchmarked: bool,
}

#[derive(Serialize)]
struct SizeEntry {
    label: &'static str,
    investment_cost: Decimal,
}

#[derive(Serialize)]
struct ScenarioEntry {
    id: &'static str,
    label: &'static str,
    multiplier: Decimal,
}

#[derive(Serialize)]
struct CatalogOutput {
    steps: Vec<&'static str>,
    industries: Vec<IndustryEntry>,
    company_sizes: Vec<SizeEntry>,
    warehouses: Vec<&'static str>,
    current_states: Vec<&'static str>,
    use_cases: Vec<UseCase>,
    data_issue_frequencies: Vec<&'static str>,
    hourly_cost_options: Vec<u32>,
    scenarios: Vec<ScenarioEntry>,
}

/// Reference data offered by the builder, with benchmarks as configured.
pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config = match load_config(COMMAND, config_path) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let benchmarks = config.benchmark_table();

    let output = CatalogOutput {
        steps: WizardStep::ALL.iter().map(WizardStep::label).collect(),
        industries: Industry::ALL
            .into_iter()
            .map(|industry| IndustryEntry {
                label: industry.label(),
                rev_impact_pct: benchmarks.lookup(industry).rev_impact_pct,
                benchmarked: benchmarks.has_explicit_entry(industry),
            })
            .collect(),
        company_sizes: CompanySize::ALL
            .into_iter()
            .map(|size| SizeEntry { label: size.label(), investment_cost: investment_cost(size) })
            .collect(),
        warehouses: Warehouse::ALL.iter().map(Warehouse::label).collect(),
        current_states: CurrentState::ALL.iter().map(CurrentState::label).collect(),
        use_cases: catalog(),
        data_issue_frequencies: DataIssueFrequency::ALL
            .iter()
            .map(DataIssueFrequency::label)
            .collect(),
        hourly_cost_options: HOURLY_COST_OPTIONS.to_vec(),
        scenarios: Scenario::ALL
            .into_iter()
            .map(|scenario| ScenarioEntry {
                id: scenario.as_str(),
                label: scenario.label(),
                multiplier: scenario.multiplier(),
            })
            .collect(),
    };

    let message = format!(
        "{} industries, {} use cases, {} scenarios",
        output.industries.len(),
        output.use_cases.len(),
        output.scenarios.len()
    );
    match to_data(COMMAND, &output) {
        Ok(data) => CommandResult::success_with_data(COMMAND, message, Some(data)),
        Err(result) => result,
    }
}
