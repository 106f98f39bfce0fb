use std::path::Path;

use activateroi_core::errors::ApplicationError;
use activateroi_core::roi::{format, Scenario, ScenarioProjections};
use serde::Serialize;
use uuid::Uuid;

use crate::commands::input::WizardInput;
use crate::commands::{load_config, to_data, CommandResult};

const COMMAND: &str = "preview";

#[derive(Serialize)]
struct PreviewOutput<'a> {
    selected: Scenario,
    scenarios: &'a ScenarioProjections,
}

/// What-if projections for all three scenarios without walking the wizard.
pub fn run(input_path: &Path, config_path: Option<&Path>) -> CommandResult {
    let config = match load_config(COMMAND, config_path) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let input = match WizardInput::load(input_path) {
        Ok(input) => input,
        Err(error) => {
            let error = ApplicationError::Input(format!("{error:#}"));
            return CommandResult::from_application_error(COMMAND, error);
        }
    };

    let correlation_id = format!("cli-{}", Uuid::new_v4());
    let session = match input.start_session(&config, None, &correlation_id) {
        Ok(session) => session,
        Err(error) => return CommandResult::from_application_error(COMMAND, error),
    };
    let scenarios = session.preview_all();

    let message = Scenario::ALL
        .iter()
        .map(|scenario| {
            let projection = scenarios.get(*scenario);
            format!(
                "{} {} ({})",
                scenario.label(),
                format::currency_thousands(projection.total_value),
                format::ratio(projection.roi_ratio)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    let output = PreviewOutput { selected: session.state().scenario, scenarios: &scenarios };
    match to_data(COMMAND, &output) {
        Ok(data) => CommandResult::success_with_data(COMMAND, message, Some(data)),
        Err(result) => result,
    }
}
