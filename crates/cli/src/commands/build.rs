use std::path::Path;

use activateroi_core::errors::{ApplicationError, DomainError};
use activateroi_core::roi::{format, ReportBreakdown};
use activateroi_core::wizard::{InMemoryReportView, ReportPayload};
use serde::Serialize;
use uuid::Uuid;

use crate::commands::input::{advance_to_review, WizardInput};
use crate::commands::{load_config, to_data, CommandResult, EXIT_INTERNAL};

const COMMAND: &str = "build";

#[derive(Serialize)]
struct BuildOutput<'a> {
    report: &'a ReportPayload,
    breakdown: &'a ReportBreakdown,
}

pub fn run(input_path: &Path, scenario: Option<&str>, config_path: Option<&Path>) -> CommandResult {
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
    let mut session = match input.start_session(&config, scenario, &correlation_id) {
        Ok(session) => session,
        Err(error) => return CommandResult::from_application_error(COMMAND, error),
    };
    if let Err(error) = advance_to_review(&mut session) {
        return CommandResult::from_application_error(COMMAND, error);
    }

    let view = InMemoryReportView::default();
    if let Err(error) = session.generate_into(&view) {
        return CommandResult::from_application_error(COMMAND, DomainError::from(error).into());
    }
    let Some(payload) = view.presented().pop() else {
        return CommandResult::failure(
            COMMAND,
            "internal",
            "report view received no payload",
            EXIT_INTERNAL,
        );
    };
    let breakdown = payload.breakdown();

    tracing::info!(
        event_name = "cli.build.completed",
        correlation_id = %correlation_id,
        session_id = %payload.session_id,
        scenario = %payload.scenario,
        "roi report built"
    );

    let message = format!(
        "{} for {}: {} annual value, payback in {} days",
        breakdown.headline_ratio,
        payload.profile.company,
        format::currency(payload.projection.total_value),
        payload.projection.payback_days
    );
    let data = to_data(COMMAND, &BuildOutput { report: &payload, breakdown: &breakdown });
    match data {
        Ok(data) => CommandResult::success_with_data(COMMAND, message, Some(data)),
        Err(result) => result,
    }
}
