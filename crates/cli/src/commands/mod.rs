pub mod build;
pub mod catalog;
pub mod config;
pub mod input;
pub mod library;
pub mod preview;

use std::path::Path;

use activateroi_core::config::{AppConfig, LoadOptions};
use activateroi_core::errors::ApplicationError;
use serde::Serialize;
use serde_json::Value;

pub const EXIT_INTERNAL: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INPUT: u8 = 3;
pub const EXIT_DOMAIN: u8 = 4;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::success_with_data(command, message, None)
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let (error_class, exit_code) = match &error {
            ApplicationError::Domain(_) => ("domain_validation", EXIT_DOMAIN),
            ApplicationError::Input(_) | ApplicationError::Library(_) => ("input", EXIT_INPUT),
            ApplicationError::Configuration(_) => ("config_validation", EXIT_CONFIG),
        };
        Self::failure(command, error_class, error.to_string(), exit_code)
    }
}

/// Loads configuration for a command, mapping failures to the config exit code.
///
/// An explicit `--config-file` must exist; only discovered files are optional.
pub fn load_config(command: &str, config_path: Option<&Path>) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions {
        config_path: config_path.map(Path::to_path_buf),
        require_file: config_path.is_some(),
        ..LoadOptions::default()
    })
    .map_err(|error| {
        CommandResult::from_application_error(
            command,
            ApplicationError::Configuration(error.to_string()),
        )
    })
}

pub(crate) fn to_data(command: &str, value: &impl Serialize) -> Result<Value, CommandResult> {
    serde_json::to_value(value).map_err(|error| {
        CommandResult::failure(command, "serialization", error.to_string(), EXIT_INPUT)
    })
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
