use std::env;
use std::fs;
use std::path::Path;

use activateroi_core::config::resolve_config_path;
use toml::Value;

use crate::commands::{load_config, CommandResult};

const COMMAND: &str = "config";

/// Plain-text listing of effective values with source attribution.
pub fn run(config_path: Option<&Path>) -> CommandResult {
    let config = match load_config(COMMAND, config_path) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_file_path = resolve_config_path(config_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let sources = Sources { doc: config_file_doc.as_ref(), path: config_file_path.as_deref() };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "builder.ae_name",
        &config.builder.ae_name,
        sources.field("builder.ae_name", &["ACTIVATEROI_BUILDER_AE_NAME"]),
    ));
    lines.push(render_line(
        "builder.default_scenario",
        config.builder.default_scenario.as_str(),
        sources.field("builder.default_scenario", &["ACTIVATEROI_BUILDER_DEFAULT_SCENARIO"]),
    ));
    lines.push(render_line(
        "library.win_rate_pct",
        &config.library.win_rate_pct.to_string(),
        sources.field("library.win_rate_pct", &["ACTIVATEROI_LIBRARY_WIN_RATE_PCT"]),
    ));
    let records_path = config
        .library
        .records_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<sample reports>".to_string());
    lines.push(render_line(
        "library.records_path",
        &records_path,
        sources.field("library.records_path", &["ACTIVATEROI_LIBRARY_RECORDS_PATH"]),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        sources.field("logging.level", &["ACTIVATEROI_LOGGING_LEVEL", "ACTIVATEROI_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        config.logging.format.as_str(),
        sources.field("logging.format", &["ACTIVATEROI_LOGGING_FORMAT", "ACTIVATEROI_LOG_FORMAT"]),
    ));

    for (industry, pct) in &config.benchmarks {
        let key = format!("benchmarks.{industry}");
        lines.push(render_line(&key, &format!("{pct}%"), sources.field(&key, &[])));
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

struct Sources<'a> {
    doc: Option<&'a Value>,
    path: Option<&'a Path>,
}

impl Sources<'_> {
    fn field(&self, key_path: &str, env_keys: &[&str]) -> String {
        if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    // Only the first dot separates section from key.
    let Some((section, key)) = key_path.split_once('.') else {
        return root.get(key_path).is_some();
    };
    root.get(section).and_then(|table| table.get(key)).is_some()
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
