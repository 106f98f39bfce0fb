use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::profile::Industry;
use crate::library::DEFAULT_WIN_RATE_PCT;
use crate::roi::benchmarks::{BenchmarkEntry, BenchmarkTable};
use crate::roi::scenario::Scenario;
use crate::wizard::session::DEFAULT_AE_NAME;

pub const CONFIG_FILE_NAME: &str = "activateroi.toml";
pub const NESTED_CONFIG_FILE: &str = "config/activateroi.toml";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub builder: BuilderConfig,
    pub library: LibraryConfig,
    pub logging: LoggingConfig,
    /// Revenue-impact percentages keyed by industry label, layered over the
    /// built-in benchmark table.
    pub benchmarks: BTreeMap<String, Decimal>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BuilderConfig {
    pub ae_name: String,
    pub default_scenario: Scenario,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LibraryConfig {
    pub win_rate_pct: u32,
    pub records_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub ae_name: Option<String>,
    pub default_scenario: Option<Scenario>,
    pub win_rate_pct: Option<u32>,
    pub records_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            builder: BuilderConfig {
                ae_name: DEFAULT_AE_NAME.to_string(),
                default_scenario: Scenario::default(),
            },
            library: LibraryConfig { win_rate_pct: DEFAULT_WIN_RATE_PCT, records_path: None },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
            benchmarks: BTreeMap::new(),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// Built-in benchmarks with any configured percentages applied on top.
    pub fn benchmark_table(&self) -> BenchmarkTable {
        let mut table = BenchmarkTable::default();
        for (label, pct) in &self.benchmarks {
            if let Some(industry) = Industry::parse(label) {
                table.set(industry, BenchmarkEntry::new(*pct));
            }
        }
        table
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(builder) = patch.builder {
            if let Some(ae_name) = builder.ae_name {
                self.builder.ae_name = ae_name;
            }
            if let Some(default_scenario) = builder.default_scenario {
                self.builder.default_scenario = default_scenario;
            }
        }

        if let Some(library) = patch.library {
            if let Some(win_rate_pct) = library.win_rate_pct {
                self.library.win_rate_pct = win_rate_pct;
            }
            if let Some(records_path) = library.records_path {
                self.library.records_path = Some(records_path);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }

        if let Some(benchmarks) = patch.benchmarks {
            self.benchmarks.extend(benchmarks);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("ACTIVATEROI_BUILDER_AE_NAME") {
            self.builder.ae_name = value;
        }
        if let Some(value) = read_env("ACTIVATEROI_BUILDER_DEFAULT_SCENARIO") {
            self.builder.default_scenario =
                parse_scenario("ACTIVATEROI_BUILDER_DEFAULT_SCENARIO", &value)?;
        }

        if let Some(value) = read_env("ACTIVATEROI_LIBRARY_WIN_RATE_PCT") {
            self.library.win_rate_pct = parse_u32("ACTIVATEROI_LIBRARY_WIN_RATE_PCT", &value)?;
        }
        if let Some(value) = read_env("ACTIVATEROI_LIBRARY_RECORDS_PATH") {
            self.library.records_path = Some(PathBuf::from(value));
        }

        let log_level =
            read_env("ACTIVATEROI_LOGGING_LEVEL").or_else(|| read_env("ACTIVATEROI_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("ACTIVATEROI_LOGGING_FORMAT").or_else(|| read_env("ACTIVATEROI_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(ae_name) = overrides.ae_name {
            self.builder.ae_name = ae_name;
        }
        if let Some(default_scenario) = overrides.default_scenario {
            self.builder.default_scenario = default_scenario;
        }
        if let Some(win_rate_pct) = overrides.win_rate_pct {
            self.library.win_rate_pct = win_rate_pct;
        }
        if let Some(records_path) = overrides.records_path {
            self.library.records_path = Some(records_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_builder(&self.builder)?;
        validate_library(&self.library)?;
        validate_logging(&self.logging)?;
        validate_benchmarks(&self.benchmarks)?;
        Ok(())
    }
}

pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(CONFIG_FILE_NAME), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_builder(builder: &BuilderConfig) -> Result<(), ConfigError> {
    if builder.ae_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "builder.ae_name must not be empty; it is printed on every generated report"
                .to_string(),
        ));
    }
    Ok(())
}

fn validate_library(library: &LibraryConfig) -> Result<(), ConfigError> {
    if library.win_rate_pct > 100 {
        return Err(ConfigError::Validation(
            "library.win_rate_pct must be in range 0..=100".to_string(),
        ));
    }

    if let Some(path) = &library.records_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "library.records_path must not be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn validate_benchmarks(benchmarks: &BTreeMap<String, Decimal>) -> Result<(), ConfigError> {
    for (label, pct) in benchmarks {
        if Industry::parse(label).is_none() {
            let known: Vec<_> = Industry::ALL.iter().map(Industry::label).collect();
            return Err(ConfigError::Validation(format!(
                "benchmarks.{label} is not a known industry (expected one of {})",
                known.join("|")
            )));
        }
        if *pct < Decimal::ZERO || *pct > Decimal::ONE_HUNDRED {
            return Err(ConfigError::Validation(format!(
                "benchmarks.{label} must be a percentage in range 0..=100"
            )));
        }
    }
    Ok(())
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_scenario(key: &str, value: &str) -> Result<Scenario, ConfigError> {
    Scenario::parse(value).ok_or_else(|| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    builder: Option<BuilderPatch>,
    library: Option<LibraryPatch>,
    logging: Option<LoggingPatch>,
    benchmarks: Option<BTreeMap<String, Decimal>>,
}

#[derive(Debug, Default, Deserialize)]
struct BuilderPatch {
    ae_name: Option<String>,
    default_scenario: Option<Scenario>,
}

#[derive(Debug, Default, Deserialize)]
struct LibraryPatch {
    win_rate_pct: Option<u32>,
    records_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
    use crate::domain::profile::Industry;
    use crate::roi::scenario::Scenario;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn write_config(dir: &TempDir, contents: &str) -> Result<PathBuf, String> {
        let path = dir.path().join("activateroi.toml");
        fs::write(&path, contents).map_err(|err| err.to_string())?;
        Ok(path)
    }

    #[test]
    fn defaults_match_the_builder_out_of_the_box() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.builder.ae_name == "Kevin Park", "default account executive")?;
        ensure(config.builder.default_scenario == Scenario::Moderate, "moderate by default")?;
        ensure(config.library.win_rate_pct == 67, "default win rate")?;
        ensure(config.library.records_path.is_none(), "sample records by default")?;
        ensure(matches!(config.logging.format, LogFormat::Compact), "compact logs by default")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_ACTIVATEROI_AE", "Dana Whitfield");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[builder]
ae_name = "${TEST_ACTIVATEROI_AE}"
default_scenario = "aggressive"
"#,
            )?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.builder.ae_name == "Dana Whitfield", "ae name should interpolate")?;
            ensure(
                config.builder.default_scenario == Scenario::Aggressive,
                "default scenario should come from the file",
            )
        })();

        clear_vars(&["TEST_ACTIVATEROI_AE"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(&dir, "[builder]\nae_name = \"${ACTIVATEROI_TEST_UNSET_VAR}\"\n")?;

        let result =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() });
        ensure(
            matches!(
                result,
                Err(ConfigError::MissingEnvInterpolation { ref var })
                    if var == "ACTIVATEROI_TEST_UNSET_VAR"
            ),
            "missing interpolation variable should be named",
        )
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ACTIVATEROI_LOG_LEVEL", "warn");
        env::set_var("ACTIVATEROI_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["ACTIVATEROI_LOG_LEVEL", "ACTIVATEROI_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ACTIVATEROI_BUILDER_AE_NAME", "Env Person");
        env::set_var("ACTIVATEROI_LIBRARY_WIN_RATE_PCT", "55");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[builder]
ae_name = "File Person"
default_scenario = "conservative"

[library]
win_rate_pct = 40

[logging]
level = "warn"
"#,
            )?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    win_rate_pct: Some(72),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.library.win_rate_pct == 72, "override win rate should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.builder.ae_name == "Env Person",
                "env ae name should win over file and defaults",
            )?;
            ensure(
                config.builder.default_scenario == Scenario::Conservative,
                "file scenario should win over defaults",
            )
        })();

        clear_vars(&["ACTIVATEROI_BUILDER_AE_NAME", "ACTIVATEROI_LIBRARY_WIN_RATE_PCT"]);
        result
    }

    #[test]
    fn invalid_env_override_names_the_variable() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ACTIVATEROI_BUILDER_DEFAULT_SCENARIO", "reckless");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected env override failure".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "ACTIVATEROI_BUILDER_DEFAULT_SCENARIO"
                ),
                "error should name the offending variable",
            )
        })();

        clear_vars(&["ACTIVATEROI_BUILDER_DEFAULT_SCENARIO"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(&dir, "[library]\nwin_rate_pct = 140\n")?;

        let error =
            match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
            {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
        let has_message = matches!(
            error,
            ConfigError::Validation(ref message) if message.contains("library.win_rate_pct")
        );
        ensure(has_message, "validation failure should mention library.win_rate_pct")
    }

    #[test]
    fn benchmark_overrides_layer_over_builtin_table() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(
            &dir,
            r#"
[benchmarks]
SaaS = 30
Manufacturing = 14.5
"#,
        )?;

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .map_err(|err| format!("config load failed: {err}"))?;
        let table = config.benchmark_table();

        ensure(
            table.lookup(Industry::Saas).rev_impact_pct == Decimal::from(30),
            "file percentage should replace the built-in SaaS entry",
        )?;
        ensure(
            table.lookup(Industry::Manufacturing).rev_impact_pct == Decimal::new(145, 1),
            "file percentage should add a Manufacturing entry",
        )?;
        ensure(
            table.lookup(Industry::Fintech).rev_impact_pct == Decimal::from(18),
            "untouched industries keep built-in values",
        )
    }

    #[test]
    fn unknown_benchmark_industry_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(&dir, "[benchmarks]\nAgritech = 12\n")?;

        let result =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() });
        ensure(
            matches!(
                result,
                Err(ConfigError::Validation(ref message)) if message.contains("benchmarks.Agritech")
            ),
            "unknown industry should be named",
        )
    }

    #[test]
    fn require_file_reports_missing_path() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            require_file: true,
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(ref path)) if *path == missing),
            "missing required file should be reported",
        )
    }
}
