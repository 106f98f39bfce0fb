pub mod commands;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use activateroi_core::config::{AppConfig, LoadOptions, LogFormat};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "activateroi",
    about = "ActivateROI operator CLI",
    long_about = "Build data-activation ROI reports from wizard answers, preview scenarios, and query the report library.",
    after_help = "Examples:\n  activateroi build --input acme.toml\n  activateroi preview --input acme.toml\n  activateroi library --sort roi --industry SaaS\n  activateroi config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an activateroi.toml config file")]
    config_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Walk the ROI builder with answers from a TOML file and generate the report")]
    Build {
        #[arg(long, help = "Wizard answers (profile, use_cases, pain, scenario)")]
        input: PathBuf,
        #[arg(long, help = "Scenario to report on: conservative|moderate|aggressive")]
        scenario: Option<String>,
    },
    #[command(about = "Project all three scenarios for a set of wizard answers")]
    Preview {
        #[arg(long, help = "Wizard answers (profile, use_cases, pain, scenario)")]
        input: PathBuf,
    },
    #[command(about = "Search, filter and sort saved reports with library KPIs")]
    Library {
        #[arg(long, help = "Case-insensitive match on prospect, AE or industry")]
        search: Option<String>,
        #[arg(long, help = "Industry label, or All")]
        industry: Option<String>,
        #[arg(long, help = "Sort key: created|roi|value")]
        sort: Option<String>,
        #[arg(long, help = "JSON file of report records (defaults to sample reports)")]
        records: Option<PathBuf>,
    },
    #[command(about = "List builder reference data: industries, sizes, use cases, scenarios")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

fn init_logging(config_path: Option<&Path>) {
    use tracing::Level;

    let config = AppConfig::load(LoadOptions {
        config_path: config_path.map(Path::to_path_buf),
        ..LoadOptions::default()
    })
    .unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config_file.as_deref();
    init_logging(config_path);

    let result = match &cli.command {
        Command::Build { input, scenario } => {
            commands::build::run(input, scenario.as_deref(), config_path)
        }
        Command::Preview { input } => commands::preview::run(input, config_path),
        Command::Library { search, industry, sort, records } => commands::library::run(
            commands::library::LibraryArgs {
                search: search.as_deref(),
                industry: industry.as_deref(),
                sort: sort.as_deref(),
                records: records.as_deref(),
            },
            config_path,
        ),
        Command::Catalog => commands::catalog::run(config_path),
        Command::Config => commands::config::run(config_path),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
