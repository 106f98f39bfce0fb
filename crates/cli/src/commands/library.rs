use std::path::Path;

use activateroi_core::audit::{AuditSink, TracingAuditSink};
use activateroi_core::domain::report::ReportRecord;
use activateroi_core::errors::ApplicationError;
use activateroi_core::library::{
    IndustryFilter, KpiCard, LibraryKpis, ReportLibrary, ReportQuery, SortKey,
};
use serde::Serialize;
use uuid::Uuid;

use crate::commands::{load_config, to_data, CommandResult};

const COMMAND: &str = "library";

#[derive(Debug, Default)]
pub struct LibraryArgs<'a> {
    pub search: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub sort: Option<&'a str>,
    pub records: Option<&'a Path>,
}

#[derive(Serialize)]
struct LibraryOutput<'a> {
    sort: SortKey,
    industries: Vec<String>,
    kpis: LibraryKpis,
    cards: Vec<KpiCard>,
    reports: Vec<&'a ReportRecord>,
}

pub fn run(args: LibraryArgs<'_>, config_path: Option<&Path>) -> CommandResult {
    let config = match load_config(COMMAND, config_path) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let sort = match args.sort.map(|raw| (raw, SortKey::parse(raw))) {
        None => SortKey::default(),
        Some((_, Some(sort))) => sort,
        Some((raw, None)) => {
            let error = ApplicationError::Input(format!(
                "unknown sort key `{raw}` (expected created|roi|value)"
            ));
            return CommandResult::from_application_error(COMMAND, error);
        }
    };

    let records_path = args.records.or(config.library.records_path.as_deref());
    let library = match records_path {
        Some(path) => match ReportLibrary::load(path) {
            Ok(library) => library,
            Err(error) => return CommandResult::from_application_error(COMMAND, error),
        },
        None => ReportLibrary::sample(),
    };

    let query = ReportQuery {
        search: args.search.unwrap_or_default().to_owned(),
        industry: args.industry.map(IndustryFilter::parse).unwrap_or_default(),
        sort,
    };
    let reports = library.view(&query);
    let kpis = library.kpis(config.library.win_rate_pct);

    let correlation_id = format!("cli-{}", Uuid::new_v4());
    TracingAuditSink.emit(library.query_event(&query, reports.len(), correlation_id));

    let message = format!("{} of {} reports", reports.len(), library.len());
    let output = LibraryOutput {
        sort,
        industries: library.industries(),
        cards: kpis.cards(),
        kpis,
        reports,
    };
    match to_data(COMMAND, &output) {
        Ok(data) => CommandResult::success_with_data(COMMAND, message, Some(data)),
        Err(result) => result,
    }
}
