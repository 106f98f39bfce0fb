pub mod fixtures;

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditCategory, AuditEvent, AuditOutcome};
use crate::domain::report::ReportRecord;
use crate::errors::ApplicationError;
use crate::roi::format;

pub const ALL_INDUSTRIES: &str = "All";
pub const DEFAULT_WIN_RATE_PCT: u32 = 67;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Created,
    Roi,
    Value,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Created, Self::Roi, Self::Value];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Roi => "roi",
            Self::Value => "value",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Some(Self::Created),
            "roi" => Some(Self::Roi),
            "value" => Some(Self::Value),
            _ => None,
        }
    }

    /// Descending order for the key.
    fn compare(&self, left: &ReportRecord, right: &ReportRecord) -> Ordering {
        match self {
            Self::Created => right.created.cmp(&left.created),
            Self::Roi => right.roi_ratio.cmp(&left.roi_ratio),
            Self::Value => right.total_value.cmp(&left.total_value),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndustryFilter {
    #[default]
    All,
    Named(String),
}

impl IndustryFilter {
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_INDUSTRIES {
            Self::All
        } else {
            Self::Named(value.to_owned())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_INDUSTRIES,
            Self::Named(name) => name,
        }
    }

    pub fn matches(&self, industry: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == industry,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub search: String,
    pub industry: IndustryFilter,
    pub sort: SortKey,
}

impl ReportQuery {
    fn matches(&self, record: &ReportRecord) -> bool {
        self.industry.matches(&record.industry) && self.matches_search(record)
    }

    fn matches_search(&self, record: &ReportRecord) -> bool {
        let needle = self.search.to_lowercase();
        needle.is_empty()
            || [&record.prospect, &record.ae, &record.industry]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryKpis {
    pub report_count: usize,
    pub average_roi: Decimal,
    pub total_value: Decimal,
    pub win_rate_pct: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
    pub sub: &'static str,
}

impl LibraryKpis {
    pub fn cards(&self) -> Vec<KpiCard> {
        vec![
            KpiCard { label: "Reports", value: self.report_count.to_string(), sub: "This quarter" },
            KpiCard {
                label: "Avg ROI",
                value: format::ratio(self.average_roi),
                sub: "All reports",
            },
            KpiCard {
                label: "Total Value",
                value: format::currency_millions(self.total_value),
                sub: "Cumulative",
            },
            KpiCard {
                label: "Win Rate",
                value: format!("{}%", self.win_rate_pct),
                sub: "Reports to won",
            },
        ]
    }
}

/// Read-only view over saved reports. Every query produces a fresh ordering;
/// the underlying records are never reordered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportLibrary {
    records: Vec<ReportRecord>,
}

impl ReportLibrary {
    pub fn new(records: Vec<ReportRecord>) -> Self {
        Self { records }
    }

    pub fn sample() -> Self {
        Self::new(fixtures::sample_reports())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ApplicationError> {
        serde_json::from_str::<Vec<ReportRecord>>(raw)
            .map(Self::new)
            .map_err(|error| ApplicationError::Library(format!("invalid report records: {error}")))
    }

    pub fn load(path: &Path) -> Result<Self, ApplicationError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            ApplicationError::Library(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn view(&self, query: &ReportQuery) -> Vec<&ReportRecord> {
        let mut matched: Vec<_> =
            self.records.iter().filter(|record| query.matches(record)).collect();
        // Stable, so ties keep collection order.
        matched.sort_by(|left, right| query.sort.compare(left, right));
        matched
    }

    /// `All` followed by each distinct industry in first-seen order.
    pub fn industries(&self) -> Vec<String> {
        let mut industries = vec![ALL_INDUSTRIES.to_owned()];
        for record in &self.records {
            if !industries.iter().any(|known| known == &record.industry) {
                industries.push(record.industry.clone());
            }
        }
        industries
    }

    pub fn query_event(
        &self,
        query: &ReportQuery,
        matched: usize,
        correlation_id: impl Into<String>,
    ) -> AuditEvent {
        AuditEvent::new(
            None,
            correlation_id,
            "library.queried",
            AuditCategory::Library,
            "report-library",
            AuditOutcome::Success,
        )
        .with_metadata("search", query.search.clone())
        .with_metadata("industry", query.industry.label())
        .with_metadata("sort", query.sort.as_str())
        .with_metadata("matched", matched.to_string())
        .with_metadata("total", self.len().to_string())
    }

    /// Aggregates over the whole collection, independent of any query.
    pub fn kpis(&self, win_rate_pct: u32) -> LibraryKpis {
        let total_roi: Decimal = self.records.iter().map(|record| record.roi_ratio).sum();
        let average_roi = total_roi
            .checked_div(Decimal::from(self.records.len()))
            .map(|average| format::round_half_up(average, 1))
            .unwrap_or(Decimal::ZERO);

        LibraryKpis {
            report_count: self.records.len(),
            average_roi,
            total_value: self.records.iter().map(|record| record.total_value).sum(),
            win_rate_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{IndustryFilter, ReportLibrary, ReportQuery, SortKey, DEFAULT_WIN_RATE_PCT};
    use crate::audit::AuditCategory;
    use crate::domain::report::{DealStage, ReportId, ReportRecord, ReportStatus};
    use crate::errors::ApplicationError;

    fn record(id: &str, prospect: &str, industry: &str, value: i64, created: u32) -> ReportRecord {
        ReportRecord {
            id: ReportId(id.to_owned()),
            prospect: prospect.to_owned(),
            industry: industry.to_owned(),
            ae: "Kevin Park".to_owned(),
            use_cases: vec!["Customer Health Scoring".to_owned()],
            total_value: Decimal::from(value),
            roi_ratio: Decimal::from(value) / Decimal::from(50_000),
            deal_stage: DealStage::Proposal,
            status: ReportStatus::Sent,
            created: NaiveDate::from_ymd_opt(2025, 1, created).expect("valid date"),
        }
    }

    fn values(view: &[&ReportRecord]) -> Vec<Decimal> {
        view.iter().map(|record| record.total_value).collect()
    }

    #[test]
    fn sort_by_value_is_descending_regardless_of_input_order() {
        let library = ReportLibrary::new(vec![
            record("a", "Acme", "SaaS", 50_000, 1),
            record("b", "Beta", "Media", 200_000, 2),
            record("c", "Core", "SaaS", 120_000, 3),
        ]);
        let query = ReportQuery { sort: SortKey::Value, ..ReportQuery::default() };

        assert_eq!(
            values(&library.view(&query)),
            vec![Decimal::from(200_000), Decimal::from(120_000), Decimal::from(50_000)]
        );
    }

    #[test]
    fn default_query_returns_everything_newest_first() {
        let library = ReportLibrary::new(vec![
            record("a", "Acme", "SaaS", 50_000, 5),
            record("b", "Beta", "Media", 200_000, 9),
            record("c", "Core", "SaaS", 120_000, 1),
        ]);

        let ids: Vec<_> = library
            .view(&ReportQuery::default())
            .into_iter()
            .map(|record| record.id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn ties_keep_collection_order() {
        let library = ReportLibrary::new(vec![
            record("first", "Acme", "SaaS", 90_000, 4),
            record("second", "Beta", "SaaS", 90_000, 4),
        ]);

        for sort in SortKey::ALL {
            let query = ReportQuery { sort, ..ReportQuery::default() };
            let ids: Vec<_> =
                library.view(&query).into_iter().map(|record| record.id.0.as_str()).collect();
            assert_eq!(ids, vec!["first", "second"], "sort key {}", sort.as_str());
        }
    }

    #[test]
    fn search_is_case_insensitive_across_prospect_ae_and_industry() {
        let library = ReportLibrary::sample();

        let by_prospect = ReportQuery { search: "LEDGER".to_owned(), ..ReportQuery::default() };
        assert_eq!(library.view(&by_prospect).len(), 1);

        let by_ae = ReportQuery { search: "maya".to_owned(), ..ReportQuery::default() };
        assert!(library.view(&by_ae).iter().all(|record| record.ae == "Maya Chen"));
        assert_eq!(library.view(&by_ae).len(), 2);

        let by_industry = ReportQuery { search: "commerce".to_owned(), ..ReportQuery::default() };
        assert!(library.view(&by_industry).iter().all(|record| record.industry == "E-commerce"));
    }

    #[test]
    fn search_text_is_matched_as_typed() {
        let library = ReportLibrary::sample();

        let trailing_space = ReportQuery { search: "chen ".to_owned(), ..ReportQuery::default() };
        assert!(library.view(&trailing_space).is_empty());

        let inner_space = ReportQuery { search: "maya chen".to_owned(), ..ReportQuery::default() };
        assert_eq!(library.view(&inner_space).len(), 2);
    }

    #[test]
    fn query_event_is_a_library_audit_record() {
        let library = ReportLibrary::sample();
        let query = ReportQuery {
            industry: IndustryFilter::parse("Media"),
            sort: SortKey::Value,
            ..ReportQuery::default()
        };
        let matched = library.view(&query).len();

        let event = library.query_event(&query, matched, "req-lib");

        assert_eq!(event.category, AuditCategory::Library);
        assert_eq!(event.event_type, "library.queried");
        assert_eq!(event.correlation_id, "req-lib");
        assert_eq!(event.metadata.get("industry").map(String::as_str), Some("Media"));
        assert_eq!(event.metadata.get("sort").map(String::as_str), Some("value"));
        assert_eq!(event.metadata.get("matched").map(String::as_str), Some("1"));
        assert_eq!(event.metadata.get("total").map(String::as_str), Some("8"));
    }

    #[test]
    fn industry_filter_combines_with_search() {
        let library = ReportLibrary::sample();
        let query = ReportQuery {
            search: "priya".to_owned(),
            industry: IndustryFilter::parse("SaaS"),
            sort: SortKey::Roi,
        };

        let view = library.view(&query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].prospect, "Orbit Labs");
        assert!(library.view(&ReportQuery {
            industry: IndustryFilter::Named("Nowhere".to_owned()),
            ..ReportQuery::default()
        })
        .is_empty());
    }

    #[test]
    fn industries_list_all_then_first_seen_order() {
        let industries = ReportLibrary::sample().industries();

        assert_eq!(
            industries,
            vec!["All", "SaaS", "E-commerce", "Fintech", "Healthcare", "Media", "Marketplace"]
        );
    }

    #[test]
    fn kpis_cover_the_unfiltered_collection() {
        let kpis = ReportLibrary::sample().kpis(DEFAULT_WIN_RATE_PCT);
        let cards = kpis.cards();

        assert_eq!(kpis.report_count, 8);
        // 41.0 / 8 = 5.125
        assert_eq!(kpis.average_roi, Decimal::new(51, 1));
        assert_eq!(kpis.total_value, Decimal::from(2_464_000));
        assert_eq!(cards[1].value, "5.1:1");
        assert_eq!(cards[2].value, "$2.5M");
        assert_eq!(cards[3].value, "67%");
    }

    #[test]
    fn empty_library_reports_zero_average() {
        let kpis = ReportLibrary::default().kpis(50);

        assert_eq!(kpis.report_count, 0);
        assert_eq!(kpis.average_roi, Decimal::ZERO);
        assert_eq!(kpis.total_value, Decimal::ZERO);
    }

    #[test]
    fn sort_key_and_filter_parse() {
        assert_eq!(SortKey::parse("ROI"), Some(SortKey::Roi));
        assert_eq!(SortKey::parse("newest"), None);
        assert_eq!(IndustryFilter::parse("All"), IndustryFilter::All);
        assert_eq!(IndustryFilter::parse(""), IndustryFilter::All);
        assert_eq!(IndustryFilter::parse("all"), IndustryFilter::Named("all".to_owned()));
        assert_eq!(IndustryFilter::parse(" Media "), IndustryFilter::Named(" Media ".to_owned()));
        assert!(!IndustryFilter::parse(" Media ").matches("Media"));
    }

    #[test]
    fn records_load_from_json() {
        let records = serde_json::to_string(&ReportLibrary::sample().records()).unwrap_or_default();
        let library = ReportLibrary::from_json_str(&records);
        assert!(matches!(library, Ok(ref library) if library.len() == 8));

        let invalid = ReportLibrary::from_json_str("{\"not\": \"a list\"}");
        assert!(matches!(invalid, Err(ApplicationError::Library(_))));
    }
}
