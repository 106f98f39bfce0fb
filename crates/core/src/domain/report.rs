use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStage {
    Discovery,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
}

impl DealStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovery => "Discovery",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Draft,
    Sent,
    Presented,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Presented => "Presented",
        }
    }
}

/// Summary of a previously generated report, as listed by the report library.
///
/// Records come from outside the builder, so `industry` and `use_cases` are
/// free-form labels rather than catalog enums.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: ReportId,
    pub prospect: String,
    pub industry: String,
    pub ae: String,
    pub use_cases: Vec<String>,
    pub total_value: Decimal,
    pub roi_ratio: Decimal,
    pub deal_stage: DealStage,
    pub status: ReportStatus,
    pub created: NaiveDate,
}
