use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "SaaS")]
    Saas,
    #[serde(rename = "E-commerce")]
    Ecommerce,
    Fintech,
    Healthcare,
    Media,
    Marketplace,
    Manufacturing,
    Education,
    Other,
}

impl Industry {
    pub const ALL: [Self; 9] = [
        Self::Saas,
        Self::Ecommerce,
        Self::Fintech,
        Self::Healthcare,
        Self::Media,
        Self::Marketplace,
        Self::Manufacturing,
        Self::Education,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Saas => "SaaS",
            Self::Ecommerce => "E-commerce",
            Self::Fintech => "Fintech",
            Self::Healthcare => "Healthcare",
            Self::Media => "Media",
            Self::Marketplace => "Marketplace",
            Self::Manufacturing => "Manufacturing",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL.into_iter().find(|industry| industry.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Employee-count bands offered by the profile step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-50")]
    UpTo50,
    #[serde(rename = "51-200")]
    UpTo200,
    #[serde(rename = "201-500")]
    UpTo500,
    #[serde(rename = "501-1000")]
    UpTo1000,
    #[serde(rename = "1000-5000")]
    UpTo5000,
    #[serde(rename = "5000+")]
    Over5000,
}

impl CompanySize {
    pub const ALL: [Self; 6] = [
        Self::UpTo50,
        Self::UpTo200,
        Self::UpTo500,
        Self::UpTo1000,
        Self::UpTo5000,
        Self::Over5000,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpTo50 => "1-50",
            Self::UpTo200 => "51-200",
            Self::UpTo500 => "201-500",
            Self::UpTo1000 => "501-1000",
            Self::UpTo5000 => "1000-5000",
            Self::Over5000 => "5000+",
        }
    }

    /// Lower bound of the band, used by the investment tier table.
    pub fn min_employees(&self) -> u32 {
        match self {
            Self::UpTo50 => 1,
            Self::UpTo200 => 51,
            Self::UpTo500 => 201,
            Self::UpTo1000 => 501,
            Self::UpTo5000 => 1000,
            Self::Over5000 => 5000,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL.into_iter().find(|size| size.label() == wanted)
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Warehouse {
    Snowflake,
    BigQuery,
    Databricks,
    Redshift,
    #[serde(rename = "PostgreSQL")]
    Postgres,
    Other,
}

impl Warehouse {
    pub const ALL: [Self; 6] = [
        Self::Snowflake,
        Self::BigQuery,
        Self::Databricks,
        Self::Redshift,
        Self::Postgres,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Snowflake => "Snowflake",
            Self::BigQuery => "BigQuery",
            Self::Databricks => "Databricks",
            Self::Redshift => "Redshift",
            Self::Postgres => "PostgreSQL",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL.into_iter().find(|warehouse| warehouse.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Warehouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the prospect moves warehouse data into business tools today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentState {
    #[serde(rename = "Manual CSV exports")]
    ManualCsvExports,
    #[serde(rename = "Custom scripts")]
    CustomScripts,
    #[serde(rename = "Legacy ETL tool")]
    LegacyEtl,
    #[serde(rename = "Another reverse ETL vendor")]
    OtherReverseEtl,
    #[serde(rename = "No integration")]
    NoIntegration,
}

impl CurrentState {
    pub const ALL: [Self; 5] = [
        Self::ManualCsvExports,
        Self::CustomScripts,
        Self::LegacyEtl,
        Self::OtherReverseEtl,
        Self::NoIntegration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ManualCsvExports => "Manual CSV exports",
            Self::CustomScripts => "Custom scripts",
            Self::LegacyEtl => "Legacy ETL tool",
            Self::OtherReverseEtl => "Another reverse ETL vendor",
            Self::NoIntegration => "No integration",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL.into_iter().find(|state| state.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for CurrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub company: String,
    pub industry: Industry,
    pub size: CompanySize,
    pub warehouse: Warehouse,
    pub current_state: CurrentState,
}

impl Profile {
    pub fn has_company(&self) -> bool {
        !self.company.is_empty()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            company: String::new(),
            industry: Industry::Saas,
            size: CompanySize::UpTo500,
            warehouse: Warehouse::Snowflake,
            current_state: CurrentState::ManualCsvExports,
        }
    }
}
