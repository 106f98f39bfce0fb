use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Data activation use cases offered by the builder. Variant order is catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCaseId {
    LeadScoring,
    AudienceSync,
    AdPersonalization,
    ProductLedGrowth,
    HealthScoring,
    OpsAutomation,
}

impl UseCaseId {
    pub const ALL: [Self; 6] = [
        Self::LeadScoring,
        Self::AudienceSync,
        Self::AdPersonalization,
        Self::ProductLedGrowth,
        Self::HealthScoring,
        Self::OpsAutomation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeadScoring => "lead_scoring",
            Self::AudienceSync => "audience_sync",
            Self::AdPersonalization => "ad_personalization",
            Self::ProductLedGrowth => "product_led_growth",
            Self::HealthScoring => "health_scoring",
            Self::OpsAutomation => "ops_automation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|id| id.as_str() == wanted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LeadScoring => "Lead Scoring & Routing",
            Self::AudienceSync => "Sales Audience Sync",
            Self::AdPersonalization => "Ad Audience Personalization",
            Self::ProductLedGrowth => "Product-Led Growth Signals",
            Self::HealthScoring => "Customer Health Scoring",
            Self::OpsAutomation => "Operational Workflow Automation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::LeadScoring => {
                "Push warehouse-computed lead scores into the CRM and route hot leads instantly."
            }
            Self::AudienceSync => {
                "Keep account and contact lists in sales tools in sync with the warehouse."
            }
            Self::AdPersonalization => {
                "Activate first-party segments in ad platforms for targeting and suppression."
            }
            Self::ProductLedGrowth => {
                "Surface product usage signals to sales for expansion and conversion plays."
            }
            Self::HealthScoring => {
                "Deliver health scores to customer success so at-risk accounts get attention early."
            }
            Self::OpsAutomation => {
                "Replace manual exports with scheduled syncs into support, billing and ops tools."
            }
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::LeadScoring => "Crosshair",
            Self::AudienceSync => "Users",
            Self::AdPersonalization => "Megaphone",
            Self::ProductLedGrowth => "Rocket",
            Self::HealthScoring => "HeartPulse",
            Self::OpsAutomation => "Settings",
        }
    }

    /// Selecting this use case unlocks the churn reduction component.
    pub fn reduces_churn(&self) -> bool {
        matches!(self, Self::HealthScoring)
    }
}

impl fmt::Display for UseCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: UseCaseId,
    pub label: String,
    pub description: String,
    pub icon: String,
}

impl From<UseCaseId> for UseCase {
    fn from(id: UseCaseId) -> Self {
        Self {
            id,
            label: id.label().to_owned(),
            description: id.description().to_owned(),
            icon: id.icon().to_owned(),
        }
    }
}

pub fn catalog() -> Vec<UseCase> {
    UseCaseId::ALL.into_iter().map(UseCase::from).collect()
}

/// Set of selected use cases. Iteration follows catalog order, not insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UseCaseSelection(BTreeSet<UseCaseId>);

impl UseCaseSelection {
    pub fn new(ids: impl IntoIterator<Item = UseCaseId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Adds `id` when absent, removes it when present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: UseCaseId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(&self, id: UseCaseId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = UseCaseId> + '_ {
        self.0.iter().copied()
    }

    pub fn includes_churn_reduction(&self) -> bool {
        self.ids().any(|id| id.reduces_churn())
    }

    pub fn expand(&self) -> Vec<UseCase> {
        self.ids().map(UseCase::from).collect()
    }
}
