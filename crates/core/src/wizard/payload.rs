use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pain::PainInputs;
use crate::domain::profile::Profile;
use crate::domain::use_case::UseCase;
use crate::roi::breakdown::ReportBreakdown;
use crate::roi::calculator::{RoiProjection, ScenarioProjections};
use crate::roi::scenario::Scenario;
use crate::wizard::states::SessionId;

/// Finalized builder output handed to the report view.
///
/// Profile and selected-scenario projection fields are flattened into the top
/// level; `all_scenarios` carries every scenario so the view never recomputes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub profile: Profile,
    pub ae_name: String,
    pub use_cases: Vec<UseCase>,
    pub pain: PainInputs,
    pub scenario: Scenario,
    #[serde(flatten)]
    pub projection: RoiProjection,
    pub all_scenarios: ScenarioProjections,
    pub generated_at: DateTime<Utc>,
}

impl ReportPayload {
    pub fn breakdown(&self) -> ReportBreakdown {
        ReportBreakdown::build(&self.profile.company, &self.projection)
    }
}

/// Receives generated reports. Rendering, export and sharing live behind this seam.
pub trait ReportView: Send + Sync {
    fn present(&self, payload: ReportPayload);
}

#[derive(Clone, Default)]
pub struct InMemoryReportView {
    presented: Arc<Mutex<Vec<ReportPayload>>>,
}

impl InMemoryReportView {
    pub fn presented(&self) -> Vec<ReportPayload> {
        match self.presented.lock() {
            Ok(presented) => presented.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ReportView for InMemoryReportView {
    fn present(&self, payload: ReportPayload) {
        match self.presented.lock() {
            Ok(mut presented) => presented.push(payload),
            Err(poisoned) => poisoned.into_inner().push(payload),
        }
    }
}
