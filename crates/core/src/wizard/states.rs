use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::pain::PainInputs;
use crate::domain::profile::Profile;
use crate::domain::use_case::UseCaseSelection;
use crate::roi::scenario::Scenario;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(format!("sess-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Profile,
    UseCases,
    Pain,
    Assumptions,
    Review,
}

impl WizardStep {
    pub const ALL: [Self; 5] =
        [Self::Profile, Self::UseCases, Self::Pain, Self::Assumptions, Self::Review];
    pub const FIRST: Self = Self::Profile;
    pub const LAST: Self = Self::Review;

    pub fn index(&self) -> usize {
        match self {
            Self::Profile => 0,
            Self::UseCases => 1,
            Self::Pain => 2,
            Self::Assumptions => 3,
            Self::Review => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Profile => "Prospect Profile",
            Self::UseCases => "Use Cases",
            Self::Pain => "Quantify Pain",
            Self::Assumptions => "Assumptions",
            Self::Review => "Generate",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    Advance,
    Retreat,
    JumpTo(WizardStep),
}

/// Everything the builder has collected so far. Projections are never stored
/// here; they are recomputed from these inputs whenever they are read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub profile: Profile,
    pub pain: PainInputs,
    pub use_cases: UseCaseSelection,
    pub scenario: Scenario,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    PreviewScenarios,
    ReviewProjection,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: WizardStep,
    pub to: WizardStep,
    pub event: WizardEvent,
    pub actions: Vec<WizardAction>,
}
