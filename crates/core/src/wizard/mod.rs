pub mod engine;
pub mod payload;
pub mod session;
pub mod states;

pub use engine::{RoiBuilderWizard, WizardDefinition, WizardEngine, WizardTransitionError};
pub use payload::{InMemoryReportView, ReportPayload, ReportView};
pub use session::{WizardSession, DEFAULT_AE_NAME};
pub use states::{
    SessionId, TransitionOutcome, WizardAction, WizardEvent, WizardState, WizardStep,
};
