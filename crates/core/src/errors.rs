use thiserror::Error;

use crate::wizard::engine::WizardTransitionError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    WizardTransition(#[from] WizardTransitionError),
    #[error("{field} value {value} is out of range (expected {expected})")]
    InputOutOfRange { field: &'static str, value: String, expected: &'static str },
    #[error("unknown {kind} `{value}`")]
    UnknownOption { kind: &'static str, value: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("input failure: {0}")]
    Input(String),
    #[error("report library failure: {0}")]
    Library(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError};
    use crate::wizard::engine::WizardTransitionError;
    use crate::wizard::states::WizardStep;

    #[test]
    fn gate_failure_converts_into_domain_application_error() {
        let error = ApplicationError::from(DomainError::from(WizardTransitionError::GateBlocked {
            step: WizardStep::Profile,
            missing_fields: vec!["profile.company".to_owned()],
        }));

        assert!(matches!(error, ApplicationError::Domain(DomainError::WizardTransition(_))));
        assert!(error.to_string().contains("profile.company"));
    }

    #[test]
    fn out_of_range_message_names_field_and_bounds() {
        let error = DomainError::InputOutOfRange {
            field: "hours_per_week",
            value: "41".to_owned(),
            expected: "1..=40",
        };

        assert_eq!(error.to_string(), "hours_per_week value 41 is out of range (expected 1..=40)");
    }

    #[test]
    fn application_messages_name_the_failing_layer() {
        assert_eq!(
            ApplicationError::Input("missing [profile] table".to_owned()).to_string(),
            "input failure: missing [profile] table"
        );
        assert_eq!(
            ApplicationError::Configuration("win rate above 100".to_owned()).to_string(),
            "configuration failure: win rate above 100"
        );
    }
}
