use thiserror::Error;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::wizard::states::{
    TransitionOutcome, WizardAction, WizardEvent, WizardState, WizardStep,
};

pub trait WizardDefinition {
    fn initial_state(&self) -> WizardState;
    /// Required fields of the current step that are still unset.
    fn missing_fields(&self, state: &WizardState) -> Vec<String>;
    fn transition(
        &self,
        state: &WizardState,
        event: &WizardEvent,
    ) -> Result<TransitionOutcome, WizardTransitionError>;
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WizardTransitionError {
    #[error("cannot leave {step:?} until required fields are set: {missing_fields:?}")]
    GateBlocked { step: WizardStep, missing_fields: Vec<String> },
    #[error("cannot jump ahead from {from:?} to {to:?}")]
    JumpAhead { from: WizardStep, to: WizardStep },
    #[error("a report can only be generated from the review step, current step is {step:?}")]
    GenerateOutsideReview { step: WizardStep },
}

type Gate = fn(&WizardState) -> Option<&'static str>;

struct StepRule {
    gate: Gate,
    next: WizardStep,
    previous: WizardStep,
    on_enter: &'static [WizardAction],
}

fn company_gate(state: &WizardState) -> Option<&'static str> {
    (!state.profile.has_company()).then_some("profile.company")
}

fn use_case_gate(state: &WizardState) -> Option<&'static str> {
    state.use_cases.is_empty().then_some("use_cases")
}

fn open_gate(_state: &WizardState) -> Option<&'static str> {
    None
}

// Indexed by `WizardStep::index`.
const STEP_RULES: [StepRule; 5] = [
    StepRule {
        gate: company_gate,
        next: WizardStep::UseCases,
        previous: WizardStep::Profile,
        on_enter: &[],
    },
    StepRule {
        gate: use_case_gate,
        next: WizardStep::Pain,
        previous: WizardStep::Profile,
        on_enter: &[],
    },
    StepRule {
        gate: open_gate,
        next: WizardStep::Assumptions,
        previous: WizardStep::UseCases,
        on_enter: &[],
    },
    StepRule {
        gate: open_gate,
        next: WizardStep::Review,
        previous: WizardStep::Pain,
        on_enter: &[WizardAction::PreviewScenarios],
    },
    StepRule {
        gate: open_gate,
        next: WizardStep::Review,
        previous: WizardStep::Assumptions,
        on_enter: &[WizardAction::ReviewProjection],
    },
];

fn rule(step: WizardStep) -> &'static StepRule {
    &STEP_RULES[step.index()]
}

/// The five-step ROI builder: profile, use cases, pain, assumptions, review.
#[derive(Clone, Debug, Default)]
pub struct RoiBuilderWizard;

impl WizardDefinition for RoiBuilderWizard {
    fn initial_state(&self) -> WizardState {
        WizardState::default()
    }

    fn missing_fields(&self, state: &WizardState) -> Vec<String> {
        (rule(state.current_step).gate)(state).map(str::to_owned).into_iter().collect()
    }

    fn transition(
        &self,
        state: &WizardState,
        event: &WizardEvent,
    ) -> Result<TransitionOutcome, WizardTransitionError> {
        transition_builder(state, event)
    }
}

pub struct WizardEngine<W> {
    wizard: W,
}

impl<W> WizardEngine<W>
where
    W: WizardDefinition,
{
    pub fn new(wizard: W) -> Self {
        Self { wizard }
    }

    pub fn initial_state(&self) -> WizardState {
        self.wizard.initial_state()
    }

    pub fn can_advance(&self, state: &WizardState) -> bool {
        self.wizard.missing_fields(state).is_empty()
    }

    pub fn apply(
        &self,
        state: &WizardState,
        event: &WizardEvent,
    ) -> Result<TransitionOutcome, WizardTransitionError> {
        self.wizard.transition(state, event)
    }

    pub fn apply_with_audit<S>(
        &self,
        state: &WizardState,
        event: &WizardEvent,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<TransitionOutcome, WizardTransitionError>
    where
        S: AuditSink + ?Sized,
    {
        let result = self.apply(state, event);
        match &result {
            Ok(outcome) => {
                sink.emit(
                    AuditEvent::new(
                        audit.session_id.clone(),
                        audit.correlation_id.clone(),
                        "wizard.transition_applied",
                        AuditCategory::Wizard,
                        audit.actor.clone(),
                        AuditOutcome::Success,
                    )
                    .with_metadata("from", format!("{:?}", outcome.from))
                    .with_metadata("to", format!("{:?}", outcome.to))
                    .with_metadata("event", format!("{:?}", outcome.event)),
                );
            }
            Err(error) => {
                sink.emit(
                    AuditEvent::new(
                        audit.session_id.clone(),
                        audit.correlation_id.clone(),
                        "wizard.transition_rejected",
                        AuditCategory::Wizard,
                        audit.actor.clone(),
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("step", format!("{:?}", state.current_step))
                    .with_metadata("error", error.to_string()),
                );
            }
        }
        result
    }
}

impl Default for WizardEngine<RoiBuilderWizard> {
    fn default() -> Self {
        Self::new(RoiBuilderWizard)
    }
}

fn transition_builder(
    state: &WizardState,
    event: &WizardEvent,
) -> Result<TransitionOutcome, WizardTransitionError> {
    let current = state.current_step;
    let current_rule = rule(current);

    let to = match event {
        WizardEvent::Advance => {
            if let Some(missing) = (current_rule.gate)(state) {
                return Err(WizardTransitionError::GateBlocked {
                    step: current,
                    missing_fields: vec![missing.to_owned()],
                });
            }
            current_rule.next
        }
        WizardEvent::Retreat => current_rule.previous,
        WizardEvent::JumpTo(target) => {
            if target > &current {
                return Err(WizardTransitionError::JumpAhead { from: current, to: *target });
            }
            *target
        }
    };

    let actions = if to == current { Vec::new() } else { rule(to).on_enter.to_vec() };

    Ok(TransitionOutcome { from: current, to, event: *event, actions })
}

#[cfg(test)]
mod tests {
    use crate::audit::{AuditContext, AuditOutcome, InMemoryAuditSink};
    use crate::domain::use_case::UseCaseId;
    use crate::wizard::engine::{
        RoiBuilderWizard, WizardDefinition, WizardEngine, WizardTransitionError,
    };
    use crate::wizard::states::{WizardAction, WizardEvent, WizardState, WizardStep};

    fn ready_state(step: WizardStep) -> WizardState {
        let mut state = WizardState { current_step: step, ..WizardState::default() };
        state.profile.company = "Acme Corp".to_owned();
        state.use_cases.toggle(UseCaseId::LeadScoring);
        state
    }

    #[test]
    fn happy_path_walks_every_step_in_order() {
        let engine = WizardEngine::default();
        let mut state = ready_state(WizardStep::Profile);
        let mut visited = vec![state.current_step];

        for _ in 0..4 {
            let outcome = engine.apply(&state, &WizardEvent::Advance).expect("advance");
            state.current_step = outcome.to;
            visited.push(outcome.to);
        }

        assert_eq!(visited, WizardStep::ALL.to_vec());
    }

    #[test]
    fn advance_from_profile_requires_company() {
        let engine = WizardEngine::default();
        let mut state = engine.initial_state();

        assert!(!engine.can_advance(&state));
        let error = engine.apply(&state, &WizardEvent::Advance).expect_err("company is empty");
        assert_eq!(
            error,
            WizardTransitionError::GateBlocked {
                step: WizardStep::Profile,
                missing_fields: vec!["profile.company".to_owned()],
            }
        );

        state.profile.company = "Acme Corp".to_owned();
        let outcome = engine.apply(&state, &WizardEvent::Advance).expect("company is set");
        assert_eq!(outcome.to, WizardStep::UseCases);
    }

    #[test]
    fn advance_from_use_cases_requires_a_selection() {
        let engine = WizardEngine::default();
        let mut state = ready_state(WizardStep::UseCases);
        state.use_cases.toggle(UseCaseId::LeadScoring);

        assert!(matches!(
            engine.apply(&state, &WizardEvent::Advance),
            Err(WizardTransitionError::GateBlocked { step: WizardStep::UseCases, .. })
        ));
        assert_eq!(RoiBuilderWizard.missing_fields(&state), vec!["use_cases".to_owned()]);
    }

    #[test]
    fn later_steps_are_ungated_even_with_empty_inputs() {
        let engine = WizardEngine::default();
        let state = WizardState { current_step: WizardStep::Pain, ..WizardState::default() };

        let outcome = engine.apply(&state, &WizardEvent::Advance).expect("pain is ungated");
        assert_eq!(outcome.to, WizardStep::Assumptions);
        assert_eq!(outcome.actions, vec![WizardAction::PreviewScenarios]);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let engine = WizardEngine::default();

        let first = ready_state(WizardStep::Profile);
        let outcome = engine.apply(&first, &WizardEvent::Retreat).expect("retreat is total");
        assert_eq!(outcome.to, WizardStep::Profile);
        assert!(outcome.actions.is_empty());

        let last = ready_state(WizardStep::Review);
        let outcome = engine.apply(&last, &WizardEvent::Advance).expect("advance clamps");
        assert_eq!(outcome.to, WizardStep::Review);
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn jump_only_moves_backwards_or_stays() {
        let engine = WizardEngine::default();
        let state = ready_state(WizardStep::Pain);

        let back = engine
            .apply(&state, &WizardEvent::JumpTo(WizardStep::Profile))
            .expect("jump back is allowed");
        assert_eq!(back.to, WizardStep::Profile);

        let same = engine
            .apply(&state, &WizardEvent::JumpTo(WizardStep::Pain))
            .expect("jump to current is allowed");
        assert_eq!(same.to, WizardStep::Pain);

        let error = engine
            .apply(&state, &WizardEvent::JumpTo(WizardStep::Review))
            .expect_err("jump ahead is rejected");
        assert_eq!(
            error,
            WizardTransitionError::JumpAhead { from: WizardStep::Pain, to: WizardStep::Review }
        );
    }

    #[test]
    fn entering_review_requests_projection_review() {
        let engine = WizardEngine::default();
        let state = ready_state(WizardStep::Assumptions);

        let outcome = engine.apply(&state, &WizardEvent::Advance).expect("advance");
        assert_eq!(outcome.actions, vec![WizardAction::ReviewProjection]);
    }

    #[test]
    fn rejected_transition_emits_audit_event() {
        let engine = WizardEngine::default();
        let sink = InMemoryAuditSink::default();

        let _ = engine.apply_with_audit(
            &WizardState::default(),
            &WizardEvent::Advance,
            &sink,
            &AuditContext::new(None, "req-7", "roi-builder"),
        );

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "wizard.transition_rejected");
        assert_eq!(events[0].outcome, AuditOutcome::Rejected);
        assert_eq!(events[0].metadata.get("step").map(String::as_str), Some("Profile"));
    }
}
