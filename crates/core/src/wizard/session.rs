use std::sync::Arc;

use chrono::Utc;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::pain::PainInputs;
use crate::domain::profile::Profile;
use crate::domain::use_case::UseCaseId;
use crate::roi::calculator::{
    BenchmarkRoiCalculator, ProjectionInput, RoiCalculator, RoiProjection, ScenarioProjections,
};
use crate::roi::scenario::Scenario;
use crate::wizard::engine::{RoiBuilderWizard, WizardEngine, WizardTransitionError};
use crate::wizard::payload::{ReportPayload, ReportView};
use crate::wizard::states::{SessionId, TransitionOutcome, WizardEvent, WizardState, WizardStep};

pub const DEFAULT_AE_NAME: &str = "Kevin Park";

struct SessionAudit {
    sink: Arc<dyn AuditSink>,
    context: AuditContext,
}

/// One user's pass through the ROI builder.
///
/// Rejected transitions leave the state untouched, so a blocked `advance`
/// behaves as a no-op for callers that ignore the error.
pub struct WizardSession<C = BenchmarkRoiCalculator> {
    id: SessionId,
    engine: WizardEngine<RoiBuilderWizard>,
    calculator: C,
    state: WizardState,
    ae_name: String,
    default_scenario: Scenario,
    audit: Option<SessionAudit>,
}

impl Default for WizardSession<BenchmarkRoiCalculator> {
    fn default() -> Self {
        Self::new(BenchmarkRoiCalculator::default())
    }
}

impl<C> WizardSession<C>
where
    C: RoiCalculator,
{
    pub fn new(calculator: C) -> Self {
        let engine = WizardEngine::default();
        let state = engine.initial_state();
        Self {
            id: SessionId::generate(),
            engine,
            calculator,
            state,
            ae_name: DEFAULT_AE_NAME.to_owned(),
            default_scenario: Scenario::default(),
            audit: None,
        }
    }

    pub fn with_ae_name(mut self, ae_name: impl Into<String>) -> Self {
        self.ae_name = ae_name.into();
        self
    }

    /// Scenario preselected on creation and after [`WizardSession::reset`].
    pub fn with_default_scenario(mut self, scenario: Scenario) -> Self {
        self.default_scenario = scenario;
        self.state.scenario = scenario;
        self
    }

    pub fn with_audit(
        mut self,
        sink: Arc<dyn AuditSink>,
        correlation_id: impl Into<String>,
    ) -> Self {
        let context = AuditContext::new(Some(self.id.clone()), correlation_id, "roi-builder");
        self.audit = Some(SessionAudit { sink, context });
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn can_advance(&self) -> bool {
        self.engine.can_advance(&self.state)
    }

    pub fn advance(&mut self) -> Result<TransitionOutcome, WizardTransitionError> {
        self.apply(WizardEvent::Advance)
    }

    pub fn retreat(&mut self) -> Result<TransitionOutcome, WizardTransitionError> {
        self.apply(WizardEvent::Retreat)
    }

    pub fn jump_to(
        &mut self,
        step: WizardStep,
    ) -> Result<TransitionOutcome, WizardTransitionError> {
        self.apply(WizardEvent::JumpTo(step))
    }

    fn apply(&mut self, event: WizardEvent) -> Result<TransitionOutcome, WizardTransitionError> {
        let outcome = match &self.audit {
            Some(audit) => self.engine.apply_with_audit(
                &self.state,
                &event,
                audit.sink.as_ref(),
                &audit.context,
            ),
            None => self.engine.apply(&self.state, &event),
        }?;
        self.state.current_step = outcome.to;
        Ok(outcome)
    }

    pub fn update_profile(&mut self, update: impl FnOnce(&mut Profile)) {
        update(&mut self.state.profile);
    }

    pub fn update_pain(&mut self, update: impl FnOnce(&mut PainInputs)) {
        update(&mut self.state.pain);
    }

    pub fn toggle_use_case(&mut self, id: UseCaseId) -> bool {
        self.state.use_cases.toggle(id)
    }

    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.state.scenario = scenario;
    }

    fn projection_input(&self) -> ProjectionInput<'_> {
        ProjectionInput {
            profile: &self.state.profile,
            pain: &self.state.pain,
            use_cases: &self.state.use_cases,
        }
    }

    /// What-if projection for any scenario; does not change the selected one.
    pub fn preview(&self, scenario: Scenario) -> RoiProjection {
        self.calculator.project(self.projection_input(), scenario)
    }

    pub fn preview_all(&self) -> ScenarioProjections {
        self.calculator.project_all(self.projection_input())
    }

    pub fn generate(&self) -> Result<ReportPayload, WizardTransitionError> {
        if self.state.current_step != WizardStep::Review {
            let error =
                WizardTransitionError::GenerateOutsideReview { step: self.state.current_step };
            self.emit_generation(AuditOutcome::Rejected, |event| {
                event.with_metadata("error", error.to_string())
            });
            return Err(error);
        }

        let all_scenarios = self.preview_all();
        let projection = all_scenarios.get(self.state.scenario).clone();
        let payload = ReportPayload {
            session_id: self.id.clone(),
            profile: self.state.profile.clone(),
            ae_name: self.ae_name.clone(),
            use_cases: self.state.use_cases.expand(),
            pain: self.state.pain.clone(),
            scenario: self.state.scenario,
            projection,
            all_scenarios,
            generated_at: Utc::now(),
        };

        tracing::debug!(
            event_name = "wizard.report_generated",
            session_id = %self.id,
            scenario = %payload.scenario,
            total_value = %payload.projection.total_value,
            payback_days = payload.projection.payback_days,
            "roi report generated"
        );
        self.emit_generation(AuditOutcome::Success, |event| {
            event
                .with_metadata("scenario", payload.scenario.as_str())
                .with_metadata("total_value", payload.projection.total_value.to_string())
                .with_metadata("roi_ratio", payload.projection.roi_ratio.round_dp(2).to_string())
        });

        Ok(payload)
    }

    /// Generates and hands the payload to `view`.
    pub fn generate_into<V>(&self, view: &V) -> Result<(), WizardTransitionError>
    where
        V: ReportView + ?Sized,
    {
        view.present(self.generate()?);
        Ok(())
    }

    /// Back to a fresh session with default inputs, as when the user leaves the report.
    pub fn reset(&mut self) {
        self.state = WizardState { scenario: self.default_scenario, ..self.engine.initial_state() };
        self.id = SessionId::generate();
        if let Some(audit) = &mut self.audit {
            audit.context.session_id = Some(self.id.clone());
        }
    }

    fn emit_generation(
        &self,
        outcome: AuditOutcome,
        decorate: impl FnOnce(AuditEvent) -> AuditEvent,
    ) {
        if let Some(audit) = &self.audit {
            let event = AuditEvent::new(
                audit.context.session_id.clone(),
                audit.context.correlation_id.clone(),
                "projection.report_generated",
                AuditCategory::Projection,
                audit.context.actor.clone(),
                outcome,
            );
            audit.sink.emit(decorate(event));
        }
    }
}
