//! Wizard answers supplied as a TOML file, replayed through a [`WizardSession`].

use std::fs;
use std::path::Path;
use std::sync::Arc;

use activateroi_core::audit::TracingAuditSink;
use activateroi_core::config::AppConfig;
use activateroi_core::domain::pain::DataIssueFrequency;
use activateroi_core::domain::profile::{CompanySize, CurrentState, Industry, Warehouse};
use activateroi_core::domain::use_case::UseCaseId;
use activateroi_core::errors::{ApplicationError, DomainError};
use activateroi_core::roi::{BenchmarkRoiCalculator, Scenario};
use activateroi_core::wizard::{WizardSession, WizardStep};
use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WizardInput {
    pub scenario: Option<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    pub profile: Option<ProfileInput>,
    pub pain: Option<PainInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileInput {
    pub company: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub warehouse: Option<String>,
    pub current_state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PainInput {
    pub hours_per_week: Option<u32>,
    pub people_involved: Option<u32>,
    pub hourly_cost: Option<u32>,
    pub data_issue_frequency: Option<String>,
    pub revenue_lost: Option<u32>,
}

impl WizardInput {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read wizard input `{}`", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse wizard input `{}`", path.display()))
    }

    /// Opens a session from config and applies every answer in the file.
    /// Inputs land in the session untouched by navigation; call
    /// [`advance_to_review`] to walk the gates.
    pub fn start_session(
        &self,
        config: &AppConfig,
        scenario_flag: Option<&str>,
        correlation_id: &str,
    ) -> Result<WizardSession, ApplicationError> {
        let calculator = BenchmarkRoiCalculator::new(config.benchmark_table());
        let mut session = WizardSession::new(calculator)
            .with_ae_name(config.builder.ae_name.clone())
            .with_default_scenario(config.builder.default_scenario)
            .with_audit(Arc::new(TracingAuditSink), correlation_id);

        if let Some(profile) = &self.profile {
            apply_profile(&mut session, profile)?;
        }
        for raw in &self.use_cases {
            let id = parse_option("use case", raw, UseCaseId::parse)?;
            if !session.state().use_cases.contains(id) {
                session.toggle_use_case(id);
            }
        }
        if let Some(pain) = &self.pain {
            apply_pain(&mut session, pain)?;
        }
        session.state().pain.validate()?;

        if let Some(raw) = scenario_flag.or(self.scenario.as_deref()) {
            session.set_scenario(parse_option("scenario", raw, Scenario::parse)?);
        }

        Ok(session)
    }
}

/// Advances through every step gate until the review step.
pub fn advance_to_review(session: &mut WizardSession) -> Result<(), ApplicationError> {
    while session.current_step() != WizardStep::Review {
        session.advance().map_err(DomainError::from)?;
    }
    Ok(())
}

fn apply_profile(session: &mut WizardSession, input: &ProfileInput) -> Result<(), DomainError> {
    let industry = input
        .industry
        .as_deref()
        .map(|raw| parse_option("industry", raw, Industry::parse))
        .transpose()?;
    let size = input
        .size
        .as_deref()
        .map(|raw| parse_option("company size", raw, CompanySize::parse))
        .transpose()?;
    let warehouse = input
        .warehouse
        .as_deref()
        .map(|raw| parse_option("warehouse", raw, Warehouse::parse))
        .transpose()?;
    let current_state = input
        .current_state
        .as_deref()
        .map(|raw| parse_option("current state", raw, CurrentState::parse))
        .transpose()?;

    session.update_profile(|profile| {
        if let Some(company) = &input.company {
            profile.company = company.trim().to_owned();
        }
        if let Some(industry) = industry {
            profile.industry = industry;
        }
        if let Some(size) = size {
            profile.size = size;
        }
        if let Some(warehouse) = warehouse {
            profile.warehouse = warehouse;
        }
        if let Some(current_state) = current_state {
            profile.current_state = current_state;
        }
    });
    Ok(())
}

fn apply_pain(session: &mut WizardSession, input: &PainInput) -> Result<(), DomainError> {
    let frequency = input
        .data_issue_frequency
        .as_deref()
        .map(|raw| parse_option("data issue frequency", raw, DataIssueFrequency::parse))
        .transpose()?;

    session.update_pain(|pain| {
        if let Some(hours_per_week) = input.hours_per_week {
            pain.hours_per_week = hours_per_week;
        }
        if let Some(people_involved) = input.people_involved {
            pain.people_involved = people_involved;
        }
        if let Some(hourly_cost) = input.hourly_cost {
            pain.hourly_cost = hourly_cost;
        }
        if let Some(frequency) = frequency {
            pain.data_issue_frequency = frequency;
        }
        if let Some(revenue_lost) = input.revenue_lost {
            pain.revenue_lost = revenue_lost;
        }
    });
    Ok(())
}

fn parse_option<T>(
    kind: &'static str,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, DomainError> {
    parse(raw).ok_or_else(|| DomainError::UnknownOption { kind, value: raw.to_owned() })
}
