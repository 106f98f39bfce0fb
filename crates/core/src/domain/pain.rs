use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const HOURS_PER_WEEK_RANGE: RangeInclusive<u32> = 1..=40;
pub const PEOPLE_INVOLVED_RANGE: RangeInclusive<u32> = 1..=20;
pub const HOURLY_COST_OPTIONS: [u32; 5] = [50, 75, 100, 125, 150];
pub const REVENUE_LOST_RANGE: RangeInclusive<u32> = 10_000..=500_000;
pub const REVENUE_LOST_STEP: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataIssueFrequency {
    Daily,
    Weekly,
    Monthly,
    Rarely,
}

impl DataIssueFrequency {
    pub const ALL: [Self; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Rarely];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Rarely => "Rarely",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL.into_iter().find(|frequency| frequency.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for DataIssueFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cost of the status quo as captured by the "Quantify Pain" step.
///
/// Interactive front ends constrain these through sliders and option sets;
/// [`PainInputs::validate`] applies the same bounds to file-driven sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainInputs {
    pub hours_per_week: u32,
    pub people_involved: u32,
    pub hourly_cost: u32,
    pub data_issue_frequency: DataIssueFrequency,
    pub revenue_lost: u32,
}

impl Default for PainInputs {
    fn default() -> Self {
        Self {
            hours_per_week: 15,
            people_involved: 3,
            hourly_cost: 100,
            data_issue_frequency: DataIssueFrequency::Weekly,
            revenue_lost: 50_000,
        }
    }
}

impl PainInputs {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !HOURS_PER_WEEK_RANGE.contains(&self.hours_per_week) {
            return Err(out_of_range("hours_per_week", self.hours_per_week, "1..=40"));
        }
        if !PEOPLE_INVOLVED_RANGE.contains(&self.people_involved) {
            return Err(out_of_range("people_involved", self.people_involved, "1..=20"));
        }
        if !HOURLY_COST_OPTIONS.contains(&self.hourly_cost) {
            return Err(out_of_range("hourly_cost", self.hourly_cost, "one of 50|75|100|125|150"));
        }
        if !REVENUE_LOST_RANGE.contains(&self.revenue_lost)
            || self.revenue_lost % REVENUE_LOST_STEP != 0
        {
            return Err(out_of_range(
                "revenue_lost",
                self.revenue_lost,
                "10000..=500000 in steps of 10000",
            ));
        }
        Ok(())
    }
}

fn out_of_range(field: &'static str, value: u32, expected: &'static str) -> DomainError {
    DomainError::InputOutOfRange { field, value: value.to_string(), expected }
}
