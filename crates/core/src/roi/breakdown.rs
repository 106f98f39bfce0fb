use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::roi::calculator::RoiProjection;
use crate::roi::format;

pub const PAYBACK_CURVE_MONTHS: u32 = 12;
const DAYS_PER_MONTH: i64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCategoryKind {
    OperationalEfficiency,
    RevenueImpact,
    ChurnReduction,
    DataQuality,
}

impl ValueCategoryKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OperationalEfficiency => "Operational Efficiency",
            Self::RevenueImpact => "Revenue Impact",
            Self::ChurnReduction => "Churn Reduction",
            Self::DataQuality => "Data Quality",
        }
    }

    pub fn sublabel(&self) -> &'static str {
        match self {
            Self::OperationalEfficiency => "Time savings from automation",
            Self::RevenueImpact => "Better data, better selling",
            Self::ChurnReduction => "Proactive customer success",
            Self::DataQuality => "Fewer errors, better compliance",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCategory {
    pub kind: ValueCategoryKind,
    pub label: String,
    pub sublabel: String,
    pub value: Decimal,
    pub share_pct: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaybackPoint {
    pub month: u32,
    pub label: String,
    pub cumulative_value: Decimal,
    pub cost: Decimal,
}

/// Presentation-ready view of one projection: category shares, the first-year
/// value curve against the investment, and the executive summary sentence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBreakdown {
    pub categories: Vec<ValueCategory>,
    pub payback_curve: Vec<PaybackPoint>,
    pub payback_month: Decimal,
    pub headline_ratio: String,
    pub summary: String,
}

impl ReportBreakdown {
    pub fn build(company: &str, projection: &RoiProjection) -> Self {
        Self {
            categories: value_categories(projection),
            payback_curve: payback_curve(projection),
            payback_month: (Decimal::from(projection.payback_days) / Decimal::from(DAYS_PER_MONTH))
                .round_dp(1),
            headline_ratio: format::ratio(projection.roi_ratio),
            summary: executive_summary(company, projection),
        }
    }
}

/// Non-zero value components with their whole-percent share of the total.
pub fn value_categories(projection: &RoiProjection) -> Vec<ValueCategory> {
    [
        (ValueCategoryKind::OperationalEfficiency, projection.time_savings),
        (ValueCategoryKind::RevenueImpact, projection.rev_impact),
        (ValueCategoryKind::ChurnReduction, projection.churn_reduction),
        (ValueCategoryKind::DataQuality, projection.data_quality),
    ]
    .into_iter()
    .filter(|(_, value)| *value > Decimal::ZERO)
    .map(|(kind, value)| ValueCategory {
        kind,
        label: kind.label().to_owned(),
        sublabel: kind.sublabel().to_owned(),
        value,
        share_pct: share_pct(value, projection.total_value),
    })
    .collect()
}

fn share_pct(value: Decimal, total: Decimal) -> u32 {
    use rust_decimal::prelude::ToPrimitive;

    (value * Decimal::ONE_HUNDRED)
        .checked_div(total)
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_u32())
        .unwrap_or(0)
}

/// Month 0 through 12 of cumulative value, accruing evenly across the year.
pub fn payback_curve(projection: &RoiProjection) -> Vec<PaybackPoint> {
    let monthly = projection.total_value / Decimal::from(PAYBACK_CURVE_MONTHS);
    (0..=PAYBACK_CURVE_MONTHS)
        .map(|month| PaybackPoint {
            month,
            label: if month == 0 { "Start".to_owned() } else { format!("M{month}") },
            cumulative_value: (monthly * Decimal::from(month))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            cost: projection.investment_cost,
        })
        .collect()
}

pub fn executive_summary(company: &str, projection: &RoiProjection) -> String {
    let mut summary = format!(
        "By implementing data activation, {company} is projected to save {} in operational costs",
        format::currency(projection.time_savings)
    );
    if projection.rev_impact > Decimal::ZERO {
        summary.push_str(&format!(
            ", generate {} in incremental revenue",
            format::currency(projection.rev_impact)
        ));
    }
    if projection.churn_reduction > Decimal::ZERO {
        summary.push_str(&format!(
            ", reduce churn-related losses by {}",
            format::currency(projection.churn_reduction)
        ));
    }
    summary.push_str(&format!(
        ", resulting in a total annual value of {} against an investment of {}: \
         a {} ROI with payback in {} days.",
        format::currency(projection.total_value),
        format::currency(projection.investment_cost),
        format::ratio(projection.roi_ratio),
        projection.payback_days
    ));
    summary
}
