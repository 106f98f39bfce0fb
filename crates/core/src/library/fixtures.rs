use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::report::{DealStage, ReportId, ReportRecord, ReportStatus};

struct SampleReport {
    id: &'static str,
    prospect: &'static str,
    industry: &'static str,
    ae: &'static str,
    use_cases: &'static [&'static str],
    total_value: i64,
    // Tenths, so 42 is 4.2:1.
    roi_tenths: i64,
    deal_stage: DealStage,
    status: ReportStatus,
    created: (i32, u32, u32),
}

const SAMPLES: &[SampleReport] = &[
    SampleReport {
        id: "rpt-001",
        prospect: "Brightline Analytics",
        industry: "SaaS",
        ae: "Kevin Park",
        use_cases: &["Lead Scoring & Routing", "Product-Led Growth Signals"],
        total_value: 284_000,
        roi_tenths: 59,
        deal_stage: DealStage::Negotiation,
        status: ReportStatus::Presented,
        created: (2025, 1, 14),
    },
    SampleReport {
        id: "rpt-002",
        prospect: "Cartwheel Commerce",
        industry: "E-commerce",
        ae: "Maya Chen",
        use_cases: &["Sales Audience Sync", "Ad Audience Personalization"],
        total_value: 412_500,
        roi_tenths: 57,
        deal_stage: DealStage::ClosedWon,
        status: ReportStatus::Presented,
        created: (2025, 1, 9),
    },
    SampleReport {
        id: "rpt-003",
        prospect: "Ledgerly",
        industry: "Fintech",
        ae: "Kevin Park",
        use_cases: &["Customer Health Scoring"],
        total_value: 318_000,
        roi_tenths: 44,
        deal_stage: DealStage::Proposal,
        status: ReportStatus::Sent,
        created: (2025, 1, 21),
    },
    SampleReport {
        id: "rpt-004",
        prospect: "Northwind Clinics",
        industry: "Healthcare",
        ae: "Jordan Ellis",
        use_cases: &["Operational Workflow Automation"],
        total_value: 156_000,
        roi_tenths: 33,
        deal_stage: DealStage::Discovery,
        status: ReportStatus::Draft,
        created: (2025, 1, 27),
    },
    SampleReport {
        id: "rpt-005",
        prospect: "Streamcast Media",
        industry: "Media",
        ae: "Maya Chen",
        use_cases: &[
            "Sales Audience Sync",
            "Customer Health Scoring",
            "Ad Audience Personalization",
        ],
        total_value: 547_000,
        roi_tenths: 76,
        deal_stage: DealStage::ClosedWon,
        status: ReportStatus::Presented,
        created: (2024, 12, 18),
    },
    SampleReport {
        id: "rpt-006",
        prospect: "Tradepost",
        industry: "Marketplace",
        ae: "Jordan Ellis",
        use_cases: &["Lead Scoring & Routing", "Sales Audience Sync"],
        total_value: 233_000,
        roi_tenths: 49,
        deal_stage: DealStage::Negotiation,
        status: ReportStatus::Sent,
        created: (2025, 1, 3),
    },
    SampleReport {
        id: "rpt-007",
        prospect: "Orbit Labs",
        industry: "SaaS",
        ae: "Priya Raman",
        use_cases: &["Product-Led Growth Signals", "Customer Health Scoring"],
        total_value: 371_000,
        roi_tenths: 52,
        deal_stage: DealStage::Proposal,
        status: ReportStatus::Presented,
        created: (2025, 2, 2),
    },
    SampleReport {
        id: "rpt-008",
        prospect: "Fernway Outfitters",
        industry: "E-commerce",
        ae: "Priya Raman",
        use_cases: &["Ad Audience Personalization"],
        total_value: 142_500,
        roi_tenths: 40,
        deal_stage: DealStage::Discovery,
        status: ReportStatus::Draft,
        created: (2024, 12, 30),
    },
];

/// Saved reports used when no records file is configured.
pub fn sample_reports() -> Vec<ReportRecord> {
    SAMPLES
        .iter()
        .filter_map(|sample| {
            let (year, month, day) = sample.created;
            let created = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(ReportRecord {
                id: ReportId(sample.id.to_owned()),
                prospect: sample.prospect.to_owned(),
                industry: sample.industry.to_owned(),
                ae: sample.ae.to_owned(),
                use_cases: sample.use_cases.iter().map(|label| (*label).to_owned()).collect(),
                total_value: Decimal::from(sample.total_value),
                roi_ratio: Decimal::new(sample.roi_tenths, 1),
                deal_stage: sample.deal_stage,
                status: sample.status,
                created,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{sample_reports, SAMPLES};

    #[test]
    fn every_sample_has_a_valid_date_and_unique_id() {
        let reports = sample_reports();
        let ids: BTreeSet<_> = reports.iter().map(|report| report.id.0.clone()).collect();

        assert_eq!(reports.len(), SAMPLES.len());
        assert_eq!(ids.len(), reports.len());
    }
}
