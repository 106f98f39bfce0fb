use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::profile::Industry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    /// Share of lost revenue recovered per activated use case, in percent.
    pub rev_impact_pct: Decimal,
}

impl BenchmarkEntry {
    pub fn new(rev_impact_pct: Decimal) -> Self {
        Self { rev_impact_pct }
    }

    pub fn rev_impact_fraction(&self) -> Decimal {
        self.rev_impact_pct / Decimal::ONE_HUNDRED
    }
}

/// Industry benchmark lookup. Industries without an explicit entry use the `Other` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchmarkTable {
    entries: BTreeMap<Industry, BenchmarkEntry>,
    other: BenchmarkEntry,
}

impl BenchmarkTable {
    pub fn new(other: BenchmarkEntry) -> Self {
        Self { entries: BTreeMap::new(), other }
    }

    pub fn with_entry(mut self, industry: Industry, entry: BenchmarkEntry) -> Self {
        self.set(industry, entry);
        self
    }

    pub fn set(&mut self, industry: Industry, entry: BenchmarkEntry) {
        if industry == Industry::Other {
            self.other = entry;
        } else {
            self.entries.insert(industry, entry);
        }
    }

    pub fn lookup(&self, industry: Industry) -> BenchmarkEntry {
        self.entries.get(&industry).copied().unwrap_or(self.other)
    }

    pub fn has_explicit_entry(&self, industry: Industry) -> bool {
        industry == Industry::Other || self.entries.contains_key(&industry)
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        let pct = |value: i64| BenchmarkEntry::new(Decimal::from(value));

        Self::new(pct(10))
            .with_entry(Industry::Saas, pct(20))
            .with_entry(Industry::Ecommerce, pct(25))
            .with_entry(Industry::Fintech, pct(18))
            .with_entry(Industry::Healthcare, pct(12))
            .with_entry(Industry::Media, pct(15))
            .with_entry(Industry::Marketplace, pct(22))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{BenchmarkEntry, BenchmarkTable};
    use crate::domain::profile::Industry;

    #[test]
    fn unlisted_industries_fall_back_to_other() {
        let table = BenchmarkTable::default();

        assert!(!table.has_explicit_entry(Industry::Manufacturing));
        assert_eq!(table.lookup(Industry::Manufacturing), table.lookup(Industry::Other));
        assert_eq!(table.lookup(Industry::Education).rev_impact_pct, Decimal::from(10));
    }

    #[test]
    fn saas_benchmark_is_twenty_percent() {
        let entry = BenchmarkTable::default().lookup(Industry::Saas);
        assert_eq!(entry.rev_impact_fraction(), Decimal::new(2, 1));
    }

    #[test]
    fn overriding_other_changes_every_fallback() {
        let mut table = BenchmarkTable::default();
        table.set(Industry::Other, BenchmarkEntry::new(Decimal::from(7)));

        assert_eq!(table.lookup(Industry::Education).rev_impact_pct, Decimal::from(7));
        assert_eq!(table.lookup(Industry::Saas).rev_impact_pct, Decimal::from(20));
    }
}
