use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

/// (scenario, multiplier mantissa, multiplier scale)
const SCENARIO_MULTIPLIERS: [(Scenario, i64, u32); 3] = [
    (Scenario::Conservative, 6, 1),
    (Scenario::Moderate, 10, 1),
    (Scenario::Aggressive, 15, 1),
];

impl Scenario {
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Moderate, Self::Aggressive];

    pub fn multiplier(&self) -> Decimal {
        SCENARIO_MULTIPLIERS
            .iter()
            .find(|(scenario, _, _)| scenario == self)
            .map(|(_, mantissa, scale)| Decimal::new(*mantissa, *scale))
            .unwrap_or(Decimal::ONE)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Moderate => "Moderate",
            Self::Aggressive => "Aggressive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(Self::Conservative),
            "moderate" => Some(Self::Moderate),
            "aggressive" => Some(Self::Aggressive),
            _ => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Scenario;

    #[test]
    fn multipliers_are_strictly_increasing() {
        assert_eq!(Scenario::Conservative.multiplier(), Decimal::new(6, 1));
        assert_eq!(Scenario::Moderate.multiplier(), Decimal::ONE);
        assert_eq!(Scenario::Aggressive.multiplier(), Decimal::new(15, 1));

        let multipliers: Vec<_> = Scenario::ALL.iter().map(Scenario::multiplier).collect();
        assert!(multipliers.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn default_scenario_is_moderate() {
        assert_eq!(Scenario::default(), Scenario::Moderate);
        assert_eq!(Scenario::parse(" Aggressive "), Some(Scenario::Aggressive));
        assert_eq!(Scenario::parse("optimistic"), None);
    }
}
