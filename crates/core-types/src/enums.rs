use crate::error::CoreError;
use crate::structs::column_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal debt distress classification derived from a rescue score.
///
/// Variants are declared in increasing severity so that `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a projected series over the forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => f.write_str("Increasing"),
            Trend::Decreasing => f.write_str("Decreasing"),
        }
    }
}

/// The fiscal metrics the engine knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    InflationRate,
    GovernmentDebt,
    NominalGdp,
    DebtToGdp,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::InflationRate,
        Metric::GovernmentDebt,
        Metric::NominalGdp,
        Metric::DebtToGdp,
    ];

    /// The canonical column name used for this metric in a fiscal table.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::InflationRate => "Inflation Rate",
            Metric::GovernmentDebt => "Government Debt",
            Metric::NominalGdp => "Nominal GDP",
            Metric::DebtToGdp => "Debt_to_GDP",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    /// Accepts any spelling that matches a canonical column name once
    /// whitespace, underscores and dashes are ignored ("inflation-rate",
    /// "InflationRate", "Inflation Rate").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = column_key(s);
        Metric::ALL
            .into_iter()
            .find(|m| column_key(m.column()) == key)
            .ok_or_else(|| CoreError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_tiers_order_by_severity() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
    }

    #[test]
    fn metric_parses_loose_spellings() {
        assert_eq!("InflationRate".parse::<Metric>(), Ok(Metric::InflationRate));
        assert_eq!("government_debt".parse::<Metric>(), Ok(Metric::GovernmentDebt));
        assert_eq!(" Nominal GDP ".parse::<Metric>(), Ok(Metric::NominalGdp));
        assert_eq!("debt-to-gdp".parse::<Metric>(), Ok(Metric::DebtToGdp));
        assert!(matches!(
            "Exports".parse::<Metric>(),
            Err(CoreError::UnknownMetric(_))
        ));
    }
}
