use crate::error::RiskError;
use configuration::RiskThresholds;
use core_types::{RiskTier, ScoreTable};

/// Maps rescue scores to debt distress tiers.
///
/// The default boundaries are 3000 and 5000. Note that published rescue scores
/// are two-digit values, so with the defaults every country lands in `Low`.
/// The boundaries are kept as they are until the scoring scale is confirmed.
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    params: RiskThresholds,
}

impl RiskClassifier {
    /// Creates a classifier with the given thresholds.
    pub fn new(params: RiskThresholds) -> Result<Self, RiskError> {
        if !params.moderate_threshold.is_finite() || !params.high_threshold.is_finite() {
            return Err(RiskError::InvalidThresholds(
                "thresholds must be finite numbers".to_string(),
            ));
        }
        if params.moderate_threshold >= params.high_threshold {
            return Err(RiskError::InvalidThresholds(format!(
                "moderate_threshold ({}) must be below high_threshold ({})",
                params.moderate_threshold, params.high_threshold
            )));
        }
        Ok(Self { params })
    }

    /// Total over `f64`: anything that is not strictly above a threshold,
    /// NaN included, falls through to `Low`.
    pub fn classify(&self, score: f64) -> RiskTier {
        if score > self.params.high_threshold {
            RiskTier::High
        } else if score > self.params.moderate_threshold {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// Returns a copy of `table` with every record's tier populated.
    pub fn apply(&self, table: &ScoreTable) -> ScoreTable {
        let mut classified = table.clone();
        for record in &mut classified.records {
            record.risk_tier = Some(self.classify(record.rescue_score));
        }

        let high = classified
            .records
            .iter()
            .filter(|r| r.risk_tier == Some(RiskTier::High))
            .count();
        tracing::debug!(
            rows = classified.len(),
            high,
            fallback = classified.is_fallback,
            "Classified score table."
        );

        classified
    }
}

/// Classifies a score with the default thresholds.
pub fn classify(score: f64) -> RiskTier {
    RiskClassifier::default().classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ScoreRecord;

    #[test]
    fn boundaries_are_exclusive_below() {
        assert_eq!(classify(5000.5), RiskTier::High);
        assert_eq!(classify(5000.0), RiskTier::Moderate);
        assert_eq!(classify(3000.5), RiskTier::Moderate);
        assert_eq!(classify(3000.0), RiskTier::Low);
        assert_eq!(classify(-10.0), RiskTier::Low);
    }

    #[test]
    fn two_digit_scores_are_low() {
        assert_eq!(classify(85.0), RiskTier::Low);
    }

    #[test]
    fn classification_is_total() {
        assert_eq!(classify(f64::NAN), RiskTier::Low);
        assert_eq!(classify(f64::INFINITY), RiskTier::High);
        assert_eq!(classify(f64::NEG_INFINITY), RiskTier::Low);
    }

    #[test]
    fn tier_never_decreases_as_score_rises() {
        let mut previous = RiskTier::Low;
        for step in 0..=800 {
            let tier = classify(f64::from(step) * 10.0);
            assert!(tier >= previous, "tier dropped at score {}", step * 10);
            previous = tier;
        }
        assert_eq!(previous, RiskTier::High);
    }

    #[test]
    fn apply_fills_every_record_without_touching_input() {
        let table = ScoreTable::new(
            vec![
                ScoreRecord::new("A", 6000.0, None),
                ScoreRecord::new("B", 4000.0, None),
                ScoreRecord::new("C", 85.0, Some(12.0)),
            ],
            false,
        );

        let classified = RiskClassifier::default().apply(&table);
        let tiers: Vec<_> = classified.records.iter().map(|r| r.risk_tier).collect();
        assert_eq!(
            tiers,
            vec![Some(RiskTier::High), Some(RiskTier::Moderate), Some(RiskTier::Low)]
        );
        assert!(table.records.iter().all(|r| r.risk_tier.is_none()));
    }

    #[test]
    fn custom_thresholds_are_validated() {
        let inverted = RiskThresholds {
            moderate_threshold: 60.0,
            high_threshold: 50.0,
        };
        assert!(RiskClassifier::new(inverted).is_err());

        let rescaled = RiskClassifier::new(RiskThresholds {
            moderate_threshold: 50.0,
            high_threshold: 70.0,
        })
        .unwrap();
        assert_eq!(rescaled.classify(85.0), RiskTier::High);
        assert_eq!(rescaled.classify(65.0), RiskTier::Moderate);
    }
}
