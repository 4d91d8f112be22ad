use analytics::{DEBT_TO_GDP, ForecastOutcome, derive_debt_to_gdp, forecast};
use core_types::{FiscalTable, ScoreTable};
use risk::RiskClassifier;
use std::sync::Arc;

/// The engine's immutable view of the data: the fiscal table with derived
/// columns and the score table with risk tiers.
///
/// A snapshot is never mutated after construction. Hosts share it through
/// `Arc` and replace it wholesale when the sources change.
#[derive(Debug, Clone)]
pub struct Snapshot {
    fiscal: Arc<FiscalTable>,
    scores: Arc<ScoreTable>,
}

impl Snapshot {
    /// Derives Debt-to-GDP on `fiscal` and classifies every row of `scores`.
    pub fn build(fiscal: &FiscalTable, scores: &ScoreTable, classifier: &RiskClassifier) -> Self {
        Self {
            fiscal: Arc::new(derive_debt_to_gdp(fiscal)),
            scores: Arc::new(classifier.apply(scores)),
        }
    }

    pub fn fiscal(&self) -> &FiscalTable {
        &self.fiscal
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// `true` if the score table is the built-in substitute.
    pub fn uses_fallback_scores(&self) -> bool {
        self.scores.is_fallback
    }

    /// `true` only if the derived `Debt_to_GDP` column exists; a similarly
    /// named source column does not count.
    pub fn has_debt_to_gdp(&self) -> bool {
        self.fiscal.columns.iter().any(|c| c == DEBT_TO_GDP)
    }

    pub fn forecast(&self, country: &str, metric: &str) -> ForecastOutcome {
        forecast(&self.fiscal, country, metric)
    }
}
