use core_types::Trend;
use serde::{Deserialize, Serialize};

/// A fitted quadratic `c0 + c1·t + c2·t²` with `t = year - origin`.
///
/// Years are centered on the mean of the fitted years, which keeps the
/// normal equations well conditioned for four-digit year values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticFit {
    pub origin: f64,
    /// Ascending powers of `t`.
    pub coefficients: [f64; 3],
}

impl QuadraticFit {
    pub fn evaluate(&self, year: f64) -> f64 {
        let t = year - self.origin;
        let [c0, c1, c2] = self.coefficients;
        c0 + t * (c1 + t * c2)
    }
}

/// Historical series and projection for one country and metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub country: String,
    pub metric: String,
    pub historical_years: Vec<i32>,
    pub historical_values: Vec<f64>,
    pub projected_years: Vec<i32>,
    pub projected_values: Vec<f64>,
    pub trend: Trend,
    pub fit: QuadraticFit,
}

/// Either a projection or an explicit refusal to forecast.
///
/// Callers must branch on this; there are no numeric fields to read when the
/// history is too thin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Projected(ForecastResult),
    InsufficientData {
        country: String,
        metric: String,
        /// Valid (year, value) pairs found.
        available: usize,
        /// Pairs needed before a fit is attempted.
        required: usize,
    },
}

impl ForecastOutcome {
    pub fn result(&self) -> Option<&ForecastResult> {
        match self {
            ForecastOutcome::Projected(result) => Some(result),
            ForecastOutcome::InsufficientData { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, ForecastOutcome::InsufficientData { .. })
    }
}
