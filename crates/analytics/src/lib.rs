//! # DebtPulse Analytics
//!
//! Pure calculations over the fiscal and score tables.
//!
//! - [`derive`]: the Debt-to-GDP ratio.
//! - [`forecast`]: quadratic trend projection over the 2025–2030 horizon.
//! - [`summary`]: cross-country aggregates for the overview.
//!
//! Nothing here performs I/O or keeps state; every function takes a table by
//! reference and returns a new value.

// Declare the modules that constitute this crate.
pub mod derive;
pub mod forecast;
pub mod report;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use derive::{DEBT_TO_GDP, debt_to_gdp, derive_debt_to_gdp};
pub use forecast::{HORIZON, MIN_POINTS, classify_trend, fit_quadratic, forecast};
pub use report::{ForecastOutcome, ForecastResult, QuadraticFit};
pub use summary::{Coverage, Observation, mean_for_year, metric_window, top_by_rescue_score, years_reported};
