use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `debtpulse.toml` yields
/// a working configuration pointed at the conventional file names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSources,
    pub risk: RiskThresholds,
    pub overview: OverviewSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overview.recent_from > self.overview.recent_to {
            return Err(ConfigError::ValidationError(format!(
                "overview.recent_from ({}) must not be after overview.recent_to ({})",
                self.overview.recent_from, self.overview.recent_to
            )));
        }
        if self.overview.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "overview.top_n must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Locations of the two tabular sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// The cleaned fiscal time series. Required at load time.
    pub fiscal_path: PathBuf,
    /// The per-country rescue scores. A built-in table is used if it is missing.
    pub scores_path: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            fiscal_path: PathBuf::from("clean_fiscal_data.csv"),
            scores_path: PathBuf::from("all_countries_rescue_score.csv"),
        }
    }
}

/// Score boundaries for the debt distress tiers.
///
/// A score strictly above `high_threshold` is High, strictly above
/// `moderate_threshold` is Moderate, anything else is Low.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub moderate_threshold: f64,
    pub high_threshold: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            moderate_threshold: 3000.0,
            high_threshold: 5000.0,
        }
    }
}

/// Parameters for the regional overview figures.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverviewSettings {
    /// The year whose cross-country average is reported as a key indicator.
    pub indicator_year: i32,
    /// First year (inclusive) of the recent Debt-to-GDP window.
    pub recent_from: i32,
    /// Last year (inclusive) of the recent Debt-to-GDP window.
    pub recent_to: i32,
    /// How many countries the rescue score ranking shows.
    pub top_n: usize,
}

impl Default for OverviewSettings {
    fn default() -> Self {
        Self {
            indicator_year: 2024,
            recent_from: 2010,
            recent_to: 2024,
            top_n: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
        }
    }
}
