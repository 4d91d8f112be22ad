use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DataSources, LogFormat, LoggingSettings, OverviewSettings, RiskThresholds,
};

/// The file looked up when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "debtpulse.toml";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path`
/// (or `debtpulse.toml` if present), then `DEBTPULSE__SECTION__KEY`
/// environment variables. An explicitly given file must exist; the default
/// one is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("DEBTPULSE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let config = Config::default();
        assert_eq!(config.data.fiscal_path, Path::new("clean_fiscal_data.csv"));
        assert_eq!(config.risk.high_threshold, 5000.0);
        assert_eq!(config.risk.moderate_threshold, 3000.0);
        assert_eq!(config.overview.indicator_year, 2024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_file_overrides_selected_fields() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[data]\nfiscal_path = \"data/fiscal.csv\"\n\n[overview]\ntop_n = 5\n"
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.data.fiscal_path, Path::new("data/fiscal.csv"));
        assert_eq!(
            config.data.scores_path,
            Path::new("all_countries_rescue_score.csv")
        );
        assert_eq!(config.overview.top_n, 5);
        assert_eq!(config.overview.recent_from, 2010);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = load_config(Some(Path::new("definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut config = Config::default();
        config.overview.recent_from = 2025;
        config.overview.recent_to = 2010;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
