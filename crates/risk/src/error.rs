use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Risk thresholds from configuration are invalid: {0}")]
    InvalidThresholds(String),
}
