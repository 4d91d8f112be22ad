use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(
        "Unknown metric '{0}'. Expected one of: Inflation Rate, Government Debt, Nominal GDP, Debt_to_GDP"
    )]
    UnknownMetric(String),
}
