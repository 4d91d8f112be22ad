use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to load source data: {0}")]
    Loader(#[from] loader::LoaderError),

    #[error("Risk classifier error: {0}")]
    Risk(#[from] risk::RiskError),
}
