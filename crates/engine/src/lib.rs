//! # DebtPulse Engine
//!
//! Wires the loader, risk classifier and analytics into one immutable
//! [`Snapshot`], and memoizes it per session with a [`SnapshotCache`].
//!
//! There is no process-wide state: the host creates the cache, usually via
//! [`from_config`], and passes snapshots by `Arc` to whatever needs them.

use configuration::Config;
use loader::DataLoader;
use risk::RiskClassifier;

pub mod cache;
pub mod error;
pub mod snapshot;

pub use cache::SnapshotCache;
pub use error::EngineError;
pub use snapshot::Snapshot;

/// Builds a snapshot cache from the `[data]` and `[risk]` configuration.
pub fn from_config(config: &Config) -> Result<SnapshotCache, EngineError> {
    let classifier = RiskClassifier::new(config.risk.clone())?;
    let loader = DataLoader::new(&config.data);
    tracing::debug!(
        fiscal = %loader.fiscal_path().display(),
        scores = %loader.scores_path().display(),
        "Engine configured."
    );
    Ok(SnapshotCache::new(loader, classifier))
}
