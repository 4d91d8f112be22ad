use crate::error::EngineError;
use crate::snapshot::Snapshot;
use loader::{DataLoader, SourceFingerprint};
use risk::RiskClassifier;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Cached {
    fingerprint: SourceFingerprint,
    snapshot: Arc<Snapshot>,
}

/// Memoizes the engine snapshot for a session.
///
/// The first call to [`SnapshotCache::get_or_load`] reads both sources and
/// builds a [`Snapshot`]. Later calls return the same `Arc` until either
/// source file changes on disk (size or modification time) or
/// [`SnapshotCache::invalidate`] is called. The lock is only held while
/// checking or replacing the cached entry; readers work on their own `Arc`.
///
/// Change detection relies on file size and modification time only. A rewrite
/// that preserves both (coarse-mtime filesystems, `cp -p`, `rsync -t`) keeps
/// serving the old snapshot; hosts that replace sources that way must call
/// [`SnapshotCache::invalidate`] afterwards.
pub struct SnapshotCache {
    loader: DataLoader,
    classifier: RiskClassifier,
    state: Mutex<Option<Cached>>,
}

impl SnapshotCache {
    pub fn new(loader: DataLoader, classifier: RiskClassifier) -> Self {
        Self {
            loader,
            classifier,
            state: Mutex::new(None),
        }
    }

    /// Returns the cached snapshot, rebuilding it first if the sources changed.
    ///
    /// A failed load leaves any previous snapshot in place for the next call
    /// to compare against, but is still reported to the caller.
    pub fn get_or_load(&self) -> Result<Arc<Snapshot>, EngineError> {
        let fingerprint = self.loader.fingerprint();
        let mut state = self.lock();

        if let Some(cached) = state.as_ref() {
            if cached.fingerprint == fingerprint {
                tracing::debug!("Serving cached snapshot.");
                return Ok(Arc::clone(&cached.snapshot));
            }
            tracing::info!("Source files changed; rebuilding snapshot.");
        }

        let (fiscal, scores) = self.loader.load()?;
        let snapshot = Arc::new(Snapshot::build(&fiscal, &scores, &self.classifier));

        *state = Some(Cached {
            fingerprint,
            snapshot: Arc::clone(&snapshot),
        });

        Ok(snapshot)
    }

    /// Drops the cached snapshot so the next access reloads from disk.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            tracing::info!("Snapshot cache invalidated.");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Cached>> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a consistent entry.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
