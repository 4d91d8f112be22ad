//! # DebtPulse Data Loader
//!
//! Turns the two comma-delimited sources into canonical in-memory tables.
//!
//! - The fiscal source is mandatory. Failing to read it is fatal for the caller.
//! - The score source is tolerant of absence: if the file does not exist the
//!   built-in fallback table is returned instead, flagged with
//!   `ScoreTable::is_fallback`.
//!
//! Loading is a plain read. Memoization lives one layer up, in the `engine`
//! crate, which uses [`DataLoader::fingerprint`] to decide when to reload.

use configuration::DataSources;
use core_types::{FiscalTable, ScoreTable};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

mod cells;
pub mod error;
pub mod fiscal;
pub mod scores;

pub use error::LoaderError;
pub use fiscal::read_fiscal_table;
pub use scores::{fallback_scores, read_score_table};

/// Size and modification time of a source file, used to notice changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

/// The observed state of both sources. `None` means the file was not readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub fiscal: Option<FileStamp>,
    pub scores: Option<FileStamp>,
}

#[derive(Debug, Clone)]
pub struct DataLoader {
    fiscal_path: PathBuf,
    scores_path: PathBuf,
}

impl DataLoader {
    pub fn new(sources: &DataSources) -> Self {
        Self {
            fiscal_path: sources.fiscal_path.clone(),
            scores_path: sources.scores_path.clone(),
        }
    }

    pub fn fiscal_path(&self) -> &Path {
        &self.fiscal_path
    }

    pub fn scores_path(&self) -> &Path {
        &self.scores_path
    }

    /// Reads both sources.
    pub fn load(&self) -> Result<(FiscalTable, ScoreTable), LoaderError> {
        let fiscal = self.load_fiscal()?;
        let scores = self.load_scores()?;
        Ok((fiscal, scores))
    }

    pub fn load_fiscal(&self) -> Result<FiscalTable, LoaderError> {
        let file = File::open(&self.fiscal_path).map_err(|source| LoaderError::SourceUnavailable {
            path: self.fiscal_path.clone(),
            source,
        })?;
        read_fiscal_table(BufReader::new(file), &self.fiscal_path)
    }

    /// Reads the score source, substituting [`fallback_scores`] only when the
    /// file does not exist. Any other I/O or parse failure is returned.
    pub fn load_scores(&self) -> Result<ScoreTable, LoaderError> {
        match File::open(&self.scores_path) {
            Ok(file) => read_score_table(BufReader::new(file), &self.scores_path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    source = %self.scores_path.display(),
                    "Score source not found; using the built-in fallback table."
                );
                Ok(fallback_scores())
            }
            Err(source) => Err(LoaderError::SourceUnavailable {
                path: self.scores_path.clone(),
                source,
            }),
        }
    }

    pub fn fingerprint(&self) -> SourceFingerprint {
        SourceFingerprint {
            fiscal: stamp(&self.fiscal_path),
            scores: stamp(&self.scores_path),
        }
    }
}

fn stamp(path: &Path) -> Option<FileStamp> {
    let meta = std::fs::metadata(path).ok()?;
    Some(FileStamp {
        len: meta.len(),
        modified: meta.modified().ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader_in(dir: &TempDir) -> DataLoader {
        DataLoader::new(&DataSources {
            fiscal_path: dir.path().join("fiscal.csv"),
            scores_path: dir.path().join("scores.csv"),
        })
    }

    #[test]
    fn missing_score_source_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fiscal.csv"), "Country,Year\nGhana,2021\n").unwrap();

        let (fiscal, scores) = loader_in(&dir).load().unwrap();
        assert_eq!(fiscal.len(), 1);
        assert!(scores.is_fallback);
        assert_eq!(scores.len(), 5);
    }

    #[test]
    fn present_score_source_is_not_fallback() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fiscal.csv"), "Country,Year\nGhana,2021\n").unwrap();
        fs::write(dir.path().join("scores.csv"), "Country,RescueScore,Transparency\nGhana,72,15\n").unwrap();

        let (_, scores) = loader_in(&dir).load().unwrap();
        assert!(!scores.is_fallback);
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn missing_fiscal_source_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = loader_in(&dir).load().unwrap_err();
        assert!(matches!(err, LoaderError::SourceUnavailable { .. }));
    }

    #[test]
    fn fingerprint_tracks_file_changes() {
        let dir = TempDir::new().unwrap();
        let loader = loader_in(&dir);
        assert_eq!(loader.fingerprint().fiscal, None);

        fs::write(loader.fiscal_path(), "Country,Year\n").unwrap();
        let before = loader.fingerprint();
        assert!(before.fiscal.is_some());

        fs::write(loader.fiscal_path(), "Country,Year\nGhana,2021\n").unwrap();
        assert_ne!(loader.fingerprint(), before);
    }
}
