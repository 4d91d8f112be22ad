use crate::cells::{find_header, normalize_headers, parse_number};
use crate::error::LoaderError;
use core_types::{ScoreRecord, ScoreTable};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// The synthetic table substituted when the score source does not exist.
/// (country, rescue score, transparency)
const FALLBACK_SCORES: [(&str, f64, f64); 5] = [
    ("Nigeria", 85.0, 12.0),
    ("Ghana", 72.0, 15.0),
    ("Kenya", 68.0, 18.0),
    ("Egypt", 65.0, 20.0),
    ("South Africa", 45.0, 25.0),
];

/// Builds the fallback score table. It is always flagged with `is_fallback`.
pub fn fallback_scores() -> ScoreTable {
    let records = FALLBACK_SCORES
        .iter()
        .map(|&(country, score, transparency)| ScoreRecord::new(country, score, Some(transparency)))
        .collect();
    ScoreTable::new(records, true)
}

/// Reads a score table from any CSV reader.
///
/// `Country` and `RescueScore` (any spelling, e.g. `Rescue_Score`) are
/// required; `Transparency` is optional per row. Rows without a usable score
/// or repeating an earlier country are skipped with a warning.
pub fn read_score_table<R: Read>(reader: R, origin: &Path) -> Result<ScoreTable, LoaderError> {
    let csv_error = |source| LoaderError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = normalize_headers(reader.headers().map_err(csv_error)?);

    let country_idx = find_header(&headers, "Country").ok_or(LoaderError::MissingColumn {
        path: origin.to_path_buf(),
        column: "Country",
    })?;
    let score_idx = find_header(&headers, "RescueScore").ok_or(LoaderError::MissingColumn {
        path: origin.to_path_buf(),
        column: "RescueScore",
    })?;
    let transparency_idx = find_header(&headers, "Transparency");

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(csv_error)?;
        let line = line + 2;

        let country = row.get(country_idx).unwrap_or_default();
        if country.is_empty() {
            tracing::warn!(source = %origin.display(), line, "Skipping score row without a country.");
            continue;
        }

        let Some(score) = row.get(score_idx).and_then(parse_number) else {
            tracing::warn!(source = %origin.display(), line, country, "Skipping score row without a numeric rescue score.");
            continue;
        };

        if !seen.insert(country.to_string()) {
            tracing::warn!(source = %origin.display(), line, country, "Duplicate country in score table; keeping the first row.");
            continue;
        }

        let transparency = transparency_idx
            .and_then(|idx| row.get(idx))
            .and_then(parse_number);

        records.push(ScoreRecord::new(country, score, transparency));
    }

    tracing::info!(source = %origin.display(), rows = records.len(), "Loaded score table.");

    Ok(ScoreTable::new(records, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> Result<ScoreTable, LoaderError> {
        read_score_table(csv.as_bytes(), Path::new("scores.csv"))
    }

    #[test]
    fn fallback_has_five_flagged_countries() {
        let table = fallback_scores();
        assert!(table.is_fallback);
        assert_eq!(table.len(), 5);
        assert_eq!(table.get("Nigeria").map(|r| r.rescue_score), Some(85.0));
        assert_eq!(table.get("South Africa").and_then(|r| r.transparency), Some(25.0));
        assert!(table.records.iter().all(|r| r.risk_tier.is_none()));
    }

    #[test]
    fn reads_alternate_score_header() {
        let table = read("Country , Rescue_Score,Transparency\nNigeria,85,12\nKenya,68,\n").unwrap();
        assert!(!table.is_fallback);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].rescue_score, 85.0);
        assert_eq!(table.records[1].transparency, None);
    }

    #[test]
    fn skips_unscored_and_duplicate_rows() {
        let table = read("Country,RescueScore\nGhana,n/a\nEgypt,65\nEgypt,99\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].country, "Egypt");
        assert_eq!(table.records[0].rescue_score, 65.0);
    }

    #[test]
    fn missing_score_column_is_reported() {
        let err = read("Country,Transparency\nGhana,15\n").unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn { column: "RescueScore", .. }));
    }
}
