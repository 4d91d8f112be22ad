use crate::enums::RiskTier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Normalizes a column name for loose matching: whitespace, underscores and
/// dashes are dropped and the rest is lowercased.
///
/// `"Government Debt"`, `"GovernmentDebt"` and `"government_debt"` all map to
/// `"governmentdebt"`.
pub fn column_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// One country-year row of the fiscal source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalRecord {
    pub country: String,
    /// `None` when the source cell was empty or not an integral year.
    pub year: Option<i32>,
    /// Numeric cells keyed by their (trimmed) column name. A missing key is a
    /// missing value; it is never stored as zero.
    pub values: BTreeMap<String, f64>,
    /// Non-numeric cells that are passed through untouched.
    pub text: BTreeMap<String, String>,
}

impl FiscalRecord {
    pub fn new(country: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            country: country.into(),
            year,
            values: BTreeMap::new(),
            text: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly used when assembling tables by hand.
    pub fn with_value(mut self, column: impl Into<String>, value: f64) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }
}

/// The fiscal time-series table: ordered column names plus ordered rows.
///
/// Tables are treated as immutable snapshots. Anything that "adds" to a table
/// returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiscalTable {
    pub columns: Vec<String>,
    pub records: Vec<FiscalRecord>,
}

impl FiscalTable {
    pub fn new(columns: Vec<String>, records: Vec<FiscalRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the actual column name for `name`. An exact match wins; otherwise
    /// the first column equal under [`column_key`] rules is returned.
    pub fn resolve_column(&self, name: &str) -> Option<&str> {
        if let Some(exact) = self.columns.iter().find(|c| c.as_str() == name) {
            return Some(exact.as_str());
        }
        let key = column_key(name);
        self.columns
            .iter()
            .find(|c| column_key(c) == key)
            .map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.resolve_column(name).is_some()
    }

    /// Unique countries in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.country.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Returns a copy of this table with `column` appended and filled from
    /// `values`, which must be index-aligned with `records`. `None` leaves the
    /// cell absent.
    pub fn with_column(&self, column: &str, values: Vec<Option<f64>>) -> FiscalTable {
        debug_assert_eq!(values.len(), self.records.len());

        let mut columns = self.columns.clone();
        if !columns.iter().any(|c| c == column) {
            columns.push(column.to_string());
        }

        let records = self
            .records
            .iter()
            .zip(values)
            .map(|(record, value)| {
                let mut record = record.clone();
                match value {
                    Some(v) => {
                        record.values.insert(column.to_string(), v);
                    }
                    None => {
                        record.values.remove(column);
                    }
                }
                record
            })
            .collect();

        FiscalTable { columns, records }
    }
}

/// A country's precomputed composite rescue score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub country: String,
    pub rescue_score: f64,
    pub transparency: Option<f64>,
    /// Filled in by the risk classifier; `None` only on freshly loaded rows.
    pub risk_tier: Option<RiskTier>,
}

impl ScoreRecord {
    pub fn new(country: impl Into<String>, rescue_score: f64, transparency: Option<f64>) -> Self {
        Self {
            country: country.into(),
            rescue_score,
            transparency,
            risk_tier: None,
        }
    }
}

/// The score table, one record per country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub records: Vec<ScoreRecord>,
    /// `true` when the table is the built-in synthetic substitute rather than
    /// data read from the score source.
    pub is_fallback: bool,
}

impl ScoreTable {
    pub fn new(records: Vec<ScoreRecord>, is_fallback: bool) -> Self {
        Self {
            records,
            is_fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, country: &str) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| r.country == country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FiscalTable {
        FiscalTable::new(
            vec!["Country".into(), "Year".into(), "Government Debt".into()],
            vec![
                FiscalRecord::new("Ghana", Some(2021)).with_value("Government Debt", 100.0),
                FiscalRecord::new("Kenya", Some(2021)),
                FiscalRecord::new("Ghana", Some(2022)).with_value("Government Debt", 110.0),
            ],
        )
    }

    #[test]
    fn column_key_ignores_spacing_and_case() {
        assert_eq!(column_key(" Rescue_Score "), "rescuescore");
        assert_eq!(column_key("RescueScore"), "rescuescore");
        assert_eq!(column_key("Debt_to_GDP"), "debttogdp");
    }

    #[test]
    fn resolve_column_matches_loose_names() {
        let table = sample();
        assert_eq!(table.resolve_column("GovernmentDebt"), Some("Government Debt"));
        assert_eq!(table.resolve_column("Nominal GDP"), None);
    }

    #[test]
    fn exact_column_name_wins_over_loose_match() {
        let table = FiscalTable::new(
            vec!["Country".into(), "Debt to GDP".into(), "Debt_to_GDP".into()],
            Vec::new(),
        );
        assert_eq!(table.resolve_column("Debt_to_GDP"), Some("Debt_to_GDP"));
        assert_eq!(table.resolve_column("Debt to GDP"), Some("Debt to GDP"));
        assert_eq!(table.resolve_column("debt-to-gdp"), Some("Debt to GDP"));
    }

    #[test]
    fn countries_are_unique_in_first_seen_order() {
        assert_eq!(sample().countries(), vec!["Ghana", "Kenya"]);
    }

    #[test]
    fn with_column_returns_new_table_and_leaves_original() {
        let table = sample();
        let next = table.with_column("Flag", vec![Some(1.0), None, Some(3.0)]);

        assert!(!table.has_column("Flag"));
        assert_eq!(next.columns.last().map(String::as_str), Some("Flag"));
        assert_eq!(next.records[0].value("Flag"), Some(1.0));
        assert_eq!(next.records[1].value("Flag"), None);
        assert_eq!(next.records[2].value("Flag"), Some(3.0));
    }

    #[test]
    fn score_table_serializes_provenance() {
        let table = ScoreTable::new(vec![ScoreRecord::new("Egypt", 65.0, Some(20.0))], true);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["is_fallback"], true);
        assert_eq!(table.get("Egypt").map(|r| r.rescue_score), Some(65.0));
    }
}
