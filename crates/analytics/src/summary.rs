//! Cross-country aggregates behind the overview figures.

use core_types::{FiscalTable, ScoreRecord, ScoreTable};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One (country, year, value) observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

/// Number of rows a country contributes to the fiscal table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub country: String,
    pub years_reported: usize,
}

/// The `n` highest rescue scores, highest first. Ties keep table order.
pub fn top_by_rescue_score(scores: &ScoreTable, n: usize) -> Vec<ScoreRecord> {
    let mut ranked = scores.records.clone();
    ranked.sort_by(|a, b| {
        b.rescue_score
            .partial_cmp(&a.rescue_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// Mean of `metric` over every row in `year`, or `None` if no row has a value.
pub fn mean_for_year(table: &FiscalTable, metric: &str, year: i32) -> Option<f64> {
    let column = table.resolve_column(metric)?;
    let (sum, count) = table
        .records
        .iter()
        .filter(|r| r.year == Some(year))
        .filter_map(|r| r.value(column))
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Rows per country, least reported first; ties are ordered by country name.
pub fn years_reported(table: &FiscalTable) -> Vec<Coverage> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &table.records {
        *counts.entry(record.country.as_str()).or_insert(0) += 1;
    }

    let mut coverage: Vec<Coverage> = counts
        .into_iter()
        .map(|(country, years_reported)| Coverage {
            country: country.to_string(),
            years_reported,
        })
        .collect();
    coverage.sort_by(|a, b| {
        a.years_reported
            .cmp(&b.years_reported)
            .then_with(|| a.country.cmp(&b.country))
    });
    coverage
}

/// Observations of `metric` with `from <= year <= to`, in table order.
///
/// Empty when the table has no such column, e.g. Debt-to-GDP on a dataset
/// without debt figures.
pub fn metric_window(table: &FiscalTable, metric: &str, from: i32, to: i32) -> Vec<Observation> {
    let Some(column) = table.resolve_column(metric) else {
        return Vec::new();
    };

    table
        .records
        .iter()
        .filter_map(|r| {
            let year = r.year.filter(|y| (from..=to).contains(y))?;
            Some(Observation {
                country: r.country.clone(),
                year,
                value: r.value(column).filter(|v| v.is_finite())?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::FiscalRecord;

    fn fiscal() -> FiscalTable {
        FiscalTable::new(
            vec!["Country".into(), "Year".into(), "Inflation Rate".into()],
            vec![
                FiscalRecord::new("Nigeria", Some(2023)).with_value("Inflation Rate", 24.0),
                FiscalRecord::new("Nigeria", Some(2024)).with_value("Inflation Rate", 30.0),
                FiscalRecord::new("Ghana", Some(2024)).with_value("Inflation Rate", 20.0),
                FiscalRecord::new("Kenya", Some(2024)),
                FiscalRecord::new("Kenya", Some(2009)).with_value("Inflation Rate", 9.0),
                FiscalRecord::new("Angola", Some(2024)).with_value("Inflation Rate", 28.0),
            ],
        )
    }

    #[test]
    fn ranks_scores_descending_and_truncates() {
        let scores = ScoreTable::new(
            vec![
                ScoreRecord::new("Kenya", 68.0, None),
                ScoreRecord::new("Nigeria", 85.0, None),
                ScoreRecord::new("Ghana", 72.0, None),
            ],
            false,
        );
        let top: Vec<_> = top_by_rescue_score(&scores, 2)
            .into_iter()
            .map(|r| r.country)
            .collect();
        assert_eq!(top, vec!["Nigeria", "Ghana"]);
    }

    #[test]
    fn year_mean_ignores_missing_values() {
        let table = fiscal();
        assert_eq!(mean_for_year(&table, "InflationRate", 2024), Some(26.0));
        assert_eq!(mean_for_year(&table, "Inflation Rate", 1999), None);
        assert_eq!(mean_for_year(&table, "Government Debt", 2024), None);
    }

    #[test]
    fn coverage_is_sorted_by_count_then_name() {
        let coverage = years_reported(&fiscal());
        let pairs: Vec<_> = coverage
            .iter()
            .map(|c| (c.country.as_str(), c.years_reported))
            .collect();
        assert_eq!(
            pairs,
            vec![("Angola", 1), ("Ghana", 1), ("Kenya", 2), ("Nigeria", 2)]
        );
    }

    #[test]
    fn window_is_inclusive_and_skips_missing() {
        let window = metric_window(&fiscal(), "Inflation Rate", 2010, 2023);
        assert_eq!(
            window,
            vec![Observation {
                country: "Nigeria".into(),
                year: 2023,
                value: 24.0
            }]
        );
        assert!(metric_window(&fiscal(), "Debt_to_GDP", 2010, 2024).is_empty());
    }

    #[test]
    fn non_finite_values_are_ignored_in_aggregates() {
        let table = fiscal();
        let mut records = table.records.clone();
        records.push(FiscalRecord::new("Chad", Some(2024)).with_value("Inflation Rate", f64::NAN));
        let table = FiscalTable::new(table.columns.clone(), records);

        assert_eq!(mean_for_year(&table, "Inflation Rate", 2024), Some(26.0));
        assert!(metric_window(&table, "Inflation Rate", 2024, 2024)
            .iter()
            .all(|o| o.value.is_finite()));
    }
}
