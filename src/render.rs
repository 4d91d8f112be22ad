//! Terminal tables for the CLI.

use analytics::{Coverage, ForecastResult, Observation};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::ScoreRecord;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

pub fn scores_table(scores: &[ScoreRecord]) -> Table {
    let mut table = new_table(vec!["Country", "Rescue Score", "Transparency", "Debt Distress Risk"]);
    for record in scores {
        table.add_row(vec![
            record.country.clone(),
            format!("{:.1}", record.rescue_score),
            optional(record.transparency),
            record
                .risk_tier
                .map_or_else(|| "-".to_string(), |t| t.to_string()),
        ]);
    }
    table
}

pub fn observations_table(observations: &[Observation], value_label: &str) -> Table {
    let mut table = new_table(vec!["Country", "Year", value_label]);
    for o in observations {
        table.add_row(vec![o.country.clone(), o.year.to_string(), format!("{:.2}", o.value)]);
    }
    table
}

pub fn forecast_table(result: &ForecastResult) -> Table {
    let mut table = new_table(vec!["Year", result.metric.as_str(), "Kind"]);
    for (year, value) in result.historical_years.iter().zip(&result.historical_values) {
        table.add_row(vec![year.to_string(), format!("{value:.2}"), "Historical".to_string()]);
    }
    for (year, value) in result.projected_years.iter().zip(&result.projected_values) {
        table.add_row(vec![year.to_string(), format!("{value:.2}"), "Forecast".to_string()]);
    }
    table
}

pub fn coverage_table(coverage: &[Coverage]) -> Table {
    let mut table = new_table(vec!["Country", "Years Reported"]);
    for c in coverage {
        table.add_row(vec![c.country.clone(), c.years_reported.to_string()]);
    }
    table
}
