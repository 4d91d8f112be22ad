//! Cell-level parsing shared by both sources.

use core_types::column_key;
use csv::StringRecord;

/// Markers that mean "no value" in the exported sources.
const MISSING_MARKERS: [&str; 5] = ["na", "n/a", "nan", "null", "none"];

/// Parses a numeric cell. Blanks, missing-value markers and non-finite numbers
/// are `None`.
pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || is_missing_marker(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a year cell, accepting integral floats such as `2021.0`.
pub(crate) fn parse_year(cell: &str) -> Option<i32> {
    let cell = cell.trim();
    if let Ok(year) = cell.parse::<i32>() {
        return Some(year);
    }
    let value = parse_number(cell)?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

pub(crate) fn is_missing_marker(cell: &str) -> bool {
    MISSING_MARKERS
        .iter()
        .any(|m| cell.eq_ignore_ascii_case(m))
}

/// Trims every header name. The csv reader is already configured to trim, but
/// headers are normalized again here so the rule holds for any reader.
pub(crate) fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    headers.iter().map(|h| h.trim().to_string()).collect()
}

/// Index of the header matching `logical` under loose column-name rules.
pub(crate) fn find_header(headers: &[String], logical: &str) -> Option<usize> {
    let key = column_key(logical);
    headers.iter().position(|h| column_key(h) == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_tolerate_markers_and_blanks() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NA"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("Nigeria"), None);
    }

    #[test]
    fn years_accept_integral_floats_only() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year("2021.0"), Some(2021));
        assert_eq!(parse_year("2021.5"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn headers_are_trimmed_and_found_loosely() {
        let headers = normalize_headers(&StringRecord::from(vec![" Country", "Rescue_Score  "]));
        assert_eq!(headers, vec!["Country", "Rescue_Score"]);
        assert_eq!(find_header(&headers, "RescueScore"), Some(1));
        assert_eq!(find_header(&headers, "Transparency"), None);
    }
}
