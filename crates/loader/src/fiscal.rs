use crate::cells::{find_header, is_missing_marker, normalize_headers, parse_number, parse_year};
use crate::error::LoaderError;
use core_types::{FiscalRecord, FiscalTable};
use std::io::Read;
use std::path::Path;

/// Reads a fiscal table from any CSV reader.
///
/// `origin` is only used to label errors. `Country` and `Year` are required;
/// every other column is passed through, numeric cells into
/// `FiscalRecord::values` and anything else into `FiscalRecord::text`.
pub fn read_fiscal_table<R: Read>(reader: R, origin: &Path) -> Result<FiscalTable, LoaderError> {
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
    let year_idx = find_header(&headers, "Year").ok_or(LoaderError::MissingColumn {
        path: origin.to_path_buf(),
        column: "Year",
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(csv_error)?;

        let country = row.get(country_idx).unwrap_or_default();
        if country.is_empty() {
            skipped += 1;
            // +2: header line plus 1-based numbering
            tracing::warn!(source = %origin.display(), line = line + 2, "Skipping fiscal row without a country.");
            continue;
        }

        let year = row.get(year_idx).and_then(parse_year);
        let mut record = FiscalRecord::new(country, year);

        for (idx, (header, cell)) in headers.iter().zip(row.iter()).enumerate() {
            if idx == country_idx || idx == year_idx || header.is_empty() || cell.is_empty() {
                continue;
            }
            match parse_number(cell) {
                Some(value) => {
                    record.values.insert(header.clone(), value);
                }
                None if is_missing_marker(cell) => {}
                None => {
                    record.text.insert(header.clone(), cell.to_string());
                }
            }
        }

        records.push(record);
    }

    let columns = headers.into_iter().filter(|h| !h.is_empty()).collect();
    let table = FiscalTable::new(columns, records);

    tracing::info!(
        source = %origin.display(),
        rows = table.len(),
        skipped,
        countries = table.countries().len(),
        "Loaded fiscal table."
    );

    Ok(table)
}
