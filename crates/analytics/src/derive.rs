use core_types::{FiscalTable, Metric};

/// Name of the derived Debt-to-GDP column.
pub const DEBT_TO_GDP: &str = "Debt_to_GDP";

/// Debt as a percentage of nominal GDP.
///
/// `None` when GDP is zero or the quotient is not finite; a missing ratio is
/// never reported as zero.
pub fn debt_to_gdp(government_debt: f64, nominal_gdp: f64) -> Option<f64> {
    if nominal_gdp == 0.0 {
        return None;
    }
    let ratio = government_debt / nominal_gdp * 100.0;
    ratio.is_finite().then_some(ratio)
}

/// Returns a copy of `table` with a `Debt_to_GDP` column.
///
/// If either source column is missing from the table entirely, the copy has
/// no `Debt_to_GDP` column at all: the ratio is "not computable for this
/// dataset", which callers must not confuse with zero.
pub fn derive_debt_to_gdp(table: &FiscalTable) -> FiscalTable {
    let debt_col = table.resolve_column(Metric::GovernmentDebt.column());
    let gdp_col = table.resolve_column(Metric::NominalGdp.column());

    let (Some(debt_col), Some(gdp_col)) = (debt_col, gdp_col) else {
        tracing::info!(
            has_debt = debt_col.is_some(),
            has_gdp = gdp_col.is_some(),
            "Debt-to-GDP not computable for this dataset."
        );
        return table.clone();
    };

    let values: Vec<Option<f64>> = table
        .records
        .iter()
        .map(|r| debt_to_gdp(r.value(debt_col)?, r.value(gdp_col)?))
        .collect();

    let computed = values.iter().filter(|v| v.is_some()).count();
    tracing::debug!(rows = table.len(), computed, "Derived Debt-to-GDP.");

    table.with_column(DEBT_TO_GDP, values)
}
