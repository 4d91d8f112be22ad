//! Quadratic trend projection.
//!
//! The fit is ordinary least squares of degree 2 over a country's
//! `(year, value)` pairs, solved in closed form through the normal equations.
//! There is no iteration, so the same input always produces the same bits.

use crate::report::{ForecastOutcome, ForecastResult, QuadraticFit};
use core_types::{FiscalTable, Trend};
use nalgebra::{DMatrix, DVector};
use std::ops::RangeInclusive;

/// Years projected for every forecast, independent of the last observed year.
pub const HORIZON: RangeInclusive<i32> = 2025..=2030;

/// Fewer valid pairs than this and no fit is attempted.
pub const MIN_POINTS: usize = 6;

const DEGREE: usize = 2;

/// Projects `metric` for `country` over [`HORIZON`].
///
/// `metric` is matched against the table's columns loosely, so
/// `"InflationRate"` finds an `"Inflation Rate"` column. Rows with no year or
/// no value are ignored. A metric the table does not carry simply has no
/// valid pairs. Non-finite values count as missing.
pub fn forecast(table: &FiscalTable, country: &str, metric: &str) -> ForecastOutcome {
    let column = table.resolve_column(metric);
    let metric_name = column.unwrap_or(metric).to_string();

    let mut pairs: Vec<(i32, f64)> = match column {
        Some(column) => table
            .records
            .iter()
            .filter(|r| r.country == country)
            .filter_map(|r| Some((r.year?, r.value(column).filter(|v| v.is_finite())?)))
            .collect(),
        None => Vec::new(),
    };
    pairs.sort_by_key(|&(year, _)| year);

    let insufficient = |available| ForecastOutcome::InsufficientData {
        country: country.to_string(),
        metric: metric_name.clone(),
        available,
        required: MIN_POINTS,
    };

    if pairs.len() < MIN_POINTS {
        tracing::debug!(country, metric = %metric_name, available = pairs.len(), "Not enough history to forecast.");
        return insufficient(pairs.len());
    }

    let (historical_years, historical_values): (Vec<i32>, Vec<f64>) = pairs.into_iter().unzip();
    let xs: Vec<f64> = historical_years.iter().map(|&y| f64::from(y)).collect();

    let Some(fit) = fit_quadratic(&xs, &historical_values) else {
        tracing::debug!(country, metric = %metric_name, "History does not determine a quadratic.");
        return insufficient(historical_years.len());
    };

    let projected_years: Vec<i32> = HORIZON.collect();
    let projected_values: Vec<f64> = projected_years
        .iter()
        .map(|&y| fit.evaluate(f64::from(y)))
        .collect();
    let trend = classify_trend(&projected_values);

    tracing::debug!(
        country,
        metric = %metric_name,
        points = historical_years.len(),
        coefficients = ?fit.coefficients,
        %trend,
        "Fitted quadratic trend."
    );

    ForecastOutcome::Projected(ForecastResult {
        country: country.to_string(),
        metric: metric_name,
        historical_years,
        historical_values,
        projected_years,
        projected_values,
        trend,
        fit,
    })
}

/// Least-squares quadratic through `(xs, ys)`.
///
/// `None` when the points cannot determine three coefficients (fewer than
/// three distinct x values) or the solution is not finite.
pub fn fit_quadratic(xs: &[f64], ys: &[f64]) -> Option<QuadraticFit> {
    debug_assert_eq!(xs.len(), ys.len());

    let mut distinct = xs.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();
    if distinct.len() <= DEGREE {
        return None;
    }

    let origin = xs.iter().sum::<f64>() / xs.len() as f64;

    // Vandermonde design matrix over centered x: columns 1, t, t².
    let design = DMatrix::from_fn(xs.len(), DEGREE + 1, |i, j| (xs[i] - origin).powi(j as i32));
    let target = DVector::from_column_slice(ys);

    let gram = design.transpose() * &design;
    let moment = design.transpose() * target;
    let solution = gram.cholesky()?.solve(&moment);

    let coefficients = [solution[0], solution[1], solution[2]];
    coefficients
        .iter()
        .all(|c| c.is_finite())
        .then_some(QuadraticFit {
            origin,
            coefficients,
        })
}

/// `Increasing` only if the last projection is strictly above the first;
/// a flat projection counts as `Decreasing`.
pub fn classify_trend(projected: &[f64]) -> Trend {
    match (projected.first(), projected.last()) {
        (Some(first), Some(last)) if last > first => Trend::Increasing,
        _ => Trend::Decreasing,
    }
}
