//! Standard deviation bound check.

use super::frame::{column, numeric, render};
use crate::core::{CheckKind, ViolationReport};
use crate::error::{GuardError, Result};
use arrow::array::{Array, AsArray, BooleanArray, Float64Array};
use arrow::compute::kernels::numeric::{mul, sub};
use arrow::compute::{filter, sum};
use arrow::datatypes::Float64Type;
use arrow::record_batch::RecordBatch;
use std::collections::BTreeSet;
use tracing::debug;

/// Default number of standard deviations for [`within_n_std`].
pub const DEFAULT_N_STD: f64 = 3.0;

/// Mean and sample standard deviation of the values that are neither null
/// nor NaN.
///
/// `Ok(None)` when fewer than two such values are present.
fn mean_and_std(values: &Float64Array) -> Result<Option<(f64, f64)>> {
    let present = BooleanArray::from_unary(values, |x| !x.is_nan());
    let clean = filter(values, &present)?;
    let clean = clean.as_primitive::<Float64Type>();
    let count = clean.len() - clean.null_count();
    if count < 2 {
        return Ok(None);
    }

    let Some(total) = sum(clean) else {
        return Ok(None);
    };
    let mean = total / count as f64;
    let deviations = sub(clean, &Float64Array::new_scalar(mean))?;
    let squares = mul(&deviations, &deviations)?;
    let squares = sum(squares.as_primitive::<Float64Type>()).unwrap_or(0.0);
    Ok(Some((mean, (squares / (count - 1) as f64).sqrt())))
}

/// Asserts that every numeric value lies within `n` standard deviations of
/// its column mean (`abs(x - mean) < n * std`).
///
/// Non-numeric columns are not considered. Mean and spread ignore nulls
/// and NaN. Columns with fewer than two such values or zero spread are
/// skipped. Nulls pass; a NaN in an evaluated column is never within bounds.
pub fn within_n_std(data: &RecordBatch, n: f64) -> Result<()> {
    if !n.is_finite() || n <= 0.0 {
        return Err(GuardError::invalid_parameter(
            CheckKind::WithinNStd.as_str(),
            "n",
            format!("expected a positive number, got {n}"),
        ));
    }

    let mut rows = BTreeSet::new();
    let mut offending = Vec::new();
    let mut values = Vec::new();

    for field in data.schema_ref().fields() {
        if !field.data_type().is_numeric() {
            continue;
        }
        let name = field.name();
        let array = column(data, name)?;
        let numbers = numeric(name, array)?;
        let Some((mean, std)) = mean_and_std(&numbers)? else {
            continue;
        };
        if std == 0.0 || !std.is_finite() {
            continue;
        }

        let limit = n * std;
        let outliers: Vec<usize> = numbers
            .iter()
            .enumerate()
            .filter_map(|(row, value)| {
                value
                    .filter(|x| x.is_nan() || (x - mean).abs() >= limit)
                    .map(|_| row)
            })
            .collect();
        debug!(
            check.name = %CheckKind::WithinNStd,
            column = %name,
            stats.mean = mean,
            stats.std = std,
            outliers = outliers.len(),
            "Column statistics computed"
        );
        if outliers.is_empty() {
            continue;
        }
        values.extend(render(array, &outliers)?);
        rows.extend(outliers);
        offending.push(name.clone());
    }

    if offending.is_empty() {
        return Ok(());
    }

    Err(ViolationReport::new(
        CheckKind::WithinNStd.as_str(),
        format!(
            "{} value(s) outside {n} standard deviations of the mean",
            values.len()
        ),
    )
    .with_rows(rows.into_iter().collect())
    .with_columns(offending)
    .with_values(values)
    .into())
}
