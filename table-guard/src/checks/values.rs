//! Set and range membership checks.

use super::frame::{column, numeric, render, scalars, Scalar};
use crate::core::{CheckKind, ViolationReport};
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// Asserts that every value of each listed column is in its allowed set.
///
/// Numbers compare numerically and text compares exactly. Nulls pass.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, StringArray};
/// use arrow::record_batch::RecordBatch;
/// use serde_json::json;
/// use table_guard::checks::within_set;
///
/// let batch = RecordBatch::try_from_iter(vec![(
///     "color",
///     Arc::new(StringArray::from(vec!["red", "teal", "blue"])) as ArrayRef,
/// )])
/// .unwrap();
///
/// let items = vec![("color".to_string(), vec![json!("red"), json!("blue")])];
/// let err = within_set(&batch, &items).unwrap_err();
/// assert_eq!(err.violation().unwrap().values, vec!["teal"]);
/// ```
pub fn within_set(data: &RecordBatch, items: &[(String, Vec<Value>)]) -> Result<()> {
    let mut rows = BTreeSet::new();
    let mut offending = Vec::new();
    let mut values = Vec::new();

    for (name, allowed) in items {
        let cells = scalars(name, column(data, name)?)?;
        let outside: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| {
                **cell != Scalar::Null && !allowed.iter().any(|value| cell.matches(value))
            })
            .map(|(row, _)| row)
            .collect();
        if outside.is_empty() {
            continue;
        }
        values.extend(outside.iter().map(|&row| cells[row].to_string()));
        rows.extend(outside);
        offending.push(name.clone());
    }

    if offending.is_empty() {
        debug!(
            check.name = %CheckKind::WithinSet,
            result.status = "success",
            "All values within their sets"
        );
        return Ok(());
    }

    Err(ViolationReport::new(
        CheckKind::WithinSet.as_str(),
        format!("{} value(s) outside the allowed set", values.len()),
    )
    .with_rows(rows.into_iter().collect())
    .with_columns(offending)
    .with_values(values)
    .into())
}

/// Asserts that every value of each listed column is within `[lower, upper]`.
///
/// Bounds are inclusive and nulls pass. Columns must be numeric.
pub fn within_range(data: &RecordBatch, items: &[(String, (f64, f64))]) -> Result<()> {
    let mut rows = BTreeSet::new();
    let mut offending = Vec::new();
    let mut values = Vec::new();

    for (name, (lower, upper)) in items {
        let array = column(data, name)?;
        let outside: Vec<usize> = numeric(name, array)?
            .iter()
            .enumerate()
            .filter_map(|(row, value)| value.filter(|v| v < lower || v > upper).map(|_| row))
            .collect();
        if outside.is_empty() {
            continue;
        }
        values.extend(render(array, &outside)?);
        rows.extend(outside);
        offending.push(name.clone());
    }

    if offending.is_empty() {
        debug!(
            check.name = %CheckKind::WithinRange,
            result.status = "success",
            "All values within range"
        );
        return Ok(());
    }

    Err(ViolationReport::new(
        CheckKind::WithinRange.as_str(),
        format!("{} value(s) outside the allowed range", values.len()),
    )
    .with_rows(rows.into_iter().collect())
    .with_columns(offending)
    .with_values(values)
    .into())
}
