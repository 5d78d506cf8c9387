//! Missing value check.

use super::frame::{column, missing_rows, selected_columns};
use crate::core::{CheckKind, ViolationReport};
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use std::collections::BTreeSet;
use tracing::debug;

/// Asserts that the selected columns contain no missing values.
///
/// Nulls are missing, and so is NaN in floating point columns.
/// `columns = None` checks every column. The report lists every row and
/// column holding a null.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use arrow::record_batch::RecordBatch;
/// use table_guard::checks::none_missing;
///
/// let batch = RecordBatch::try_from_iter(vec![
///     ("a", Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])) as ArrayRef),
///     ("b", Arc::new(Int64Array::from(vec![4, 5, 6])) as ArrayRef),
/// ])
/// .unwrap();
///
/// assert!(none_missing(&batch, Some(&["b".to_string()])).is_ok());
///
/// let err = none_missing(&batch, None).unwrap_err();
/// let report = err.violation().unwrap();
/// assert_eq!(report.rows, vec![1]);
/// assert_eq!(report.columns, vec!["a"]);
/// ```
pub fn none_missing(data: &RecordBatch, columns: Option<&[String]>) -> Result<()> {
    let mut rows = BTreeSet::new();
    let mut offending = Vec::new();
    let mut missing = 0;

    for name in selected_columns(data, columns) {
        let nulls = missing_rows(&name, column(data, &name)?)?;
        if nulls.is_empty() {
            continue;
        }
        missing += nulls.len();
        rows.extend(nulls);
        offending.push(name);
    }

    if offending.is_empty() {
        debug!(
            check.name = %CheckKind::NoneMissing,
            result.status = "success",
            "No missing values"
        );
        return Ok(());
    }

    Err(ViolationReport::new(
        CheckKind::NoneMissing.as_str(),
        format!(
            "{missing} missing value(s) in {} column(s)",
            offending.len()
        ),
    )
    .with_rows(rows.into_iter().collect())
    .with_columns(offending)
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuardError;
    use crate::test_fixtures::{batch, float_column, int_column, sample_batch};

    #[test]
    fn test_reports_rows_and_columns() {
        let data = sample_batch();
        let err = none_missing(&data, None).unwrap_err();
        let report = err.violation().unwrap();

        assert_eq!(report.check, "none_missing");
        assert_eq!(report.rows, vec![1]);
        assert_eq!(report.columns, vec!["a"]);
        assert_eq!(report.message, "1 missing value(s) in 1 column(s)");
    }

    #[test]
    fn test_restricted_columns() {
        let data = sample_batch();
        assert!(none_missing(&data, Some(&["b".to_string()])).is_ok());
    }

    #[test]
    fn test_rows_are_merged_across_columns() {
        let data = batch(vec![
            ("x", int_column(vec![None, Some(2), None])),
            ("y", float_column(vec![Some(1.0), None, None])),
        ]);
        let err = none_missing(&data, None).unwrap_err();
        let report = err.violation().unwrap();

        assert_eq!(report.rows, vec![0, 1, 2]);
        assert_eq!(report.columns, vec!["x", "y"]);
    }

    #[test]
    fn test_nan_is_missing() {
        let data = batch(vec![("f", float_column(vec![Some(1.0), Some(f64::NAN), Some(3.0)]))]);
        let err = none_missing(&data, None).unwrap_err();
        let report = err.violation().unwrap();

        assert_eq!(report.rows, vec![1]);
        assert_eq!(report.columns, vec!["f"]);
    }

    #[test]
    fn test_unknown_column() {
        let data = sample_batch();
        let err = none_missing(&data, Some(&["nope".to_string()])).unwrap_err();
        assert!(matches!(err, GuardError::ColumnNotFound { .. }));
    }
}
