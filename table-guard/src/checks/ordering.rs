//! Monotonicity check.

use super::frame::{column, null_rows, row_keys};
use crate::core::{CheckKind, ViolationReport};
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use arrow::row::Rows;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// The ordering a column must follow.
///
/// `increasing = None` accepts either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Monotonic {
    /// `Some(true)` ascending, `Some(false)` descending, `None` either
    pub increasing: Option<bool>,
    /// Forbid equal neighbouring values
    pub strict: bool,
}

impl Monotonic {
    /// Non-decreasing order.
    pub fn increasing() -> Self {
        Self {
            increasing: Some(true),
            strict: false,
        }
    }

    /// Non-increasing order.
    pub fn decreasing() -> Self {
        Self {
            increasing: Some(false),
            strict: false,
        }
    }

    /// Either direction.
    pub fn either() -> Self {
        Self::default()
    }

    /// Makes the ordering strict.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn ascending_ok(&self, ordering: Ordering) -> bool {
        if self.strict {
            ordering == Ordering::Less
        } else {
            ordering != Ordering::Greater
        }
    }

    fn descending_ok(&self, ordering: Ordering) -> bool {
        if self.strict {
            ordering == Ordering::Greater
        } else {
            ordering != Ordering::Less
        }
    }
}

impl fmt::Display for Monotonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.strict {
            write!(f, "strictly ")?;
        }
        match self.increasing {
            Some(true) => write!(f, "increasing"),
            Some(false) => write!(f, "decreasing"),
            None => write!(f, "monotonic"),
        }
    }
}

/// Positions `i` where the pair `(i - 1, i)` breaks the ordering.
fn breaks(rows: &Rows, ok: impl Fn(Ordering) -> bool) -> Vec<usize> {
    (1..rows.num_rows())
        .filter(|&i| !ok(rows.row(i - 1).cmp(&rows.row(i))))
        .collect()
}

fn order_breaks(rows: &Rows, order: Monotonic) -> Vec<usize> {
    match order.increasing {
        Some(true) => breaks(rows, |o| order.ascending_ok(o)),
        Some(false) => breaks(rows, |o| order.descending_ok(o)),
        None => {
            let ascending = breaks(rows, |o| order.ascending_ok(o));
            if ascending.is_empty() {
                return ascending;
            }
            let descending = breaks(rows, |o| order.descending_ok(o));
            if descending.len() < ascending.len() {
                descending
            } else {
                ascending
            }
        }
    }
}

/// Asserts that each listed column follows its ordering.
///
/// Nulls break monotonicity. The report lists the positions where the
/// ordering breaks; for `either` it uses whichever direction breaks least.
pub fn is_monotonic(data: &RecordBatch, items: &[(String, Monotonic)]) -> Result<()> {
    let mut rows = BTreeSet::new();
    let mut failures = Vec::new();
    let mut offending = Vec::new();

    for (name, order) in items {
        let array = column(data, name)?;
        let nulls = null_rows(array);
        let broken = if nulls.is_empty() {
            let keys = row_keys(&[array])?;
            keys.first()
                .map(|keys| order_breaks(keys, *order))
                .unwrap_or_default()
        } else {
            nulls
        };

        if broken.is_empty() {
            continue;
        }
        failures.push(format!("'{name}' is not {order}"));
        rows.extend(broken);
        offending.push(name.clone());
    }

    if offending.is_empty() {
        debug!(
            check.name = %CheckKind::IsMonotonic,
            result.status = "success",
            columns = items.len(),
            "All columns monotonic"
        );
        return Ok(());
    }

    Err(
        ViolationReport::new(CheckKind::IsMonotonic.as_str(), failures.join("; "))
            .with_rows(rows.into_iter().collect())
            .with_columns(offending)
            .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{batch, float_column, int_column, string_column};

    fn item(name: &str, order: Monotonic) -> Vec<(String, Monotonic)> {
        vec![(name.to_string(), order)]
    }

    #[test]
    fn test_increasing() {
        let data = batch(vec![("a", int_column(vec![Some(1), Some(2), Some(2), Some(5)]))]);
        assert!(is_monotonic(&data, &item("a", Monotonic::increasing())).is_ok());
        assert!(is_monotonic(&data, &item("a", Monotonic::either())).is_ok());

        let err = is_monotonic(&data, &item("a", Monotonic::increasing().strict())).unwrap_err();
        let report = err.violation().unwrap();
        assert_eq!(report.rows, vec![2]);
        assert_eq!(report.message, "'a' is not strictly increasing");

        assert!(is_monotonic(&data, &item("a", Monotonic::decreasing())).is_err());
    }

    #[test]
    fn test_decreasing_text() {
        let data = batch(vec![("s", string_column(vec![Some("c"), Some("b"), Some("a")]))]);
        assert!(is_monotonic(&data, &item("s", Monotonic::decreasing().strict())).is_ok());
        assert!(is_monotonic(&data, &item("s", Monotonic::either())).is_ok());
        assert!(is_monotonic(&data, &item("s", Monotonic::increasing())).is_err());
    }

    #[test]
    fn test_either_reports_smallest_break_set() {
        let data = batch(vec![(
            "a",
            float_column(vec![Some(5.0), Some(4.0), Some(6.0), Some(3.0)]),
        )]);
        let err = is_monotonic(&data, &item("a", Monotonic::either())).unwrap_err();
        let report = err.violation().unwrap();
        assert_eq!(report.rows, vec![2]);
        assert_eq!(report.message, "'a' is not monotonic");
    }

    #[test]
    fn test_nulls_break_monotonicity() {
        let data = batch(vec![("a", int_column(vec![Some(1), None, Some(3)]))]);
        let err = is_monotonic(&data, &item("a", Monotonic::increasing())).unwrap_err();
        assert_eq!(err.violation().unwrap().rows, vec![1]);
    }
}
