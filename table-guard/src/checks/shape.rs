//! Shape check for row and column counts.

use crate::core::{CheckKind, ViolationReport};
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Expected table dimensions.
///
/// A `None` dimension is a wildcard that accepts any count.
///
/// # Examples
///
/// ```rust
/// use table_guard::checks::Shape;
///
/// assert!(Shape::new(3, 2).matches(3, 2));
/// assert!(Shape::any_rows(2).matches(1000, 2));
/// assert!(!Shape::new(3, 2).matches(4, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Expected number of rows
    pub rows: Option<usize>,
    /// Expected number of columns
    pub columns: Option<usize>,
}

impl Shape {
    /// A shape with both dimensions fixed.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: Some(rows),
            columns: Some(columns),
        }
    }

    /// A shape with a fixed column count and any number of rows.
    pub fn any_rows(columns: usize) -> Self {
        Self {
            rows: None,
            columns: Some(columns),
        }
    }

    /// A shape with a fixed row count and any number of columns.
    pub fn any_columns(rows: usize) -> Self {
        Self {
            rows: Some(rows),
            columns: None,
        }
    }

    /// Builds a shape from configured dimensions; negative values are wildcards.
    pub fn from_dims(rows: Option<i64>, columns: Option<i64>) -> Self {
        let fixed = |dim: Option<i64>| dim.and_then(|d| usize::try_from(d).ok());
        Self {
            rows: fixed(rows),
            columns: fixed(columns),
        }
    }

    /// Returns true if the given dimensions satisfy this shape.
    pub fn matches(&self, rows: usize, columns: usize) -> bool {
        self.rows.is_none_or(|expected| expected == rows)
            && self.columns.is_none_or(|expected| expected == columns)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, columns): (usize, usize)) -> Self {
        Self::new(rows, columns)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dim = |d: Option<usize>| d.map_or_else(|| "any".to_string(), |d| d.to_string());
        write!(f, "({}, {})", dim(self.rows), dim(self.columns))
    }
}

/// Asserts that the table has the expected shape.
pub fn is_shape(data: &RecordBatch, shape: Shape) -> Result<()> {
    let (rows, columns) = (data.num_rows(), data.num_columns());
    if shape.matches(rows, columns) {
        debug!(
            check.name = %CheckKind::IsShape,
            result.status = "success",
            "Shape matches {shape}"
        );
        return Ok(());
    }

    Err(ViolationReport::new(
        CheckKind::IsShape.as_str(),
        format!("expected shape {shape}, got ({rows}, {columns})"),
    )
    .into())
}
