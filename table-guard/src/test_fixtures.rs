//! Small Arrow tables for tests.

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Builds a batch from named columns.
///
/// # Panics
///
/// Panics if the columns have different lengths.
pub fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    RecordBatch::try_from_iter(columns).expect("columns must have equal lengths")
}

/// An `Int64` column.
pub fn int_column(values: Vec<Option<i64>>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

/// A `Float64` column.
pub fn float_column(values: Vec<Option<f64>>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}

/// A `Utf8` column.
pub fn string_column(values: Vec<Option<&str>>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

/// A `Boolean` column.
pub fn bool_column(values: Vec<Option<bool>>) -> ArrayRef {
    Arc::new(BooleanArray::from(values))
}

/// `{a: [1, null, 3], b: [4, 5, 6]}`, both `Int64`.
pub fn sample_batch() -> RecordBatch {
    batch(vec![
        ("a", int_column(vec![Some(1), None, Some(3)])),
        ("b", int_column(vec![Some(4), Some(5), Some(6)])),
    ])
}
