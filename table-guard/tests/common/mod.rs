//! Shared Arrow fixtures for integration tests.

#![allow(dead_code)]

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;
use table_guard::core::{CollectingSink, ViolationSink};

/// `{a: [1, null, 3], b: [4, 5, 6]}`.
pub fn sample_batch() -> RecordBatch {
    RecordBatch::try_from_iter(vec![
        (
            "a",
            Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])) as ArrayRef,
        ),
        ("b", Arc::new(Int64Array::from(vec![4, 5, 6])) as ArrayRef),
    ])
    .unwrap()
}

/// A small orders table: unique ids, increasing timestamps, departments.
pub fn orders_batch() -> RecordBatch {
    RecordBatch::try_from_iter(vec![
        (
            "order_id",
            Arc::new(Int64Array::from(vec![100, 101, 102, 103, 104])) as ArrayRef,
        ),
        (
            "ts",
            Arc::new(Int64Array::from(vec![1, 2, 2, 5, 9])) as ArrayRef,
        ),
        (
            "status",
            Arc::new(StringArray::from(vec!["new", "paid", "paid", "shipped", "new"])) as ArrayRef,
        ),
        (
            "amount",
            Arc::new(Float64Array::from(vec![10.0, 12.5, 9.0, 11.0, 10.5])) as ArrayRef,
        ),
        (
            "region",
            Arc::new(StringArray::from(vec!["eu", "eu", "us", "us", "eu"])) as ArrayRef,
        ),
        (
            "store",
            Arc::new(StringArray::from(vec!["paris", "berlin", "nyc", "nyc", "paris"])) as ArrayRef,
        ),
    ])
    .unwrap()
}

/// A collecting sink plus the shared handle to give a guard.
pub fn collecting_sink() -> (CollectingSink, Arc<dyn ViolationSink>) {
    let sink = CollectingSink::new();
    let shared: Arc<dyn ViolationSink> = Arc::new(sink.clone());
    (sink, shared)
}
