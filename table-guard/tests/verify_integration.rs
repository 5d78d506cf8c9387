//! Integration tests for the verify combinators.

mod common;

use arrow::array::{Array, AsArray, BooleanArray};
use arrow::compute::kernels::cmp::gt;
use arrow::datatypes::Float64Type;
use arrow::record_batch::RecordBatch;
use common::orders_batch;
use std::sync::Arc;
use table_guard::core::{verify_all_with, verify_any_with, verify_with, VerifyMode};
use table_guard::prelude::*;

fn amounts_above(batch: &RecordBatch, limit: &f64) -> Vec<Option<bool>> {
    batch
        .column_by_name("amount")
        .map(|column| {
            column
                .as_primitive::<Float64Type>()
                .iter()
                .map(|value| value.map(|v| v > *limit))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_verify_single_predicate() {
    let guarded = verify(|batch: &RecordBatch| batch.num_rows() == 5)
        .wrap(|()| Ok::<_, GuardError>(orders_batch()));
    assert_eq!(guarded.call(()).unwrap(), orders_batch());

    let err = verify_with(|batch: &RecordBatch, cols: &usize| batch.num_columns() == *cols, 2)
        .wrap(|()| Ok::<_, GuardError>(orders_batch()))
        .call(())
        .unwrap_err();
    assert_eq!(err.violation().unwrap().check, "verify");
}

#[test]
fn test_verify_all_reports_positions() {
    let verifier = verify_all_with(amounts_above, 9.5);
    assert_eq!(verifier.mode(), VerifyMode::All);

    let err = verifier.validate(&orders_batch()).unwrap_err();
    assert_eq!(err.violation().unwrap().rows, vec![2]);

    assert!(verify_all_with(amounts_above, 1.0)
        .validate(&orders_batch())
        .is_ok());
}

#[test]
fn test_verify_any() {
    assert!(verify_any_with(amounts_above, 12.0)
        .validate(&orders_batch())
        .is_ok());
    assert!(verify_any_with(amounts_above, 100.0)
        .validate(&orders_batch())
        .is_err());
}

#[test]
fn test_boolean_array_predicate() {
    let positive = verify(|batch: &RecordBatch| -> BooleanArray {
        let amount = batch.column(3);
        let zero = arrow::array::Float64Array::new_scalar(0.0);
        gt(amount, &zero).unwrap_or_else(|_| BooleanArray::from(vec![false]))
    })
    .named("positive_amounts");
    assert!(positive.validate(&orders_batch()).is_ok());

    let shared: Arc<dyn Validator<RecordBatch> + Send + Sync> = Arc::new(positive);
    assert!(shared.validate(&orders_batch()).is_ok());
    assert_eq!(orders_batch().column(3).len(), 5);
}
