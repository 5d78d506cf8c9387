//! A stage guarded by two checks: no missing values and a 3x2 shape.
//!
//! Run with `cargo run --example multi_check`.

use arrow::array::{ArrayRef, Int64Array};
use arrow::compute::kernels::numeric::add;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use std::sync::Arc;
use table_guard::logging::setup::{init_logging, LoggingConfig};
use table_guard::prelude::*;

fn add_to_batch(batch: &RecordBatch, amount: i64) -> Result<RecordBatch> {
    let scalar = Int64Array::new_scalar(amount);
    let columns = batch
        .columns()
        .iter()
        .map(|column| add(column, &scalar))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(RecordBatch::try_new(batch.schema(), columns)?)
}

fn table(a: Vec<Option<i64>>, b: Vec<i64>) -> Result<RecordBatch> {
    Ok(RecordBatch::try_from_iter(vec![
        ("a", Arc::new(Int64Array::from(a)) as ArrayRef),
        ("b", Arc::new(Int64Array::from(b)) as ArrayRef),
    ])?)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::development())?;

    let guard = Guard::multi_check()
        .arg(vec![
            CheckSpec::builder(CheckKind::NoneMissing)
                .param("columns", json!(null))
                .build()?,
            CheckSpec::builder(CheckKind::IsShape).param("shape", (3, 2)).build()?,
        ])
        .warn(false)
        .build()?;
    let add_to_df = guard.wrap(|batch: &RecordBatch| add_to_batch(batch, 5));

    let df = table(vec![Some(1), Some(2), Some(3)], vec![4, 5, 6])?;
    let result = add_to_df.call(&df)?;
    println!("first table passed: {} rows", result.num_rows());

    let df2 = table(vec![Some(1), None, Some(3), Some(4)], vec![4, 5, 6, 7])?;
    match add_to_df.call(&df2) {
        Ok(_) => println!("second table passed"),
        Err(e) => println!("second table rejected: {e}"),
    }

    Ok(())
}
