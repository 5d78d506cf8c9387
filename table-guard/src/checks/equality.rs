//! Table equality check.

use super::frame::{column_names, row_keys};
use crate::core::{CheckKind, ViolationReport};
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use std::collections::BTreeSet;
use tracing::debug;

fn field_summary(data: &RecordBatch) -> Vec<String> {
    data.schema_ref()
        .fields()
        .iter()
        .map(|field| format!("{}: {}", field.name(), field.data_type()))
        .collect()
}

/// Asserts that `data` equals `other`.
///
/// Column names, order and types must match, then the row counts, then
/// every value. Nulls equal nulls. The report names the differing columns
/// and rows.
pub fn is_same_as(data: &RecordBatch, other: &RecordBatch) -> Result<()> {
    let kind = CheckKind::IsSameAs.as_str();

    let (ours, theirs) = (field_summary(data), field_summary(other));
    if ours != theirs {
        return Err(ViolationReport::new(
            kind,
            format!("schemas differ: [{}] vs [{}]", ours.join(", "), theirs.join(", ")),
        )
        .with_columns(column_names(data))
        .into());
    }

    if data.num_rows() != other.num_rows() {
        return Err(ViolationReport::new(
            kind,
            format!(
                "row counts differ: {} vs {}",
                data.num_rows(),
                other.num_rows()
            ),
        )
        .into());
    }

    let mut rows = BTreeSet::new();
    let mut offending = Vec::new();
    for (index, name) in column_names(data).into_iter().enumerate() {
        let keys = row_keys(&[data.column(index), other.column(index)])?;
        let [left, right] = keys.as_slice() else {
            continue;
        };
        let differing: Vec<usize> = (0..data.num_rows())
            .filter(|&row| left.row(row) != right.row(row))
            .collect();
        if differing.is_empty() {
            continue;
        }
        rows.extend(differing);
        offending.push(name);
    }

    if offending.is_empty() {
        debug!(
            check.name = %CheckKind::IsSameAs,
            result.status = "success",
            rows = data.num_rows(),
            "Tables are equal"
        );
        return Ok(());
    }

    let quoted: Vec<String> = offending.iter().map(|c| format!("'{c}'")).collect();
    Err(ViolationReport::new(
        kind,
        format!("column(s) {} differ", quoted.join(", ")),
    )
    .with_rows(rows.into_iter().collect())
    .with_columns(offending)
    .into())
}
