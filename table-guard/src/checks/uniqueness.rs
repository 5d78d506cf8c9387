//! Uniqueness checks: unique columns, unique index, one-to-many relations.

use super::frame::{column, index_column, render, row_keys, selected_columns};
use crate::core::{CheckKind, ViolationReport};
use crate::error::Result;
use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use arrow::row::Row;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Positions of values already seen earlier in the column.
///
/// Two nulls count as a repeated value.
fn duplicate_rows(array: &ArrayRef) -> Result<Vec<usize>> {
    let keys = row_keys(&[array])?;
    let Some(rows) = keys.first() else {
        return Ok(Vec::new());
    };
    let mut seen = HashSet::with_capacity(rows.num_rows());
    Ok((0..rows.num_rows())
        .filter(|&i| !seen.insert(rows.row(i)))
        .collect())
}

/// Asserts that each selected column holds no repeated value.
///
/// `columns = None` checks every column. The report lists the positions of
/// every repeat (the first occurrence is not listed) and the repeated values.
pub fn unique(data: &RecordBatch, columns: Option<&[String]>) -> Result<()> {
    let mut rows = BTreeSet::new();
    let mut offending = Vec::new();
    let mut values = Vec::new();

    for name in selected_columns(data, columns) {
        let array = column(data, &name)?;
        let duplicates = duplicate_rows(array)?;
        if duplicates.is_empty() {
            continue;
        }
        values.extend(render(array, &duplicates)?);
        rows.extend(duplicates);
        offending.push(name);
    }

    if offending.is_empty() {
        debug!(
            check.name = %CheckKind::Unique,
            result.status = "success",
            "All columns unique"
        );
        return Ok(());
    }

    let quoted: Vec<String> = offending.iter().map(|c| format!("'{c}'")).collect();
    Err(ViolationReport::new(
        CheckKind::Unique.as_str(),
        format!("column(s) {} contain non-unique values", quoted.join(", ")),
    )
    .with_rows(rows.into_iter().collect())
    .with_columns(offending)
    .with_values(values)
    .into())
}

/// Asserts that the row index holds no repeated value.
///
/// The index is the column named by the schema metadata key
/// [`INDEX_METADATA_KEY`](super::INDEX_METADATA_KEY). Without that key the
/// index is the implicit row position, which is always unique.
pub fn unique_index(data: &RecordBatch) -> Result<()> {
    let Some((name, array)) = index_column(data)? else {
        debug!(
            check.name = %CheckKind::UniqueIndex,
            "No index column declared, positional index is unique"
        );
        return Ok(());
    };

    let duplicates = duplicate_rows(array)?;
    if duplicates.is_empty() {
        return Ok(());
    }

    let values = render(array, &duplicates)?;
    Err(ViolationReport::new(
        CheckKind::UniqueIndex.as_str(),
        format!("index '{name}' has {} duplicate value(s)", duplicates.len()),
    )
    .with_rows(duplicates)
    .with_columns(vec![name])
    .with_values(values)
    .into())
}

/// Asserts a one-to-many relationship between `unitcol` and `manycol`.
///
/// Every value of `manycol` must always appear with the same `unitcol`
/// value: a department (unit) has many employees, but each employee
/// belongs to one department. The report lists the rows where a `manycol`
/// value appears with a second `unitcol` value.
pub fn one_to_many(data: &RecordBatch, unitcol: &str, manycol: &str) -> Result<()> {
    let unit_keys = row_keys(&[column(data, unitcol)?])?;
    let many = column(data, manycol)?;
    let many_keys = row_keys(&[many])?;
    let (Some(units), Some(manys)) = (unit_keys.first(), many_keys.first()) else {
        return Ok(());
    };

    let mut owners: HashMap<Row<'_>, Row<'_>> = HashMap::new();
    let mut conflicts = Vec::new();
    let mut conflicting_values: BTreeSet<Row<'_>> = BTreeSet::new();
    let mut first_positions = Vec::new();

    for i in 0..data.num_rows() {
        let key = manys.row(i);
        let unit = units.row(i);
        match owners.get(&key) {
            Some(owner) if *owner != unit => {
                conflicts.push(i);
                if conflicting_values.insert(key) {
                    first_positions.push(i);
                }
            }
            Some(_) => {}
            None => {
                owners.insert(key, unit);
            }
        }
    }

    if conflicts.is_empty() {
        debug!(
            check.name = %CheckKind::OneToMany,
            relation.unit = %unitcol,
            relation.many = %manycol,
            result.status = "success",
            "One-to-many relationship holds"
        );
        return Ok(());
    }

    let values = render(many, &first_positions)?;
    Err(ViolationReport::new(
        CheckKind::OneToMany.as_str(),
        format!(
            "{} in {manycol} has multiple values for {unitcol}",
            values.join(", ")
        ),
    )
    .with_rows(conflicts)
    .with_columns(vec![unitcol.to_string(), manycol.to_string()])
    .with_values(values)
    .into())
}
