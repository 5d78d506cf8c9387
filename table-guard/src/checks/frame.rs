//! Column access helpers shared by the check predicates.
//!
//! All reductions go through Arrow: casts for numeric work, the row format
//! for hashing and ordering values of any type, and the display formatter
//! for rendering offending values.

use crate::error::{GuardError, Result};
use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type, UInt64Type};
use arrow::record_batch::RecordBatch;
use arrow::row::{RowConverter, Rows, SortField};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use serde_json::Value;
use std::fmt;

/// Schema metadata key naming the column that acts as the row index.
pub const INDEX_METADATA_KEY: &str = "index";

/// Looks up a column by name.
pub(crate) fn column<'a>(data: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    data.column_by_name(name)
        .ok_or_else(|| GuardError::column_not_found(name))
}

/// Names of all columns, in schema order.
pub(crate) fn column_names(data: &RecordBatch) -> Vec<String> {
    data.schema_ref()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect()
}

/// The requested columns, or every column when none were requested.
pub(crate) fn selected_columns(data: &RecordBatch, columns: Option<&[String]>) -> Vec<String> {
    match columns {
        Some(columns) => columns.to_vec(),
        None => column_names(data),
    }
}

/// The index column named in the schema metadata, if any.
pub(crate) fn index_column(data: &RecordBatch) -> Result<Option<(String, &ArrayRef)>> {
    match data.schema_ref().metadata().get(INDEX_METADATA_KEY) {
        Some(name) => Ok(Some((name.clone(), column(data, name)?))),
        None => Ok(None),
    }
}

/// Casts a numeric column to `Float64`.
pub(crate) fn numeric(name: &str, array: &ArrayRef) -> Result<Float64Array> {
    if !array.data_type().is_numeric() {
        return Err(GuardError::TypeMismatch {
            column: name.to_string(),
            expected: "numeric".to_string(),
            found: array.data_type().to_string(),
        });
    }
    let values = cast(array.as_ref(), &DataType::Float64)?;
    Ok(values.as_primitive::<Float64Type>().clone())
}

/// Positions of null slots, including logical nulls.
pub(crate) fn null_rows(array: &ArrayRef) -> Vec<usize> {
    match array.logical_nulls() {
        Some(nulls) if nulls.null_count() > 0 => {
            (0..nulls.len()).filter(|&row| nulls.is_null(row)).collect()
        }
        _ => Vec::new(),
    }
}

/// Positions of missing slots: nulls, plus NaN in floating point columns.
pub(crate) fn missing_rows(name: &str, array: &ArrayRef) -> Result<Vec<usize>> {
    if !array.data_type().is_floating() {
        return Ok(null_rows(array));
    }
    let values = numeric(name, array)?;
    Ok(values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_none_or(f64::is_nan))
        .map(|(row, _)| row)
        .collect())
}

/// Converts one or more columns of the same types into comparable rows.
pub(crate) fn row_keys(columns: &[&ArrayRef]) -> Result<Vec<Rows>> {
    let Some(first) = columns.first() else {
        return Ok(Vec::new());
    };
    let converter = RowConverter::new(vec![SortField::new(first.data_type().clone())])?;
    columns
        .iter()
        .map(|array| Ok(converter.convert_columns(&[ArrayRef::clone(array)])?))
        .collect()
}

/// Renders the values at `rows` as text; nulls render as `null`.
pub(crate) fn render(array: &ArrayRef, rows: &[usize]) -> Result<Vec<String>> {
    let options = FormatOptions::default().with_null("null");
    let formatter = ArrayFormatter::try_new(array.as_ref(), &options)?;
    rows.iter()
        .map(|&row| Ok(formatter.value(row).try_to_string()?))
        .collect()
}

/// A cell value comparable against configured JSON values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

/// `value` as an exact integer, if it is integral and fits in 64 bits.
fn integral(value: f64) -> Option<i128> {
    (value.fract() == 0.0 && value.abs() < 2f64.powi(64)).then_some(value as i128)
}

/// Integer cells compare exactly; a float setting only matches when integral.
fn int_matches(cell: i128, value: &serde_json::Number) -> bool {
    if let Some(v) = value.as_i64() {
        cell == i128::from(v)
    } else if let Some(v) = value.as_u64() {
        cell == i128::from(v)
    } else {
        value.as_f64().and_then(integral) == Some(cell)
    }
}

impl Scalar {
    /// Numbers compare by value, so `1` matches a column value of `1.0`.
    pub(crate) fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Scalar::Null, Value::Null) => true,
            (Scalar::Bool(a), Value::Bool(b)) => a == b,
            (Scalar::Int(a), Value::Number(b)) => int_matches(i128::from(*a), b),
            (Scalar::UInt(a), Value::Number(b)) => int_matches(i128::from(*a), b),
            (Scalar::Float(a), Value::Number(b)) => b.as_f64().is_some_and(|b| *a == b),
            (Scalar::Text(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::UInt(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => write!(f, "{value}"),
        }
    }
}

/// Reads a column as scalars: booleans, integers, floats, or text for
/// everything else.
pub(crate) fn scalars(name: &str, array: &ArrayRef) -> Result<Vec<Scalar>> {
    let values = match array.data_type() {
        DataType::Boolean => array
            .as_boolean()
            .iter()
            .map(|value| value.map_or(Scalar::Null, Scalar::Bool))
            .collect(),
        data_type if data_type.is_signed_integer() => {
            let ints = cast(array.as_ref(), &DataType::Int64)?;
            ints.as_primitive::<Int64Type>()
                .iter()
                .map(|value| value.map_or(Scalar::Null, Scalar::Int))
                .collect()
        }
        data_type if data_type.is_unsigned_integer() => {
            let ints = cast(array.as_ref(), &DataType::UInt64)?;
            ints.as_primitive::<UInt64Type>()
                .iter()
                .map(|value| value.map_or(Scalar::Null, Scalar::UInt))
                .collect()
        }
        data_type if data_type.is_numeric() => numeric(name, array)?
            .iter()
            .map(|value| value.map_or(Scalar::Null, Scalar::Float))
            .collect(),
        _ => {
            let text = cast(array.as_ref(), &DataType::Utf8)?;
            text.as_string::<i32>()
                .iter()
                .map(|value| value.map_or(Scalar::Null, |s| Scalar::Text(s.to_string())))
                .collect()
        }
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{float_column, int_column, sample_batch, string_column};
    use arrow::array::UInt64Array;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_column_lookup() {
        let batch = sample_batch();
        assert!(column(&batch, "a").is_ok());
        assert!(matches!(
            column(&batch, "zzz"),
            Err(GuardError::ColumnNotFound { ref column }) if column == "zzz"
        ));
        assert_eq!(column_names(&batch), vec!["a", "b"]);
    }

    #[test]
    fn test_numeric_rejects_text() {
        let text = string_column(vec![Some("x")]);
        assert!(matches!(
            numeric("name", &text),
            Err(GuardError::TypeMismatch { .. })
        ));

        let ints = int_column(vec![Some(1), None]);
        let values = numeric("a", &ints).unwrap();
        assert_eq!(values.value(0), 1.0);
        assert!(values.is_null(1));
    }

    #[test]
    fn test_null_rows() {
        assert_eq!(null_rows(&int_column(vec![Some(1), None, Some(3), None])), vec![1, 3]);
        assert!(null_rows(&float_column(vec![Some(1.0)])).is_empty());
    }

    #[test]
    fn test_missing_rows_include_nan() {
        let floats = float_column(vec![Some(1.0), Some(f64::NAN), None]);
        assert_eq!(null_rows(&floats), vec![2]);
        assert_eq!(missing_rows("f", &floats).unwrap(), vec![1, 2]);

        let ints = int_column(vec![None, Some(2)]);
        assert_eq!(missing_rows("i", &ints).unwrap(), vec![0]);
    }

    #[test]
    fn test_render_values() {
        let array = int_column(vec![Some(7), None]);
        assert_eq!(render(&array, &[1, 0]).unwrap(), vec!["null", "7"]);
    }

    #[test]
    fn test_scalar_matching() {
        let values = scalars("a", &int_column(vec![Some(1), None])).unwrap();
        assert!(values[0].matches(&json!(1)));
        assert!(values[0].matches(&json!(1.0)));
        assert!(!values[0].matches(&json!("1")));
        assert!(values[1].matches(&json!(null)));

        let floats = scalars("f", &float_column(vec![Some(2.5)])).unwrap();
        assert!(floats[0].matches(&json!(2.5)));
        assert!(!floats[0].matches(&json!(2)));

        let text = scalars("s", &string_column(vec![Some("red")])).unwrap();
        assert!(text[0].matches(&json!("red")));
        assert_eq!(text[0].to_string(), "red");
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let values = scalars("a", &int_column(vec![Some(9_007_199_254_740_993)])).unwrap();
        assert_eq!(values[0], Scalar::Int(9_007_199_254_740_993));
        assert!(values[0].matches(&json!(9_007_199_254_740_993_i64)));
        assert!(!values[0].matches(&json!(9_007_199_254_740_992_i64)));
        assert!(!values[0].matches(&json!(9_007_199_254_740_992.0)));

        let unsigned: ArrayRef = Arc::new(UInt64Array::from(vec![u64::MAX]));
        let values = scalars("u", &unsigned).unwrap();
        assert!(values[0].matches(&json!(u64::MAX)));
        assert!(!values[0].matches(&json!(u64::MAX - 1)));
    }
}
