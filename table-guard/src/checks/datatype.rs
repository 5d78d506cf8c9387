//! Column data type check.

use super::frame::column;
use crate::core::{CheckKind, ViolationReport};
use crate::error::Result;
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use tracing::debug;

/// Returns true when `data_type` is described by `expected`.
///
/// `expected` is an arrow type name compared case-insensitively (`Int64`,
/// `utf8`, `Timestamp(Nanosecond, None)`), or one of the aliases:
///
/// | alias | types |
/// |---|---|
/// | `int`, `integer` | any signed or unsigned integer |
/// | `float`, `double`, `f64` | `Float64` |
/// | `f32` | `Float32` |
/// | `bool` | `Boolean` |
/// | `str`, `string`, `object`, `text` | `Utf8`, `LargeUtf8`, `Utf8View` |
/// | `datetime` | any `Timestamp` |
/// | `date` | `Date32`, `Date64` |
///
/// ```rust
/// use arrow::datatypes::DataType;
/// use table_guard::checks::dtype_matches;
///
/// assert!(dtype_matches(&DataType::Int64, "int64"));
/// assert!(dtype_matches(&DataType::Utf8, "object"));
/// assert!(!dtype_matches(&DataType::Float32, "float64"));
/// ```
pub fn dtype_matches(data_type: &DataType, expected: &str) -> bool {
    let expected = expected.trim().to_ascii_lowercase();
    if data_type.to_string().to_ascii_lowercase() == expected {
        return true;
    }
    match expected.as_str() {
        "int" | "integer" => data_type.is_integer(),
        "float" | "double" | "f64" => *data_type == DataType::Float64,
        "f32" => *data_type == DataType::Float32,
        "bool" => *data_type == DataType::Boolean,
        "str" | "string" | "object" | "text" => matches!(
            data_type,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
        ),
        "datetime" => matches!(data_type, DataType::Timestamp(_, _)),
        "datetime64[ns]" => matches!(data_type, DataType::Timestamp(TimeUnit::Nanosecond, _)),
        "date" => matches!(data_type, DataType::Date32 | DataType::Date64),
        _ => false,
    }
}

/// Asserts that each listed column has the expected data type.
pub fn has_dtypes(data: &RecordBatch, items: &[(String, String)]) -> Result<()> {
    let mut failures = Vec::new();
    let mut offending = Vec::new();
    let mut found = Vec::new();

    for (name, expected) in items {
        let actual = column(data, name)?.data_type();
        if dtype_matches(actual, expected) {
            continue;
        }
        failures.push(format!("'{name}' has type {actual}, expected {expected}"));
        offending.push(name.clone());
        found.push(actual.to_string());
    }

    if offending.is_empty() {
        debug!(
            check.name = %CheckKind::HasDtypes,
            result.status = "success",
            columns = items.len(),
            "All column types match"
        );
        return Ok(());
    }

    Err(
        ViolationReport::new(CheckKind::HasDtypes.as_str(), failures.join("; "))
            .with_columns(offending)
            .with_values(found)
            .into(),
    )
}
