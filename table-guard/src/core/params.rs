//! Configured parameter values.

use super::CheckSpec;
use arrow::record_batch::RecordBatch;
use serde_json::Value;

/// A value configured for a check parameter.
///
/// Most parameters are plain data (shapes, column lists, item maps, numbers)
/// and are carried as JSON. Two parameters need richer values: `is_same_as`
/// compares against another table and `multi_check` takes a list of checks.
///
/// # Examples
///
/// ```rust
/// use table_guard::core::ParamValue;
/// use serde_json::json;
///
/// assert_eq!(ParamValue::from((4, 2)).as_json(), Some(&json!([4, 2])));
/// assert_eq!(ParamValue::from(vec!["a", "b"]).as_json(), Some(&json!(["a", "b"])));
/// assert_eq!(ParamValue::from(3).as_json(), Some(&json!(3)));
/// ```
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// Plain data
    Json(Value),
    /// Another table
    Table(RecordBatch),
    /// Member checks of a multi-check
    Checks(Vec<CheckSpec>),
}

impl ParamValue {
    /// Returns the JSON value, if this is plain data.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ParamValue::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if the value means "not supplied" (JSON `null`).
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Json(Value::Null))
    }

    /// Short description of the variant, used in error messages.
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Json(_) => "a JSON value",
            ParamValue::Table(_) => "a table",
            ParamValue::Checks(_) => "a list of checks",
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Json(value)
    }
}

impl From<RecordBatch> for ParamValue {
    fn from(batch: RecordBatch) -> Self {
        ParamValue::Table(batch)
    }
}

impl From<Vec<CheckSpec>> for ParamValue {
    fn from(checks: Vec<CheckSpec>) -> Self {
        ParamValue::Checks(checks)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Json(Value::Bool(value))
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Json(Value::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Json(Value::from(value))
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Json(Value::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Json(Value::from(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Json(Value::from(value))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Json(Value::from(value))
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Json(Value::from(values))
    }
}

impl From<(usize, usize)> for ParamValue {
    fn from((rows, columns): (usize, usize)) -> Self {
        ParamValue::Json(Value::Array(vec![Value::from(rows), Value::from(columns)]))
    }
}
