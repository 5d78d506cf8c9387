//! Binding configured values to a check's declared parameters.
//!
//! A check declares an ordered list of parameter names (the data argument is
//! implicit and never part of the list). Configuration arrives as positional
//! values and named values; [`bind`] resolves both into the exact set of
//! named values forwarded to the check on every call:
//!
//! 1. the i-th positional value fills the i-th declared parameter;
//! 2. a parameter without a positional value takes the named value, if any;
//! 3. a parameter with neither is left out and the check uses its default.
//!
//! More positional values than declared parameters is a configuration error.
//! Named values that match no declared parameter, or that name a parameter
//! already filled positionally, are dropped and listed in
//! [`Binding::ignored`].

use super::{CheckKind, CheckSpec, ParamValue};
use crate::error::{GuardError, Result};
use arrow::record_batch::RecordBatch;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// The resolved parameter set of one check.
///
/// Computed once when a guard is built and never changed afterwards.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    values: Vec<(String, ParamValue)>,
    ignored: Vec<String>,
}

/// Resolves positional and named configuration against `declared`.
///
/// # Examples
///
/// ```rust
/// use table_guard::core::{bind, ParamValue};
/// use serde_json::json;
///
/// let binding = bind("is_shape", &["shape"], vec![(4, 2).into()], vec![]).unwrap();
/// assert_eq!(binding.get("shape").and_then(ParamValue::as_json), Some(&json!([4, 2])));
///
/// let binding = bind(
///     "is_shape",
///     &["shape"],
///     vec![],
///     vec![("shape".into(), (4, 2).into()), ("cheese".into(), true.into())],
/// )
/// .unwrap();
/// assert_eq!(binding.names().collect::<Vec<_>>(), vec!["shape"]);
/// assert_eq!(binding.ignored(), ["cheese"]);
/// ```
pub fn bind(
    check: &str,
    declared: &[&str],
    positional: Vec<ParamValue>,
    named: Vec<(String, ParamValue)>,
) -> Result<Binding> {
    if positional.len() > declared.len() {
        return Err(GuardError::configuration(
            check,
            format!(
                "{} positional values given but only {} parameters declared ({})",
                positional.len(),
                declared.len(),
                declared.join(", ")
            ),
        ));
    }

    let filled = positional.len();
    let mut slots: Vec<Option<ParamValue>> = positional.into_iter().map(Some).collect();
    slots.resize(declared.len(), None);

    let mut ignored = Vec::new();
    for (name, value) in named {
        match declared.iter().position(|p| *p == name) {
            Some(index) if index < filled => {
                debug!(
                    check.name = %check,
                    param.name = %name,
                    "Named value shadowed by positional value"
                );
                ignored.push(name);
            }
            Some(index) => {
                if slots[index].replace(value).is_some() {
                    debug!(
                        check.name = %check,
                        param.name = %name,
                        "Earlier named value replaced by a later one"
                    );
                    ignored.push(name);
                }
            }
            None => ignored.push(name),
        }
    }

    let values = declared
        .iter()
        .zip(slots)
        .filter_map(|(name, slot)| slot.map(|value| ((*name).to_string(), value)))
        .collect();

    Ok(Binding { values, ignored })
}

impl Binding {
    /// Returns the bound value of a parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value)
    }

    /// Names of the bound parameters, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    /// Configured names that were dropped instead of forwarded.
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// Returns the number of bound parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameter is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the JSON value of a parameter; `null` counts as not supplied.
    fn json(&self, check: CheckKind, name: &str) -> Result<Option<&Value>> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::Json(Value::Null)) => Ok(None),
            Some(ParamValue::Json(value)) => Ok(Some(value)),
            Some(other) => Err(GuardError::invalid_parameter(
                check.as_str(),
                name,
                format!("expected a JSON value, got {}", other.type_name()),
            )),
        }
    }

    /// Decodes an optional parameter into `T`.
    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        check: CheckKind,
        name: &str,
    ) -> Result<Option<T>> {
        self.json(check, name)?
            .map(|value| decode_value(check, name, value))
            .transpose()
    }

    /// Decodes a required parameter into `T`.
    pub(crate) fn require<T: DeserializeOwned>(&self, check: CheckKind, name: &str) -> Result<T> {
        self.decode(check, name)?
            .ok_or_else(|| missing(check, name))
    }

    /// Decodes a column selection given as one name or a list of names.
    pub(crate) fn columns(&self, check: CheckKind, name: &str) -> Result<Option<Vec<String>>> {
        match self.json(check, name)? {
            None => Ok(None),
            Some(Value::String(column)) => Ok(Some(vec![column.clone()])),
            Some(value) => decode_value(check, name, value).map(Some),
        }
    }

    /// Decodes a `{column: T}` mapping.
    pub(crate) fn items<T: DeserializeOwned>(
        &self,
        check: CheckKind,
        name: &str,
    ) -> Result<Option<Vec<(String, T)>>> {
        let Some(value) = self.json(check, name)? else {
            return Ok(None);
        };
        let Value::Object(map) = value else {
            return Err(GuardError::invalid_parameter(
                check.as_str(),
                name,
                format!("expected a mapping of column names, got {value}"),
            ));
        };
        map.iter()
            .map(|(column, entry)| Ok((column.clone(), decode_value(check, name, entry)?)))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Decodes a required `{column: T}` mapping.
    pub(crate) fn require_items<T: DeserializeOwned>(
        &self,
        check: CheckKind,
        name: &str,
    ) -> Result<Vec<(String, T)>> {
        self.items(check, name)?
            .ok_or_else(|| missing(check, name))
    }

    /// Returns a required table parameter.
    pub(crate) fn table(&self, check: CheckKind, name: &str) -> Result<&RecordBatch> {
        match self.get(name) {
            Some(ParamValue::Table(batch)) => Ok(batch),
            Some(other) => Err(GuardError::invalid_parameter(
                check.as_str(),
                name,
                format!("expected a table, got {}", other.type_name()),
            )),
            None => Err(missing(check, name)),
        }
    }

    /// Returns a required list of member checks.
    pub(crate) fn checks(&self, check: CheckKind, name: &str) -> Result<&[CheckSpec]> {
        match self.get(name) {
            Some(ParamValue::Checks(checks)) => Ok(checks),
            Some(other) => Err(GuardError::invalid_parameter(
                check.as_str(),
                name,
                format!("expected a list of checks, got {}", other.type_name()),
            )),
            None => Err(missing(check, name)),
        }
    }

    /// Iterates over nested member checks, if any are bound.
    pub(crate) fn members(&self) -> impl Iterator<Item = &CheckSpec> {
        self.values.iter().flat_map(|(_, value)| {
            let checks: &[CheckSpec] = match value {
                ParamValue::Checks(checks) => checks,
                _ => &[],
            };
            checks
        })
    }
}

fn decode_value<T: DeserializeOwned>(check: CheckKind, name: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| GuardError::invalid_parameter(check.as_str(), name, e.to_string()))
}

fn missing(check: CheckKind, name: &str) -> GuardError {
    GuardError::invalid_parameter(check.as_str(), name, "required parameter is not configured")
}
