//! Guards described as JSON.
//!
//! ```json
//! {
//!   "check": "multi_check",
//!   "warn": true,
//!   "params": {
//!     "checks": [
//!       { "check": "is_shape", "args": [[null, 2]] },
//!       { "check": "none_missing", "params": { "columns": ["a"] } }
//!     ]
//!   }
//! }
//! ```
//!
//! Tables cannot be described in JSON, so `is_same_as` guards are built in
//! code.

use super::{CheckKind, CheckSpec, Guard, GuardBuilder, ParamValue};
use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A guard description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfigFile {
    /// Check name, for example `within_range`
    pub check: CheckKind,
    /// Whether the guard starts enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Whether violations go to the sink instead of failing
    #[serde(default)]
    pub warn: bool,
    /// Positional values
    #[serde(default)]
    pub args: Vec<Value>,
    /// Named values
    #[serde(default)]
    pub params: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

/// A member check of a `multi_check` description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSpecFile {
    /// Check name
    pub check: CheckKind,
    /// Positional values
    #[serde(default)]
    pub args: Vec<Value>,
    /// Named values
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl CheckSpecFile {
    /// Binds the description into a [`CheckSpec`].
    pub fn to_spec(&self) -> Result<CheckSpec> {
        let builder = self
            .args
            .iter()
            .enumerate()
            .try_fold(CheckSpec::builder(self.check), |builder, (index, value)| {
                Ok::<_, GuardError>(builder.arg(positional_value(self.check, index, value)?))
            })?;
        self.params
            .iter()
            .try_fold(builder, |builder, (name, value)| {
                Ok::<_, GuardError>(builder.param(name, param_value(self.check, name, value)?))
            })?
            .build()
    }
}

/// Converts a configured value, expanding nested member checks.
fn param_value(kind: CheckKind, name: &str, value: &Value) -> Result<ParamValue> {
    if kind != CheckKind::MultiCheck || name != "checks" {
        return Ok(value.clone().into());
    }
    let members: Vec<CheckSpecFile> = serde_json::from_value(value.clone()).map_err(|e| {
        GuardError::configuration(kind.as_str(), format!("invalid member checks: {e}"))
    })?;
    let specs = members
        .iter()
        .map(CheckSpecFile::to_spec)
        .collect::<Result<Vec<_>>>()?;
    Ok(specs.into())
}

fn positional_value(kind: CheckKind, index: usize, value: &Value) -> Result<ParamValue> {
    match kind.parameters().get(index) {
        Some(name) => param_value(kind, name, value),
        None => Ok(value.clone().into()),
    }
}

impl GuardConfigFile {
    /// Turns the description into a builder, so a sink or log configuration
    /// can still be attached.
    pub fn to_builder(&self) -> Result<GuardBuilder> {
        let mut builder = Guard::builder(self.check)
            .enabled(self.enabled)
            .warn(self.warn);
        for (index, value) in self.args.iter().enumerate() {
            builder = builder.arg(positional_value(self.check, index, value)?);
        }
        for (name, value) in &self.params {
            builder = builder.param(name, param_value(self.check, name, value)?);
        }
        Ok(builder)
    }
}

impl Guard {
    /// Builds a guard from a parsed description.
    pub fn from_config(config: &GuardConfigFile) -> Result<Guard> {
        config.to_builder()?.build()
    }

    /// Builds a guard from a JSON description.
    ///
    /// ```rust
    /// use table_guard::core::Guard;
    ///
    /// let guard = Guard::from_json(r#"{"check": "is_shape", "args": [[3, 2]], "warn": true}"#)?;
    /// assert!(guard.is_warn());
    /// # Ok::<(), table_guard::error::GuardError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Guard> {
        let config: GuardConfigFile = serde_json::from_str(json)
            .map_err(|e| GuardError::configuration("guard", format!("invalid guard description: {e}")))?;
        Self::from_config(&config)
    }
}
