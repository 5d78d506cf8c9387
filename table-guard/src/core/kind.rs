//! The closed set of built-in checks.

use super::multi::run_checks;
use super::Binding;
use crate::checks::{self, Monotonic, Shape, DEFAULT_N_STD};
use crate::error::{GuardError, Result};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Identifies a built-in check.
///
/// Each kind declares its parameter names in order; the data argument is
/// implicit. See [`CheckKind::parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    IsShape,
    NoneMissing,
    Unique,
    UniqueIndex,
    IsMonotonic,
    WithinSet,
    WithinRange,
    WithinNStd,
    HasDtypes,
    OneToMany,
    IsSameAs,
    MultiCheck,
}

impl CheckKind {
    /// All kinds, in declaration order.
    pub const ALL: [CheckKind; 12] = [
        CheckKind::IsShape,
        CheckKind::NoneMissing,
        CheckKind::Unique,
        CheckKind::UniqueIndex,
        CheckKind::IsMonotonic,
        CheckKind::WithinSet,
        CheckKind::WithinRange,
        CheckKind::WithinNStd,
        CheckKind::HasDtypes,
        CheckKind::OneToMany,
        CheckKind::IsSameAs,
        CheckKind::MultiCheck,
    ];

    /// Returns the snake_case name of the check.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::IsShape => "is_shape",
            CheckKind::NoneMissing => "none_missing",
            CheckKind::Unique => "unique",
            CheckKind::UniqueIndex => "unique_index",
            CheckKind::IsMonotonic => "is_monotonic",
            CheckKind::WithinSet => "within_set",
            CheckKind::WithinRange => "within_range",
            CheckKind::WithinNStd => "within_n_std",
            CheckKind::HasDtypes => "has_dtypes",
            CheckKind::OneToMany => "one_to_many",
            CheckKind::IsSameAs => "is_same_as",
            CheckKind::MultiCheck => "multi_check",
        }
    }

    /// Declared parameter names, in positional order.
    ///
    /// ```rust
    /// use table_guard::core::CheckKind;
    ///
    /// assert_eq!(CheckKind::IsShape.parameters(), ["shape"]);
    /// assert_eq!(CheckKind::OneToMany.parameters(), ["unitcol", "manycol"]);
    /// assert!(CheckKind::UniqueIndex.parameters().is_empty());
    /// ```
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            CheckKind::IsShape => &["shape"],
            CheckKind::NoneMissing | CheckKind::Unique => &["columns"],
            CheckKind::UniqueIndex => &[],
            CheckKind::IsMonotonic => &["items", "increasing", "strict"],
            CheckKind::WithinSet | CheckKind::WithinRange | CheckKind::HasDtypes => &["items"],
            CheckKind::WithinNStd => &["n"],
            CheckKind::OneToMany => &["unitcol", "manycol"],
            CheckKind::IsSameAs => &["df_to_compare"],
            CheckKind::MultiCheck => &["checks"],
        }
    }

    /// Evaluates the check with its bound parameters.
    ///
    /// Missing optional parameters take the check's default. A multi-check
    /// run this way stops at its first violation.
    pub(crate) fn run(self, data: &RecordBatch, binding: &Binding) -> Result<()> {
        match self {
            CheckKind::IsShape => {
                let (rows, columns): (Option<i64>, Option<i64>) =
                    binding.require(self, "shape")?;
                checks::is_shape(data, Shape::from_dims(rows, columns))
            }
            CheckKind::NoneMissing => {
                let columns = binding.columns(self, "columns")?;
                checks::none_missing(data, columns.as_deref())
            }
            CheckKind::Unique => {
                let columns = binding.columns(self, "columns")?;
                checks::unique(data, columns.as_deref())
            }
            CheckKind::UniqueIndex => checks::unique_index(data),
            CheckKind::IsMonotonic => checks::is_monotonic(data, &monotonic_items(data, binding)?),
            CheckKind::WithinSet => {
                let items: Vec<(String, Vec<Value>)> = binding.require_items(self, "items")?;
                checks::within_set(data, &items)
            }
            CheckKind::WithinRange => {
                let items: Vec<(String, (f64, f64))> = binding.require_items(self, "items")?;
                checks::within_range(data, &items)
            }
            CheckKind::WithinNStd => {
                let n = binding.decode(self, "n")?.unwrap_or(DEFAULT_N_STD);
                checks::within_n_std(data, n)
            }
            CheckKind::HasDtypes => {
                let items: Vec<(String, String)> = binding.require_items(self, "items")?;
                checks::has_dtypes(data, &items)
            }
            CheckKind::OneToMany => {
                let unitcol: String = binding.require(self, "unitcol")?;
                let manycol: String = binding.require(self, "manycol")?;
                checks::one_to_many(data, &unitcol, &manycol)
            }
            CheckKind::IsSameAs => {
                checks::is_same_as(data, binding.table(self, "df_to_compare")?)
            }
            CheckKind::MultiCheck => {
                run_checks(binding.checks(self, "checks")?, data, false).map(|_| ())
            }
        }
    }
}

/// Resolves `is_monotonic` parameters into per-column orderings.
///
/// `items` maps columns to `[increasing, strict]`; without it every column
/// uses the top-level `increasing` and `strict`.
fn monotonic_items(data: &RecordBatch, binding: &Binding) -> Result<Vec<(String, Monotonic)>> {
    let kind = CheckKind::IsMonotonic;
    let increasing: Option<bool> = binding.decode(kind, "increasing")?;
    let strict: bool = binding.decode(kind, "strict")?.unwrap_or(false);

    match binding.items::<(Option<bool>, Option<bool>)>(kind, "items")? {
        Some(items) => Ok(items
            .into_iter()
            .map(|(column, (increasing, item_strict))| {
                let order = Monotonic {
                    increasing,
                    strict: item_strict.unwrap_or(strict),
                };
                (column, order)
            })
            .collect()),
        None => Ok(checks::frame::column_names(data)
            .into_iter()
            .map(|column| (column, Monotonic { increasing, strict }))
            .collect()),
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GuardError::configuration(s, "unknown check"))
    }
}
