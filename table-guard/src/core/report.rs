//! Violation reports and non-fatal guard warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The structured description of a failed check.
///
/// A report is only ever built by a check that has already decided the data
/// violates its invariant; a passing check never produces one.
///
/// # Examples
///
/// ```rust
/// use table_guard::core::ViolationReport;
///
/// let report = ViolationReport::new("none_missing", "1 missing value in column 'a'")
///     .with_rows(vec![1])
///     .with_columns(vec!["a".to_string()]);
///
/// assert_eq!(report.rows, vec![1]);
/// assert_eq!(
///     report.to_string(),
///     "none_missing: 1 missing value in column 'a' (rows: [1]; columns: [a])"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    /// Name of the check that failed
    pub check: String,
    /// Human-readable description of the violation
    pub message: String,
    /// Positions of the offending rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<usize>,
    /// Names of the offending columns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// Offending values, rendered as text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl ViolationReport {
    /// Creates a report with a message and no location details.
    pub fn new(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            message: message.into(),
            rows: Vec::new(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Sets the offending row positions.
    pub fn with_rows(mut self, rows: Vec<usize>) -> Self {
        self.rows = rows;
        self
    }

    /// Sets the offending column names.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the offending values.
    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check, self.message)?;

        let mut details = Vec::new();
        if !self.rows.is_empty() {
            details.push(format!("rows: {:?}", self.rows));
        }
        if !self.columns.is_empty() {
            details.push(format!("columns: [{}]", self.columns.join(", ")));
        }
        if !self.values.is_empty() {
            details.push(format!("values: [{}]", self.values.join(", ")));
        }
        if !details.is_empty() {
            write!(f, " ({})", details.join("; "))?;
        }
        Ok(())
    }
}

/// A non-fatal event raised by a guard.
///
/// Warnings never interrupt the guarded operation; they are handed to the
/// guard's [`ViolationSink`](crate::core::ViolationSink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardWarning {
    /// Configuration names that the check does not declare; they were dropped.
    IgnoredConfiguration {
        /// Name of the check being configured
        check: String,
        /// The dropped parameter names
        names: Vec<String>,
    },
    /// A check failed on a guard running in warn mode.
    SoftViolation(ViolationReport),
}

impl GuardWarning {
    /// Returns the name of the check the warning is about.
    pub fn check(&self) -> &str {
        match self {
            GuardWarning::IgnoredConfiguration { check, .. } => check,
            GuardWarning::SoftViolation(report) => &report.check,
        }
    }
}

impl fmt::Display for GuardWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardWarning::IgnoredConfiguration { check, names } => write!(
                f,
                "{check} does not accept {}; ignoring them and continuing",
                names.join(", ")
            ),
            GuardWarning::SoftViolation(report) => write!(f, "{report}"),
        }
    }
}
