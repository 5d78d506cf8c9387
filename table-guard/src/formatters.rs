//! Rendering of guard warnings for logs and reports.
//!
//! Sinks hand every [`GuardWarning`] to a formatter before writing it out.
//! Two formatters are provided: a one-line human-readable form and a JSON
//! form for structured log pipelines.
//!
//! # Examples
//!
//! ```rust
//! use table_guard::core::{GuardWarning, ViolationReport};
//! use table_guard::formatters::{FormatterConfig, HumanFormatter, WarningFormatter};
//!
//! let warning = GuardWarning::SoftViolation(
//!     ViolationReport::new("none_missing", "1 missing value(s) in 1 column(s)")
//!         .with_rows(vec![1])
//!         .with_columns(vec!["a".to_string()]),
//! );
//!
//! let text = HumanFormatter::new().format(&warning).unwrap();
//! assert_eq!(
//!     text,
//!     "none_missing: 1 missing value(s) in 1 column(s) (rows: [1]; columns: [a])"
//! );
//! ```

use crate::core::{GuardWarning, ViolationReport};
use crate::error::Result;
use std::fmt::Write;

/// Configuration options for formatting warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Maximum number of rows and values listed per report (`None` for all)
    pub max_items: Option<usize>,
    /// Whether offending values are included
    pub include_values: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_items: Some(20),
            include_values: true,
        }
    }
}

impl FormatterConfig {
    /// Lists every row and value.
    pub fn detailed() -> Self {
        Self {
            max_items: None,
            include_values: true,
        }
    }

    /// Keeps output short and leaves data values out of logs.
    pub fn minimal() -> Self {
        Self {
            max_items: Some(5),
            include_values: false,
        }
    }

    /// Sets the maximum number of listed rows and values.
    pub fn with_max_items(mut self, max: Option<usize>) -> Self {
        self.max_items = max;
        self
    }

    /// Sets whether offending values are included.
    pub fn with_values(mut self, include: bool) -> Self {
        self.include_values = include;
        self
    }

    fn limit<T: Clone>(&self, items: &[T]) -> Vec<T> {
        match self.max_items {
            Some(max) if items.len() > max => items[..max].to_vec(),
            _ => items.to_vec(),
        }
    }

    /// Applies the item limit and value policy to a report.
    pub(crate) fn apply(&self, report: &ViolationReport) -> ViolationReport {
        ViolationReport {
            check: report.check.clone(),
            message: report.message.clone(),
            rows: self.limit(&report.rows),
            columns: report.columns.clone(),
            values: if self.include_values {
                self.limit(&report.values)
            } else {
                Vec::new()
            },
        }
    }
}

/// Converts guard warnings into text.
///
/// # Examples
///
/// ```rust
/// use table_guard::core::GuardWarning;
/// use table_guard::formatters::WarningFormatter;
///
/// struct CheckNameOnly;
///
/// impl WarningFormatter for CheckNameOnly {
///     fn format(&self, warning: &GuardWarning) -> table_guard::error::Result<String> {
///         Ok(warning.check().to_string())
///     }
/// }
/// ```
pub trait WarningFormatter: Send + Sync {
    /// Formats a warning.
    fn format(&self, warning: &GuardWarning) -> Result<String>;

    /// Formats a warning with a custom configuration.
    fn format_with_config(&self, warning: &GuardWarning, _config: &FormatterConfig) -> Result<String> {
        self.format(warning)
    }
}

/// One-line text output for console logs.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a new human formatter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new human formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

fn push_list<T: ToString>(out: &mut Vec<String>, label: &str, shown: &[T], total: usize) {
    if total == 0 {
        return;
    }
    let mut list = shown
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if total > shown.len() {
        let _ = write!(list, ", ... {} more", total - shown.len());
    }
    out.push(format!("{label}: [{list}]"));
}

impl WarningFormatter for HumanFormatter {
    fn format(&self, warning: &GuardWarning) -> Result<String> {
        self.format_with_config(warning, &self.config)
    }

    fn format_with_config(&self, warning: &GuardWarning, config: &FormatterConfig) -> Result<String> {
        let GuardWarning::SoftViolation(report) = warning else {
            return Ok(warning.to_string());
        };

        let shown = config.apply(report);
        let mut details = Vec::new();
        push_list(&mut details, "rows", &shown.rows, report.rows.len());
        push_list(&mut details, "columns", &shown.columns, report.columns.len());
        if config.include_values {
            push_list(&mut details, "values", &shown.values, report.values.len());
        }

        let mut output = format!("{}: {}", report.check, report.message);
        if !details.is_empty() {
            let _ = write!(output, " ({})", details.join("; "));
        }
        Ok(output)
    }
}

/// Structured JSON output.
///
/// Warnings serialize with a `kind` tag (`soft_violation` or
/// `ignored_configuration`).
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a compact JSON formatter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new JSON formatter with the specified configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: false,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl WarningFormatter for JsonFormatter {
    fn format(&self, warning: &GuardWarning) -> Result<String> {
        self.format_with_config(warning, &self.config)
    }

    fn format_with_config(&self, warning: &GuardWarning, config: &FormatterConfig) -> Result<String> {
        let filtered = match warning {
            GuardWarning::SoftViolation(report) => GuardWarning::SoftViolation(config.apply(report)),
            other => other.clone(),
        };
        let output = if self.pretty {
            serde_json::to_string_pretty(&filtered)?
        } else {
            serde_json::to_string(&filtered)?
        };
        Ok(output)
    }
}
