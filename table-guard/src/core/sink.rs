//! Destinations for non-fatal guard warnings.

use super::{GuardWarning, ViolationReport};
use crate::formatters::{HumanFormatter, WarningFormatter};
use crate::logging::{truncate_field, LogConfig};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, warn};

/// Receives warnings that must not interrupt the guarded operation.
///
/// Implementations must not panic and must tolerate concurrent calls.
pub trait ViolationSink: fmt::Debug + Send + Sync {
    /// Handles one warning.
    fn emit(&self, warning: &GuardWarning);
}

/// Emits warnings as `tracing` events at warn level.
///
/// This is the default sink of every guard.
pub struct LogSink {
    config: LogConfig,
    formatter: Box<dyn WarningFormatter>,
}

impl LogSink {
    /// Creates a sink using the human formatter.
    pub fn new(config: LogConfig) -> Self {
        Self {
            config,
            formatter: Box::new(HumanFormatter::new()),
        }
    }

    /// Replaces the formatter.
    pub fn with_formatter(mut self, formatter: impl WarningFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ViolationSink for LogSink {
    fn emit(&self, warning: &GuardWarning) {
        let message = match self.formatter.format(warning) {
            Ok(message) => message,
            Err(e) => {
                error!(check.name = %warning.check(), error = %e, "Failed to format guard warning");
                warning.to_string()
            }
        };
        let message = truncate_field(&message, self.config.max_field_length);
        match warning {
            GuardWarning::IgnoredConfiguration { check, .. } => warn!(
                check.name = %check,
                warning.kind = "ignored_configuration",
                "{message}"
            ),
            GuardWarning::SoftViolation(report) => warn!(
                check.name = %report.check,
                warning.kind = "soft_violation",
                violation.rows = report.rows.len(),
                violation.columns = report.columns.len(),
                "{message}"
            ),
        }
    }
}

/// Records warnings in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// another to a guard.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use table_guard::core::{CollectingSink, GuardWarning, ViolationReport, ViolationSink};
///
/// let sink = CollectingSink::new();
/// let shared: Arc<dyn ViolationSink> = Arc::new(sink.clone());
/// shared.emit(&GuardWarning::SoftViolation(ViolationReport::new("unique", "dup")));
///
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.violations()[0].check, "unique");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    warnings: Arc<Mutex<Vec<GuardWarning>>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GuardWarning>> {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of every recorded warning, oldest first.
    pub fn warnings(&self) -> Vec<GuardWarning> {
        self.lock().clone()
    }

    /// Returns the recorded soft violations, oldest first.
    pub fn violations(&self) -> Vec<ViolationReport> {
        self.lock()
            .iter()
            .filter_map(|warning| match warning {
                GuardWarning::SoftViolation(report) => Some(report.clone()),
                GuardWarning::IgnoredConfiguration { .. } => None,
            })
            .collect()
    }

    /// Returns the number of recorded warnings.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forgets every recorded warning.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl ViolationSink for CollectingSink {
    fn emit(&self, warning: &GuardWarning) {
        self.lock().push(warning.clone());
    }
}

static DEFAULT_SINK: Lazy<Arc<dyn ViolationSink>> = Lazy::new(|| Arc::new(LogSink::default()));

/// The process-wide default sink, a [`LogSink`] with default settings.
pub fn default_sink() -> Arc<dyn ViolationSink> {
    Arc::clone(&DEFAULT_SINK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::JsonFormatter;

    #[test]
    fn test_collecting_sink_shares_buffer() {
        let sink = CollectingSink::new();
        let handle = sink.clone();
        handle.emit(&GuardWarning::IgnoredConfiguration {
            check: "is_shape".to_string(),
            names: vec!["cheese".to_string()],
        });
        handle.emit(&GuardWarning::SoftViolation(ViolationReport::new(
            "unique", "dup",
        )));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.violations().len(), 1);
        assert_eq!(sink.warnings()[0].check(), "is_shape");

        sink.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_log_sink_does_not_panic() {
        let sink = LogSink::new(LogConfig::production()).with_formatter(JsonFormatter::new());
        sink.emit(&GuardWarning::SoftViolation(
            ViolationReport::new("within_range", "x".repeat(500)).with_rows(vec![1, 2]),
        ));
        default_sink().emit(&GuardWarning::IgnoredConfiguration {
            check: "unique".to_string(),
            names: vec!["cols".to_string()],
        });
    }
}
