//! Groups of checks sharing one warn policy.

use super::{CheckSpec, ViolationReport};
use crate::error::Result;
use arrow::record_batch::RecordBatch;
use tracing::debug;

/// An ordered group of member checks.
///
/// With `warn = false` the group stops at the first violation. With
/// `warn = true` every member runs and all violations are returned. Nested
/// groups inherit the enclosing policy.
#[derive(Debug, Clone, Default)]
pub struct MultiCheckGroup {
    checks: Vec<CheckSpec>,
    warn: bool,
}

impl MultiCheckGroup {
    /// Creates a fail-fast group.
    pub fn new(checks: Vec<CheckSpec>) -> Self {
        Self {
            checks,
            warn: false,
        }
    }

    /// Sets the warn policy.
    pub fn warn(mut self, warn: bool) -> Self {
        self.warn = warn;
        self
    }

    /// Returns the member checks.
    pub fn checks(&self) -> &[CheckSpec] {
        &self.checks
    }

    /// Returns true if violations are collected instead of raised.
    pub fn is_warn(&self) -> bool {
        self.warn
    }

    /// Runs every member against `data`.
    pub fn run(&self, data: &RecordBatch) -> Result<Vec<ViolationReport>> {
        run_checks(&self.checks, data, self.warn)
    }
}

/// Runs `checks` in order under one warn policy.
pub(crate) fn run_checks(
    checks: &[CheckSpec],
    data: &RecordBatch,
    warn: bool,
) -> Result<Vec<ViolationReport>> {
    let mut reports = Vec::new();
    for (position, check) in checks.iter().enumerate() {
        let found = check.evaluate(data, warn)?;
        debug!(
            check.name = %check.kind(),
            check.position = position,
            check.warn = warn,
            violations = found.len(),
            "Multi-check member evaluated"
        );
        reports.extend(found);
    }
    Ok(reports)
}
