//! A check together with its resolved parameters.

use super::multi::run_checks;
use super::{bind, Binding, CheckKind, GuardWarning, ParamValue, ViolationReport};
use crate::error::{GuardError, Result};
use arrow::record_batch::RecordBatch;

/// A configured check: a kind plus its bound parameters.
///
/// Specs are the members of a multi-check and the payload of every guard.
///
/// # Examples
///
/// ```rust
/// use table_guard::core::{CheckKind, CheckSpec};
///
/// let spec = CheckSpec::builder(CheckKind::IsShape)
///     .arg((3, 2))
///     .build()
///     .unwrap();
/// assert_eq!(spec.kind(), CheckKind::IsShape);
/// ```
#[derive(Debug, Clone)]
pub struct CheckSpec {
    kind: CheckKind,
    binding: Binding,
}

impl CheckSpec {
    /// Starts building a spec for `kind`.
    pub fn builder(kind: CheckKind) -> CheckSpecBuilder {
        CheckSpecBuilder {
            kind,
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Builds a spec from named values only.
    pub fn new<I, K, V>(kind: CheckKind, named: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        named
            .into_iter()
            .fold(Self::builder(kind), |builder, (name, value)| {
                builder.param(name, value)
            })
            .build()
    }

    /// Returns the check kind.
    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    /// Returns the bound parameters.
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Ignored-configuration warnings for this spec and any nested members.
    pub(crate) fn ignored_warnings(&self) -> Vec<GuardWarning> {
        let mut warnings = Vec::new();
        if !self.binding.ignored().is_empty() {
            warnings.push(GuardWarning::IgnoredConfiguration {
                check: self.kind.as_str().to_string(),
                names: self.binding.ignored().to_vec(),
            });
        }
        for member in self.binding.members() {
            warnings.extend(member.ignored_warnings());
        }
        warnings
    }

    /// Runs the check once.
    ///
    /// Returns the violations collected under `warn`. Without `warn` the
    /// first violation is returned as [`GuardError::Validation`]. Errors
    /// that are not violations are always returned as errors.
    pub fn evaluate(&self, data: &RecordBatch, warn: bool) -> Result<Vec<ViolationReport>> {
        if self.kind == CheckKind::MultiCheck {
            return run_checks(self.binding.checks(self.kind, "checks")?, data, warn);
        }
        match self.kind.run(data, &self.binding) {
            Ok(()) => Ok(Vec::new()),
            Err(GuardError::Validation(report)) if warn => Ok(vec![*report]),
            Err(e) => Err(e),
        }
    }
}

/// Collects positional and named values for a [`CheckSpec`].
#[derive(Debug, Clone)]
pub struct CheckSpecBuilder {
    kind: CheckKind,
    positional: Vec<ParamValue>,
    named: Vec<(String, ParamValue)>,
}

impl CheckSpecBuilder {
    /// Appends a positional value.
    pub fn arg(mut self, value: impl Into<ParamValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a named value.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    /// Returns the kind being built.
    pub fn kind(&self) -> CheckKind {
        self.kind
    }

    /// Binds the collected values against the kind's declared parameters.
    pub fn build(self) -> Result<CheckSpec> {
        let binding = bind(
            self.kind.as_str(),
            self.kind.parameters(),
            self.positional,
            self.named,
        )?;
        Ok(CheckSpec {
            kind: self.kind,
            binding,
        })
    }
}
