//! Guards: checks attached to data-producing operations.
//!
//! A [`Guard`] owns one configured check plus its policy (enabled, warn,
//! sink). [`Guard::wrap`] attaches it to an operation; the resulting
//! [`Guarded`] runs the operation and then the check on every call.

use super::sink::default_sink;
use super::{CheckKind, CheckSpec, CheckSpecBuilder, GuardWarning, ParamValue, ViolationSink};
use crate::error::{GuardError, Result};
use crate::log_check;
use crate::logging::LogConfig;
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Names consumed by [`GuardBuilder::param`] instead of being bound.
pub const RESERVED_PARAMETERS: [&str; 2] = ["enabled", "warn"];

/// Validates a value produced by a guarded operation.
pub trait Validator<T: ?Sized> {
    /// Returns `Ok(())` if `value` is acceptable.
    fn validate(&self, value: &T) -> Result<()>;
}

/// A configured check with its enable flag and warn policy.
///
/// Guards are `Send + Sync`. A call reads the enable flag once and never
/// mutates the guard; [`Guard::enable`] and [`Guard::disable`] may be used
/// from any thread.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array};
/// use arrow::record_batch::RecordBatch;
/// use table_guard::prelude::*;
///
/// fn load() -> Result<RecordBatch> {
///     let values = Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])) as ArrayRef;
///     Ok(RecordBatch::try_from_iter(vec![("a", values)])?)
/// }
///
/// let guarded = Guard::none_missing().build()?.wrap(|()| load());
/// let err = guarded.call(()).unwrap_err();
/// assert_eq!(err.violation().unwrap().rows, vec![1]);
/// # Ok::<(), GuardError>(())
/// ```
pub struct Guard {
    spec: CheckSpec,
    enabled: AtomicBool,
    warn: bool,
    sink: Arc<dyn ViolationSink>,
    log: LogConfig,
}

impl Guard {
    /// Starts building a guard for `kind`.
    pub fn builder(kind: CheckKind) -> GuardBuilder {
        GuardBuilder::new(kind)
    }

    /// Asserts the row and column counts (`shape`).
    pub fn is_shape() -> GuardBuilder {
        Self::builder(CheckKind::IsShape)
    }

    /// Asserts that there are no nulls (`columns`).
    pub fn none_missing() -> GuardBuilder {
        Self::builder(CheckKind::NoneMissing)
    }

    /// Asserts that columns hold no repeated values (`columns`).
    pub fn unique() -> GuardBuilder {
        Self::builder(CheckKind::Unique)
    }

    /// Asserts that the index holds no repeated values.
    pub fn unique_index() -> GuardBuilder {
        Self::builder(CheckKind::UniqueIndex)
    }

    /// Asserts column ordering (`items`, `increasing`, `strict`).
    pub fn is_monotonic() -> GuardBuilder {
        Self::builder(CheckKind::IsMonotonic)
    }

    /// Asserts set membership (`items`).
    pub fn within_set() -> GuardBuilder {
        Self::builder(CheckKind::WithinSet)
    }

    /// Asserts inclusive ranges (`items`).
    pub fn within_range() -> GuardBuilder {
        Self::builder(CheckKind::WithinRange)
    }

    /// Asserts values lie within `n` standard deviations of the mean (`n`).
    pub fn within_n_std() -> GuardBuilder {
        Self::builder(CheckKind::WithinNStd)
    }

    /// Asserts column data types (`items`).
    pub fn has_dtypes() -> GuardBuilder {
        Self::builder(CheckKind::HasDtypes)
    }

    /// Asserts a one-to-many relationship (`unitcol`, `manycol`).
    pub fn one_to_many() -> GuardBuilder {
        Self::builder(CheckKind::OneToMany)
    }

    /// Asserts equality with another table (`df_to_compare`).
    pub fn is_same_as() -> GuardBuilder {
        Self::builder(CheckKind::IsSameAs)
    }

    /// Runs a group of checks under the guard's warn policy (`checks`).
    pub fn multi_check() -> GuardBuilder {
        Self::builder(CheckKind::MultiCheck)
    }

    /// Returns the configured check.
    pub fn spec(&self) -> &CheckSpec {
        &self.spec
    }

    /// Returns the check kind.
    pub fn kind(&self) -> CheckKind {
        self.spec.kind()
    }

    /// Returns true if the guard checks results.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Turns checking on.
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Turns checking off; guarded calls then return results unchecked.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Sets whether the guard checks results.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Returns true if violations are reported to the sink instead of raised.
    pub fn is_warn(&self) -> bool {
        self.warn
    }

    /// Returns the sink receiving warnings.
    pub fn sink(&self) -> &Arc<dyn ViolationSink> {
        &self.sink
    }

    /// Checks `data` directly.
    ///
    /// A disabled guard always passes. A violation is returned as
    /// [`GuardError::Validation`], or sent to the sink when the guard is in
    /// warn mode. Other errors are always returned.
    #[instrument(
        name = "guard.check",
        skip(self, data),
        fields(check.name = %self.spec.kind(), guard.warn = self.warn, data.rows = data.num_rows())
    )]
    pub fn check(&self, data: &RecordBatch) -> Result<()> {
        if !self.is_enabled() {
            debug!(result.status = "skipped", "Guard disabled");
            return Ok(());
        }

        log_check!(
            self.log,
            check.name = %self.spec.kind(),
            data.columns = data.num_columns(),
            "Evaluating check"
        );
        let reports = match self.spec.evaluate(data, self.warn) {
            Ok(reports) => reports,
            Err(e) => {
                debug!(result.status = "failure", error = %e, "Check failed");
                return Err(e);
            }
        };

        if reports.is_empty() {
            log_check!(self.log, result.status = "success", "Check passed");
        }
        for report in reports {
            debug!(result.status = "warning", check.failed = %report.check, "Soft violation");
            self.sink.emit(&GuardWarning::SoftViolation(report));
        }
        Ok(())
    }

    /// Attaches the guard to an operation.
    pub fn wrap<F>(self, op: F) -> Guarded<Self, F> {
        Guarded::new(self, op)
    }
}

impl Clone for Guard {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            enabled: AtomicBool::new(self.is_enabled()),
            warn: self.warn,
            sink: Arc::clone(&self.sink),
            log: self.log.clone(),
        }
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("spec", &self.spec)
            .field("enabled", &self.is_enabled())
            .field("warn", &self.warn)
            .field("sink", &self.sink)
            .finish()
    }
}

impl<T: Borrow<RecordBatch>> Validator<T> for Guard {
    fn validate(&self, value: &T) -> Result<()> {
        self.check(value.borrow())
    }
}

/// Builder for [`Guard`].
///
/// Values are bound when [`GuardBuilder::build`] runs, so configuration
/// errors surface there and never on the first call.
pub struct GuardBuilder {
    spec: CheckSpecBuilder,
    enabled: bool,
    warn: bool,
    sink: Option<Arc<dyn ViolationSink>>,
    log: LogConfig,
    reserved_error: Option<GuardError>,
}

impl GuardBuilder {
    fn new(kind: CheckKind) -> Self {
        Self {
            spec: CheckSpec::builder(kind),
            enabled: true,
            warn: false,
            sink: None,
            log: LogConfig::default(),
            reserved_error: None,
        }
    }

    /// Appends a positional value.
    pub fn arg(mut self, value: impl Into<ParamValue>) -> Self {
        self.spec = self.spec.arg(value);
        self
    }

    /// Adds a named value.
    ///
    /// `enabled` and `warn` are guard settings: they must be booleans and are
    /// never forwarded to the check.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let name = name.into();
        let value = value.into();
        if !RESERVED_PARAMETERS.contains(&name.as_str()) {
            self.spec = self.spec.param(name, value);
            return self;
        }

        match value {
            ParamValue::Json(Value::Bool(flag)) if name == "enabled" => self.enabled = flag,
            ParamValue::Json(Value::Bool(flag)) => self.warn = flag,
            other => {
                self.reserved_error.get_or_insert_with(|| {
                    GuardError::configuration(
                        self.spec.kind().as_str(),
                        format!("'{name}' must be a boolean, got {}", other.type_name()),
                    )
                });
            }
        }
        self
    }

    /// Sets whether the guard starts enabled (default true).
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets whether violations go to the sink instead of failing (default false).
    pub fn warn(mut self, warn: bool) -> Self {
        self.warn = warn;
        self
    }

    /// Sets the sink receiving warnings (default [`LogSink`](super::LogSink)).
    pub fn sink(mut self, sink: Arc<dyn ViolationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the logging configuration.
    pub fn log_config(mut self, config: LogConfig) -> Self {
        self.log = config;
        self
    }

    /// Binds the configuration and builds the guard.
    ///
    /// Names the check does not declare are reported to the sink once, here.
    pub fn build(self) -> Result<Guard> {
        if let Some(e) = self.reserved_error {
            return Err(e);
        }
        let spec = self.spec.build()?;
        let sink = self.sink.unwrap_or_else(default_sink);
        for warning in spec.ignored_warnings() {
            sink.emit(&warning);
        }
        debug!(
            check.name = %spec.kind(),
            guard.enabled = self.enabled,
            guard.warn = self.warn,
            params = spec.binding().len(),
            "Guard built"
        );
        Ok(Guard {
            spec,
            enabled: AtomicBool::new(self.enabled),
            warn: self.warn,
            sink,
            log: self.log,
        })
    }
}

impl fmt::Debug for GuardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardBuilder")
            .field("spec", &self.spec)
            .field("enabled", &self.enabled)
            .field("warn", &self.warn)
            .finish_non_exhaustive()
    }
}

/// An operation whose results are validated on every call.
#[derive(Debug, Clone)]
pub struct Guarded<V, F> {
    validator: V,
    op: F,
}

impl<V, F> Guarded<V, F> {
    /// Pairs a validator with an operation.
    pub fn new(validator: V, op: F) -> Self {
        Self { validator, op }
    }

    /// Returns the validator.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Splits into the validator and the operation.
    pub fn into_parts(self) -> (V, F) {
        (self.validator, self.op)
    }

    /// Runs the operation, then validates its result.
    ///
    /// Errors from the operation are returned unchanged. A failed validation
    /// is converted into the operation's error type.
    pub fn call<A, T, E>(&self, input: A) -> std::result::Result<T, E>
    where
        F: Fn(A) -> std::result::Result<T, E>,
        V: Validator<T>,
        E: From<GuardError>,
    {
        let output = (self.op)(input)?;
        self.validator.validate(&output)?;
        Ok(output)
    }

    /// Turns the guarded operation into a plain closure.
    pub fn into_fn<A, T, E>(self) -> impl Fn(A) -> std::result::Result<T, E>
    where
        F: Fn(A) -> std::result::Result<T, E>,
        V: Validator<T>,
        E: From<GuardError>,
    {
        move |input| self.call(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CollectingSink;
    use crate::test_fixtures::sample_batch;
    use serde_json::json;

    fn collecting() -> (CollectingSink, Arc<dyn ViolationSink>) {
        let sink = CollectingSink::new();
        let shared: Arc<dyn ViolationSink> = Arc::new(sink.clone());
        (sink, shared)
    }

    #[test]
    fn test_valid_data_passes_through() {
        let guard = Guard::is_shape().arg((3, 2)).build().unwrap();
        let guarded = guard.wrap(|()| Ok::<_, GuardError>(sample_batch()));
        let batch = guarded.call(()).unwrap();
        assert_eq!(batch, sample_batch());
    }

    #[test]
    fn test_violation_is_fatal_by_default() {
        let guarded = Guard::is_shape()
            .arg((4, 2))
            .build()
            .unwrap()
            .wrap(|()| Ok::<_, GuardError>(sample_batch()));
        let err = guarded.call(()).unwrap_err();
        assert_eq!(err.violation().unwrap().check, "is_shape");
    }

    #[test]
    fn test_warn_sends_to_sink() {
        let (sink, shared) = collecting();
        let guard = Guard::none_missing()
            .warn(true)
            .sink(shared)
            .build()
            .unwrap();

        assert!(guard.check(&sample_batch()).is_ok());
        let violations = sink.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rows, vec![1]);
        assert_eq!(violations[0].columns, vec!["a"]);
    }

    #[test]
    fn test_disabled_guard_never_checks() {
        let guard = Guard::builder(CheckKind::UniqueIndex)
            .param("enabled", false)
            .build()
            .unwrap();
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let guarded = Guard::is_shape()
            .arg((9, 9))
            .enabled(false)
            .build()
            .unwrap()
            .wrap(|()| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, GuardError>(sample_batch())
            });

        assert!(!guard.is_enabled());
        assert!(guarded.call(()).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        guarded.validator().enable();
        assert!(guarded.call(()).is_err());
        guarded.validator().disable();
        assert!(guarded.call(()).is_ok());
    }

    #[test]
    fn test_operation_errors_pass_through() {
        #[derive(Debug, PartialEq)]
        enum StageError {
            Source(String),
            Guard(String),
        }
        impl From<GuardError> for StageError {
            fn from(e: GuardError) -> Self {
                StageError::Guard(e.to_string())
            }
        }

        let guard = Guard::is_shape().arg((3, 2)).build().unwrap();
        let failing = guard
            .clone()
            .wrap(|()| Err::<RecordBatch, _>(StageError::Source("offline".into())));
        assert_eq!(
            failing.call(()).unwrap_err(),
            StageError::Source("offline".into())
        );

        let strict = Guard::is_shape().arg((1, 1)).build().unwrap();
        let err = strict
            .wrap(|()| Ok::<_, StageError>(sample_batch()))
            .call(())
            .unwrap_err();
        assert!(matches!(err, StageError::Guard(ref msg) if msg.contains("is_shape")));
    }

    #[test]
    fn test_reserved_names() {
        let guard = Guard::none_missing()
            .param("warn", true)
            .param("columns", json!(["b"]))
            .build()
            .unwrap();
        assert!(guard.is_warn());
        assert!(guard.spec().binding().ignored().is_empty());

        let err = Guard::none_missing().param("warn", "yes").build().unwrap_err();
        assert!(matches!(err, GuardError::Configuration { .. }));
    }

    #[test]
    fn test_ignored_configuration_reported_once_at_build() {
        let (sink, shared) = collecting();
        let guard = Guard::is_shape()
            .param("shape", (3, 2))
            .param("cheese", true)
            .sink(shared)
            .build()
            .unwrap();
        assert_eq!(sink.len(), 1);
        assert!(matches!(
            &sink.warnings()[0],
            GuardWarning::IgnoredConfiguration { names, .. } if names == &["cheese"]
        ));

        guard.check(&sample_batch()).unwrap();
        guard.check(&sample_batch()).unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_excess_positional_fails_at_build() {
        let err = Guard::unique_index().arg(1).build().unwrap_err();
        assert!(matches!(err, GuardError::Configuration { .. }));
    }

    #[test]
    fn test_evaluation_errors_are_fatal_in_warn_mode() {
        let (sink, shared) = collecting();
        let guard = Guard::within_range()
            .warn(true)
            .sink(shared)
            .build()
            .unwrap();
        let err = guard.check(&sample_batch()).unwrap_err();
        assert!(matches!(err, GuardError::InvalidParameter { .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_clone_copies_enabled_state() {
        let guard = Guard::unique().build().unwrap();
        guard.disable();
        let copy = guard.clone();
        assert!(!copy.is_enabled());
        copy.enable();
        assert!(!guard.is_enabled());
    }

    #[test]
    fn test_guard_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Guard>();
    }
}
