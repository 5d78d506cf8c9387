//! Predicate combinators over operation results.
//!
//! [`verify`], [`verify_all`] and [`verify_any`] turn a predicate into a
//! [`Verifier`], which validates results the same way a guard does. Extra
//! predicate arguments are either captured by the closure or passed through
//! the `*_with` variants.
//!
//! ```rust
//! use table_guard::core::{verify_all, Validator};
//!
//! let all_positive = verify_all(|values: &Vec<i64>| values.iter().map(|v| *v > 0).collect::<Vec<_>>());
//! assert!(all_positive.validate(&vec![1, 2, 3]).is_ok());
//!
//! let err = all_positive.validate(&vec![1, -2, 3, -4]).unwrap_err();
//! assert_eq!(err.violation().unwrap().rows, vec![1, 3]);
//! ```

use super::guard::{Guarded, Validator};
use super::ViolationReport;
use crate::error::Result;
use arrow::array::{Array, BooleanArray};
use std::fmt;
use tracing::debug;

/// Values a predicate may return.
pub trait Truthy {
    /// Returns true if the value counts as a pass.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// `None` is falsy.
impl Truthy for Option<bool> {
    fn is_truthy(&self) -> bool {
        *self == Some(true)
    }
}

/// True when every slot is a non-null `true`.
impl Truthy for BooleanArray {
    fn is_truthy(&self) -> bool {
        self.null_count() == 0 && self.true_count() == self.len()
    }
}

/// How predicate output is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMode {
    /// One truthy value
    Single,
    /// Every element truthy
    All,
    /// At least one element truthy
    Any,
}

impl VerifyMode {
    fn default_name(self) -> &'static str {
        match self {
            VerifyMode::Single => "verify",
            VerifyMode::All => "verify_all",
            VerifyMode::Any => "verify_any",
        }
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> Vec<bool> + Send + Sync>;

/// A predicate-based validator.
///
/// Violations are always fatal; verifiers have no warn mode.
pub struct Verifier<T: ?Sized> {
    name: String,
    mode: VerifyMode,
    predicate: Predicate<T>,
}

impl<T: ?Sized> Verifier<T> {
    fn new(mode: VerifyMode, predicate: Predicate<T>) -> Self {
        Self {
            name: mode.default_name().to_string(),
            mode,
            predicate,
        }
    }

    /// Sets the name used as `check` in violation reports.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the aggregation mode.
    pub fn mode(&self) -> VerifyMode {
        self.mode
    }

    /// Attaches the verifier to an operation.
    pub fn wrap<F>(self, op: F) -> Guarded<Self, F> {
        Guarded::new(self, op)
    }

    fn failure(&self, outcomes: &[bool]) -> Option<ViolationReport> {
        match self.mode {
            VerifyMode::Single => (!outcomes.first().copied().unwrap_or(false))
                .then(|| ViolationReport::new(&self.name, "predicate returned a falsy value")),
            VerifyMode::All => {
                let falsy: Vec<usize> = outcomes
                    .iter()
                    .enumerate()
                    .filter(|(_, ok)| !**ok)
                    .map(|(position, _)| position)
                    .collect();
                (!falsy.is_empty()).then(|| {
                    ViolationReport::new(
                        &self.name,
                        format!("{} of {} element(s) are falsy", falsy.len(), outcomes.len()),
                    )
                    .with_rows(falsy)
                })
            }
            VerifyMode::Any => (!outcomes.iter().any(|ok| *ok)).then(|| {
                ViolationReport::new(
                    &self.name,
                    format!("none of {} element(s) is truthy", outcomes.len()),
                )
            }),
        }
    }
}

impl<T: ?Sized> Validator<T> for Verifier<T> {
    fn validate(&self, value: &T) -> Result<()> {
        let outcomes = (self.predicate)(value);
        match self.failure(&outcomes) {
            None => {
                debug!(check.name = %self.name, result.status = "success", "Predicate passed");
                Ok(())
            }
            Some(report) => {
                debug!(check.name = %self.name, result.status = "failure", "Predicate failed");
                Err(report.into())
            }
        }
    }
}

impl<T: ?Sized> fmt::Debug for Verifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

fn elements<I>(items: I) -> Vec<bool>
where
    I: IntoIterator,
    I::Item: Truthy,
{
    items.into_iter().map(|item| item.is_truthy()).collect()
}

/// Passes when `pred(result)` is truthy.
pub fn verify<T, P, R>(pred: P) -> Verifier<T>
where
    T: ?Sized + 'static,
    P: Fn(&T) -> R + Send + Sync + 'static,
    R: Truthy,
{
    Verifier::new(
        VerifyMode::Single,
        Box::new(move |value: &T| vec![pred(value).is_truthy()]),
    )
}

/// Like [`verify`], passing `args` to the predicate on every call.
pub fn verify_with<T, A, P, R>(pred: P, args: A) -> Verifier<T>
where
    T: ?Sized + 'static,
    A: Send + Sync + 'static,
    P: Fn(&T, &A) -> R + Send + Sync + 'static,
    R: Truthy,
{
    verify(move |value: &T| pred(value, &args))
}

/// Passes when every element of `pred(result)` is truthy.
///
/// The report lists the positions of the falsy elements.
pub fn verify_all<T, P, I>(pred: P) -> Verifier<T>
where
    T: ?Sized + 'static,
    P: Fn(&T) -> I + Send + Sync + 'static,
    I: IntoIterator,
    I::Item: Truthy,
{
    Verifier::new(VerifyMode::All, Box::new(move |value: &T| elements(pred(value))))
}

/// Like [`verify_all`], passing `args` to the predicate on every call.
pub fn verify_all_with<T, A, P, I>(pred: P, args: A) -> Verifier<T>
where
    T: ?Sized + 'static,
    A: Send + Sync + 'static,
    P: Fn(&T, &A) -> I + Send + Sync + 'static,
    I: IntoIterator,
    I::Item: Truthy,
{
    verify_all(move |value: &T| pred(value, &args))
}

/// Passes when at least one element of `pred(result)` is truthy.
///
/// An empty result fails.
pub fn verify_any<T, P, I>(pred: P) -> Verifier<T>
where
    T: ?Sized + 'static,
    P: Fn(&T) -> I + Send + Sync + 'static,
    I: IntoIterator,
    I::Item: Truthy,
{
    Verifier::new(VerifyMode::Any, Box::new(move |value: &T| elements(pred(value))))
}

/// Like [`verify_any`], passing `args` to the predicate on every call.
pub fn verify_any_with<T, A, P, I>(pred: P, args: A) -> Verifier<T>
where
    T: ?Sized + 'static,
    A: Send + Sync + 'static,
    P: Fn(&T, &A) -> I + Send + Sync + 'static,
    I: IntoIterator,
    I::Item: Truthy,
{
    verify_any(move |value: &T| pred(value, &args))
}
