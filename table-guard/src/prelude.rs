//! Prelude for commonly used types and traits in table-guard.

pub use crate::checks::{Monotonic, Shape};
pub use crate::core::{
    verify, verify_all, verify_any, CheckKind, CheckSpec, CollectingSink, Guard, GuardWarning,
    Guarded, MultiCheckGroup, Validator, ViolationReport, ViolationSink,
};
pub use crate::error::{GuardError, Result};
pub use crate::formatters::{FormatterConfig, WarningFormatter};
pub use crate::logging::LogConfig;
