//! Binding and orchestration of checks.
//!
//! This module contains everything between a check predicate and the
//! pipeline operation it guards:
//!
//! - [`CheckKind`]: the built-in checks and their declared parameters
//! - [`bind`] / [`Binding`]: resolving positional and named configuration
//! - [`CheckSpec`]: a check kind with its bound parameters
//! - [`Guard`] / [`Guarded`]: attaching a check to an operation
//! - [`MultiCheckGroup`]: several checks under one warn policy
//! - [`verify`], [`verify_all`], [`verify_any`]: predicate combinators
//! - [`ViolationSink`]: where non-fatal warnings go
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use arrow::record_batch::RecordBatch;
//! use serde_json::json;
//! use table_guard::core::{CheckKind, CheckSpec, CollectingSink, Guard};
//!
//! let sink = CollectingSink::new();
//! let guard = Guard::multi_check()
//!     .arg(vec![
//!         CheckSpec::builder(CheckKind::IsShape).arg((3, 1)).build()?,
//!         CheckSpec::builder(CheckKind::WithinRange)
//!             .arg(json!({"a": [0, 2]}))
//!             .build()?,
//!     ])
//!     .warn(true)
//!     .sink(Arc::new(sink.clone()))
//!     .build()?;
//!
//! let stage = guard.wrap(|()| {
//!     let a = Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef;
//!     Ok::<_, table_guard::error::GuardError>(RecordBatch::try_from_iter(vec![("a", a)])?)
//! });
//!
//! let batch = stage.call(())?;
//! assert_eq!(batch.num_rows(), 3);
//! assert_eq!(sink.violations()[0].rows, vec![2]);
//! # Ok::<(), table_guard::error::GuardError>(())
//! ```

mod binding;
mod config;
mod guard;
mod kind;
mod multi;
mod params;
mod report;
mod sink;
mod spec;
mod verify;

pub use binding::{bind, Binding};
pub use config::{CheckSpecFile, GuardConfigFile};
pub use guard::{Guard, GuardBuilder, Guarded, Validator, RESERVED_PARAMETERS};
pub use kind::CheckKind;
pub use multi::MultiCheckGroup;
pub use params::ParamValue;
pub use report::{GuardWarning, ViolationReport};
pub use sink::{default_sink, CollectingSink, LogSink, ViolationSink};
pub use spec::{CheckSpec, CheckSpecBuilder};
pub use verify::{
    verify, verify_all, verify_all_with, verify_any, verify_any_with, verify_with, Truthy,
    Verifier, VerifyMode,
};
