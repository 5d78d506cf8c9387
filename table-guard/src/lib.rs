//! # table-guard - Declarative validation guards for Arrow data
//!
//! table-guard lets a pipeline stage assert invariants about the tabular data
//! it produces (shape, null-freedom, uniqueness, monotonicity, set and range
//! membership, statistical bounds, column types, one-to-many relations,
//! equality to a reference table) without mixing assertion logic into the
//! stage itself. Data is an Apache Arrow [`RecordBatch`](arrow::record_batch::RecordBatch).
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array, Int64Array};
//! use arrow::record_batch::RecordBatch;
//! use serde_json::json;
//! use table_guard::prelude::*;
//!
//! fn load_prices() -> Result<RecordBatch> {
//!     let id = Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef;
//!     let price = Arc::new(Float64Array::from(vec![9.5, 12.0, 250.0])) as ArrayRef;
//!     Ok(RecordBatch::try_from_iter(vec![("id", id), ("price", price)])?)
//! }
//!
//! // Positional and named configuration are bound once, here.
//! let guard = Guard::within_range()
//!     .param("items", json!({"price": [0, 100]}))
//!     .build()?;
//! let stage = guard.wrap(|()| load_prices());
//!
//! let err = stage.call(()).unwrap_err();
//! let report = err.violation().unwrap();
//! assert_eq!(report.rows, vec![2]);
//! assert_eq!(report.values, vec!["250.0"]);
//!
//! // Disabled guards return results unchecked.
//! stage.validator().disable();
//! assert!(stage.call(()).is_ok());
//! # Ok::<(), GuardError>(())
//! ```
//!
//! ## Policies
//!
//! - **enabled**: a disabled guard runs the operation and returns its result
//!   without checking. The flag can be flipped at any time from any thread.
//! - **warn**: a guard in warn mode hands violations to its
//!   [`ViolationSink`](core::ViolationSink) and returns the result. The
//!   default sink logs through `tracing`.
//! - **multi_check**: several checks under one warn policy; fail-fast
//!   without warn, collect-all with it.
//!
//! Errors that are not violations (unknown column, badly typed parameter)
//! are always returned, whatever the warn policy.
//!
//! ## Architecture
//!
//! - **`checks`**: the check predicates as plain functions over a batch
//! - **`core`**: binding, guards, multi-checks, verify combinators, sinks
//! - **`error`**: the [`GuardError`](error::GuardError) type
//! - **`formatters`**: text and JSON rendering of warnings
//! - **`logging`**: logging configuration and subscriber setup

pub mod checks;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;
