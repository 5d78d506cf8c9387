//! Check predicates over Arrow record batches.
//!
//! Every check is a plain function taking the batch and its typed
//! parameters. It returns `Ok(())` when the invariant holds and
//! [`GuardError::Validation`](crate::error::GuardError::Validation) carrying a
//! [`ViolationReport`](crate::core::ViolationReport) when it does not. Other
//! errors (unknown column, wrong column type, bad parameter) are evaluation
//! failures and are never softened by warn mode.
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use arrow::record_batch::RecordBatch;
//! use table_guard::checks::{is_shape, unique, Shape};
//!
//! let batch = RecordBatch::try_from_iter(vec![(
//!     "id",
//!     Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
//! )])
//! .unwrap();
//!
//! assert!(is_shape(&batch, Shape::any_columns(3)).is_ok());
//! assert!(unique(&batch, None).is_ok());
//! ```

mod datatype;
mod equality;
pub(crate) mod frame;
mod missing;
mod ordering;
mod shape;
mod statistics;
mod uniqueness;
mod values;

pub use datatype::{dtype_matches, has_dtypes};
pub use equality::is_same_as;
pub use frame::INDEX_METADATA_KEY;
pub use missing::none_missing;
pub use ordering::{is_monotonic, Monotonic};
pub use shape::{is_shape, Shape};
pub use statistics::{within_n_std, DEFAULT_N_STD};
pub use uniqueness::{one_to_many, unique, unique_index};
pub use values::{within_range, within_set};
