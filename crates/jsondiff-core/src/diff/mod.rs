//! JSON structural diff.
//!
//! Compares two JSON-shaped values and produces an annotated difference tree
//! recording, per field, whether it is identical, changed, or present on only
//! one side, plus rollup counts per subtree.
//!
//! ## Entry point
//!
//! ```
//! use jsondiff_core::diff::{compare, DiffResult};
//! use jsondiff_core::Value;
//! use serde_json::json;
//!
//! let left = Value::from(json!({"a": "b", "e": "g"}));
//! let right = Value::from(json!({"c": "d", "e": "f"}));
//! let summary = compare(&left, &right)?;
//!
//! let results: Vec<DiffResult> = summary.fields.iter().map(|f| f.diff_result).collect();
//! assert_eq!(
//!     results,
//!     [DiffResult::LeftOnly, DiffResult::Different, DiffResult::RightOnly]
//! );
//! # Ok::<(), jsondiff_core::DiffError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Fail fast on cycles**: a value that contains itself yields
//!   `CycleDetected` and no partial tree.
//! - **Stable ordering**: object keys appear left-first in encounter order,
//!   then right-only keys; array fields appear in index order.
//! - **Reentrancy**: each call owns its cycle guards and shares no state with
//!   other calls.

pub mod classify;
pub mod engine;
pub mod guard;
pub mod model;

pub use classify::{classify, ValueType};
pub use engine::compare;
pub use guard::CycleGuard;
pub use model::{format_path, DiffResult, Field, FieldKey, Side, Summary};
