//! jsondiff core - structural comparison of JSON-shaped values
//!
//! This crate provides the comparison kernel behind the `jsondiff` CLI,
//! including:
//! - A JSON value model with shared composite handles, so self-referential
//!   inputs can be represented and detected
//! - The `compare` operation producing an annotated difference tree with
//!   per-subtree rollup counts
//! - Per-side cycle detection that fails fast with the offending side
//! - Plain-text tree rendering with filtering and collapsing
//! - The canonical error facility and structured logging facility

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod render;
pub mod value;

pub use jsondiff_core_types as core_types;

// Re-export commonly used types
pub use diff::{compare, DiffResult, Field, FieldKey, Side, Summary, ValueType};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use render::{render_counts, render_tree, RenderOptions};
pub use value::{Array, Object, Value};
