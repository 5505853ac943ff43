//! Plain-text presentation of diff trees.
//!
//! Rendering never alters the [`Summary`](crate::diff::Summary) it is given;
//! every option only decides which Fields are printed and how deep.

pub mod options;
pub mod tree_render;

pub use options::{RenderOptions, DEFAULT_COLLAPSE_THRESHOLD};
pub use tree_render::{format_value, render_counts, render_tree};
