use serde::{Deserialize, Serialize};

/// Levels with at least this many fields start collapsed when they hold no
/// differences.
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 100;

/// Presentation switches for [`render_tree`](super::render_tree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Suppress Fields whose result is Same
    pub only_differences: bool,
    /// Case-insensitive keyword matched against keys and scalar values
    pub filter: Option<String>,
    /// Deepest nesting level printed in full; deeper levels are collapsed
    pub max_depth: Option<usize>,
    pub collapse_threshold: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            only_differences: false,
            filter: None,
            max_depth: None,
            collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
        }
    }
}

impl RenderOptions {
    pub fn with_only_differences(mut self, only_differences: bool) -> Self {
        self.only_differences = only_differences;
        self
    }

    /// Blank keywords are treated as no filter.
    pub fn with_filter(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.filter = if keyword.trim().is_empty() {
            None
        } else {
            Some(keyword)
        };
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_collapse_threshold(mut self, threshold: usize) -> Self {
        self.collapse_threshold = threshold;
        self
    }
}
