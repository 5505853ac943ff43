use crate::diff::{DiffResult, Field, FieldKey, Side, Summary};
use crate::render::RenderOptions;
use crate::value::Value;

/// Render a diff tree as indented text
///
/// Fields are printed depth-first in tree order, one per line:
///
/// ```text
/// - a: "b"
/// ~ e: "g" => "f"
/// + c: "d"
/// ```
///
/// Markers: two spaces for Same, `~` Different, `-` left only, `+` right only.
/// Nested levels are indented by two spaces. A collapsed level is replaced by
/// a single `… (n fields)` line.
///
/// # Arguments
/// * `summary` - Root of the tree returned by `compare`
/// * `options` - Filtering and collapsing switches
///
/// # Returns
/// The rendered text; empty when no Field is shown
pub fn render_tree(summary: &Summary, options: &RenderOptions) -> String {
    let renderer = TreeRenderer {
        options,
        keyword: options.filter.as_ref().map(|k| k.to_lowercase()),
    };
    let mut output = String::new();
    renderer.render_level(summary, 0, &mut output);
    output
}

/// One-line rollup of a Summary's counters
///
/// Returns `identical` when the Summary is Same, otherwise
/// `N different, N left only, N right only, N same`.
pub fn render_counts(summary: &Summary) -> String {
    if summary.is_same {
        return "identical".to_string();
    }
    format!(
        "{} different, {} left only, {} right only, {} same",
        summary.different, summary.leftonly, summary.rightonly, summary.same
    )
}

/// Short display form of a value. Composites are never expanded inline.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(_) => "[…]".to_string(),
        Value::Object(entries) if entries.is_empty() => "{}".to_string(),
        Value::Object(_) => "{…}".to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn marker(result: DiffResult) -> &'static str {
    match result {
        DiffResult::Same => "  ",
        DiffResult::Different => "~ ",
        DiffResult::LeftOnly => "- ",
        DiffResult::RightOnly => "+ ",
    }
}

fn format_key(key: &FieldKey) -> String {
    match key {
        FieldKey::Key(name) => format!("{name}:"),
        FieldKey::Index(index) => format!("[{index}]:"),
    }
}

struct TreeRenderer<'a> {
    options: &'a RenderOptions,
    /// Lowercased filter keyword
    keyword: Option<String>,
}

impl TreeRenderer<'_> {
    fn render_level(&self, summary: &Summary, depth: usize, output: &mut String) {
        for field in summary.fields.iter().filter(|f| self.is_shown(f)) {
            self.render_field(field, depth, output);
        }
    }

    fn render_field(&self, field: &Field, depth: usize, output: &mut String) {
        let indent = "  ".repeat(depth);
        output.push_str(&indent);
        output.push_str(marker(field.diff_result));
        output.push_str(&format_key(&field.field_key));
        output.push(' ');
        output.push_str(&self.format_sides(field));
        output.push('\n');

        let Some(children) = field.children.as_ref().filter(|c| !c.is_empty()) else {
            return;
        };
        if self.is_collapsed(children, depth + 1) {
            output.push_str(&format!("{indent}  … ({} fields)\n", children.len()));
        } else {
            self.render_level(children, depth + 1, output);
        }
    }

    fn format_sides(&self, field: &Field) -> String {
        match (field.value(Side::Left), field.value(Side::Right)) {
            (Some(left), Some(_)) if field.diff_result == DiffResult::Same => format_value(left),
            (Some(left), Some(right)) => {
                format!("{} => {}", format_value(left), format_value(right))
            }
            (Some(value), None) | (None, Some(value)) => format_value(value),
            (None, None) => String::new(),
        }
    }

    fn is_collapsed(&self, children: &Summary, depth: usize) -> bool {
        let too_deep = self.options.max_depth.is_some_and(|max| depth > max);
        let too_large = children.is_same && children.len() >= self.options.collapse_threshold;
        too_deep || too_large
    }

    fn is_shown(&self, field: &Field) -> bool {
        if self.options.only_differences && field.diff_result == DiffResult::Same {
            return false;
        }
        match &self.keyword {
            None => true,
            Some(keyword) => {
                self.matches(field, keyword)
                    || field
                        .children
                        .iter()
                        .flat_map(|c| c.fields.iter())
                        .any(|child| self.is_shown(child))
            }
        }
    }

    fn matches(&self, field: &Field, keyword: &str) -> bool {
        let key_matches = match &field.field_key {
            FieldKey::Key(name) => name.to_lowercase().contains(keyword),
            FieldKey::Index(index) => index.to_string().contains(keyword),
        };
        key_matches
            || [Side::Left, Side::Right]
                .into_iter()
                .filter_map(|side| field.value(side))
                .filter(|v| v.identity().is_none())
                .any(|v| scalar_text(v).to_lowercase().contains(keyword))
    }
}

/// Unquoted text of a scalar, used for keyword matching
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => format_value(other),
    }
}
