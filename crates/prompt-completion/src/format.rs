//! Suggestion column formatter.
//!
//! Turns raw suggestions into fixed-width `(text, description)` rows: every
//! row of a column has the same display width, so the popup renderer can
//! treat the cells as opaque strings.

use crate::Suggestion;
use prompt_text::{display_width, fill_right, truncate_to_width};

pub const SHORTEN_SUFFIX: &str = "...";
const LEFT_PREFIX: &str = " ";
const LEFT_SUFFIX: &str = " ";
const RIGHT_PREFIX: &str = " ";
const RIGHT_SUFFIX: &str = " ";

/// Horizontal padding the popup needs around its two columns. A terminal
/// narrower than this cannot show a popup at all.
pub const COMPLETION_MARGIN: usize = 4;

/// Format one column to a common width no wider than `max`.
/// Returns the padded cells and the column width (0 = column dropped).
fn format_texts(texts: &[&str], max: usize, prefix: &str, suffix: &str) -> (Vec<String>, usize) {
    let cleaned: Vec<String> = texts.iter().map(|t| t.replace(['\n', '\r'], "")).collect();
    let mut out = vec![String::new(); cleaned.len()];

    let len_prefix = display_width(prefix);
    let len_suffix = display_width(suffix);
    let min = len_prefix + len_suffix + display_width(SHORTEN_SUFFIX);

    let mut width = cleaned.iter().map(|t| display_width(t)).max().unwrap_or(0);
    if width == 0 || min >= max {
        return (out, 0);
    }
    if len_prefix + width + len_suffix > max {
        width = max - len_prefix - len_suffix;
    }

    for (cell, text) in out.iter_mut().zip(&cleaned) {
        let body = if display_width(text) <= width {
            fill_right(text, width)
        } else {
            fill_right(&truncate_to_width(text, width, SHORTEN_SUFFIX), width)
        };
        *cell = format!("{prefix}{body}{suffix}");
    }
    (out, len_prefix + width + len_suffix)
}

/// Format suggestions into rows that fit in `max_width` columns.
///
/// The text column is sized first; the description column gets whatever is
/// left. When the text column cannot be shown the result is empty with width 0.
pub fn format_suggestions(suggestions: &[Suggestion], max_width: usize) -> (Vec<Suggestion>, usize) {
    let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
    let (left, left_width) = format_texts(&texts, max_width, LEFT_PREFIX, LEFT_SUFFIX);
    if left_width == 0 {
        return (Vec::new(), 0);
    }
    let descriptions: Vec<&str> = suggestions.iter().map(|s| s.description.as_str()).collect();
    let (right, right_width) = format_texts(
        &descriptions,
        max_width.saturating_sub(left_width),
        RIGHT_PREFIX,
        RIGHT_SUFFIX,
    );
    let rows = left
        .into_iter()
        .zip(right)
        .map(|(text, description)| Suggestion { text, description })
        .collect();
    (rows, left_width + right_width)
}
