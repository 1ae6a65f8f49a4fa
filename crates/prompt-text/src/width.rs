//! Display width helpers.
//!
//! Every width decision the renderer makes (prompt width, cursor columns,
//! suggestion padding) flows through this module so that wide characters and
//! control characters are measured the same way everywhere.
//!
//! Invariants:
//! - Widths are measured per grapheme cluster; a cluster is never split.
//! - Control characters (including `'\n'` and `"\r\n"`) occupy zero cells.
//! - East Asian wide / fullwidth clusters occupy two cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a single grapheme cluster.
#[inline]
pub fn cluster_width(cluster: &str) -> usize {
    match cluster.chars().next() {
        None => 0,
        Some(c) if c.is_control() => 0,
        Some(_) => UnicodeWidthStr::width(cluster),
    }
}

/// Number of terminal columns `s` occupies.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(cluster_width).sum()
}

/// Truncate `s` so that it fits in `max` columns, appending `tail` when
/// anything was cut. The result may be narrower than `max` when a wide
/// cluster straddles the cut; callers pad with [`fill_right`].
pub fn truncate_to_width(s: &str, max: usize, tail: &str) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width > max {
        return String::new();
    }
    let budget = max - tail_width;
    let mut out = String::with_capacity(s.len());
    let mut used = 0usize;
    for g in s.graphemes(true) {
        let w = cluster_width(g);
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push_str(tail);
    out
}

/// Pad `s` with spaces on the right up to `width` columns.
pub fn fill_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + (width - w));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width - w));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_is_length() {
        assert_eq!(display_width("select"), 6);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn newlines_take_no_cells() {
        assert_eq!(display_width("ab\ncd"), 4);
        assert_eq!(display_width("ab\r\ncd"), 4);
    }

    #[test]
    fn cjk_counts_double() {
        assert_eq!(display_width("漢A"), 3);
        assert_eq!(display_width("您好"), 4);
    }

    #[test]
    fn combining_mark_stays_in_cluster() {
        assert_eq!(display_width("e\u{0301}"), 1);
    }

    #[test]
    fn truncate_appends_tail_only_when_cut() {
        assert_eq!(truncate_to_width("select", 10, "..."), "select");
        assert_eq!(truncate_to_width("description", 8, "..."), "descr...");
    }

    #[test]
    fn truncate_never_splits_wide_cluster() {
        // Budget of 4 columns before the tail fits two wide chars exactly.
        let t = truncate_to_width("您好xxx您好xxx", 7, "...");
        assert_eq!(t, "您好...");
        // Odd budget leaves one column unused.
        let t = truncate_to_width("您好xxx", 6, "...");
        assert_eq!(t, "您...");
        assert_eq!(display_width(&fill_right(&t, 6)), 6);
    }

    #[test]
    fn fill_right_pads_to_width() {
        assert_eq!(fill_right("from", 6), "from  ");
        assert_eq!(fill_right("select", 4), "select");
    }
}
