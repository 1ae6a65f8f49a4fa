//! Property-based tests for the coordinate mapper and wrap policy.

use prompt_render::{ScreenPos, layout_blocks, needs_forced_wrap, position_of};
use proptest::prelude::*;

proptest! {
    // Single line: interior offsets of the first row map to (k, 0); interior
    // offsets of the split-off second row map to (k - width, 1).
    #[test]
    fn single_line_interior_offsets(text in "[a-z]{1,60}", width in 1usize..30, k in 1usize..70) {
        let len = text.len();
        let pos = position_of(k, &text, width);
        if len <= width {
            if k < len {
                prop_assert_eq!(pos, ScreenPos::new(k % width, k / width));
            }
        } else if k < width - 1 {
            prop_assert_eq!(pos, ScreenPos::new(k, 0));
        } else if width < k && k < len.min(2 * width) {
            prop_assert_eq!(pos, ScreenPos::new(k % width, k / width));
        }
    }

    // Without wrapping, the row of an interior offset is the number of
    // newlines before it.
    #[test]
    fn row_counts_preceding_newlines(lines in prop::collection::vec("[a-z]{0,12}", 1..6), k in 0usize..80) {
        let text = lines.join("\n");
        let width = 200;
        let interior = layout_blocks(&text, width).iter().any(|b| b.contains(k));
        if interior {
            let before = &text[..k];
            prop_assert_eq!(position_of(k, &text, width).row, before.matches('\n').count());
        }
    }

    // No offset is claimed by two rows, and blocks chain end + 1 -> start.
    #[test]
    fn blocks_are_ordered_and_disjoint(text in "[a-z\n]{0,80}", width in 1usize..25, k in 0usize..100) {
        let blocks = layout_blocks(&text, width);
        prop_assert!(!blocks.is_empty());
        for pair in blocks.windows(2) {
            prop_assert_eq!(pair[1].start, pair[0].end + 1);
        }
        prop_assert!(blocks.iter().filter(|b| b.contains(k)).count() <= 1);
    }

    // Raw mode is plain division against the width.
    #[test]
    fn raw_mode_is_column_arithmetic(k in 0usize..10_000, width in 1usize..300) {
        prop_assert_eq!(position_of(k, "", width), ScreenPos::new(k % width, k / width));
    }

    #[test]
    fn wrapping_platforms_never_force_a_newline(col in 0usize..1000, width in 0usize..200) {
        prop_assert!(!needs_forced_wrap(col, width, true));
        if width > 0 && col > 0 {
            prop_assert_eq!(needs_forced_wrap(col, width, false), col % width == 0);
        }
    }
}
