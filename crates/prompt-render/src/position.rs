//! Coordinate mapping: 1-D cursor offsets to 2-D screen positions.
//!
//! Offsets are measured in display columns from the start of the rendered
//! text. The text is decomposed into [`LayoutBlock`]s, one per screen row:
//! every `'\n'` is a hard break and each line is sized as its display width
//! plus one cell for the break itself.
//!
//! Invariants:
//! * Blocks are produced in order; `blocks[i].start == blocks[i - 1].end + 1`.
//! * A line longer than the width is split once: a block of exactly `width`
//!   cells is taken off its front and the remainder stays whole. Deeper wraps
//!   are left to the terminal's autowrap.
//! * Matching is strict on both sides (`start < cursor < end`). An offset
//!   sitting exactly on a block boundary matches no block and maps to the
//!   origin; it can never match two rows.
//! * Blocks are rebuilt on every call; the text differs almost every time so
//!   there is nothing worth caching.

use prompt_text::display_width;

/// Column/row pair relative to the start of the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPos {
    pub col: usize,
    pub row: usize,
}

impl ScreenPos {
    pub const ORIGIN: ScreenPos = ScreenPos { col: 0, row: 0 };

    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Contiguous run of offsets occupying one screen row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutBlock {
    pub start: usize,
    pub end: usize,
}

impl LayoutBlock {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Strict interior test.
    pub fn contains(&self, cursor: usize) -> bool {
        self.start < cursor && cursor < self.end
    }
}

/// Decompose `text` into screen-row blocks for a terminal `width` wide.
pub fn layout_blocks(text: &str, width: usize) -> Vec<LayoutBlock> {
    let mut blocks: Vec<LayoutBlock> = Vec::new();
    for line in text.split('\n') {
        // +1: the newline (or end of text) occupies a cell of its own.
        let size = display_width(line) + 1;
        let start = blocks.last().map_or(0, |b| b.end + 1);
        let mut block = LayoutBlock {
            start,
            end: start + size - 1,
        };
        if width > 0 && block.len() > width {
            blocks.push(LayoutBlock {
                start,
                end: start + width - 1,
            });
            block.start += width;
        }
        blocks.push(block);
    }
    blocks
}

/// Map `cursor` to a screen position within `text` under `width` columns.
///
/// An empty `text` selects raw mode: the offset is treated as a plain column
/// count against the width (`col = cursor % width`, `row = cursor / width`).
pub fn position_of(cursor: usize, text: &str, width: usize) -> ScreenPos {
    if width == 0 {
        return ScreenPos::ORIGIN;
    }
    if text.is_empty() {
        return ScreenPos {
            col: cursor % width,
            row: cursor / width,
        };
    }
    let pos = layout_blocks(text, width)
        .iter()
        .enumerate()
        .find(|(_, block)| block.contains(cursor))
        .map_or(ScreenPos::ORIGIN, |(row, block)| ScreenPos {
            col: cursor - block.start,
            row,
        });
    tracing::trace!(target: "render.position", cursor, width, col = pos.col, row = pos.row, "position_of");
    pos
}

/// Whether the cursor sits on a width boundary that the terminal has not
/// wrapped yet. VT-style terminals park the cursor in a pending-wrap state
/// after the last column; the renderer must push it to the next row itself.
pub fn needs_forced_wrap(cursor_column: usize, width: usize, platform_wraps: bool) -> bool {
    !platform_wraps && width > 0 && cursor_column > 0 && cursor_column % width == 0
}
