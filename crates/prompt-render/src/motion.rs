//! Relative cursor motion between offsets.
//!
//! Every move is one vertical step followed by one horizontal step, computed
//! as the difference between two [`position_of`] results. A positive row
//! delta moves up, a positive column delta moves left; the opposite signs
//! move down/right. Zero deltas emit nothing.

use crate::position::{ScreenPos, position_of};
use prompt_terminal::TerminalOutput;
use tracing::trace;

/// Borrowed motion helper bound to one sink and the current terminal width.
pub struct CursorMotion<'a, O: TerminalOutput + ?Sized> {
    out: &'a mut O,
    width: usize,
}

impl<'a, O: TerminalOutput + ?Sized> CursorMotion<'a, O> {
    pub fn new(out: &'a mut O, width: usize) -> Self {
        Self { out, width }
    }

    /// Move `n` columns back from `from`, crossing wrapped rows as needed.
    /// Returns the new offset.
    pub fn backward(&mut self, from: usize, n: usize) -> usize {
        self.move_to(from, from.saturating_sub(n))
    }

    /// Move between two raw column offsets. Returns `to`.
    pub fn move_to(&mut self, from: usize, to: usize) -> usize {
        let a = position_of(from, "", self.width);
        let b = position_of(to, "", self.width);
        trace!(target: "render.motion", from, to, ?a, ?b, "move_to");
        self.shift(a, b);
        to
    }

    /// Move from an offset measured against the last rendered line block of
    /// `text` (prefix included) to `to`. The from-offset is shifted by one
    /// full width per newline in `text` so wrapped multi-line content can be
    /// walked back to its start. Returns `to`.
    pub fn move_for_render(&mut self, from: usize, to: usize, text: &str) -> usize {
        let line_count = text.matches('\n').count();
        let a = position_of(self.width * line_count + from, text, self.width);
        let b = position_of(to, text, self.width);
        trace!(target: "render.motion", from, to, line_count, ?a, ?b, "move_for_render");
        self.shift(a, b);
        to
    }

    fn shift(&mut self, from: ScreenPos, to: ScreenPos) {
        if from.row > to.row {
            self.out.cursor_up(from.row - to.row);
        } else {
            self.out.cursor_down(to.row - from.row);
        }
        if from.col > to.col {
            self.out.cursor_backward(from.col - to.col);
        } else {
            self.out.cursor_forward(to.col - from.col);
        }
    }
}
