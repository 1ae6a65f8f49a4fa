//! Screen rendering engine for an interactive line-editing prompt.
//!
//! Given a [`Document`](prompt_text::Document), the text rendered by the
//! previous cycle and the current completion state, [`Renderer`] issues the
//! terminal operations that bring the display in line with the editor state
//! without clearing the screen.
//!
//! Exposed components:
//! - [`position`]: coordinate mapper (offset -> column/row under wrapping) and
//!   the forced-wrap policy.
//! - [`motion`]: relative cursor motion between offsets.
//! - [`renderer`]: the frame cycle, lifecycle operations and render state.
//! - [`popup`]: completion popup layout and scrollbar geometry.
//! - [`break_line`]: line commit.
//!
//! Invariants:
//! - Every public operation flushes the sink exactly once, on every exit path,
//!   and reports flush failures as [`RenderError::Flush`].
//! - Operations within a frame are issued in a fixed order; terminals have no
//!   undo, so ordering is the only correctness mechanism.
//! - `previous_cursor` is stored as an offset and mapped to a screen
//!   position with the width current at the time of use.
//! - The engine is single-threaded; `&mut self` on every operation rules out
//!   overlapping cycles.

use std::io;
use thiserror::Error;

pub mod break_line;
pub mod motion;
pub mod popup;
pub mod position;
pub mod renderer;

pub use motion::CursorMotion;
pub use popup::Scrollbar;
pub use position::{LayoutBlock, ScreenPos, layout_blocks, needs_forced_wrap, position_of};
pub use renderer::{BreakLineCallback, LivePrefix, Renderer, WINDOW_TOO_SMALL_MESSAGE};

#[derive(Debug, Error)]
pub enum RenderError {
    /// The output sink could not deliver the frame. Further rendering
    /// assumptions are void until the caller recovers the terminal.
    #[error("failed to flush terminal output")]
    Flush(#[source] io::Error),
}

/// What a render cycle ended up drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Terminal width not known yet (0 columns); nothing drawn.
    Skipped,
    /// The window cannot hold the prompt plus popup; a warning was drawn.
    TooSmall,
    /// Normal frame.
    Drawn,
}
