//! Terminal output abstraction consumed by the prompt renderer.
//!
//! The renderer speaks to the terminal only through [`TerminalOutput`]. Every
//! operation becomes a typed [`Command`] appended to a per-frame batch; nothing
//! reaches the terminal until [`TerminalOutput::flush`]. Two sinks ship here:
//! [`CommandBuffer`] records batches for inspection, [`CrosstermOutput`]
//! realises them as escape sequences through crossterm.
//!
//! Invariants:
//! * Commands preserve issue order; no sink reorders or coalesces them.
//! * Zero-distance cursor moves and empty text writes are dropped at the
//!   trait level, so every sink treats them as no-ops.
//! * `flush` is the only fallible operation.

use bitflags::bitflags;
use serde::Deserialize;
use std::io;

pub mod capabilities;
pub mod command;
pub mod crossterm_output;

pub use capabilities::TerminalCapabilities;
pub use command::{Command, CommandBuffer};
pub use crossterm_output::CrosstermOutput;

/// The sixteen ANSI colours plus the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Black,
    DarkRed,
    DarkGreen,
    Brown,
    DarkBlue,
    Purple,
    Cyan,
    LightGray,
    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    Fuchsia,
    Turquoise,
    White,
}

bitflags! {
    /// SGR display attributes applied together with a colour pair.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DisplayAttributes: u8 {
        const BOLD = 1 << 0;
        const LOW_INTENSITY = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const REVERSE = 1 << 5;
        const INVISIBLE = 1 << 6;
        const CROSSED_OUT = 1 << 7;
    }
}

/// Terminal dimensions as reported by the window size notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinSize {
    pub rows: u16,
    pub cols: u16,
}

impl WinSize {
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// Query the controlling terminal for its current size.
pub fn window_size() -> io::Result<WinSize> {
    let (cols, rows) = crossterm::terminal::size()?;
    tracing::debug!(target: "terminal", rows, cols, "window_size");
    Ok(WinSize { rows, cols })
}

/// Ordered output sink. Implementors supply [`push`](Self::push) and
/// [`flush`](Self::flush); the operation vocabulary is provided.
pub trait TerminalOutput {
    /// Append one command to the pending batch.
    fn push(&mut self, cmd: Command);

    /// Emit the pending batch as one frame.
    fn flush(&mut self) -> io::Result<()>;

    fn write_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.push(Command::Text(text.to_string()));
        }
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.push(Command::Raw(bytes.to_vec()));
        }
    }

    fn set_color(&mut self, fg: Color, bg: Color, bold: bool) {
        self.push(Command::SetColor { fg, bg, bold });
    }

    fn set_display_attributes(&mut self, fg: Color, bg: Color, attrs: DisplayAttributes) {
        self.push(Command::SetDisplayAttributes { fg, bg, attrs });
    }

    fn cursor_up(&mut self, n: usize) {
        if n > 0 {
            self.push(Command::CursorUp(n));
        }
    }

    fn cursor_down(&mut self, n: usize) {
        if n > 0 {
            self.push(Command::CursorDown(n));
        }
    }

    fn cursor_forward(&mut self, n: usize) {
        if n > 0 {
            self.push(Command::CursorForward(n));
        }
    }

    fn cursor_backward(&mut self, n: usize) {
        if n > 0 {
            self.push(Command::CursorBackward(n));
        }
    }

    fn cursor_go_to(&mut self, row: usize, col: usize) {
        self.push(Command::CursorGoTo { row, col });
    }

    fn erase_line(&mut self) {
        self.push(Command::EraseLine);
    }

    fn erase_down(&mut self) {
        self.push(Command::EraseDown);
    }

    fn erase_screen(&mut self) {
        self.push(Command::EraseScreen);
    }

    fn hide_cursor(&mut self) {
        self.push(Command::HideCursor);
    }

    fn show_cursor(&mut self) {
        self.push(Command::ShowCursor);
    }

    /// Reverse index: cursor up one row, scrolling content down at the top.
    fn scroll_up(&mut self) {
        self.push(Command::ScrollUp);
    }

    /// Index: cursor down one row, scrolling content up at the bottom.
    fn scroll_down(&mut self) {
        self.push(Command::ScrollDown);
    }

    fn set_title(&mut self, title: &str) {
        self.push(Command::SetTitle(title.to_string()));
    }

    fn clear_title(&mut self) {
        self.push(Command::ClearTitle);
    }
}
