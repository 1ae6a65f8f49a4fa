//! Typed terminal commands and a recording sink.
//!
//! `CommandBuffer` keeps every flushed batch so callers can assert on the
//! exact operation order of a frame without a terminal attached.

use crate::{Color, DisplayAttributes, TerminalOutput};
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Printable text; ESC bytes are neutralised by realising sinks.
    Text(String),
    /// Bytes passed through untouched.
    Raw(Vec<u8>),
    SetColor {
        fg: Color,
        bg: Color,
        bold: bool,
    },
    SetDisplayAttributes {
        fg: Color,
        bg: Color,
        attrs: DisplayAttributes,
    },
    CursorUp(usize),
    CursorDown(usize),
    CursorForward(usize),
    CursorBackward(usize),
    CursorGoTo {
        row: usize,
        col: usize,
    },
    EraseLine,
    EraseDown,
    EraseScreen,
    HideCursor,
    ShowCursor,
    ScrollUp,
    ScrollDown,
    SetTitle(String),
    ClearTitle,
}

/// Recording sink: pending commands move into `frames` on every flush.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pending: Vec<Command>,
    frames: Vec<Vec<Command>>,
    fail_next_flush: bool,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the last flush.
    pub fn pending(&self) -> &[Command] {
        &self.pending
    }

    /// Every flushed batch, oldest first.
    pub fn frames(&self) -> &[Vec<Command>] {
        &self.frames
    }

    pub fn flush_count(&self) -> usize {
        self.frames.len()
    }

    /// The most recently flushed batch (empty when nothing was flushed yet).
    pub fn last_frame(&self) -> &[Command] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }

    /// Concatenated `Text` payloads of the most recent batch.
    pub fn last_frame_text(&self) -> String {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                Command::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Make the next flush fail with `BrokenPipe`; the batch is discarded.
    pub fn fail_next_flush(&mut self) {
        self.fail_next_flush = true;
    }
}

impl TerminalOutput for CommandBuffer {
    fn push(&mut self, cmd: Command) {
        self.pending.push(cmd);
    }

    fn flush(&mut self) -> io::Result<()> {
        let batch = std::mem::take(&mut self.pending);
        if std::mem::take(&mut self.fail_next_flush) {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "terminal output closed",
            ));
        }
        self.frames.push(batch);
        Ok(())
    }
}
