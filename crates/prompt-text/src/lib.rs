//! Prompt text model: an immutable document snapshot plus display width helpers.
//!
//! The renderer never edits text. It reads a [`Document`] (text + cursor) and
//! measures it with the helpers in [`width`]. Cursor positions are expressed
//! in `char`s, display positions in terminal columns.

pub mod width;

use unicode_segmentation::UnicodeSegmentation;

pub use width::{cluster_width, display_width, fill_right, truncate_to_width};

/// Snapshot of the prompt buffer handed to the renderer each cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    /// Cursor offset in chars, clamped to `0..=text.chars().count()`.
    cursor_position: usize,
}

impl Document {
    pub fn new(text: impl Into<String>, cursor_position: usize) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            cursor_position: cursor_position.min(len),
        }
    }

    /// Document with the cursor placed after the last character.
    pub fn with_cursor_at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            cursor_position: len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Byte index of the cursor inside `text`.
    fn cursor_byte(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn text_before_cursor(&self) -> &str {
        &self.text[..self.cursor_byte()]
    }

    pub fn text_after_cursor(&self) -> &str {
        &self.text[self.cursor_byte()..]
    }

    /// Grapheme cluster at the cursor, so a base char keeps its combining marks.
    pub fn grapheme_under_cursor(&self) -> Option<&str> {
        self.text_after_cursor().graphemes(true).next()
    }

    /// Word immediately before the cursor, delimited by any char of `sep`.
    /// An empty separator falls back to splitting on a single space.
    pub fn word_before_cursor_until_separator(&self, sep: &str) -> &str {
        let before = self.text_before_cursor();
        let start = if sep.is_empty() {
            before.rfind(' ').map_or(0, |i| i + 1)
        } else {
            before
                .char_indices()
                .rev()
                .find(|(_, c)| sep.contains(*c))
                .map_or(0, |(i, c)| i + c.len_utf8())
        };
        &before[start..]
    }

    /// Count of embedded `'\n'` characters.
    pub fn newline_count(&self) -> usize {
        self.text.matches('\n').count()
    }

    /// Display width of the text before the cursor.
    pub fn display_cursor_position(&self) -> usize {
        display_width(self.text_before_cursor())
    }
}
