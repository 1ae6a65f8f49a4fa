//! Completion popup: a borderless list drawn under the cursor row with a
//! one-cell scrollbar on its right edge.
//!
//! The popup is drawn with relative motion only. Every row starts one line
//! below the previous one and the cursor is walked back to the anchor column
//! after each row, so after the last row a single `CursorUp` restores the
//! cursor to where the frame left it.

use crate::position::position_of;
use crate::renderer::Renderer;
use prompt_completion::CompletionSource;
use prompt_terminal::{Color, TerminalOutput};
use prompt_text::{Document, display_width};
use tracing::{debug, trace};

/// Thumb geometry for a window over a longer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scrollbar {
    pub top: usize,
    pub height: usize,
}

impl Scrollbar {
    /// `height = clamp(window * window / total, 1, window)` and
    /// `top = window * scroll / total`, both rounded down.
    pub fn compute(window_height: usize, total: usize, scroll: usize) -> Self {
        if window_height == 0 || total == 0 {
            return Self { top: 0, height: 0 };
        }
        let height = (window_height * window_height / total).clamp(1, window_height);
        let top = window_height * scroll / total;
        Self { top, height }
    }

    /// Rows `top..=top + height` render as thumb.
    pub fn is_thumb(&self, row: usize) -> bool {
        self.top <= row && row <= self.top + self.height
    }
}

/// Column of the cursor on its own screen line, before width wrapping.
fn anchor_column(doc: &Document, prefix_width: usize) -> usize {
    let before = doc.text_before_cursor();
    match before.rfind('\n') {
        Some(i) => display_width(&before[i + 1..]),
        None => prefix_width + display_width(before),
    }
}

impl<O: TerminalOutput> Renderer<O> {
    pub(crate) fn render_completion<C: CompletionSource + ?Sized>(
        &mut self,
        doc: &Document,
        completion: &C,
        prefix: &str,
        text_rows: usize,
    ) {
        let suggestions = completion.suggestions();
        if suggestions.is_empty() {
            return;
        }
        let cols = self.cols as usize;
        let prefix_width = display_width(prefix);
        let (formatted, width) = completion.format(cols.saturating_sub(prefix_width + 1));
        if formatted.is_empty() {
            trace!(target: "render.popup", cols, "popup_does_not_fit");
            return;
        }
        // One extra cell for the scrollbar.
        let width = width + 1;

        let scroll = completion.vertical_scroll().min(formatted.len());
        let window_height = (formatted.len() - scroll)
            .min(completion.max_visible())
            .min((self.rows as usize).saturating_sub(text_rows));
        if window_height == 0 {
            return;
        }
        let visible = &formatted[scroll..scroll + window_height];
        self.prepare_area(window_height);

        let mut cursor = anchor_column(doc, prefix_width);
        let x = position_of(cursor, "", cols).col;
        let overflow = (x + width >= cols).then(|| x + width - cols);
        if let Some(shift) = overflow {
            cursor = self.motion().backward(cursor, shift);
        }

        let bar = Scrollbar::compute(window_height, suggestions.len(), scroll);
        let selected = completion
            .selected()
            .and_then(|s| s.checked_sub(scroll))
            .filter(|s| *s < window_height);
        debug!(
            target: "render.popup",
            window_height,
            width,
            scroll,
            ?selected,
            ?overflow,
            "popup_layout"
        );

        let c = self.colors;
        self.out.set_color(Color::White, Color::Cyan, false);
        for (i, row) in visible.iter().enumerate() {
            self.out.cursor_down(1);
            if selected == Some(i) {
                self.out
                    .set_color(c.selected_suggestion_text, c.selected_suggestion_bg, true);
            } else {
                self.out
                    .set_color(c.suggestion_text, c.suggestion_bg, false);
            }
            self.out.write_text(&row.text);

            if selected == Some(i) {
                self.out.set_color(
                    c.selected_description_text,
                    c.selected_description_bg,
                    false,
                );
            } else {
                self.out
                    .set_color(c.description_text, c.description_bg, false);
            }
            self.out.write_text(&row.description);

            let cell = if bar.is_thumb(i) {
                c.scrollbar_thumb
            } else {
                c.scrollbar_bg
            };
            self.out.set_color(Color::Default, cell, false);
            self.out.write_text(" ");
            self.out.set_color(Color::Default, Color::Default, false);

            self.line_wrap(cursor + width);
            self.motion().backward(cursor + width, width);
        }

        if let Some(shift) = overflow {
            self.out.cursor_forward(shift);
        }
        self.out.cursor_up(window_height);
        self.out.set_color(Color::Default, Color::Default, false);
    }

    /// Scroll the screen so `rows` lines exist below the cursor, then return
    /// to the original row.
    fn prepare_area(&mut self, rows: usize) {
        for _ in 0..rows {
            self.out.scroll_down();
        }
        for _ in 0..rows {
            self.out.scroll_up();
        }
    }
}
