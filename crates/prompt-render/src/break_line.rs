//! Line commit: redraw the accepted line in full and start a fresh row.

use crate::{RenderError, Renderer};
use prompt_terminal::{Color, TerminalOutput};
use prompt_text::{Document, display_width};
use tracing::debug;

impl<O: TerminalOutput> Renderer<O> {
    /// Erase the editing region, redraw prompt and committed text followed by
    /// a newline, flush, then notify the commit callback.
    ///
    /// The callback runs only after a successful flush. The next render cycle
    /// starts from column 0 of the new row.
    pub fn break_line(&mut self, doc: &Document) -> Result<(), RenderError> {
        let prefix = self.current_prefix();
        let before = doc.text_before_cursor();
        let cursor = display_width(before) + display_width(&prefix);
        debug!(target: "render.break_line", cursor, len = doc.text().len(), "break_line");

        self.clear(cursor, &format!("{prefix}{before}"));
        self.render_prefix(&prefix);
        self.out
            .set_color(self.colors.input_text, self.colors.input_bg, false);
        self.out.write_text(&format!("{}\n", doc.text()));
        self.out.set_color(Color::Default, Color::Default, false);
        self.out.flush().map_err(RenderError::Flush)?;

        if let Some(callback) = self.break_line_callback.as_mut() {
            callback(doc);
        }
        self.previous_cursor = 0;
        Ok(())
    }

    /// Walk back to the start of the rendered region and erase everything
    /// from there down.
    fn clear(&mut self, cursor: usize, text: &str) {
        self.motion().move_for_render(cursor, 0, text);
        self.out.erase_line();
        self.out.erase_down();
    }
}
