//! Render state and the per-keystroke frame cycle.

use crate::motion::CursorMotion;
use crate::position::{needs_forced_wrap, position_of};
use crate::{FrameOutcome, RenderError};
use prompt_completion::{COMPLETION_MARGIN, CompletionSource};
use prompt_config::{ColorScheme, RenderOptions};
use prompt_terminal::{Color, DisplayAttributes, TerminalOutput, WinSize};
use prompt_text::{Document, display_width};
use tracing::{debug, trace};

pub const WINDOW_TOO_SMALL_MESSAGE: &str = "Your console window is too small...";

/// Dynamic prompt override; `Some` replaces the static prefix for a cycle.
pub type LivePrefix = Box<dyn Fn() -> Option<String>>;
/// Invoked with the committed document after a line is broken.
pub type BreakLineCallback = Box<dyn FnMut(&Document)>;

pub struct Renderer<O: TerminalOutput> {
    pub(crate) out: O,
    pub(crate) prefix: String,
    pub(crate) live_prefix: Option<LivePrefix>,
    pub(crate) break_line_callback: Option<BreakLineCallback>,
    pub(crate) title: Option<String>,
    pub(crate) rows: u16,
    pub(crate) cols: u16,
    /// Column offset of the cursor after the previous cycle, measured from the
    /// start of the rendered region (prefix included).
    pub(crate) previous_cursor: usize,
    pub(crate) colors: ColorScheme,
    pub(crate) platform_wraps: bool,
}

impl<O: TerminalOutput> Renderer<O> {
    pub fn new(out: O, options: RenderOptions) -> Self {
        Self {
            out,
            prefix: options.prefix,
            live_prefix: None,
            break_line_callback: None,
            title: options.title,
            rows: 0,
            cols: 0,
            previous_cursor: 0,
            colors: options.colors,
            platform_wraps: options.platform_wraps,
        }
    }

    pub fn output(&self) -> &O {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.out
    }

    pub fn into_output(self) -> O {
        self.out
    }

    pub fn previous_cursor(&self) -> usize {
        self.previous_cursor
    }

    pub fn win_size(&self) -> WinSize {
        WinSize::new(self.rows, self.cols)
    }

    pub fn set_live_prefix(&mut self, f: impl Fn() -> Option<String> + 'static) {
        self.live_prefix = Some(Box::new(f));
    }

    pub fn set_break_line_callback(&mut self, f: impl FnMut(&Document) + 'static) {
        self.break_line_callback = Some(Box::new(f));
    }

    /// Live prefix when the callback provides one, else the static prefix.
    pub fn current_prefix(&self) -> String {
        self.live_prefix
            .as_ref()
            .and_then(|f| f())
            .unwrap_or_else(|| self.prefix.clone())
    }

    /// Store the latest window size verbatim.
    pub fn update_win_size(&mut self, size: WinSize) {
        debug!(target: "render.frame", rows = size.rows, cols = size.cols, "win_size_updated");
        self.rows = size.rows;
        self.cols = size.cols;
    }

    /// Set the window title, if one is configured.
    pub fn setup(&mut self) -> Result<(), RenderError> {
        if let Some(title) = self.title.as_deref() {
            self.out.set_title(title);
        }
        self.out.flush().map_err(RenderError::Flush)
    }

    /// Clear the title and everything below the cursor.
    pub fn tear_down(&mut self) -> Result<(), RenderError> {
        self.out.clear_title();
        self.out.erase_down();
        self.out.flush().map_err(RenderError::Flush)
    }

    /// Erase the screen and home the cursor.
    pub fn clear_screen(&mut self) -> Result<(), RenderError> {
        self.out.erase_screen();
        self.out.cursor_go_to(0, 0);
        self.out.flush().map_err(RenderError::Flush)
    }

    /// Run one render cycle and flush it as a single batch.
    pub fn render<C: CompletionSource + ?Sized>(
        &mut self,
        doc: &Document,
        previous_text: &str,
        completion: &C,
    ) -> Result<FrameOutcome, RenderError> {
        let span = tracing::debug_span!(
            target: "render.frame",
            "render_cycle",
            cols = self.cols,
            rows = self.rows
        );
        let _enter = span.enter();
        let outcome = self.draw_frame(doc, previous_text, completion);
        self.out.flush().map_err(RenderError::Flush)?;
        debug!(
            target: "render.frame",
            ?outcome,
            previous_cursor = self.previous_cursor,
            "frame_flushed"
        );
        Ok(outcome)
    }

    fn draw_frame<C: CompletionSource + ?Sized>(
        &mut self,
        doc: &Document,
        previous_text: &str,
        completion: &C,
    ) -> FrameOutcome {
        // Pseudo terminals (e.g. inside containers) may report 0x0 until the
        // first resize notification arrives.
        if self.cols == 0 {
            trace!(target: "render.frame", "size_unknown_skip");
            return FrameOutcome::Skipped;
        }
        let width = self.cols as usize;
        let prefix = self.current_prefix();
        let line = doc.text();
        let mut cursor = display_width(&prefix) + display_width(line);

        let text_rows = position_of(cursor, line, width).row + 1;
        let height = text_rows + completion.max_visible();
        if height > self.rows as usize || COMPLETION_MARGIN > width {
            debug!(
                target: "render.frame",
                height,
                rows = self.rows,
                cols = self.cols,
                "window_too_small"
            );
            self.render_window_too_small();
            return FrameOutcome::TooSmall;
        }

        let previous = format!("{prefix}{previous_text}");
        let from = self.previous_cursor;
        self.motion().move_for_render(from, 0, &previous);

        self.out.hide_cursor();
        self.out.erase_line();
        self.out.erase_down();
        self.render_prefix(&prefix);

        let multiline = doc.newline_count() > 0;
        if multiline {
            self.render_multiline(doc);
        } else {
            self.out.write_text(line);
        }

        self.line_wrap(cursor);
        self.out.set_color(Color::Default, Color::Default, false);

        let tail = display_width(line).saturating_sub(doc.display_cursor_position());
        cursor = self.motion().backward(cursor, tail);

        self.render_completion(doc, completion, &prefix, text_rows);

        if let Some(suggestion) = completion.selected_suggestion() {
            let word = doc.word_before_cursor_until_separator(completion.word_separator());
            cursor = self.motion().backward(cursor, display_width(word));

            self.out.set_color(
                self.colors.preview_suggestion_text,
                self.colors.preview_suggestion_bg,
                false,
            );
            self.out.write_text(&suggestion.text);
            self.out.set_color(Color::Default, Color::Default, false);
            cursor += display_width(&suggestion.text);

            let rest = doc.text_after_cursor();
            self.out.write_text(rest);
            cursor += display_width(rest);
            self.line_wrap(cursor);

            cursor = self.motion().backward(cursor, display_width(rest));
        }

        if !multiline {
            self.out.show_cursor();
        }
        self.previous_cursor = cursor;
        FrameOutcome::Drawn
    }

    /// Before / reverse-video cursor cell / after. The cell is a blank at the
    /// end of the buffer, and a newline under the cursor becomes `" \n"` so
    /// the highlight stays visible on its own row.
    fn render_multiline(&mut self, doc: &Document) {
        let before = doc.text_before_cursor();
        let rest = doc.text_after_cursor();
        let (cell, after) = match doc.grapheme_under_cursor() {
            None => (" ", ""),
            Some("\n") => (" \n", &rest[1..]),
            Some(g) => (g, &rest[g.len()..]),
        };

        let (fg, bg) = (self.colors.input_text, self.colors.input_bg);
        self.out.set_color(fg, bg, false);
        self.out.write_text(before);
        self.out
            .set_display_attributes(fg, bg, DisplayAttributes::REVERSE);
        self.out.write_text(cell);
        self.out.set_color(fg, bg, false);
        self.out.write_text(after);
    }

    fn render_window_too_small(&mut self) {
        self.out.cursor_go_to(0, 0);
        self.out.erase_screen();
        self.out.set_color(Color::DarkRed, Color::White, false);
        self.out.write_text(WINDOW_TOO_SMALL_MESSAGE);
    }

    pub(crate) fn render_prefix(&mut self, prefix: &str) {
        self.out
            .set_color(self.colors.prefix_text, self.colors.prefix_bg, false);
        self.out.write_text(prefix);
        self.out.set_color(Color::Default, Color::Default, false);
    }

    /// Push the cursor onto the next row when it is parked on a width boundary.
    pub(crate) fn line_wrap(&mut self, cursor: usize) {
        if needs_forced_wrap(cursor, self.cols as usize, self.platform_wraps) {
            trace!(target: "render.frame", cursor, "forced_wrap");
            self.out.write_raw(b"\n");
        }
    }

    pub(crate) fn motion(&mut self) -> CursorMotion<'_, O> {
        CursorMotion::new(&mut self.out, self.cols as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_completion::CompletionState;
    use prompt_terminal::{Command, CommandBuffer};

    fn renderer(rows: u16, cols: u16) -> Renderer<CommandBuffer> {
        let mut r = Renderer::new(
            CommandBuffer::new(),
            RenderOptions {
                prefix: "> ".into(),
                title: None,
                colors: ColorScheme::default(),
                platform_wraps: false,
            },
        );
        r.update_win_size(WinSize::new(rows, cols));
        r
    }

    #[test]
    fn live_prefix_overrides_static_prefix() {
        let mut r = renderer(24, 80);
        assert_eq!(r.current_prefix(), "> ");
        r.set_live_prefix(|| Some("db> ".to_string()));
        assert_eq!(r.current_prefix(), "db> ");
        r.set_live_prefix(|| None);
        assert_eq!(r.current_prefix(), "> ");
    }

    #[test]
    fn multiline_cursor_cell_is_reversed() {
        let mut r = renderer(24, 80);
        r.render_multiline(&Document::new("ab\ncd", 1));
        let cmds = r.output().pending();
        let reversed = cmds
            .iter()
            .position(|c| {
                matches!(c, Command::SetDisplayAttributes { attrs, .. }
                    if attrs.contains(DisplayAttributes::REVERSE))
            })
            .expect("reverse attribute");
        assert_eq!(cmds[reversed - 1], Command::Text("a".into()));
        assert_eq!(cmds[reversed + 1], Command::Text("b".into()));
        assert_eq!(cmds[reversed + 3], Command::Text("\ncd".into()));
    }

    #[test]
    fn multiline_cursor_cell_keeps_combining_mark() {
        let mut r = renderer(24, 80);
        r.render_multiline(&Document::new("ae\u{301}x\nb", 1));
        let texts: Vec<_> = r
            .output()
            .pending()
            .iter()
            .filter_map(|c| match c {
                Command::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["a", "e\u{301}", "x\nb"]);
    }

    #[test]
    fn multiline_newline_under_cursor_gets_visible_cell() {
        let mut r = renderer(24, 80);
        r.render_multiline(&Document::new("ab\ncd", 2));
        let texts: Vec<_> = r
            .output()
            .pending()
            .iter()
            .filter_map(|c| match c {
                Command::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["ab", " \n", "cd"]);
    }

    #[test]
    fn multiline_cursor_at_end_uses_blank_cell() {
        let mut r = renderer(24, 80);
        r.render_multiline(&Document::with_cursor_at_end("ab\ncd"));
        let texts: Vec<_> = r
            .output()
            .pending()
            .iter()
            .filter_map(|c| match c {
                Command::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["ab\ncd", " "]);
    }

    #[test]
    fn zero_columns_skips_but_still_flushes() {
        let mut r = renderer(0, 0);
        let outcome = r
            .render(&Document::with_cursor_at_end("x"), "", &CompletionState::new(6))
            .unwrap();
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert_eq!(r.output().flush_count(), 1);
        assert!(r.output().last_frame().is_empty());
    }

    #[test]
    fn flush_failure_is_surfaced() {
        let mut r = renderer(24, 80);
        r.output_mut().fail_next_flush();
        let err = r
            .render(&Document::with_cursor_at_end("x"), "", &CompletionState::new(6))
            .unwrap_err();
        assert!(matches!(err, RenderError::Flush(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }
}
