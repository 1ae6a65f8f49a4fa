//! Completion candidates, selection/scroll bookkeeping and column formatting.
//!
//! The renderer reads completion state through [`CompletionSource`] once per
//! frame; it never mutates it. [`CompletionState`] is the stock
//! implementation: it owns the candidate list, the selected index and the
//! vertical scroll offset, and keeps the selection inside the visible window.

pub mod format;
pub mod state;

pub use format::{COMPLETION_MARGIN, SHORTEN_SUFFIX, format_suggestions};
pub use state::CompletionState;

/// One completion candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub description: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, String::new())
    }
}

/// Read-only view of completion state consumed by the popup renderer.
pub trait CompletionSource {
    /// Full candidate list (not just the visible window).
    fn suggestions(&self) -> &[Suggestion];

    /// Absolute index of the selected candidate.
    fn selected(&self) -> Option<usize>;

    /// Index of the first visible candidate.
    fn vertical_scroll(&self) -> usize;

    /// Configured maximum number of visible rows.
    fn max_visible(&self) -> usize;

    /// Characters that delimit the word being completed.
    fn word_separator(&self) -> &str;

    /// Format the candidates into fixed-width rows no wider than `max_width`.
    fn format(&self, max_width: usize) -> (Vec<Suggestion>, usize) {
        format_suggestions(self.suggestions(), max_width)
    }

    fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.selected().and_then(|i| self.suggestions().get(i))
    }
}
