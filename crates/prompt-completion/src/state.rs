//! Selection and scroll bookkeeping for the completion popup.
//!
//! Invariants (hold after every public call):
//! * `selected`, when set, indexes into `suggestions`.
//! * `vertical_scroll + visible_rows() <= suggestions.len()`.
//! * A selected candidate is always inside the visible window.
//! * Cycling past either end passes through "no selection".

use crate::{CompletionSource, Suggestion};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct CompletionState {
    suggestions: Vec<Suggestion>,
    selected: Option<usize>,
    vertical_scroll: usize,
    max: u16,
    word_separator: String,
}

impl CompletionState {
    pub fn new(max: u16) -> Self {
        Self {
            suggestions: Vec::new(),
            selected: None,
            vertical_scroll: 0,
            max,
            word_separator: String::new(),
        }
    }

    pub fn with_word_separator(mut self, sep: impl Into<String>) -> Self {
        self.word_separator = sep.into();
        self
    }

    /// Number of rows the popup shows for the current list.
    pub fn visible_rows(&self) -> usize {
        self.suggestions.len().min(self.max as usize)
    }

    /// Replace the candidate list. A selection that no longer exists is
    /// dropped; the scroll offset is clamped to the new list.
    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        if self.selected.is_some_and(|i| i >= self.suggestions.len()) {
            self.selected = None;
        }
        let max_scroll = self.suggestions.len() - self.visible_rows();
        self.vertical_scroll = self.vertical_scroll.min(max_scroll);
        self.keep_selection_visible();
        trace!(target: "completion", count = self.suggestions.len(), "suggestions_updated");
    }

    /// Drop the selection and scroll back to the top, keeping the list.
    pub fn reset(&mut self) {
        self.selected = None;
        self.vertical_scroll = 0;
    }

    /// Select the next candidate; past the last one the selection clears.
    pub fn next(&mut self) {
        let len = self.suggestions.len();
        self.selected = match self.selected {
            None if len > 0 => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            _ => None,
        };
        if self.selected.is_none() {
            self.vertical_scroll = 0;
        }
        self.keep_selection_visible();
    }

    /// Select the previous candidate; before the first one the selection
    /// clears, and from "no selection" it wraps to the last candidate.
    pub fn previous(&mut self) {
        let len = self.suggestions.len();
        self.selected = match self.selected {
            None if len > 0 => Some(len - 1),
            Some(i) if i > 0 => Some(i - 1),
            _ => None,
        };
        match self.selected {
            Some(i) if i + 1 == len => self.vertical_scroll = len - self.visible_rows(),
            None => self.vertical_scroll = 0,
            Some(_) => {}
        }
        self.keep_selection_visible();
    }

    fn keep_selection_visible(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let visible = self.visible_rows();
        if visible == 0 {
            return;
        }
        if selected >= self.vertical_scroll + visible {
            self.vertical_scroll = selected + 1 - visible;
        } else if selected < self.vertical_scroll {
            self.vertical_scroll = selected;
        }
    }
}

impl CompletionSource for CompletionState {
    fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn vertical_scroll(&self) -> usize {
        self.vertical_scroll
    }

    fn max_visible(&self) -> usize {
        self.max as usize
    }

    fn word_separator(&self) -> &str {
        &self.word_separator
    }
}
