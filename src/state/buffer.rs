//! Expression buffer (pure state transitions).
//!
//! Owns the expression text, the cursor and an optional selection.
//! All positions count chars, not bytes. Every operation is total: out of
//! range positions are clamped, never rejected.

use tracing::debug;

/// Half-open selection `[start, end)` in char positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// First selected char position.
    pub start: usize,
    /// Position just past the last selected char.
    pub end: usize,
}

impl Selection {
    /// Number of selected chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the range covers no chars.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Editable expression text with cursor and selection.
///
/// Invariant: `cursor <= len()` and, when present,
/// `selection.start <= selection.end <= len()`. An empty selection is
/// never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    text: String,
    /// Char count of `text`, kept in step by every mutation.
    chars: usize,
    cursor: usize,
    selection: Option<Selection>,
}

impl ExpressionBuffer {
    /// Empty buffer with the cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// The expression text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current selection, never empty.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Selected text, if any.
    pub fn selected_text(&self) -> Option<&str> {
        self.selection
            .map(|sel| &self.text[self.byte_offset(sel.start)..self.byte_offset(sel.end)])
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.chars
    }

    /// True if there is no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text an insertion would follow: everything before the selection, or
    /// before the cursor when nothing is selected.
    pub fn text_before_insertion(&self) -> &str {
        let at = self.selection.map_or(self.cursor, |sel| sel.start);
        &self.text[..self.byte_offset(at)]
    }

    /// Insert `text` at the cursor, replacing the selection if there is one.
    ///
    /// The cursor ends up right after the inserted text.
    pub fn insert(&mut self, text: &str) {
        let at = self.take_selection();
        self.splice(at, at, text);
        self.cursor = at + text.chars().count();
        debug!(cursor = self.cursor, inserted = text, "buffer insert");
    }

    /// Replace the current selection with `text`.
    ///
    /// With no selection this is a plain [`insert`](Self::insert).
    pub fn replace_selection(&mut self, text: &str) {
        self.insert(text);
    }

    /// Insert a call template such as `sin(` + `` + `)`.
    ///
    /// With no selection the cursor lands right after `prefix` and a
    /// non-empty `placeholder` becomes the selection, so the next keystroke
    /// goes inside the call. With a selection, the selected text becomes the
    /// argument and the cursor lands after `suffix`.
    pub fn insert_template(&mut self, prefix: &str, placeholder: &str, suffix: &str) {
        let prefix_len = prefix.chars().count();

        match self.selection {
            Some(sel) => {
                let selected = self.selected_text().unwrap_or_default().to_string();
                let wrapped = format!("{prefix}{selected}{suffix}");
                self.selection = None;
                self.splice(sel.start, sel.end, &wrapped);
                self.cursor = sel.start + wrapped.chars().count();
            }
            None => {
                let at = self.cursor;
                let template = format!("{prefix}{placeholder}{suffix}");
                self.splice(at, at, &template);
                self.cursor = at + prefix_len;

                let placeholder_len = placeholder.chars().count();
                if placeholder_len > 0 {
                    self.selection = Some(Selection {
                        start: self.cursor,
                        end: self.cursor + placeholder_len,
                    });
                }
            }
        }
        debug!(cursor = self.cursor, prefix, suffix, "buffer template");
    }

    /// Delete the selection, or the char before the cursor.
    ///
    /// No-op at position 0 without a selection.
    pub fn backspace(&mut self) {
        if self.selection.is_some() {
            self.take_selection();
            return;
        }
        if self.cursor > 0 {
            let at = self.cursor - 1;
            self.splice(at, self.cursor, "");
            self.cursor = at;
        }
    }

    /// Delete the selection, or the char after the cursor.
    ///
    /// No-op at the end of the text without a selection.
    pub fn delete_forward(&mut self) {
        if self.selection.is_some() {
            self.take_selection();
            return;
        }
        if self.cursor < self.len() {
            self.splice(self.cursor, self.cursor + 1, "");
        }
    }

    /// Move the cursor by `delta` chars, saturating at both ends.
    ///
    /// Clears the selection.
    pub fn move_cursor(&mut self, delta: isize) {
        let target = if delta.is_negative() {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta.unsigned_abs())
        };
        self.set_cursor(target);
    }

    /// Place the cursor at `pos`, clamped to the text. Clears the selection.
    pub fn set_cursor(&mut self, pos: usize) {
        self.selection = None;
        self.cursor = pos.min(self.len());
    }

    /// Select `[start, end)`, clamped and ordered. The cursor moves to `end`.
    ///
    /// An empty range clears the selection.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        self.cursor = end;
        self.selection = (start < end).then_some(Selection { start, end });
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
        self.chars = 0;
        self.cursor = 0;
        self.selection = None;
    }

    /// Replace the whole text and put the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.chars = self.text.chars().count();
        self.selection = None;
        self.cursor = self.len();
    }

    // ===== Internals =====

    /// Remove the selected text, returning where the cursor should go.
    fn take_selection(&mut self) -> usize {
        match self.selection.take() {
            Some(sel) => {
                self.splice(sel.start, sel.end, "");
                self.cursor = sel.start;
                sel.start
            }
            None => self.cursor,
        }
    }

    /// Replace chars `[start, end)` with `replacement`. Positions must be valid.
    fn splice(&mut self, start: usize, end: usize, replacement: &str) {
        let start_byte = self.byte_offset(start);
        let end_byte = start_byte + nth_char_offset(&self.text[start_byte..], end - start);
        self.text.replace_range(start_byte..end_byte, replacement);
        self.chars = self.chars - (end - start) + replacement.chars().count();
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        nth_char_offset(&self.text, char_pos)
    }
}

/// Byte offset of char `n` in `text`, or `text.len()` past the end.
fn nth_char_offset(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map_or(text.len(), |(offset, _)| offset)
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
