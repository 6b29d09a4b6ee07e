//! Evaluation history.
//!
//! Append-only record of `(input, result)` pairs. Insertion order is the
//! display order and the replay order. Entries are never edited; the only
//! removal is a bulk [`HistoryLog::clear`].

use crate::engine::scan::equation_sign;
use crate::model::InputError;
use serde::Serialize;
use std::fmt;

/// One successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    input: String,
    result: String,
}

impl HistoryEntry {
    /// Entry for `input` evaluated to `result`.
    pub fn new(input: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            result: result.into(),
        }
    }

    /// Text that was evaluated.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Formatted result.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Input text ready to be loaded back into the buffer.
    ///
    /// A trailing `= result` that repeats this entry's result is stripped, so
    /// `"2+2 = 4"` replays as `"2+2"`. Equations whose right-hand side is not
    /// the result are kept intact, as are comparisons such as `1==1`.
    pub fn replay_text(&self) -> &str {
        let input = self.input.trim_end();
        let Some(sign) = equation_sign(input) else {
            return input;
        };
        let (lhs, rhs) = (&input[..sign], &input[sign + 1..]);

        if rhs.trim() == self.result.trim() {
            lhs.trim_end()
        } else {
            input
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.input, self.result)
    }
}

/// Ordered evaluation history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an evaluation at the end of the log.
    pub fn append(&mut self, input: impl Into<String>, result: impl Into<String>) {
        self.entries.push(HistoryEntry::new(input, result));
    }

    /// All entries in insertion order.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entry at 0-based `index`.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been evaluated since the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Input text of entry `index` (0-based), stripped for reloading.
    ///
    /// # Errors
    ///
    /// Returns `InputError::HistoryIndex` if `index` is past the end.
    pub fn select_for_replay(&self, index: usize) -> Result<&str, InputError> {
        self.entries
            .get(index)
            .map(HistoryEntry::replay_text)
            .ok_or(InputError::HistoryIndex {
                index,
                len: self.entries.len(),
            })
    }

    /// Flat-text dump: one `input = result` line per entry.
    pub fn dump(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{entry}\n"))
            .collect()
    }
}
