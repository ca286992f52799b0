//! Plain-string projection of the storage, backed by ropey.

use ropey::Rope;
use std::ops::Range;

/// The storage's characters without attributes.
///
/// Kept in lock step with the run store so string and paragraph queries
/// never walk the runs.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Replace the characters in `range` with `text`.
    pub fn splice(&mut self, range: Range<usize>, text: &str) {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
    }

    /// Replace the entire contents.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Characters in `range` as an owned string.
    #[must_use]
    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        self.rope
            .get_slice(range)
            .map(|slice| slice.to_string())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Character range of the paragraphs touched by `range`, separators included.
    #[must_use]
    pub fn paragraph_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len_chars();
        let first_line = self.rope.char_to_line(range.start.min(len));
        let last_char = if range.end > range.start {
            range.end - 1
        } else {
            range.start
        };
        let last_line = self.rope.char_to_line(last_char.min(len));

        let start = self.rope.line_to_char(first_line);
        let end = if last_line + 1 < self.len_lines() {
            self.rope.line_to_char(last_line + 1)
        } else {
            len
        };
        start..end
    }

    /// Every paragraph's character range, in order.
    #[must_use]
    pub fn paragraph_ranges(&self) -> Vec<Range<usize>> {
        let lines = self.len_lines();
        (0..lines)
            .map(|line| {
                let start = self.rope.line_to_char(line);
                let end = if line + 1 < lines {
                    self.rope.line_to_char(line + 1)
                } else {
                    self.len_chars()
                };
                start..end
            })
            .collect()
    }

    /// Index of the paragraph containing `char_idx`.
    #[must_use]
    pub fn paragraph_index(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }
}

impl From<&str> for RopeWrapper {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}
