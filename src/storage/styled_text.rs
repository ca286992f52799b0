//! Run-oriented styled text.
//!
//! [`StyledText`] stores a string plus a list of runs. Each run covers a
//! number of characters and holds the full attribute map for them. Runs
//! partition the text: they never overlap, never leave gaps, are never
//! empty, and adjacent runs always differ unless both carry an attachment.
//! An attachment run always covers exactly one character.
//!
//! All positions are character offsets, not bytes.

use crate::attachment::TextAttachment;
use crate::error::{DecodingError, Error, Result};
use crate::storage::attributes::{AttributeKey, AttributeValue, Attributes};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Run {
    len: usize,
    #[serde(default)]
    attributes: Attributes,
}

/// Text with attribute runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StyledTextRecord", into = "StyledTextRecord")]
pub struct StyledText {
    text: String,
    len: usize,
    runs: Vec<Run>,
}

impl StyledText {
    /// Create empty styled text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create text with no attributes.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self::styled(text, Attributes::new())
    }

    /// Create text carrying `attributes` throughout.
    #[must_use]
    pub fn styled(text: &str, attributes: Attributes) -> Self {
        let mut styled = Self::new();
        styled.push(text, attributes);
        styled
    }

    /// A single attachment character.
    #[must_use]
    pub fn attachment(attachment: TextAttachment, mut attributes: Attributes) -> Self {
        attributes.insert(AttributeKey::Attachment, attachment.into());
        Self::styled(
            &crate::attachment::OBJECT_REPLACEMENT_CHARACTER.to_string(),
            attributes,
        )
    }

    /// Append `text` carrying `attributes`.
    pub fn push(&mut self, text: &str, attributes: Attributes) {
        let len = text.chars().count();
        if len == 0 {
            return;
        }
        self.text.push_str(text);
        self.len += len;
        self.runs.push(Run { len, attributes });
        self.coalesce();
    }

    /// Append another styled text.
    pub fn push_styled(&mut self, other: &Self) {
        self.text.push_str(&other.text);
        self.len += other.len;
        self.runs.extend(other.runs.iter().cloned());
        self.coalesce();
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate runs with their character ranges.
    pub fn runs(&self) -> impl Iterator<Item = (Range<usize>, &Attributes)> {
        let mut offset = 0;
        self.runs.iter().map(move |run| {
            let range = offset..offset + run.len;
            offset += run.len;
            (range, &run.attributes)
        })
    }

    /// The run containing `location` and its full range.
    #[must_use]
    pub fn run_at(&self, location: usize) -> Option<(Range<usize>, &Attributes)> {
        self.runs().find(|(range, _)| range.contains(&location))
    }

    /// Attributes of the character at `location`.
    #[must_use]
    pub fn attributes_at(&self, location: usize) -> Option<&Attributes> {
        self.run_at(location).map(|(_, attributes)| attributes)
    }

    /// One attribute of the character at `location`.
    #[must_use]
    pub fn attribute(&self, key: AttributeKey, location: usize) -> Option<&AttributeValue> {
        self.attributes_at(location)?.get(&key)
    }

    /// Every run inside `range` carrying `key`, clipped to `range`.
    #[must_use]
    pub fn attribute_runs(
        &self,
        key: AttributeKey,
        range: Range<usize>,
    ) -> Vec<(Range<usize>, &AttributeValue)> {
        self.runs()
            .filter(|(run, _)| run.start < range.end && range.start < run.end)
            .filter_map(|(run, attributes)| {
                let value = attributes.get(&key)?;
                Some((run.start.max(range.start)..run.end.min(range.end), value))
            })
            .collect()
    }

    /// Every attachment with its range.
    pub fn attachments(&self) -> impl Iterator<Item = (Range<usize>, &TextAttachment)> {
        self.runs().filter_map(|(range, attributes)| {
            let attachment = attributes
                .get(&AttributeKey::Attachment)
                .and_then(AttributeValue::as_attachment)?;
            Some((range, attachment))
        })
    }

    /// Attachments touching `range`, including ones only partly inside.
    #[must_use]
    pub fn attachments_in(&self, range: Range<usize>) -> Vec<(Range<usize>, &TextAttachment)> {
        if range.is_empty() {
            return Vec::new();
        }
        self.attachments()
            .filter(|(run, _)| run.start < range.end && range.start < run.end)
            .collect()
    }

    /// Replace every attribute in `range`.
    pub fn set_attributes(&mut self, range: Range<usize>, attributes: &Attributes) -> Result<()> {
        self.update(range, |current| current.clone_from(attributes))
    }

    /// Set one attribute across `range`.
    pub fn add_attribute(
        &mut self,
        key: AttributeKey,
        value: AttributeValue,
        range: Range<usize>,
    ) -> Result<()> {
        self.update(range, |current| {
            current.insert(key, value.clone());
        })
    }

    /// Drop one attribute across `range`.
    pub fn remove_attribute(&mut self, key: AttributeKey, range: Range<usize>) -> Result<()> {
        self.update(range, |current| {
            current.remove(&key);
        })
    }

    /// Apply `f` to each run's attributes inside `range`.
    pub(crate) fn update(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&mut Attributes),
    ) -> Result<()> {
        Error::check_range(&range, self.len)?;
        if range.is_empty() {
            return Ok(());
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        for run in &mut self.runs[first..last] {
            f(&mut run.attributes);
        }
        self.coalesce();
        Ok(())
    }

    /// Replace `range` with `replacement`, runs included.
    pub fn replace(&mut self, range: Range<usize>, replacement: &Self) -> Result<()> {
        Error::check_range(&range, self.len)?;
        let bytes = self.byte_offset(range.start)..self.byte_offset(range.end);
        self.text.replace_range(bytes, &replacement.text);

        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs
            .splice(first..last, replacement.runs.iter().cloned());
        self.len = self.len - range.len() + replacement.len;
        self.coalesce();
        Ok(())
    }

    /// Replace `range` with plain `text`.
    ///
    /// The new characters take the attributes of the character before
    /// `range`, or of the first character after it when `range` starts at 0.
    /// With no neighbor at all they take `fallback`. Attachments are never
    /// inherited.
    pub fn replace_str(
        &mut self,
        range: Range<usize>,
        text: &str,
        fallback: &Attributes,
    ) -> Result<()> {
        Error::check_range(&range, self.len)?;
        let neighbor = if range.start > 0 {
            self.attributes_at(range.start - 1)
        } else {
            self.attributes_at(range.end)
        };
        let mut attributes = neighbor.unwrap_or(fallback).clone();
        attributes.remove(&AttributeKey::Attachment);
        self.replace(range, &Self::styled(text, attributes))
    }

    /// Copy of `range`, runs clipped to it.
    pub fn substring(&self, range: Range<usize>) -> Result<Self> {
        Error::check_range(&range, self.len)?;
        let mut sub = Self::new();
        for (run, attributes) in self.runs() {
            let start = run.start.max(range.start);
            let end = run.end.min(range.end);
            if start < end {
                let bytes = self.byte_offset(start)..self.byte_offset(end);
                sub.push(&self.text[bytes], attributes.clone());
            }
        }
        Ok(sub)
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    /// Ensure a run boundary at `pos`; returns the index of the run starting there.
    fn split_at(&mut self, pos: usize) -> usize {
        let mut offset = 0;
        for idx in 0..self.runs.len() {
            if offset == pos {
                return idx;
            }
            let len = self.runs[idx].len;
            if offset + len > pos {
                let head = pos - offset;
                let tail = Run {
                    len: len - head,
                    attributes: self.runs[idx].attributes.clone(),
                };
                self.runs[idx].len = head;
                self.runs.insert(idx + 1, tail);
                return idx + 1;
            }
            offset += len;
        }
        self.runs.len()
    }

    /// Merge equal neighbors and drop empty runs. Attachment runs are split
    /// to one character each and never merged, so every object replacement
    /// character has its own range.
    fn coalesce(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.len == 0 {
                continue;
            }
            if run.attributes.contains_key(&AttributeKey::Attachment) {
                for _ in 0..run.len {
                    merged.push(Run {
                        len: 1,
                        attributes: run.attributes.clone(),
                    });
                }
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.attributes == run.attributes => last.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[derive(Serialize, Deserialize)]
struct StyledTextRecord {
    text: String,
    #[serde(default)]
    runs: Vec<Run>,
}

impl From<StyledText> for StyledTextRecord {
    fn from(styled: StyledText) -> Self {
        Self {
            text: styled.text,
            runs: styled.runs,
        }
    }
}

impl TryFrom<StyledTextRecord> for StyledText {
    type Error = DecodingError;

    fn try_from(record: StyledTextRecord) -> std::result::Result<Self, Self::Error> {
        let chars = record.text.chars().count();
        let runs: usize = record.runs.iter().map(|run| run.len).sum();
        if runs != chars {
            return Err(DecodingError::RunLengthMismatch { runs, chars });
        }
        let mut styled = Self {
            text: record.text,
            len: chars,
            runs: record.runs,
        };
        styled.coalesce();
        Ok(styled)
    }
}
