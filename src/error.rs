//! Error types for markup storage.

use thiserror::Error;

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to rebuild a serialized value.
///
/// Decoding errors are fatal to the single decode call that produced them.
/// Nothing falls back to a default value.
#[derive(Debug, Error)]
pub enum DecodingError {
    /// The record carries none of the recognized keys.
    #[error("record has none of the keys: {}", .expected.join(", "))]
    MissingForm { expected: &'static [&'static str] },
    /// The record carries more than one mutually exclusive key.
    #[error("ambiguous record: {count} mutually exclusive keys present")]
    AmbiguousForm { count: usize },
    /// A stored inline style declaration could not be re-parsed.
    #[error("invalid inline style declaration: {0:?}")]
    InvalidDeclaration(String),
    /// A required field is missing.
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// Archived runs do not cover the archived text exactly.
    #[error("runs cover {runs} characters but the text has {chars}")]
    RunLengthMismatch { runs: usize, chars: usize },
    /// An archive was written by some other producer.
    #[error("unknown archive format {0:?}")]
    UnknownArchive(String),
    /// An archive was written by a newer version of this crate.
    #[error("unsupported archive version {0}")]
    UnsupportedVersion(u32),
    /// The payload is not a well-formed record.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A serialized value could not be decoded.
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    /// A list marker was requested for a non-positive item number.
    #[error("list item numbers start at 1, got {0}")]
    InvalidItemNumber(i64),
    /// Range reaches past the end of the text.
    #[error("range {start}..{end} out of bounds for text of len {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
    /// Range start is after its end.
    #[error("invalid range {start}..{end} (start > end)")]
    InvalidRange { start: usize, end: usize },
    /// A value could not be written out.
    #[error("failed to encode archive: {0}")]
    Archive(#[source] serde_json::Error),
}

impl Error {
    /// Validate `range` against a text of `len` characters.
    pub(crate) fn check_range(range: &std::ops::Range<usize>, len: usize) -> Result<()> {
        if range.start > range.end {
            return Err(Self::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > len {
            return Err(Self::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(())
    }
}
