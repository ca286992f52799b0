//! Native archive format for styled text.
//!
//! The archive is the payload written under [`PasteboardFormat::Native`]
//! and the only format that carries provenance, capsules and attachment
//! records intact. It is a versioned JSON envelope around the styled text
//! record.
//!
//! [`PasteboardFormat::Native`]: crate::interchange::PasteboardFormat::Native

use crate::error::{DecodingError, Error, Result};
use crate::storage::StyledText;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier stamped into every archive.
pub const ARCHIVE_FORMAT: &str = "markup-storage.styled-text";

/// Current archive version.
pub const ARCHIVE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    format: &'a str,
    version: u32,
    text: &'a StyledText,
}

#[derive(Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    text: StyledText,
}

/// Encode `text` as a native archive.
pub fn archive(text: &StyledText) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        format: ARCHIVE_FORMAT,
        version: ARCHIVE_VERSION,
        text,
    };
    let bytes = serde_json::to_vec(&envelope).map_err(Error::Archive)?;
    debug!(chars = text.len(), bytes = bytes.len(), "archived styled text");
    Ok(bytes)
}

/// Decode a native archive produced by [`archive`].
///
/// Foreign formats and newer versions are rejected rather than guessed at.
pub fn unarchive(bytes: &[u8]) -> Result<StyledText> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(DecodingError::from)?;
    if envelope.format != ARCHIVE_FORMAT {
        return Err(DecodingError::UnknownArchive(envelope.format).into());
    }
    if envelope.version > ARCHIVE_VERSION {
        return Err(DecodingError::UnsupportedVersion(envelope.version).into());
    }
    Ok(envelope.text)
}
