//! Clipboard-style interchange boundary.
//!
//! Reading walks [`READ_PRIORITY`] and takes the first format whose payload
//! is present. The native archive is decoded here; the RTF family is left to
//! a [`RichTextDecoder`] supplied by the host.

use crate::archive::{archive, unarchive};
use crate::error::Result;
use crate::storage::StyledText;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Payload formats understood at the interchange boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PasteboardFormat {
    /// This crate's own archive.
    Native,
    /// RTF with attachments.
    Rtfd,
    /// Plain RTF.
    Rtf,
    /// Generic platform rich text.
    RichText,
    /// UTF-8 plain text.
    PlainText,
    /// UTF-8 markup.
    Html,
}

impl PasteboardFormat {
    /// Uniform type identifier for this format.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Native => "org.markup-storage.styled-text",
            Self::Rtfd => "com.apple.flat-rtfd",
            Self::Rtf => "public.rtf",
            Self::RichText => "com.apple.uikit.attributedstring",
            Self::PlainText => "public.utf8-plain-text",
            Self::Html => "public.html",
        }
    }

    /// Whether reading this format needs a [`RichTextDecoder`].
    #[must_use]
    pub const fn is_rich_text(self) -> bool {
        matches!(self, Self::Rtfd | Self::Rtf | Self::RichText)
    }
}

/// Order in which formats are tried when reading styled text.
pub const READ_PRIORITY: [PasteboardFormat; 5] = [
    PasteboardFormat::Native,
    PasteboardFormat::Rtfd,
    PasteboardFormat::Rtf,
    PasteboardFormat::RichText,
    PasteboardFormat::PlainText,
];

/// A store of payloads keyed by format.
pub trait Pasteboard {
    /// Payload for `format`, if present.
    fn data(&self, format: PasteboardFormat) -> Option<Vec<u8>>;

    /// Store `bytes` under `format`, replacing any previous payload.
    fn set_data(&mut self, format: PasteboardFormat, bytes: Vec<u8>);
}

/// Decodes RTF-family payloads into styled text.
pub trait RichTextDecoder {
    fn decode(&self, format: PasteboardFormat, bytes: &[u8]) -> Result<StyledText>;
}

impl<F> RichTextDecoder for F
where
    F: Fn(PasteboardFormat, &[u8]) -> Result<StyledText>,
{
    fn decode(&self, format: PasteboardFormat, bytes: &[u8]) -> Result<StyledText> {
        self(format, bytes)
    }
}

/// Read styled text from `pasteboard`.
///
/// The first format in [`READ_PRIORITY`] with a payload wins, and a payload
/// that fails to decode is an error rather than a cue to try the next one.
/// Rich-text payloads are skipped when no decoder is given. Plain text that
/// is not UTF-8 is decoded lossily.
pub fn read_styled_text(
    pasteboard: &dyn Pasteboard,
    decoder: Option<&dyn RichTextDecoder>,
) -> Result<Option<StyledText>> {
    for format in READ_PRIORITY {
        if format.is_rich_text() && decoder.is_none() {
            continue;
        }
        let Some(bytes) = pasteboard.data(format) else {
            trace!(format = format.identifier(), "no payload");
            continue;
        };
        debug!(format = format.identifier(), bytes = bytes.len(), "reading payload");
        let text = match (format, decoder) {
            (PasteboardFormat::Native, _) => unarchive(&bytes)?,
            (PasteboardFormat::PlainText, _) => {
                StyledText::plain(&String::from_utf8_lossy(&bytes))
            }
            (_, Some(decoder)) => decoder.decode(format, &bytes)?,
            (_, None) => continue,
        };
        return Ok(Some(text));
    }
    Ok(None)
}

/// Write `text` to `pasteboard` as a native archive plus plain text.
pub fn write_styled_text(pasteboard: &mut dyn Pasteboard, text: &StyledText) -> Result<()> {
    let bytes = archive(text)?;
    pasteboard.set_data(PasteboardFormat::Native, bytes);
    pasteboard.set_data(PasteboardFormat::PlainText, text.as_str().as_bytes().to_vec());
    debug!(chars = text.len(), "wrote styled text");
    Ok(())
}

/// Markup stored on `pasteboard`, if present and valid UTF-8.
#[must_use]
pub fn html(pasteboard: &dyn Pasteboard) -> Option<String> {
    pasteboard
        .data(PasteboardFormat::Html)
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

/// Store `markup` on `pasteboard` under the HTML format.
pub fn set_html(pasteboard: &mut dyn Pasteboard, markup: &str) {
    pasteboard.set_data(PasteboardFormat::Html, markup.as_bytes().to_vec());
}

/// In-process pasteboard.
#[derive(Clone, Debug, Default)]
pub struct MemoryPasteboard {
    items: HashMap<PasteboardFormat, Vec<u8>>,
}

impl MemoryPasteboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every payload.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn contains(&self, format: PasteboardFormat) -> bool {
        self.items.contains_key(&format)
    }
}

impl Pasteboard for MemoryPasteboard {
    fn data(&self, format: PasteboardFormat) -> Option<Vec<u8>> {
        self.items.get(&format).cloned()
    }

    fn set_data(&mut self, format: PasteboardFormat, bytes: Vec<u8>) {
        self.items.insert(format, bytes);
    }
}
