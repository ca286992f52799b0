//! Boundary to the markup parser and serializer.

use crate::error::Result;
use crate::storage::attributes::Attributes;
use crate::storage::styled_text::StyledText;

/// Converts between markup and styled text.
///
/// Parsing and serialization live outside this crate. Implementations
/// project parsed nodes into provenance-tagged attributes on the way in,
/// and consult that provenance plus any unsupported-markup capsules on the
/// way out.
pub trait MarkupConverter {
    /// Build styled text from `markup`, with `defaults` under every run.
    fn styled_text(&self, markup: &str, defaults: &Attributes) -> Result<StyledText>;

    /// Serialize `text` back to markup.
    fn markup(&self, text: &StyledText, prettify: bool) -> String;
}
