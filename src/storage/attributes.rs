//! Attribute keys and values carried by styled runs.

use crate::attachment::TextAttachment;
use crate::color::Rgba;
use crate::markup::{MarkupProvenance, UnsupportedMarkup};
use crate::paragraph::{HeadingLevel, ParagraphStyle};
use crate::style::Font;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of a run attribute.
///
/// Keys ending in `Representation` hold the [`MarkupProvenance`] of the
/// matching visual style, except [`HeadingRepresentation`] which holds the
/// heading level whose size the run's font was derived from.
///
/// [`HeadingRepresentation`]: AttributeKey::HeadingRepresentation
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    Font,
    ForegroundColor,
    ParagraphStyle,
    Attachment,
    HeadingRepresentation,
    MarkRepresentation,
    BoldRepresentation,
    ItalicRepresentation,
    LinkRepresentation,
    HrRepresentation,
    UnsupportedHtml,
}

/// Value stored under an [`AttributeKey`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    Font(Font),
    Color(Rgba),
    ParagraphStyle(ParagraphStyle),
    Attachment(TextAttachment),
    Heading(HeadingLevel),
    Provenance(MarkupProvenance),
    Unsupported(UnsupportedMarkup),
}

impl AttributeValue {
    #[must_use]
    pub fn as_font(&self) -> Option<&Font> {
        match self {
            Self::Font(font) => Some(font),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_paragraph_style(&self) -> Option<&ParagraphStyle> {
        match self {
            Self::ParagraphStyle(style) => Some(style),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_attachment(&self) -> Option<&TextAttachment> {
        match self {
            Self::Attachment(attachment) => Some(attachment),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_heading(&self) -> Option<HeadingLevel> {
        match self {
            Self::Heading(level) => Some(*level),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_provenance(&self) -> Option<&MarkupProvenance> {
        match self {
            Self::Provenance(provenance) => Some(provenance),
            _ => None,
        }
    }
}

impl From<Font> for AttributeValue {
    fn from(font: Font) -> Self {
        Self::Font(font)
    }
}

impl From<Rgba> for AttributeValue {
    fn from(color: Rgba) -> Self {
        Self::Color(color)
    }
}

impl From<ParagraphStyle> for AttributeValue {
    fn from(style: ParagraphStyle) -> Self {
        Self::ParagraphStyle(style)
    }
}

impl From<TextAttachment> for AttributeValue {
    fn from(attachment: TextAttachment) -> Self {
        Self::Attachment(attachment)
    }
}

impl From<HeadingLevel> for AttributeValue {
    fn from(level: HeadingLevel) -> Self {
        Self::Heading(level)
    }
}

impl From<MarkupProvenance> for AttributeValue {
    fn from(provenance: MarkupProvenance) -> Self {
        Self::Provenance(provenance)
    }
}

impl From<UnsupportedMarkup> for AttributeValue {
    fn from(capsule: UnsupportedMarkup) -> Self {
        Self::Unsupported(capsule)
    }
}

/// Attributes of one run, ordered by key.
pub type Attributes = BTreeMap<AttributeKey, AttributeValue>;

/// Paragraph style stored in `attributes`, if any.
#[must_use]
pub fn paragraph_style(attributes: &Attributes) -> Option<&ParagraphStyle> {
    attributes
        .get(&AttributeKey::ParagraphStyle)
        .and_then(AttributeValue::as_paragraph_style)
}

/// Font stored in `attributes`, if any.
#[must_use]
pub fn font(attributes: &Attributes) -> Option<&Font> {
    attributes.get(&AttributeKey::Font).and_then(AttributeValue::as_font)
}

/// Foreground color stored in `attributes`, if any.
#[must_use]
pub fn foreground_color(attributes: &Attributes) -> Option<Rgba> {
    attributes
        .get(&AttributeKey::ForegroundColor)
        .and_then(AttributeValue::as_color)
}
