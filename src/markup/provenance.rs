//! Markup provenance: which markup construct produced a style.
//!
//! Every styling attribute in the storage can carry a [`MarkupProvenance`]
//! so serialization reconstructs the original markup instead of inferring
//! it from the visual style. A bold run produced by `<strong class="x">`
//! keeps that exact element; a run produced by `style="font-weight: bold"`
//! keeps the declaration.
//!
//! # Wire format
//!
//! A provenance value serializes to a record with exactly one of the keys
//! `attribute`, `element` or `inline`:
//!
//! ```text
//! {"element": {"name": "strong", "attributes": []}}
//! {"attribute": {"name": "class", "value": {"string": "x"}}}
//! {"inline": "font-weight: bold"}
//! ```
//!
//! The inline form is stored as its canonical declaration string and
//! re-parsed on the way back in.

use crate::error::{DecodingError, Error, Result};
use crate::markup::attribute::SourceAttribute;
use crate::markup::css::CssDeclaration;
use crate::markup::element::{ElementShape, ElementSource};
use serde::{Deserialize, Serialize};

/// The markup construct a style came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ProvenanceRecord", into = "ProvenanceRecord")]
pub enum MarkupProvenance {
    /// A whole element (`<strong>`, `<ol start="3">`).
    Element(ElementShape),
    /// A single attribute on some other element.
    Attribute(SourceAttribute),
    /// One inline style declaration.
    InlineStyle(CssDeclaration),
}

impl MarkupProvenance {
    const KEYS: &'static [&'static str] = &["attribute", "element", "inline"];

    /// Provenance for an element-like node.
    #[must_use]
    pub fn from_source(source: &impl ElementSource) -> Self {
        Self::Element(ElementShape::from_source(source))
    }

    /// The element shape, when this is the element form.
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementShape> {
        match self {
            Self::Element(shape) => Some(shape),
            _ => None,
        }
    }

    /// Serialize to the keyed record.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Archive)
    }

    /// Rebuild from a keyed record.
    ///
    /// Fails when no form is present, when several are, when a form's payload
    /// is malformed, or when the inline declaration does not re-parse.
    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, DecodingError> {
        let record: ProvenanceRecord = serde_json::from_slice(bytes)?;
        Self::try_from(record)
    }
}

impl From<ElementShape> for MarkupProvenance {
    fn from(shape: ElementShape) -> Self {
        Self::Element(shape)
    }
}

impl From<SourceAttribute> for MarkupProvenance {
    fn from(attribute: SourceAttribute) -> Self {
        Self::Attribute(attribute)
    }
}

impl From<CssDeclaration> for MarkupProvenance {
    fn from(declaration: CssDeclaration) -> Self {
        Self::InlineStyle(declaration)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProvenanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attribute: Option<SourceAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element: Option<ElementShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline: Option<String>,
}

impl From<MarkupProvenance> for ProvenanceRecord {
    fn from(provenance: MarkupProvenance) -> Self {
        match provenance {
            MarkupProvenance::Attribute(attribute) => Self {
                attribute: Some(attribute),
                ..Self::default()
            },
            MarkupProvenance::Element(element) => Self {
                element: Some(element),
                ..Self::default()
            },
            MarkupProvenance::InlineStyle(declaration) => Self {
                inline: Some(declaration.to_string()),
                ..Self::default()
            },
        }
    }
}

impl TryFrom<ProvenanceRecord> for MarkupProvenance {
    type Error = DecodingError;

    fn try_from(record: ProvenanceRecord) -> std::result::Result<Self, Self::Error> {
        let count = usize::from(record.attribute.is_some())
            + usize::from(record.element.is_some())
            + usize::from(record.inline.is_some());
        if count > 1 {
            return Err(DecodingError::AmbiguousForm { count });
        }

        match record {
            ProvenanceRecord {
                attribute: Some(attribute),
                ..
            } => Ok(Self::Attribute(attribute)),
            ProvenanceRecord {
                element: Some(element),
                ..
            } => Ok(Self::Element(element)),
            ProvenanceRecord {
                inline: Some(raw), ..
            } => CssDeclaration::parse(&raw)
                .map(Self::InlineStyle)
                .ok_or(DecodingError::InvalidDeclaration(raw)),
            ProvenanceRecord { .. } => Err(DecodingError::MissingForm {
                expected: Self::KEYS,
            }),
        }
    }
}
