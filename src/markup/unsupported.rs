//! Capsules for markup the storage has no native styling for.

use crate::error::{DecodingError, Error, Result};
use crate::markup::element::ElementShape;
use serde::{Deserialize, Serialize};

/// Element shapes the storage cannot style, kept verbatim for re-serialization.
///
/// When the tree builder meets an element without a formatter it wraps that
/// element (and any unsupported ancestors) as shapes, outermost first, and
/// attaches the capsule to the affected run. Serializers must re-emit the
/// shapes in stored order, nested outward to inward.
///
/// Shapes are never reordered, merged or deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UnsupportedRecord", into = "UnsupportedRecord")]
pub struct UnsupportedMarkup {
    shapes: Vec<ElementShape>,
}

impl UnsupportedMarkup {
    /// Wrap an explicit list of shapes.
    #[must_use]
    pub fn new(shapes: Vec<ElementShape>) -> Self {
        Self { shapes }
    }

    /// Shapes in source order, outermost first.
    #[must_use]
    pub fn shapes(&self) -> &[ElementShape] {
        &self.shapes
    }

    /// Number of wrapped shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check whether the capsule is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Return a capsule with `shape` nested inside the existing ones.
    #[must_use]
    pub fn nesting(mut self, shape: ElementShape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Serialize to a `{representations: [...]}` record.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Archive)
    }

    /// Rebuild a capsule; fails when the shape list is absent or malformed.
    pub fn decode(bytes: &[u8]) -> std::result::Result<Self, DecodingError> {
        let record: UnsupportedRecord = serde_json::from_slice(bytes)?;
        Self::try_from(record)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UnsupportedRecord {
    #[serde(default)]
    representations: Option<Vec<ElementShape>>,
}

impl From<UnsupportedMarkup> for UnsupportedRecord {
    fn from(capsule: UnsupportedMarkup) -> Self {
        Self {
            representations: Some(capsule.shapes),
        }
    }
}

impl TryFrom<UnsupportedRecord> for UnsupportedMarkup {
    type Error = DecodingError;

    fn try_from(record: UnsupportedRecord) -> std::result::Result<Self, Self::Error> {
        record
            .representations
            .map(Self::new)
            .ok_or(DecodingError::MissingField("representations"))
    }
}
