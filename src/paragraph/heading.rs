//! Heading paragraph property.

use crate::markup::MarkupProvenance;
use serde::{Deserialize, Serialize};

/// Heading level, `<h1>` through `<h6>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Point size used for heading text at this level.
    #[must_use]
    pub const fn font_size(self) -> f32 {
        match self {
            Self::H1 => 24.0,
            Self::H2 => 22.0,
            Self::H3 => 20.0,
            Self::H4 => 18.0,
            Self::H5 => 16.0,
            Self::H6 => 14.0,
        }
    }

    /// The element name for this level.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }

    /// Resolve `h1`..`h6`, ignoring ASCII case.
    #[must_use]
    pub fn from_element_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        }
    }
}

/// A heading paragraph property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<MarkupProvenance>,
}

impl Heading {
    #[must_use]
    pub fn new(level: HeadingLevel, provenance: Option<MarkupProvenance>) -> Self {
        Self { level, provenance }
    }

    /// Project an `<hN>` element; other elements yield `None`.
    #[must_use]
    pub fn from_provenance(provenance: MarkupProvenance) -> Option<Self> {
        let level = HeadingLevel::from_element_name(&provenance.as_element()?.name)?;
        Some(Self::new(level, Some(provenance)))
    }
}
