//! Source attributes as handed over by the node-tree boundary.

use crate::markup::css::CssDeclaration;
use serde::{Deserialize, Serialize};

/// Attribute names with a known meaning.
///
/// Lookups by type compare case-insensitively against [`AttributeType::name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Alt,
    Class,
    Height,
    Href,
    Id,
    Reversed,
    Src,
    Start,
    Style,
    Type,
    Width,
}

impl AttributeType {
    const ALL: [Self; 11] = [
        Self::Alt,
        Self::Class,
        Self::Height,
        Self::Href,
        Self::Id,
        Self::Reversed,
        Self::Src,
        Self::Start,
        Self::Style,
        Self::Type,
        Self::Width,
    ];

    /// The markup spelling of this attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alt => "alt",
            Self::Class => "class",
            Self::Height => "height",
            Self::Href => "href",
            Self::Id => "id",
            Self::Reversed => "reversed",
            Self::Src => "src",
            Self::Start => "start",
            Self::Style => "style",
            Self::Type => "type",
            Self::Width => "width",
        }
    }

    /// Resolve a markup attribute name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }
}

/// The value half of a source attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceValue {
    /// Boolean attribute with no value (`<ol reversed>`).
    #[default]
    None,
    /// Plain string value.
    String(String),
    /// Parsed `style` attribute.
    InlineCss(Vec<CssDeclaration>),
}

/// One markup attribute: name plus value, order preserved by its owner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceAttribute {
    pub name: String,
    #[serde(default)]
    pub value: SourceValue,
}

impl SourceAttribute {
    /// Create an attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: SourceValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Create an attribute with a known type.
    #[must_use]
    pub fn of_type(ty: AttributeType, value: SourceValue) -> Self {
        Self::new(ty.name(), value)
    }

    /// Create a string-valued attribute.
    #[must_use]
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, SourceValue::String(value.into()))
    }

    /// The semantic type of this attribute, if known.
    #[must_use]
    pub fn attribute_type(&self) -> Option<AttributeType> {
        AttributeType::from_name(&self.name)
    }

    /// The string value, if this attribute carries one.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            SourceValue::String(value) => Some(value),
            _ => None,
        }
    }
}
