//! Element shapes: a tag and its attributes, detached from any tree.

use crate::markup::attribute::{AttributeType, SourceAttribute};
use serde::{Deserialize, Serialize};

/// A node-like value exposed by the external tree builder.
///
/// The storage never parses markup itself; anything that can report a name
/// and an ordered attribute list can be projected into shapes and paragraph
/// properties.
pub trait ElementSource {
    /// Element name as written in the source.
    fn name(&self) -> &str;
    /// Attributes in source order.
    fn attributes(&self) -> &[SourceAttribute];
}

/// One markup element's name and attributes, without children.
///
/// Equality is order-sensitive on the attribute list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementShape {
    pub name: String,
    pub attributes: Vec<SourceAttribute>,
}

impl ElementShape {
    /// Create a shape.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Vec<SourceAttribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Snapshot any element-like node.
    #[must_use]
    pub fn from_source(source: &impl ElementSource) -> Self {
        Self::new(source.name(), source.attributes().to_vec())
    }

    /// First attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&SourceAttribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// First attribute of the given semantic type.
    #[must_use]
    pub fn attribute_of_type(&self, ty: AttributeType) -> Option<&SourceAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.attribute_type() == Some(ty))
    }

    /// Check the element name, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl ElementSource for ElementShape {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[SourceAttribute] {
        &self.attributes
    }
}
