//! Attribute formatters: reversible style transforms over attribute maps.
//!
//! A formatter knows how to add its style to a set of attributes, how to
//! take it away again, and how to tell whether it is there. The storage uses
//! them for toggling and for the heading font fix-up in
//! [`TextStorage::set_attributes`](crate::storage::TextStorage::set_attributes).

use crate::color::Rgba;
use crate::markup::{ElementShape, MarkupProvenance};
use crate::paragraph::{Heading, HeadingLevel, ParagraphProperty};
use crate::storage::TextStorage;
use crate::storage::attributes::{self, AttributeKey, Attributes};
use crate::style::{Font, FontTraits};
use std::ops::Range;

/// A style that can be applied to and removed from attributes.
pub trait AttributeFormatter {
    /// `attributes` with this style applied.
    fn apply(&self, attributes: &Attributes) -> Attributes;

    /// `attributes` with this style removed.
    fn remove(&self, attributes: &Attributes) -> Attributes;

    /// Whether `attributes` already carry this style.
    fn is_present(&self, attributes: &Attributes) -> bool;

    /// The range a toggle at `range` actually affects.
    fn application_range(&self, range: Range<usize>, _storage: &TextStorage) -> Range<usize> {
        range
    }
}

/// Applies a heading level: paragraph property, font size and weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeadingFormatter {
    level: HeadingLevel,
}

impl HeadingFormatter {
    #[must_use]
    pub const fn new(level: HeadingLevel) -> Self {
        Self { level }
    }

    #[must_use]
    pub const fn level(&self) -> HeadingLevel {
        self.level
    }
}

impl AttributeFormatter for HeadingFormatter {
    fn apply(&self, attributes: &Attributes) -> Attributes {
        let mut result = attributes.clone();

        let mut style = attributes::paragraph_style(attributes)
            .cloned()
            .unwrap_or_default();
        if style.innermost_heading_level() != Some(self.level) {
            style = style
                .without_headings()
                .with_property(ParagraphProperty::Heading(Heading::new(self.level, None)));
        }
        result.insert(AttributeKey::ParagraphStyle, style.into());

        let font = attributes::font(attributes)
            .cloned()
            .unwrap_or_default()
            .with_size(self.level.font_size())
            .with_traits(FontTraits::BOLD);
        result.insert(AttributeKey::Font, font.into());
        result.insert(AttributeKey::HeadingRepresentation, self.level.into());
        result
    }

    fn remove(&self, attributes: &Attributes) -> Attributes {
        let mut result = attributes.clone();
        if let Some(style) = attributes::paragraph_style(attributes) {
            result.insert(
                AttributeKey::ParagraphStyle,
                style.clone().without_headings().into(),
            );
        }
        if let Some(font) = attributes::font(attributes) {
            let body = font
                .clone()
                .with_size(Font::BODY_SIZE)
                .without_traits(FontTraits::BOLD);
            result.insert(AttributeKey::Font, body.into());
        }
        result.remove(&AttributeKey::HeadingRepresentation);
        result
    }

    fn is_present(&self, attributes: &Attributes) -> bool {
        attributes::paragraph_style(attributes)
            .and_then(|style| style.innermost_heading_level())
            == Some(self.level)
    }

    fn application_range(&self, range: Range<usize>, storage: &TextStorage) -> Range<usize> {
        storage.paragraph_range(range)
    }
}

/// Applies `<mark>` highlighting, optionally with a text color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkFormatter {
    color: Option<Rgba>,
}

impl MarkFormatter {
    #[must_use]
    pub const fn new(color: Option<Rgba>) -> Self {
        Self { color }
    }

    fn provenance() -> MarkupProvenance {
        MarkupProvenance::Element(ElementShape::new("mark", Vec::new()))
    }
}

impl AttributeFormatter for MarkFormatter {
    fn apply(&self, attributes: &Attributes) -> Attributes {
        let mut result = attributes.clone();
        result
            .entry(AttributeKey::MarkRepresentation)
            .or_insert_with(|| Self::provenance().into());
        if let Some(color) = self.color {
            result.insert(AttributeKey::ForegroundColor, color.into());
        }
        result
    }

    fn remove(&self, attributes: &Attributes) -> Attributes {
        let mut result = attributes.clone();
        result.remove(&AttributeKey::MarkRepresentation);
        if self.color.is_some() && attributes::foreground_color(attributes) == self.color {
            result.remove(&AttributeKey::ForegroundColor);
        }
        result
    }

    fn is_present(&self, attributes: &Attributes) -> bool {
        attributes.contains_key(&AttributeKey::MarkRepresentation)
    }
}
