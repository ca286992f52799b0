//! Paragraph-level metadata.
//!
//! A paragraph's [`ParagraphStyle`] holds an ordered stack of
//! [`ParagraphProperty`] values, outermost first: a list item inside a
//! blockquote inside a figure carries three properties. Each property keeps
//! the [`MarkupProvenance`](crate::markup::MarkupProvenance) it was projected
//! from, so serialization can rebuild the exact block markup.
//!
//! List marker text lives in [`numbering`] and is computed on request.

mod figure;
mod heading;
mod list;
pub mod numbering;

pub use figure::{Figcaption, Figure};
pub use heading::{Heading, HeadingLevel};
pub use list::{IndentStyle, ListStyle, TextList};
pub use numbering::marker_text;

use crate::markup::MarkupProvenance;
use serde::{Deserialize, Serialize};

/// One block-level property of a paragraph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphProperty {
    List(TextList),
    Figure(Figure),
    Figcaption(Figcaption),
    Heading(Heading),
}

impl ParagraphProperty {
    /// The provenance this property was built from, if any.
    #[must_use]
    pub fn provenance(&self) -> Option<&MarkupProvenance> {
        match self {
            Self::List(list) => list.provenance.as_ref(),
            Self::Figure(figure) => figure.provenance.as_ref(),
            Self::Figcaption(caption) => caption.provenance.as_ref(),
            Self::Heading(heading) => heading.provenance.as_ref(),
        }
    }

    #[must_use]
    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Self::Heading(heading) => Some(heading),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&TextList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Ordered stack of paragraph properties, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    #[serde(default)]
    properties: Vec<ParagraphProperty>,
}

impl ParagraphStyle {
    #[must_use]
    pub fn new(properties: Vec<ParagraphProperty>) -> Self {
        Self { properties }
    }

    /// Return this style with `property` nested innermost.
    #[must_use]
    pub fn with_property(mut self, property: ParagraphProperty) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn properties(&self) -> &[ParagraphProperty] {
        &self.properties
    }

    /// Heading properties, outermost first.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.properties.iter().filter_map(ParagraphProperty::as_heading)
    }

    /// List properties, outermost first.
    pub fn lists(&self) -> impl Iterator<Item = &TextList> {
        self.properties.iter().filter_map(ParagraphProperty::as_list)
    }

    /// Level of the innermost heading.
    #[must_use]
    pub fn innermost_heading_level(&self) -> Option<HeadingLevel> {
        self.headings().last().map(|heading| heading.level)
    }

    #[must_use]
    pub fn contains_heading(&self) -> bool {
        self.headings().next().is_some()
    }

    /// Nesting depth of lists, 0 outside any list.
    #[must_use]
    pub fn list_depth(&self) -> usize {
        self.lists().count()
    }

    /// Return this style without heading properties.
    #[must_use]
    pub fn without_headings(mut self) -> Self {
        self.properties
            .retain(|property| !matches!(property, ParagraphProperty::Heading(_)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Font;

    #[test]
    fn test_innermost_heading() {
        let style = ParagraphStyle::default()
            .with_property(ParagraphProperty::Figure(Figure::default()))
            .with_property(ParagraphProperty::Heading(Heading::new(HeadingLevel::H1, None)))
            .with_property(ParagraphProperty::Heading(Heading::new(HeadingLevel::H4, None)));
        assert_eq!(style.innermost_heading_level(), Some(HeadingLevel::H4));
        assert!(style.contains_heading());

        let stripped = style.without_headings();
        assert_eq!(stripped.innermost_heading_level(), None);
        assert_eq!(stripped.properties().len(), 1);
    }

    #[test]
    fn test_list_depth() {
        let style = ParagraphStyle::new(vec![
            ParagraphProperty::List(TextList::new(ListStyle::Ordered)),
            ParagraphProperty::Figcaption(Figcaption::new(Font::default(), None)),
            ParagraphProperty::List(TextList::new(ListStyle::Unordered)),
        ]);
        assert_eq!(style.list_depth(), 2);
        assert_eq!(ParagraphStyle::default().list_depth(), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let style = ParagraphStyle::new(vec![
            ParagraphProperty::List(TextList::with_provenance(
                ListStyle::Ordered,
                Some(2),
                false,
                None,
            )),
            ParagraphProperty::Heading(Heading::new(HeadingLevel::H2, None)),
        ]);
        let json = serde_json::to_string(&style).unwrap();
        let back: ParagraphStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }
}
