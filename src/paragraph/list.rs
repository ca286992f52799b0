//! List paragraph property.

use crate::error::Result;
use crate::markup::{AttributeType, MarkupProvenance};
use crate::paragraph::numbering::marker_text;
use serde::{Deserialize, Serialize};

/// Kind of list: ordered (`<ol>`) or unordered (`<ul>`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    #[default]
    Ordered,
    Unordered,
}

impl ListStyle {
    /// Marker text for an item at `indent_level`.
    pub fn marker_text(self, item_number: i64, indent_level: Option<usize>) -> Result<String> {
        marker_text(self, item_number, indent_level)
    }
}

/// How markers vary with nesting depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentStyle {
    /// The top-level marker at every depth.
    Default,
    /// Per-depth markers, as browsers render nested lists.
    #[default]
    Standard,
}

/// A list paragraph property.
///
/// When built from element provenance (`<ol start="3" reversed>`), `start`
/// and `reversed` come from the element's attributes and the explicit
/// arguments are ignored. Any other provenance carries no list attributes,
/// so the explicit arguments win.
///
/// Markers are not cached here: the item number and depth depend on where
/// the paragraph sits in the storage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextList {
    #[serde(default)]
    pub style: ListStyle,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<MarkupProvenance>,
}

impl TextList {
    /// A list with explicit fields and no provenance.
    #[must_use]
    pub fn new(style: ListStyle) -> Self {
        Self::with_provenance(style, None, false, None)
    }

    /// A list built from explicit fields, or from provenance when it is an element.
    #[must_use]
    pub fn with_provenance(
        style: ListStyle,
        start: Option<i64>,
        reversed: bool,
        provenance: Option<MarkupProvenance>,
    ) -> Self {
        let (start, reversed) = match provenance.as_ref().and_then(MarkupProvenance::as_element) {
            Some(element) => {
                let reversed = element.attribute_of_type(AttributeType::Reversed).is_some();
                let start = element
                    .attribute_of_type(AttributeType::Start)
                    .and_then(|attr| attr.string_value())
                    .and_then(|value| value.parse().ok());
                (start, reversed)
            }
            None => (start, reversed),
        };

        Self {
            style,
            start,
            reversed,
            provenance,
        }
    }

    /// Marker text honoring an indent style.
    pub fn marker_text(
        &self,
        item_number: i64,
        indent_level: Option<usize>,
        indent_style: IndentStyle,
    ) -> Result<String> {
        let depth = match indent_style {
            IndentStyle::Default => None,
            IndentStyle::Standard => indent_level,
        };
        self.style.marker_text(item_number, depth)
    }

    /// The displayed number of the item at `position` (0-based) in a list of `count` items.
    ///
    /// Applies `start` and `reversed` the way browsers do: a reversed list
    /// without `start` counts down from `count`. The result may be zero or
    /// negative; `None` means it does not fit in an `i64`.
    #[must_use]
    pub fn item_number(&self, position: usize, count: usize) -> Option<i64> {
        let position = i64::try_from(position).ok()?;
        if self.reversed {
            let start = match self.start {
                Some(start) => start,
                None => i64::try_from(count).ok()?,
            };
            start.checked_sub(position)
        } else {
            self.start.unwrap_or(1).checked_add(position)
        }
    }
}

impl PartialEq for TextList {
    fn eq(&self, other: &Self) -> bool {
        self.style == other.style && self.start == other.start && self.reversed == other.reversed
    }
}

impl Eq for TextList {}
