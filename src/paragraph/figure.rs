//! Figure and caption paragraph properties.

use crate::markup::MarkupProvenance;
use crate::style::Font;
use serde::{Deserialize, Serialize};

/// Marks a paragraph as a captioned-figure container (`<figure>`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<MarkupProvenance>,
}

impl Figure {
    #[must_use]
    pub fn new(provenance: Option<MarkupProvenance>) -> Self {
        Self { provenance }
    }
}

/// A figure caption (`<figcaption>`).
///
/// `default_font` styles caption text that carries no inline font.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figcaption {
    pub default_font: Font,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<MarkupProvenance>,
}

impl Figcaption {
    #[must_use]
    pub fn new(default_font: Font, provenance: Option<MarkupProvenance>) -> Self {
        Self {
            default_font,
            provenance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::ElementShape;

    #[test]
    fn test_figcaption_requires_font() {
        let err = serde_json::from_str::<Figcaption>("{}").unwrap_err();
        assert!(err.to_string().contains("default_font"));
    }

    #[test]
    fn test_figure_serde() {
        let figure = Figure::new(Some(MarkupProvenance::Element(ElementShape::new(
            "figure",
            Vec::new(),
        ))));
        let json = serde_json::to_string(&figure).unwrap();
        assert_eq!(json, r#"{"provenance":{"element":{"name":"figure","attributes":[]}}}"#);
        assert_eq!(serde_json::from_str::<Figure>(&json).unwrap(), figure);
        assert_eq!(serde_json::from_str::<Figure>("{}").unwrap(), Figure::default());
    }
}
