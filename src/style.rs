//! Font descriptors carried by the font attribute.
//!
//! - [`FontTraits`]: Bitflags for bold, italic, monospace
//! - [`Font`]: Family, point size and traits
//!
//! # Examples
//!
//! ```
//! use markup_storage::{Font, FontTraits};
//!
//! let body = Font::new("Noto Serif", 16.0);
//! let title = body.clone().with_size(28.0).with_traits(FontTraits::BOLD);
//! assert!(title.traits.contains(FontTraits::BOLD));
//! assert_eq!(title.family, body.family);
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Symbolic font traits.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
    pub struct FontTraits: u8 {
        /// Bold weight.
        const BOLD      = 0x01;
        /// Italic or oblique.
        const ITALIC    = 0x02;
        /// Fixed-pitch family.
        const MONOSPACE = 0x04;
    }
}

/// A font descriptor.
///
/// Fonts are plain values; two descriptors with the same family, size and
/// traits are the same font.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Family name.
    pub family: String,
    /// Point size.
    pub size: f32,
    /// Symbolic traits.
    #[serde(default)]
    pub traits: FontTraits,
}

impl Font {
    /// Default body text size.
    pub const BODY_SIZE: f32 = 14.0;

    /// Create a font with no traits.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            traits: FontTraits::empty(),
        }
    }

    /// Return this font at a different size.
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Return this font with additional traits.
    #[must_use]
    pub fn with_traits(mut self, traits: FontTraits) -> Self {
        self.traits |= traits;
        self
    }

    /// Return this font with `traits` cleared.
    #[must_use]
    pub fn without_traits(mut self, traits: FontTraits) -> Self {
        self.traits.remove(traits);
        self
    }

    /// Check for bold weight.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.traits.contains(FontTraits::BOLD)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("system", Self::BODY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_builders() {
        let font = Font::new("Inter", 12.0)
            .with_traits(FontTraits::BOLD | FontTraits::ITALIC)
            .without_traits(FontTraits::ITALIC)
            .with_size(20.0);
        assert!(font.is_bold());
        assert!(!font.traits.contains(FontTraits::ITALIC));
        assert!((font.size - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_font_serde() {
        let font = Font::default().with_traits(FontTraits::MONOSPACE);
        let json = serde_json::to_string(&font).unwrap();
        let back: Font = serde_json::from_str(&json).unwrap();
        assert_eq!(back, font);

        // Traits default to empty when absent.
        let bare: Font = serde_json::from_str(r#"{"family":"x","size":9.0}"#).unwrap();
        assert!(bare.traits.is_empty());
    }
}
