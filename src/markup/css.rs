//! Inline style declarations (`name: value`).

use crate::error::DecodingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single inline CSS declaration.
///
/// The canonical string form is `name: value`. Both halves are trimmed on
/// construction. The name is non-empty and holds no whitespace, `:` or `;`;
/// the value holds no `;`. Every declaration therefore parses back from its
/// canonical form unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DeclarationRecord")]
pub struct CssDeclaration {
    name: String,
    value: String,
}

impl CssDeclaration {
    /// Create a declaration, or `None` when `name` or `value` cannot appear
    /// in a canonical declaration.
    #[must_use]
    pub fn new(name: &str, value: &str) -> Option<Self> {
        let name = name.trim();
        let value = value.trim();
        let bad_name = |c: char| c.is_whitespace() || c == ':' || c == ';';
        if name.is_empty() || name.contains(bad_name) || value.contains(';') {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parse one declaration.
    ///
    /// Accepts surrounding whitespace and one trailing `;`. Returns `None`
    /// when there is no `:` separator, the name is invalid, or more than one
    /// declaration is present.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text.strip_suffix(';').unwrap_or(text);
        let (name, value) = text.split_once(':')?;
        Self::new(name, value)
    }

    /// Parse a `style` attribute body into its declarations.
    ///
    /// Empty segments are skipped; malformed segments fail the whole list.
    #[must_use]
    pub fn parse_list(text: &str) -> Option<Vec<Self>> {
        text.split(';')
            .filter(|segment| !segment.trim().is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Join declarations into a `style` attribute body.
    #[must_use]
    pub fn join(declarations: &[Self]) -> String {
        declarations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Deserialize)]
struct DeclarationRecord {
    name: String,
    value: String,
}

impl TryFrom<DeclarationRecord> for CssDeclaration {
    type Error = DecodingError;

    fn try_from(record: DeclarationRecord) -> std::result::Result<Self, Self::Error> {
        Self::new(&record.name, &record.value).ok_or_else(|| {
            DecodingError::InvalidDeclaration(format!("{}: {}", record.name, record.value))
        })
    }
}

impl fmt::Display for CssDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
