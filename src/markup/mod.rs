//! Markup representation model.
//!
//! These types describe markup at the boundary with the external tree
//! builder: element shapes, their attributes, inline style declarations,
//! and the two carriers built from them.
//!
//! - [`MarkupProvenance`]: the construct a style came from
//! - [`UnsupportedMarkup`]: shapes with no native styling, kept verbatim

mod attribute;
mod css;
mod element;
mod provenance;
mod unsupported;

pub use attribute::{AttributeType, SourceAttribute, SourceValue};
pub use css::CssDeclaration;
pub use element::{ElementShape, ElementSource};
pub use provenance::MarkupProvenance;
pub use unsupported::UnsupportedMarkup;
