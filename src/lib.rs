//! `markup_storage` - styled text storage for a rich-text editor
//!
//! A run-based styled buffer that remembers where its formatting came from.
//! Every styled run can carry the markup that produced it, so serializing
//! back to markup reproduces the original shapes, including markup the
//! editor does not understand.
//!
//! - [`markup`]: provenance records and unsupported-markup capsules
//! - [`paragraph`]: list, figure, figcaption and heading paragraph properties
//! - [`attachment`]: embedded media and the delegate that resolves it
//! - [`storage`]: the editable [`TextStorage`] and its edit pipeline
//! - [`archive`] / [`interchange`]: native archive and pasteboard boundary

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Item numbers and font sizes
#![allow(clippy::cast_sign_loss)] // Checked before every cast
#![allow(clippy::cast_precision_loss)] // Intentional for color math
#![allow(clippy::cast_possible_wrap)] // Character offsets fit in isize
#![allow(clippy::module_name_repetitions)] // Allow markup::MarkupProvenance etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod archive;
pub mod attachment;
pub mod color;
pub mod error;
pub mod interchange;
pub mod markup;
pub mod paragraph;
pub mod storage;
pub mod style;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{DecodingError, Error, Result};
pub use style::{Font, FontTraits};

// Re-export markup types
pub use markup::{
    AttributeType, CssDeclaration, ElementShape, ElementSource, MarkupProvenance, SourceAttribute,
    SourceValue, UnsupportedMarkup,
};

// Re-export paragraph types
pub use paragraph::{
    Figcaption, Figure, Heading, HeadingLevel, IndentStyle, ListStyle, ParagraphProperty,
    ParagraphStyle, TextList, marker_text,
};

// Re-export attachment types
pub use attachment::{
    AttachmentDelegate, Image, MediaAttachment, MediaKind, ResolutionState, TextAttachment,
};

// Re-export commonly used types
pub use archive::{archive, unarchive};
pub use interchange::{MemoryPasteboard, Pasteboard, PasteboardFormat, READ_PRIORITY};
pub use storage::{
    AttributeFormatter, AttributeKey, AttributeValue, Attributes, EditMask, EditedChange,
    HeadingFormatter, MarkFormatter, MarkupConverter, StorageOptions, StyledText, TextStorage,
};
