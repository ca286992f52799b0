//! Embedded objects and their lifecycle delegate.
//!
//! An attachment occupies one object-replacement character in the storage
//! and is referenced from that character's attachment attribute. Each
//! attachment instance appears in at most one range; identity is the
//! allocation (`Rc`), not the contents.
//!
//! Key types:
//!
//! - [`TextAttachment`]: the attribute value, one of four kinds
//! - [`MediaAttachment`]: images and videos resolved lazily by URL
//! - [`AttachmentDelegate`]: host-side callbacks, held weakly by the storage

mod media;
pub(crate) mod resolve;

pub use media::{MediaAttachment, MediaKind, MediaSize, ResolutionState};

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The character an attachment occupies.
pub const OBJECT_REPLACEMENT_CHARACTER: char = '\u{FFFC}';

/// Width and height in points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Decoded image content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub size: Size,
    pub data: Vec<u8>,
}

impl Image {
    #[must_use]
    pub fn new(size: Size, data: Vec<u8>) -> Self {
        Self { size, data }
    }
}

/// Identity of one storage instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StorageId(u64);

impl StorageId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Horizontal rule marker (`<hr>`). Passes through insertion untouched.
#[derive(Debug, Default)]
pub struct LineAttachment;

/// Content drawn by the host, such as a comment or raw markup block.
#[derive(Debug)]
pub struct RenderableAttachment {
    kind: String,
    content: String,
    owner: Cell<Option<StorageId>>,
}

impl RenderableAttachment {
    #[must_use]
    pub fn new(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            content: content.into(),
            owner: Cell::new(None),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn owner(&self) -> Option<StorageId> {
        self.owner.get()
    }

    pub(crate) fn set_owner(&self, owner: Option<StorageId>) {
        self.owner.set(owner);
    }
}

/// An embedded object of a kind the storage does not manage.
///
/// Arrives with pasted or dropped content. On insertion it becomes a media
/// attachment when it can show as an image, and plain text otherwise.
#[derive(Debug)]
pub struct EmbeddedObject {
    pub type_identifier: String,
    pub image: Option<Image>,
    pub contents: Vec<u8>,
}

impl EmbeddedObject {
    #[must_use]
    pub fn new(
        type_identifier: impl Into<String>,
        image: Option<Image>,
        contents: Vec<u8>,
    ) -> Self {
        Self {
            type_identifier: type_identifier.into(),
            image,
            contents,
        }
    }
}

/// Value of the attachment attribute.
///
/// Cloning shares the instance. Equality is instance identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "AttachmentRecord", into = "AttachmentRecord")]
pub enum TextAttachment {
    Line(Rc<LineAttachment>),
    Media(Rc<MediaAttachment>),
    Renderable(Rc<RenderableAttachment>),
    Embedded(Rc<EmbeddedObject>),
}

impl TextAttachment {
    #[must_use]
    pub fn line() -> Self {
        Self::Line(Rc::new(LineAttachment))
    }

    #[must_use]
    pub fn media(media: MediaAttachment) -> Self {
        Self::Media(Rc::new(media))
    }

    #[must_use]
    pub fn renderable(renderable: RenderableAttachment) -> Self {
        Self::Renderable(Rc::new(renderable))
    }

    #[must_use]
    pub fn embedded(object: EmbeddedObject) -> Self {
        Self::Embedded(Rc::new(object))
    }

    /// Whether both values refer to the same attachment instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Line(a), Self::Line(b)) => Rc::ptr_eq(a, b),
            (Self::Media(a), Self::Media(b)) => Rc::ptr_eq(a, b),
            (Self::Renderable(a), Self::Renderable(b)) => Rc::ptr_eq(a, b),
            (Self::Embedded(a), Self::Embedded(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// A new instance with the same content and no owner.
    ///
    /// Media copies get a fresh identifier.
    #[must_use]
    pub fn fresh_copy(&self) -> Self {
        match self {
            Self::Line(_) => Self::line(),
            Self::Media(media) => Self::media(media.duplicate()),
            Self::Renderable(renderable) => Self::renderable(RenderableAttachment::new(
                renderable.kind(),
                renderable.content(),
            )),
            Self::Embedded(object) => Self::embedded(EmbeddedObject::new(
                object.type_identifier.clone(),
                object.image.clone(),
                object.contents.clone(),
            )),
        }
    }

    #[must_use]
    pub fn as_media(&self) -> Option<&Rc<MediaAttachment>> {
        match self {
            Self::Media(media) => Some(media),
            _ => None,
        }
    }
}

impl PartialEq for TextAttachment {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

/// Continuation receiving fetched image content.
pub type ImageCallback = Box<dyn FnOnce(Image) + Send + 'static>;
/// Continuation reporting a failed fetch.
pub type FailureCallback = Box<dyn FnOnce() + Send + 'static>;

/// Host-side handler for attachment content and lifecycle.
///
/// The storage holds this weakly and skips every call while none is alive.
pub trait AttachmentDelegate {
    /// Fetch the image at `url`. Exactly one continuation should run, at most
    /// once, on any thread.
    fn request_image(
        &self,
        attachment: &MediaAttachment,
        url: &str,
        on_success: ImageCallback,
        on_failure: FailureCallback,
    );

    /// Image shown while content is unresolved.
    fn placeholder_image(&self, attachment: &MediaAttachment) -> Image;

    /// URL where a newly added image will be stored, if already known.
    fn storage_url(&self, attachment: &MediaAttachment) -> Option<String>;

    /// `attachment` is about to leave the storage.
    fn attachment_removed(&self, attachment: &MediaAttachment);

    /// Bounds for `attachment` within a line fragment.
    fn bounds(&self, attachment: &TextAttachment, line_fragment: Rect) -> Rect;

    /// Rendered image for `attachment` at `size`.
    fn image_for_size(&self, attachment: &TextAttachment, size: Size) -> Option<Image>;
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AttachmentRecord {
    Line,
    Media {
        identifier: String,
        media: MediaKind,
        #[serde(default)]
        size: MediaSize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<Image>,
    },
    Renderable {
        renderable: String,
        content: String,
    },
    Embedded {
        type_identifier: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<Image>,
        #[serde(default)]
        contents: Vec<u8>,
    },
}

impl From<TextAttachment> for AttachmentRecord {
    fn from(attachment: TextAttachment) -> Self {
        match attachment {
            TextAttachment::Line(_) => Self::Line,
            TextAttachment::Media(media) => Self::Media {
                identifier: media.identifier().to_string(),
                media: media.kind(),
                size: media.size(),
                url: media.url(),
                image: media.image(),
            },
            TextAttachment::Renderable(renderable) => Self::Renderable {
                renderable: renderable.kind().to_string(),
                content: renderable.content().to_string(),
            },
            TextAttachment::Embedded(object) => Self::Embedded {
                type_identifier: object.type_identifier.clone(),
                image: object.image.clone(),
                contents: object.contents.clone(),
            },
        }
    }
}

impl From<AttachmentRecord> for TextAttachment {
    fn from(record: AttachmentRecord) -> Self {
        match record {
            AttachmentRecord::Line => Self::line(),
            AttachmentRecord::Media {
                identifier,
                media,
                size,
                url,
                image,
            } => {
                let attachment = MediaAttachment::new(identifier, media);
                attachment.set_size(size);
                attachment.update_url(url);
                attachment.set_image(image);
                Self::media(attachment)
            }
            AttachmentRecord::Renderable {
                renderable,
                content,
            } => Self::renderable(RenderableAttachment::new(renderable, content)),
            AttachmentRecord::Embedded {
                type_identifier,
                image,
                contents,
            } => Self::embedded(EmbeddedObject::new(type_identifier, image, contents)),
        }
    }
}
