//! Media attachments: images and videos resolved through the delegate.

use crate::attachment::{Image, StorageId};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};

/// What a media attachment shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// Display size class for a media attachment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSize {
    Thumbnail,
    Medium,
    Large,
    #[default]
    Full,
}

/// Progress of the content fetch for a media attachment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResolutionState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is outstanding with the delegate.
    Requested,
    /// The delegate delivered an image.
    Resolved,
    /// The delegate reported failure; the placeholder stays.
    Failed,
}

/// An image or video embedded in the text.
///
/// The attachment never owns the storage it lives in. Once inserted, its
/// `owner` records which storage resolves its content; fetch results are
/// applied by that storage only.
#[derive(Debug)]
pub struct MediaAttachment {
    identifier: String,
    kind: MediaKind,
    size: Cell<MediaSize>,
    url: RefCell<Option<String>>,
    image: RefCell<Option<Image>>,
    owner: Cell<Option<StorageId>>,
    state: Cell<ResolutionState>,
}

impl MediaAttachment {
    /// Create an attachment with a stable identifier.
    #[must_use]
    pub fn new(identifier: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            size: Cell::new(MediaSize::default()),
            url: RefCell::new(None),
            image: RefCell::new(None),
            owner: Cell::new(None),
            state: Cell::new(ResolutionState::Idle),
        }
    }

    /// Create an image attachment with a freshly minted identifier.
    #[must_use]
    pub fn minted_image() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), MediaKind::Image)
    }

    /// Builder-style URL setter.
    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        self.update_url(Some(url.into()));
        self
    }

    /// Builder-style image setter.
    #[must_use]
    pub fn with_image(self, image: Image) -> Self {
        self.set_image(Some(image));
        self
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn size(&self) -> MediaSize {
        self.size.get()
    }

    pub fn set_size(&self, size: MediaSize) {
        self.size.set(size);
    }

    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.url.borrow().clone()
    }

    /// Replace the URL; a new URL invalidates any earlier resolution.
    pub fn update_url(&self, url: Option<String>) {
        let changed = *self.url.borrow() != url;
        if changed {
            *self.url.borrow_mut() = url;
            self.state.set(ResolutionState::Idle);
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<Image> {
        self.image.borrow().clone()
    }

    pub fn set_image(&self, image: Option<Image>) {
        *self.image.borrow_mut() = image;
    }

    #[must_use]
    pub fn resolution_state(&self) -> ResolutionState {
        self.state.get()
    }

    pub(crate) fn set_resolution_state(&self, state: ResolutionState) {
        self.state.set(state);
    }

    /// Storage currently resolving content for this attachment.
    #[must_use]
    pub fn owner(&self) -> Option<StorageId> {
        self.owner.get()
    }

    pub(crate) fn set_owner(&self, owner: Option<StorageId>) {
        self.owner.set(owner);
    }

    /// Copy with a new identity: fresh identifier, no owner, same content.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let copy = Self::new(uuid::Uuid::new_v4().to_string(), self.kind);
        copy.set_size(self.size());
        copy.update_url(self.url());
        copy.set_image(self.image());
        copy
    }
}
