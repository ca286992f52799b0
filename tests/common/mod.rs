//! Shared fixtures for integration tests.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every fixture

use markup_storage::attachment::{FailureCallback, ImageCallback, Rect, Size};
use markup_storage::{
    AttachmentDelegate, AttributeKey, AttributeValue, Attributes, Image, MediaAttachment,
    MediaKind, StyledText, TextAttachment,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

static INIT: Once = Once::new();

/// Route tracing output to the test harness once per binary.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A media attachment with a URL derived from `id`.
pub fn media(id: &str) -> TextAttachment {
    TextAttachment::media(
        MediaAttachment::new(id, MediaKind::Image).with_url(format!("https://media.test/{id}")),
    )
}

/// `text` carrying only a paragraph style.
pub fn with_style(text: &str, paragraph: AttributeValue) -> StyledText {
    let mut attributes = Attributes::new();
    attributes.insert(AttributeKey::ParagraphStyle, paragraph);
    StyledText::styled(text, attributes)
}

type PendingRequest = (String, ImageCallback, FailureCallback);

/// Delegate that records removals and holds image requests until told.
#[derive(Default)]
pub struct RecordingDelegate {
    log: Rc<RefCell<Vec<String>>>,
    removed: RefCell<Vec<String>>,
    requests: RefCell<Vec<PendingRequest>>,
}

impl RecordingDelegate {
    pub const PLACEHOLDER: Size = Size::new(16.0, 16.0);

    /// Also append `removed <id>` lines to a shared log.
    pub fn with_log(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.borrow().clone()
    }

    pub fn pending(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Deliver `image` to the oldest pending request.
    pub fn succeed_next(&self, image: Image) {
        let (_, on_success, _) = self.requests.borrow_mut().remove(0);
        on_success(image);
    }

    /// Fail the oldest pending request.
    pub fn fail_next(&self) {
        let (_, _, on_failure) = self.requests.borrow_mut().remove(0);
        on_failure();
    }
}

impl AttachmentDelegate for RecordingDelegate {
    fn request_image(
        &self,
        attachment: &MediaAttachment,
        _url: &str,
        on_success: ImageCallback,
        on_failure: FailureCallback,
    ) {
        self.requests.borrow_mut().push((
            attachment.identifier().to_string(),
            on_success,
            on_failure,
        ));
    }

    fn placeholder_image(&self, _: &MediaAttachment) -> Image {
        Image::new(Self::PLACEHOLDER, Vec::new())
    }

    fn storage_url(&self, _: &MediaAttachment) -> Option<String> {
        None
    }

    fn attachment_removed(&self, attachment: &MediaAttachment) {
        let id = attachment.identifier().to_string();
        self.log.borrow_mut().push(format!("removed {id}"));
        self.removed.borrow_mut().push(id);
    }

    fn bounds(&self, _: &TextAttachment, fragment: Rect) -> Rect {
        Rect::new(fragment.x, fragment.y, fragment.width, Self::PLACEHOLDER.height)
    }

    fn image_for_size(&self, _: &TextAttachment, size: Size) -> Option<Image> {
        Some(Image::new(size, Vec::new()))
    }
}
