//! The editable styled-text storage.
//!
//! [`TextStorage`] owns a run store ([`StyledText`]) and a plain-string
//! projection of it, and routes every mutation through one pipeline:
//!
//! ```text
//! replace_with_styled_text(range, incoming)
//!   │
//!   ├─ normalize_attachments   unique instances, claimed by this storage
//!   ├─ carry_heading           heading size follows into heading paragraphs
//!   │
//!   ├─ begin_editing
//!   │    ├─ removal notifications for media inside `range`
//!   │    ├─ carry_mark         <mark> and its color follow replaced text
//!   │    ├─ splice runs + rope
//!   │    └─ record CHARACTERS | ATTRIBUTES
//!   └─ end_editing ──▶ observers receive the net EditedChange
//! ```
//!
//! `begin_editing` / `end_editing` nest; observers hear once, when the
//! outermost level closes.
//!
//! The storage is single-threaded. Image resolution is the one asynchronous
//! boundary: the delegate receives `Send` continuations, and their results
//! are applied by [`TextStorage::process_resolutions`] on the storage's own
//! thread.

pub mod attributes;
mod converter;
pub mod edit;
pub mod formatter;
mod preprocess;
mod rope;
pub mod styled_text;

pub use attributes::{AttributeKey, AttributeValue, Attributes};
pub use converter::MarkupConverter;
pub use edit::{EditMask, EditedChange};
pub use formatter::{AttributeFormatter, HeadingFormatter, MarkFormatter};
pub use styled_text::StyledText;

use crate::attachment::resolve::{ResolutionOutcome, ResolutionQueue};
use crate::attachment::{
    AttachmentDelegate, Image, MediaAttachment, Rect, ResolutionState, Size, StorageId,
    TextAttachment,
};
use crate::error::{Error, Result};
use crate::paragraph::{IndentStyle, TextList};
use edit::EditTracker;
use preprocess::Insertion;
use rope::RopeWrapper;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Storage configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageOptions {
    /// Attributes for plain text typed into an empty storage.
    pub default_attributes: Attributes,
    /// How list markers vary with depth.
    pub indent_style: IndentStyle,
    /// Replace incoming attachments that are already present elsewhere with
    /// fresh copies.
    pub remint_duplicates: bool,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            default_attributes: Attributes::new(),
            indent_style: IndentStyle::Standard,
            remint_duplicates: true,
        }
    }
}

impl StorageOptions {
    #[must_use]
    pub fn with_default_attributes(mut self, attributes: Attributes) -> Self {
        self.default_attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_indent_style(mut self, indent_style: IndentStyle) -> Self {
        self.indent_style = indent_style;
        self
    }

    #[must_use]
    pub fn with_remint_duplicates(mut self, remint: bool) -> Self {
        self.remint_duplicates = remint;
        self
    }
}

type EditObserver = Box<dyn FnMut(&EditedChange)>;

/// Editable styled text with attachment lifecycle management.
pub struct TextStorage {
    id: StorageId,
    store: StyledText,
    rope: RopeWrapper,
    delegate: Option<Weak<dyn AttachmentDelegate>>,
    options: StorageOptions,
    edits: EditTracker,
    observers: Vec<EditObserver>,
    resolutions: ResolutionQueue,
    tickets: HashMap<u64, Weak<MediaAttachment>>,
}

impl fmt::Debug for TextStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStorage")
            .field("id", &self.id)
            .field("len", &self.store.len())
            .field("has_delegate", &self.delegate().is_some())
            .field("editing", &self.edits.is_editing())
            .field("observers", &self.observers.len())
            .field("pending_tickets", &self.tickets.len())
            .finish_non_exhaustive()
    }
}

impl Default for TextStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStorage {
    /// Create an empty storage with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(StorageOptions::default())
    }

    #[must_use]
    pub fn with_options(options: StorageOptions) -> Self {
        Self {
            id: StorageId::next(),
            store: StyledText::new(),
            rope: RopeWrapper::new(),
            delegate: None,
            options,
            edits: EditTracker::default(),
            observers: Vec::new(),
            resolutions: ResolutionQueue::new(),
            tickets: HashMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> StorageId {
        self.id
    }

    #[must_use]
    pub fn options(&self) -> &StorageOptions {
        &self.options
    }

    // ============================================
    // Delegate and observers
    // ============================================

    /// Register the attachment delegate. Only a weak reference is kept.
    pub fn set_delegate<D: AttachmentDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak = Rc::downgrade(delegate);
        self.delegate = Some(weak as Weak<dyn AttachmentDelegate>);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The delegate, while it is still alive.
    #[must_use]
    pub fn delegate(&self) -> Option<Rc<dyn AttachmentDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    /// Call `observer` with the net change each time an outermost edit ends.
    pub fn on_edit(&mut self, observer: impl FnMut(&EditedChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ============================================
    // Reading
    // ============================================

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The full plain string.
    #[must_use]
    pub fn string(&self) -> String {
        self.rope.to_string()
    }

    /// Plain string of `range`.
    pub fn plain_text(&self, range: Range<usize>) -> Result<String> {
        Error::check_range(&range, self.len())?;
        Ok(self.rope.slice_to_string(range))
    }

    #[must_use]
    pub fn styled_text(&self) -> &StyledText {
        &self.store
    }

    /// Styled copy of `range`.
    pub fn substring(&self, range: Range<usize>) -> Result<StyledText> {
        self.store.substring(range)
    }

    /// Attributes of the character at `location`.
    ///
    /// An empty storage has no characters and answers with an empty map for
    /// any location.
    pub fn attributes_at(&self, location: usize) -> Result<Attributes> {
        if self.is_empty() {
            return Ok(Attributes::new());
        }
        self.store
            .attributes_at(location)
            .cloned()
            .ok_or(Error::OutOfBounds {
                start: location,
                end: location + 1,
                len: self.len(),
            })
    }

    /// One attribute of the character at `location`.
    #[must_use]
    pub fn attribute(&self, key: AttributeKey, location: usize) -> Option<&AttributeValue> {
        self.store.attribute(key, location)
    }

    /// Range of the paragraphs touched by `range`.
    #[must_use]
    pub fn paragraph_range(&self, range: Range<usize>) -> Range<usize> {
        self.rope.paragraph_range(range)
    }

    // ============================================
    // Editing sessions
    // ============================================

    pub fn begin_editing(&mut self) {
        self.edits.begin();
    }

    /// Close one editing level.
    ///
    /// When the outermost level closes, observers receive the net change,
    /// which is also returned.
    pub fn end_editing(&mut self) -> Option<EditedChange> {
        let change = self.edits.end()?;
        debug!(
            mask = ?change.mask,
            range = ?change.range,
            delta = change.delta,
            "edit finished"
        );
        for observer in &mut self.observers {
            observer(&change);
        }
        Some(change)
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.edits.is_editing()
    }

    fn editing<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.begin_editing();
        let result = f(self);
        self.end_editing();
        result
    }

    fn delta(old: usize, new: usize) -> isize {
        new as isize - old as isize
    }

    // ============================================
    // Mutation
    // ============================================

    /// Replace `range` with plain `text`.
    ///
    /// Media attachments inside `range` are reported to the delegate before
    /// anything changes. The new characters take the attributes of the
    /// character before them.
    pub fn replace_characters(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        Error::check_range(&range, self.len())?;
        let delta = Self::delta(range.len(), text.chars().count());
        self.editing(|storage| {
            storage.notify_removed(range.clone());
            storage
                .store
                .replace_str(range.clone(), text, &storage.options.default_attributes)?;
            storage.rope.splice(range.clone(), text);
            storage.edits.record(EditMask::CHARACTERS, range, delta);
            Ok(())
        })
    }

    /// Replace `range` with styled text, running the insertion pipeline.
    pub fn replace_with_styled_text(
        &mut self,
        range: Range<usize>,
        incoming: StyledText,
    ) -> Result<()> {
        Error::check_range(&range, self.len())?;
        let delegate = self.delegate();
        if delegate.is_none() {
            trace!("no attachment delegate; skipping attachment conversion");
        }
        let insertion = Insertion {
            store: &self.store,
            range: range.clone(),
            owner: self.id,
            delegate: delegate.as_deref(),
            remint_duplicates: self.options.remint_duplicates,
        };
        let incoming = preprocess::normalize_attachments(incoming, &insertion)?;
        let incoming = preprocess::carry_heading(&self.store, &range, incoming)?;
        let delta = Self::delta(range.len(), incoming.len());

        self.editing(|storage| {
            storage.notify_removed(range.clone());
            let incoming = preprocess::carry_mark(&storage.store, &range, incoming)?;
            storage.store.replace(range.clone(), &incoming)?;
            storage.rope.splice(range.clone(), incoming.as_str());
            storage
                .edits
                .record(EditMask::CHARACTERS | EditMask::ATTRIBUTES, range, delta);
            Ok(())
        })
    }

    /// Replace every attribute in `range`.
    ///
    /// A change of heading level re-derives the font, and text already
    /// marked keeps its color.
    pub fn set_attributes(&mut self, attributes: Attributes, range: Range<usize>) -> Result<()> {
        Error::check_range(&range, self.len())?;
        let attributes = preprocess::match_heading_font(&self.store, attributes, &range);
        let attributes = preprocess::pin_mark_color(&self.store, attributes, &range);
        self.editing(|storage| {
            storage.store.set_attributes(range.clone(), &attributes)?;
            storage.edits.record(EditMask::ATTRIBUTES, range, 0);
            Ok(())
        })
    }

    /// Set one attribute across `range`, run by run, through [`Self::set_attributes`].
    pub fn add_attribute(
        &mut self,
        key: AttributeKey,
        value: AttributeValue,
        range: Range<usize>,
    ) -> Result<()> {
        self.update_runs(range, |attributes| {
            attributes.insert(key, value.clone());
        })
    }

    /// Drop one attribute across `range`, run by run, through [`Self::set_attributes`].
    pub fn remove_attribute(&mut self, key: AttributeKey, range: Range<usize>) -> Result<()> {
        self.update_runs(range, |attributes| {
            attributes.remove(&key);
        })
    }

    fn update_runs(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&mut Attributes),
    ) -> Result<()> {
        Error::check_range(&range, self.len())?;
        let runs = self.runs_in(&range);
        self.editing(|storage| {
            for (run, mut attributes) in runs {
                f(&mut attributes);
                storage.set_attributes(attributes, run)?;
            }
            Ok(())
        })
    }

    fn runs_in(&self, range: &Range<usize>) -> Vec<(Range<usize>, Attributes)> {
        self.store
            .runs()
            .filter(|(run, _)| run.start < range.end && range.start < run.end)
            .map(|(run, attributes)| {
                (
                    run.start.max(range.start)..run.end.min(range.end),
                    attributes.clone(),
                )
            })
            .collect()
    }

    /// Apply `formatter` across its application range, or remove it when the
    /// range already starts with it. Returns the affected range.
    pub fn toggle(
        &mut self,
        formatter: &dyn AttributeFormatter,
        range: Range<usize>,
    ) -> Result<Range<usize>> {
        Error::check_range(&range, self.len())?;
        let application = formatter.application_range(range, self);
        if application.is_empty() {
            return Ok(application);
        }
        let present = self
            .store
            .attributes_at(application.start)
            .is_some_and(|attributes| formatter.is_present(attributes));
        let runs = self.runs_in(&application);
        trace!(?application, present, "toggling formatter");

        self.editing(|storage| {
            for (run, attributes) in runs {
                let updated = if present {
                    formatter.remove(&attributes)
                } else {
                    formatter.apply(&attributes)
                };
                storage.set_attributes(updated, run)?;
            }
            Ok(())
        })?;
        Ok(application)
    }

    fn notify_removed(&self, range: Range<usize>) {
        let removed = self.store.attachments_in(range);
        if removed.is_empty() {
            return;
        }
        let Some(delegate) = self.delegate() else {
            trace!(count = removed.len(), "no attachment delegate; removals not reported");
            return;
        };
        for (_, attachment) in removed {
            if let Some(media) = attachment.as_media() {
                debug!(identifier = media.identifier(), "media attachment removed");
                delegate.attachment_removed(media);
            }
        }
    }

    // ============================================
    // Attachments
    // ============================================

    /// Every media attachment, in text order.
    #[must_use]
    pub fn media_attachments(&self) -> Vec<Rc<MediaAttachment>> {
        self.store
            .attachments()
            .filter_map(|(_, attachment)| attachment.as_media().cloned())
            .collect()
    }

    /// The media attachment with `identifier`.
    #[must_use]
    pub fn attachment_with_id(&self, identifier: &str) -> Option<Rc<MediaAttachment>> {
        self.media_attachments()
            .into_iter()
            .find(|media| media.identifier() == identifier)
    }

    /// Range of the media attachment with `identifier`.
    #[must_use]
    pub fn range_for_attachment_id(&self, identifier: &str) -> Option<Range<usize>> {
        self.store.attachments().find_map(|(range, attachment)| {
            attachment
                .as_media()
                .filter(|media| media.identifier() == identifier)
                .map(|_| range)
        })
    }

    /// Range of this exact attachment instance.
    #[must_use]
    pub fn range_of(&self, attachment: &TextAttachment) -> Option<Range<usize>> {
        self.store
            .attachments()
            .find(|(_, candidate)| candidate.same_instance(attachment))
            .map(|(range, _)| range)
    }

    fn media_range(&self, media: &Rc<MediaAttachment>) -> Option<Range<usize>> {
        self.store.attachments().find_map(|(range, attachment)| {
            attachment
                .as_media()
                .filter(|candidate| Rc::ptr_eq(candidate, media))
                .map(|_| range)
        })
    }

    /// Delete every media attachment through the regular pipeline.
    pub fn remove_media_attachments(&mut self) -> Result<()> {
        let ranges: Vec<Range<usize>> = self
            .store
            .attachments()
            .filter(|(_, attachment)| attachment.as_media().is_some())
            .map(|(range, _)| range)
            .collect();

        self.editing(|storage| {
            let mut removed = 0;
            for range in ranges {
                let corrected = range.start - removed..range.end - removed;
                removed += range.len();
                storage.replace_with_styled_text(corrected, StyledText::new())?;
            }
            Ok(())
        })
    }

    fn claim_attachments(&self) {
        for (_, attachment) in self.store.attachments() {
            match attachment {
                TextAttachment::Media(media) => media.set_owner(Some(self.id)),
                TextAttachment::Renderable(renderable) => renderable.set_owner(Some(self.id)),
                TextAttachment::Line(_) | TextAttachment::Embedded(_) => {}
            }
        }
    }

    // ============================================
    // Delegate forwarding
    // ============================================

    /// Placeholder image for `attachment`, from the delegate.
    #[must_use]
    pub fn placeholder_for(&self, attachment: &MediaAttachment) -> Option<Image> {
        Some(self.delegate()?.placeholder_image(attachment))
    }

    /// Bounds of `attachment` in a line fragment, from the delegate.
    #[must_use]
    pub fn bounds_for(&self, attachment: &TextAttachment, line_fragment: Rect) -> Option<Rect> {
        Some(self.delegate()?.bounds(attachment, line_fragment))
    }

    /// Rendered image of `attachment` at `size`, from the delegate.
    #[must_use]
    pub fn image_for_size(&self, attachment: &TextAttachment, size: Size) -> Option<Image> {
        self.delegate()?.image_for_size(attachment, size)
    }

    /// Ask the delegate to fetch `media`'s image.
    ///
    /// Returns `false` without a delegate, without a URL, or when `media`
    /// is not in this storage. The result is applied by
    /// [`Self::process_resolutions`].
    pub fn request_image(&mut self, media: &Rc<MediaAttachment>) -> bool {
        let Some(delegate) = self.delegate() else {
            trace!(identifier = media.identifier(), "no attachment delegate; image not requested");
            return false;
        };
        let Some(url) = media.url() else {
            return false;
        };
        if self.media_range(media).is_none() {
            return false;
        }

        let (ticket, on_success, on_failure) = self.resolutions.continuations();
        self.tickets.insert(ticket, Rc::downgrade(media));
        media.set_resolution_state(ResolutionState::Requested);
        debug!(ticket, identifier = media.identifier(), %url, "requesting image");
        delegate.request_image(media, &url, on_success, on_failure);
        true
    }

    /// Request images for every media attachment with a URL and nothing in flight.
    pub fn request_pending_images(&mut self) -> usize {
        let mut requested = 0;
        for media in self.media_attachments() {
            if media.resolution_state() == ResolutionState::Idle && self.request_image(&media) {
                requested += 1;
            }
        }
        requested
    }

    /// Apply delivered image results. Returns how many were applied.
    ///
    /// Results for attachments no longer in the storage, or whose URL changed
    /// after the request, are discarded. Outstanding requests for attachments
    /// that were dropped or removed are forgotten.
    pub fn process_resolutions(&mut self) -> usize {
        let messages = self.resolutions.drain();
        if messages.is_empty() {
            self.prune_tickets();
            return 0;
        }

        self.begin_editing();
        let mut applied = 0;
        for message in messages {
            let Some(media) = self
                .tickets
                .remove(&message.ticket)
                .and_then(|weak| weak.upgrade())
            else {
                trace!(ticket = message.ticket, "discarding result for dropped attachment");
                continue;
            };
            if media.resolution_state() != ResolutionState::Requested {
                trace!(ticket = message.ticket, "discarding stale result");
                continue;
            }
            let Some(range) = self.media_range(&media) else {
                debug!(
                    identifier = media.identifier(),
                    "discarding result for attachment no longer in storage"
                );
                media.set_resolution_state(ResolutionState::Idle);
                continue;
            };

            match message.outcome {
                ResolutionOutcome::Loaded(image) => {
                    media.set_image(Some(image));
                    media.set_resolution_state(ResolutionState::Resolved);
                    self.edits.record(EditMask::ATTRIBUTES, range, 0);
                }
                ResolutionOutcome::Failed => {
                    debug!(identifier = media.identifier(), "image request failed");
                    media.set_resolution_state(ResolutionState::Failed);
                }
            }
            applied += 1;
        }
        self.end_editing();
        self.prune_tickets();
        applied
    }

    fn prune_tickets(&mut self) {
        let mut stale = Vec::new();
        for (&ticket, weak) in &self.tickets {
            match weak.upgrade() {
                None => stale.push(ticket),
                Some(media) if self.media_range(&media).is_none() => {
                    media.set_resolution_state(ResolutionState::Idle);
                    stale.push(ticket);
                }
                Some(_) => {}
            }
        }
        if stale.is_empty() {
            return;
        }
        trace!(count = stale.len(), "forgetting stale image requests");
        for ticket in stale {
            self.tickets.remove(&ticket);
        }
    }

    #[cfg(test)]
    fn pending_requests(&self) -> usize {
        self.tickets.len()
    }

    // ============================================
    // Lists
    // ============================================

    /// Marker text for the list item whose paragraph contains `location`.
    ///
    /// Returns `None` outside lists, and for items whose number falls below 1
    /// (`start="0"`, or a reversed list counting past 1) or overflows. Items
    /// are counted among consecutive paragraphs sharing the list at the same
    /// depth; deeper paragraphs in between do not interrupt the count.
    pub fn list_marker(&self, location: usize) -> Result<Option<String>> {
        Error::check_range(&(location..location), self.len())?;
        let lists: Vec<Vec<TextList>> = self
            .rope
            .paragraph_ranges()
            .iter()
            .map(|paragraph| {
                self.store
                    .attributes_at(paragraph.start)
                    .and_then(attributes::paragraph_style)
                    .map(|style| style.lists().cloned().collect())
                    .unwrap_or_default()
            })
            .collect();
        let index = self.rope.paragraph_index(location);

        let own = &lists[index];
        let Some(list) = own.last() else {
            return Ok(None);
        };
        let depth = own.len();
        let same_list = |other: &&Vec<TextList>| other.len() >= depth && other[depth - 1] == *list;
        let position = lists[..index]
            .iter()
            .rev()
            .take_while(same_list)
            .filter(|other| other.len() == depth)
            .count();
        let following = lists[index + 1..]
            .iter()
            .take_while(same_list)
            .filter(|other| other.len() == depth)
            .count();

        let number = list
            .item_number(position, position + 1 + following)
            .filter(|number| *number >= 1);
        let Some(number) = number else {
            debug!(location, position, start = ?list.start, "list item has no positive number");
            return Ok(None);
        };
        list.marker_text(number, Some(depth), self.options.indent_style)
            .map(Some)
    }

    // ============================================
    // Markup
    // ============================================

    /// Replace the whole content with converted `markup`.
    ///
    /// On conversion failure the storage is left untouched.
    pub fn set_markup(
        &mut self,
        converter: &dyn MarkupConverter,
        markup: &str,
        defaults: &Attributes,
    ) -> Result<()> {
        let converted = converter.styled_text(markup, defaults)?;
        let converted = preprocess::normalize_attachments(
            converted,
            &Insertion {
                store: &StyledText::new(),
                range: 0..0,
                owner: self.id,
                delegate: None,
                remint_duplicates: self.options.remint_duplicates,
            },
        )?;
        let old_len = self.len();
        let delta = Self::delta(old_len, converted.len());

        self.editing(|storage| {
            storage.rope.replace(converted.as_str());
            storage.store = converted;
            storage.claim_attachments();
            storage.edits.record(
                EditMask::CHARACTERS | EditMask::ATTRIBUTES,
                0..old_len,
                delta,
            );
            Ok(())
        })
    }

    /// Serialize the whole content.
    #[must_use]
    pub fn markup(&self, converter: &dyn MarkupConverter, prettify: bool) -> String {
        converter.markup(&self.store, prettify)
    }

    /// Serialize `range`.
    pub fn markup_in_range(
        &self,
        converter: &dyn MarkupConverter,
        prettify: bool,
        range: Range<usize>,
    ) -> Result<String> {
        Ok(converter.markup(&self.store.substring(range)?, prettify))
    }
}
