//! Preprocessing applied to styled text before it enters the storage, and
//! fix-ups applied to attributes before they are set.
//!
//! Insertion runs three passes in order:
//!
//! 1. [`normalize_attachments`]: give every incoming attachment a unique
//!    instance owned by this storage; convert or strip foreign objects
//! 2. [`carry_heading`]: keep the heading-size attribute on text typed into
//!    a heading paragraph
//! 3. [`carry_mark`]: keep `<mark>` and its color on text replacing marked text
//!
//! Setting attributes runs [`match_heading_font`] then [`pin_mark_color`].

use crate::attachment::{
    AttachmentDelegate, MediaAttachment, MediaSize, StorageId, TextAttachment,
};
use crate::error::Result;
use crate::paragraph::ParagraphStyle;
use crate::storage::attributes::{self, AttributeKey, Attributes};
use crate::storage::formatter::{AttributeFormatter, HeadingFormatter};
use crate::storage::styled_text::StyledText;
use std::ops::Range;
use tracing::{debug, trace};

/// Where incoming text is headed.
pub(crate) struct Insertion<'a> {
    pub store: &'a StyledText,
    pub range: Range<usize>,
    pub owner: StorageId,
    pub delegate: Option<&'a dyn AttachmentDelegate>,
    pub remint_duplicates: bool,
}

/// Make incoming attachments safe to store.
///
/// Instances already present in the storage outside the target range, or
/// repeated within `incoming`, are replaced by fresh copies. With a delegate,
/// media and renderable attachments are claimed by this storage and other
/// embedded objects become image attachments, or are dropped when they
/// carry no image.
pub(crate) fn normalize_attachments(
    mut incoming: StyledText,
    insertion: &Insertion<'_>,
) -> Result<StyledText> {
    let found: Vec<(Range<usize>, TextAttachment)> = incoming
        .attachments()
        .map(|(range, attachment)| (range, attachment.clone()))
        .collect();
    if found.is_empty() {
        return Ok(incoming);
    }

    let target = &insertion.range;
    let mut seen: Vec<TextAttachment> = insertion
        .store
        .attachments()
        .filter(|(range, _)| range.start < target.start || range.end > target.end)
        .map(|(_, attachment)| attachment.clone())
        .collect();

    for (range, original) in found {
        let mut attachment = original.clone();
        if insertion.remint_duplicates && seen.iter().any(|s| s.same_instance(&attachment)) {
            attachment = attachment.fresh_copy();
            debug!(?range, "reminted attachment already present in storage");
        }

        if let Some(delegate) = insertion.delegate {
            let converted = match &attachment {
                TextAttachment::Line(_) => None,
                TextAttachment::Media(media) => {
                    media.set_owner(Some(insertion.owner));
                    None
                }
                TextAttachment::Renderable(renderable) => {
                    renderable.set_owner(Some(insertion.owner));
                    None
                }
                TextAttachment::Embedded(object) => {
                    let Some(image) = &object.image else {
                        debug!(
                            ?range,
                            type_identifier = %object.type_identifier,
                            "stripped embedded object without image"
                        );
                        incoming.remove_attribute(AttributeKey::Attachment, range)?;
                        continue;
                    };
                    let media = MediaAttachment::minted_image().with_image(image.clone());
                    media.set_size(MediaSize::Full);
                    media.update_url(delegate.storage_url(&media));
                    media.set_owner(Some(insertion.owner));
                    debug!(
                        identifier = media.identifier(),
                        type_identifier = %object.type_identifier,
                        "converted embedded object to image attachment"
                    );
                    Some(TextAttachment::media(media))
                }
            };
            if let Some(converted) = converted {
                attachment = converted;
            }
        }

        if !attachment.same_instance(&original) {
            incoming.add_attribute(AttributeKey::Attachment, attachment.clone().into(), range)?;
        }
        seen.push(attachment);
    }
    Ok(incoming)
}

/// Stamp the storage's heading size over text entering a heading paragraph.
///
/// Applies when both sides are non-empty, the storage carries a heading
/// size at the insertion point, the incoming text does not at its start,
/// and the incoming paragraph style at its start contains a heading. At the
/// end of the storage the insertion point is the last character.
pub(crate) fn carry_heading(
    store: &StyledText,
    range: &Range<usize>,
    mut incoming: StyledText,
) -> Result<StyledText> {
    if store.is_empty() || incoming.is_empty() {
        return Ok(incoming);
    }
    let at = range.start.min(store.len() - 1);
    let Some(size) = store.attribute(AttributeKey::HeadingRepresentation, at) else {
        return Ok(incoming);
    };
    if incoming
        .attribute(AttributeKey::HeadingRepresentation, 0)
        .is_some()
    {
        return Ok(incoming);
    }
    let in_heading = incoming
        .attributes_at(0)
        .and_then(attributes::paragraph_style)
        .is_some_and(ParagraphStyle::contains_heading);
    if !in_heading {
        return Ok(incoming);
    }

    trace!(?size, len = incoming.len(), "carrying heading size into inserted text");
    let len = incoming.len();
    incoming.add_attribute(AttributeKey::HeadingRepresentation, size.clone(), 0..len)?;
    Ok(incoming)
}

/// Stamp `<mark>` and its color over text replacing marked content.
///
/// Applies when `range` is non-empty and starts inside the storage.
pub(crate) fn carry_mark(
    store: &StyledText,
    range: &Range<usize>,
    mut incoming: StyledText,
) -> Result<StyledText> {
    if range.is_empty() || range.start >= store.len() || incoming.is_empty() {
        return Ok(incoming);
    }
    let Some(current) = store.attributes_at(range.start) else {
        return Ok(incoming);
    };
    let Some(mark) = current.get(&AttributeKey::MarkRepresentation) else {
        return Ok(incoming);
    };

    let len = incoming.len();
    incoming.add_attribute(AttributeKey::MarkRepresentation, mark.clone(), 0..len)?;
    if let Some(color) = attributes::foreground_color(current) {
        incoming.add_attribute(AttributeKey::ForegroundColor, color.into(), 0..len)?;
    }
    trace!(?range, "carrying mark into replacement text");
    Ok(incoming)
}

/// Re-derive the font when the new attributes change the heading level.
pub(crate) fn match_heading_font(
    store: &StyledText,
    attributes: Attributes,
    range: &Range<usize>,
) -> Attributes {
    let new_level = attributes::paragraph_style(&attributes)
        .and_then(ParagraphStyle::innermost_heading_level);
    let old_level = store
        .attributes_at(range.start)
        .and_then(attributes::paragraph_style)
        .and_then(ParagraphStyle::innermost_heading_level);

    match new_level {
        Some(level) if new_level != old_level => {
            debug!(?old_level, ?level, "re-deriving font for heading change");
            HeadingFormatter::new(level).apply(&attributes)
        }
        _ => attributes,
    }
}

/// Keep the existing color when setting attributes over marked text.
pub(crate) fn pin_mark_color(
    store: &StyledText,
    mut attributes: Attributes,
    range: &Range<usize>,
) -> Attributes {
    let Some(current) = store.attributes_at(range.start) else {
        return attributes;
    };
    if !current.contains_key(&AttributeKey::MarkRepresentation) {
        return attributes;
    }
    if let Some(color) = attributes::foreground_color(current) {
        attributes.insert(AttributeKey::ForegroundColor, color.into());
    }
    attributes
}
