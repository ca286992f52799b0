//! End-to-end scenarios for the storage edit pipeline.
//!
//! Each test drives a `TextStorage` through its public API only: insertion
//! preprocessing, removal notifications, attribute fix-ups and the edit
//! notifications observers receive.

mod common;

use common::{RecordingDelegate, init_test_logging, media, with_style};
use markup_storage::attachment::Image;
use markup_storage::{
    AttributeKey, AttributeValue, Attributes, EditMask, HeadingFormatter, HeadingLevel,
    MarkFormatter, Rgba, StorageOptions, StyledText, TextAttachment, TextStorage,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

// ============================================
// Removal notifications
// ============================================

#[test]
fn test_k_media_removals_are_reported() {
    init_test_logging();
    let log = Rc::new(RefCell::new(Vec::new()));
    let delegate = Rc::new(RecordingDelegate::with_log(Rc::clone(&log)));
    let mut storage = TextStorage::new();
    storage.set_delegate(&delegate);

    let mut content = StyledText::new();
    for id in ["a", "b", "c", "d"] {
        content.push(id, Attributes::new());
        content.push_styled(&StyledText::attachment(media(id), Attributes::new()));
    }
    storage.replace_with_styled_text(0..0, content).unwrap();
    assert_eq!(storage.media_attachments().len(), 4);

    let sink = Rc::clone(&log);
    storage.on_edit(move |change| sink.borrow_mut().push(format!("edited {}", change.delta)));
    let len = storage.len();
    storage.replace_characters(0..len, "").unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "removed a".to_string(),
            "removed b".to_string(),
            "removed c".to_string(),
            "removed d".to_string(),
            "edited -8".to_string(),
        ]
    );
    assert!(storage.media_attachments().is_empty());
}

#[test]
fn test_partial_removal_reports_only_covered_media() {
    let delegate = Rc::new(RecordingDelegate::default());
    let mut storage = TextStorage::new();
    storage.set_delegate(&delegate);

    let mut content = StyledText::attachment(media("keep"), Attributes::new());
    content.push(" text ", Attributes::new());
    content.push_styled(&StyledText::attachment(media("drop"), Attributes::new()));
    storage.replace_with_styled_text(0..0, content).unwrap();

    storage.replace_characters(4..8, "").unwrap();
    assert_eq!(delegate.removed(), vec!["drop".to_string()]);
    assert!(storage.attachment_with_id("keep").is_some());
}

#[test]
fn test_remove_media_attachments_strips_every_media() {
    let delegate = Rc::new(RecordingDelegate::default());
    let mut storage = TextStorage::new();
    storage.set_delegate(&delegate);

    let mut content = StyledText::plain("x");
    content.push_styled(&StyledText::attachment(media("one"), Attributes::new()));
    content.push("y", Attributes::new());
    content.push_styled(&StyledText::attachment(TextAttachment::line(), Attributes::new()));
    content.push_styled(&StyledText::attachment(media("two"), Attributes::new()));
    storage.replace_with_styled_text(0..0, content).unwrap();

    storage.remove_media_attachments().unwrap();
    assert_eq!(storage.len(), 3);
    assert_eq!(storage.styled_text().attachments().count(), 1);
    assert_eq!(delegate.removed(), vec!["one".to_string(), "two".to_string()]);
}

// ============================================
// Carry-over
// ============================================

#[test]
fn test_heading_carries_into_typed_text() {
    init_test_logging();
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "Title").unwrap();
    storage
        .toggle(&HeadingFormatter::new(HeadingLevel::H2), 0..0)
        .unwrap();
    assert_eq!(
        storage.attribute(AttributeKey::HeadingRepresentation, 0),
        Some(&AttributeValue::Heading(HeadingLevel::H2))
    );

    let paragraph = storage.attributes_at(0).unwrap()[&AttributeKey::ParagraphStyle].clone();
    let typed = with_style("s", paragraph);
    storage.replace_with_styled_text(5..5, typed).unwrap();

    assert_eq!(storage.string(), "Titles");
    assert_eq!(
        storage.attribute(AttributeKey::HeadingRepresentation, 5),
        Some(&AttributeValue::Heading(HeadingLevel::H2))
    );
}

#[test]
fn test_heading_does_not_carry_outside_heading_paragraphs() {
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "Title").unwrap();
    storage
        .toggle(&HeadingFormatter::new(HeadingLevel::H2), 0..0)
        .unwrap();

    storage
        .replace_with_styled_text(5..5, StyledText::plain("\nbody"))
        .unwrap();
    assert!(
        storage
            .attribute(AttributeKey::HeadingRepresentation, 7)
            .is_none()
    );
}

#[test]
fn test_heading_carry_reads_the_insertion_paragraph() {
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "Big\nSmall").unwrap();
    storage
        .toggle(&HeadingFormatter::new(HeadingLevel::H1), 0..0)
        .unwrap();
    storage
        .toggle(&HeadingFormatter::new(HeadingLevel::H2), 5..5)
        .unwrap();

    let paragraph = storage.attributes_at(5).unwrap()[&AttributeKey::ParagraphStyle].clone();
    storage
        .replace_with_styled_text(9..9, with_style("s", paragraph))
        .unwrap();
    assert_eq!(
        storage.attribute(AttributeKey::HeadingRepresentation, 9),
        Some(&AttributeValue::Heading(HeadingLevel::H2))
    );
}

#[test]
fn test_heading_carry_into_later_heading_paragraph() {
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "body\nTitle").unwrap();
    storage
        .toggle(&HeadingFormatter::new(HeadingLevel::H2), 5..5)
        .unwrap();
    assert!(
        storage
            .attribute(AttributeKey::HeadingRepresentation, 0)
            .is_none()
    );

    let paragraph = storage.attributes_at(5).unwrap()[&AttributeKey::ParagraphStyle].clone();
    storage
        .replace_with_styled_text(7..7, with_style("x", paragraph))
        .unwrap();
    assert_eq!(
        storage.attribute(AttributeKey::HeadingRepresentation, 7),
        Some(&AttributeValue::Heading(HeadingLevel::H2))
    );
}

#[test]
fn test_mark_and_color_carry_into_replacement() {
    let highlight = Rgba::rgb(255, 200, 0);
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "marked text").unwrap();
    storage
        .toggle(&MarkFormatter::new(Some(highlight)), 0..6)
        .unwrap();

    storage
        .replace_with_styled_text(0..6, StyledText::plain("MARKED"))
        .unwrap();

    let attrs = storage.attributes_at(2).unwrap();
    assert!(attrs.contains_key(&AttributeKey::MarkRepresentation));
    assert_eq!(
        attrs.get(&AttributeKey::ForegroundColor),
        Some(&AttributeValue::Color(highlight))
    );
    assert!(
        storage
            .attribute(AttributeKey::MarkRepresentation, 7)
            .is_none()
    );
}

#[test]
fn test_mark_does_not_carry_into_pure_insertion() {
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "mark").unwrap();
    storage.toggle(&MarkFormatter::new(None), 0..4).unwrap();

    storage
        .replace_with_styled_text(0..0, StyledText::plain(">"))
        .unwrap();
    assert!(
        storage
            .attribute(AttributeKey::MarkRepresentation, 0)
            .is_none()
    );
}

#[test]
fn test_set_attributes_keeps_mark_color() {
    let highlight = Rgba::rgb(0, 128, 255);
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "note").unwrap();
    storage
        .toggle(&MarkFormatter::new(Some(highlight)), 0..4)
        .unwrap();

    let mut recolored = storage.attributes_at(0).unwrap();
    recolored.insert(AttributeKey::ForegroundColor, Rgba::RED.into());
    storage.set_attributes(recolored, 0..4).unwrap();

    assert_eq!(
        storage.attribute(AttributeKey::ForegroundColor, 1),
        Some(&AttributeValue::Color(highlight))
    );
}

// ============================================
// Edit notifications
// ============================================

#[test]
fn test_identical_replacement_is_idempotent() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let mut storage = TextStorage::new();
    let mut content = StyledText::plain("before ");
    content.push_styled(&StyledText::attachment(media("pic"), Attributes::new()));
    content.push(" after", Attributes::new());
    storage.replace_with_styled_text(0..0, content).unwrap();
    let pic = storage.attachment_with_id("pic").unwrap();

    let sink = Rc::clone(&changes);
    storage.on_edit(move |change| sink.borrow_mut().push(change.clone()));
    let before = storage.styled_text().clone();
    let len = storage.len();
    storage
        .replace_with_styled_text(0..len, before.clone())
        .unwrap();

    assert_eq!(storage.styled_text(), &before);
    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].delta, 0);
    assert_eq!(changes[0].range, 0..len);
    assert!(changes[0].mask.contains(EditMask::CHARACTERS));
    assert!(Rc::ptr_eq(&storage.attachment_with_id("pic").unwrap(), &pic));
}

#[test]
fn test_attribute_edits_report_zero_delta() {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    let mut storage = TextStorage::new();
    storage.replace_characters(0..0, "abc").unwrap();
    storage.on_edit(move |change| sink.borrow_mut().push(change.clone()));

    storage
        .add_attribute(AttributeKey::ForegroundColor, Rgba::GREEN.into(), 1..2)
        .unwrap();

    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].mask, EditMask::ATTRIBUTES);
    assert_eq!(changes[0].delta, 0);
}

// ============================================
// Attachment uniqueness
// ============================================

#[test]
fn test_duplicate_instances_are_reminted() {
    let mut storage = TextStorage::new();
    let shared = media("shared");
    let mut content = StyledText::attachment(shared.clone(), Attributes::new());
    content.push_styled(&StyledText::attachment(shared.clone(), Attributes::new()));
    storage.replace_with_styled_text(0..0, content).unwrap();
    storage
        .replace_with_styled_text(2..2, StyledText::attachment(shared, Attributes::new()))
        .unwrap();

    let found: Vec<_> = storage
        .styled_text()
        .attachments()
        .map(|(_, attachment)| attachment.clone())
        .collect();
    assert_eq!(found.len(), 3);
    for (i, a) in found.iter().enumerate() {
        for b in &found[i + 1..] {
            assert!(!a.same_instance(b));
        }
    }
}

#[test]
fn test_adjacent_duplicates_are_separate_characters() {
    let delegate = Rc::new(RecordingDelegate::default());
    let mut storage = TextStorage::new();
    storage.set_delegate(&delegate);
    let shared = media("shared");
    let mut content = StyledText::attachment(shared.clone(), Attributes::new());
    content.push_styled(&StyledText::attachment(shared, Attributes::new()));
    storage.replace_with_styled_text(0..0, content).unwrap();

    let ranges: Vec<_> = storage
        .styled_text()
        .attachments()
        .map(|(range, _)| range)
        .collect();
    assert_eq!(ranges, vec![0..1, 1..2]);

    storage.replace_characters(0..1, "").unwrap();
    assert_eq!(delegate.removed(), vec!["shared".to_string()]);
    assert!(storage.attachment_with_id("shared").is_none());
    assert_eq!(storage.media_attachments().len(), 1);

    storage.replace_characters(0..1, "").unwrap();
    assert_eq!(delegate.removed().len(), 2);
    assert_ne!(delegate.removed()[1], "shared");
}

#[test]
fn test_duplicates_kept_when_reminting_is_off() {
    let mut storage =
        TextStorage::with_options(StorageOptions::default().with_remint_duplicates(false));
    let shared = media("shared");
    let mut content = StyledText::attachment(shared.clone(), Attributes::new());
    content.push_styled(&StyledText::attachment(shared, Attributes::new()));
    storage.replace_with_styled_text(0..0, content).unwrap();

    let found: Vec<_> = storage.styled_text().attachments().collect();
    assert!(found[0].1.same_instance(found[1].1));
}

// ============================================
// Delegate forwarding
// ============================================

#[test]
fn test_placeholder_and_failure_keep_placeholder() {
    let delegate = Rc::new(RecordingDelegate::default());
    let mut storage = TextStorage::new();
    storage.set_delegate(&delegate);
    storage
        .replace_with_styled_text(0..0, StyledText::attachment(media("img"), Attributes::new()))
        .unwrap();
    let img = storage.attachment_with_id("img").unwrap();

    let placeholder = storage.placeholder_for(&img).unwrap();
    assert_eq!(placeholder, Image::new(RecordingDelegate::PLACEHOLDER, Vec::new()));

    assert!(storage.request_image(&img));
    delegate.fail_next();
    assert_eq!(storage.process_resolutions(), 1);
    assert_eq!(img.image(), None);
    assert_eq!(
        img.resolution_state(),
        markup_storage::ResolutionState::Failed
    );
}
