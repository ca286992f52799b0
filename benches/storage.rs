//! Storage performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use markup_storage::{
    AttributeKey, Attributes, HeadingFormatter, HeadingLevel, ListStyle, MediaAttachment,
    MediaKind, ParagraphProperty, ParagraphStyle, Rgba, StyledText, TextAttachment, TextList,
    TextStorage, archive, marker_text, unarchive,
};
use std::hint::black_box;

fn document(paragraphs: usize) -> StyledText {
    let mut text = StyledText::new();
    for i in 0..paragraphs {
        let mut attrs = Attributes::new();
        if i % 3 == 0 {
            attrs.insert(AttributeKey::ForegroundColor, Rgba::BLUE.into());
        }
        text.push(&format!("Paragraph {i} with some words in it.\n"), attrs);
        if i % 10 == 0 {
            let media = MediaAttachment::new(format!("img-{i}"), MediaKind::Image);
            text.push_styled(&StyledText::attachment(
                TextAttachment::media(media),
                Attributes::new(),
            ));
        }
    }
    text
}

fn list_document(items: usize) -> StyledText {
    let list = TextList::new(ListStyle::Ordered);
    let style = ParagraphStyle::new(vec![ParagraphProperty::List(list)]);
    let mut attrs = Attributes::new();
    attrs.insert(AttributeKey::ParagraphStyle, style.into());
    let mut text = StyledText::new();
    for i in 0..items {
        text.push(&format!("item {i}\n"), attrs.clone());
    }
    text
}

fn storage_with(text: StyledText) -> TextStorage {
    let mut storage = TextStorage::new();
    storage
        .replace_with_styled_text(0..0, text)
        .expect("benchmark fixture loads");
    storage
}

fn storage_editing(c: &mut Criterion) {
    c.bench_function("storage_type_char", |b| {
        b.iter_batched(
            || storage_with(document(100)),
            |mut storage| {
                let end = storage.len();
                storage.replace_characters(black_box(end..end), "x").unwrap();
                storage
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("storage_replace_styled_100", |b| {
        b.iter_batched(
            || (storage_with(document(100)), document(5)),
            |(mut storage, incoming)| {
                storage
                    .replace_with_styled_text(black_box(10..40), incoming)
                    .unwrap();
                storage
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("storage_toggle_heading", |b| {
        let formatter = HeadingFormatter::new(HeadingLevel::H2);
        b.iter_batched(
            || storage_with(document(100)),
            |mut storage| {
                storage.toggle(&formatter, black_box(50..50)).unwrap();
                storage
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("storage_remove_media_100", |b| {
        b.iter_batched(
            || storage_with(document(100)),
            |mut storage| {
                storage.remove_media_attachments().unwrap();
                storage
            },
            BatchSize::SmallInput,
        )
    });
}

fn list_numbering(c: &mut Criterion) {
    c.bench_function("marker_text_roman", |b| {
        b.iter(|| marker_text(ListStyle::Ordered, black_box(3888), Some(3)));
    });

    c.bench_function("marker_text_alphabetic", |b| {
        b.iter(|| marker_text(ListStyle::Ordered, black_box(18_278), Some(2)));
    });

    let storage = storage_with(list_document(200));
    let last = storage.len() - 2;
    c.bench_function("storage_list_marker_last_of_200", |b| {
        b.iter(|| black_box(&storage).list_marker(black_box(last)));
    });
}

fn archiving(c: &mut Criterion) {
    let text = document(100);
    c.bench_function("archive_100", |b| {
        b.iter(|| archive(black_box(&text)));
    });

    let bytes = archive(&text).expect("fixture archives");
    c.bench_function("unarchive_100", |b| {
        b.iter(|| unarchive(black_box(&bytes)));
    });
}

criterion_group!(benches, storage_editing, list_numbering, archiving);
criterion_main!(benches);
