//! Fuzz target for storage edits.
//!
//! Applies arbitrary replacements and checks that the plain-string view and
//! the run store never disagree.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use markup_storage::{StyledText, TextStorage};

#[derive(Arbitrary, Debug)]
struct Edit {
    start: u8,
    len: u8,
    text: String,
}

fuzz_target!(|edits: Vec<Edit>| {
    let mut storage = TextStorage::new();
    for edit in edits.iter().take(64) {
        let len = storage.len();
        let start = usize::from(edit.start).min(len);
        let end = (start + usize::from(edit.len)).min(len);
        storage
            .replace_with_styled_text(start..end, StyledText::plain(&edit.text))
            .expect("in-bounds replacement succeeds");
        assert_eq!(storage.len(), storage.string().chars().count());
        assert_eq!(storage.styled_text().as_str(), storage.string());
    }
});
