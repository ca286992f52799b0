//! Fuzz target for native archives.
//!
//! Tests that unarchive rejects malformed input without panicking and that
//! anything it accepts has runs covering its text exactly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use markup_storage::unarchive;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = unarchive(data) {
        let covered: usize = text.runs().map(|(range, _)| range.len()).sum();
        assert_eq!(covered, text.len());
    }
});
