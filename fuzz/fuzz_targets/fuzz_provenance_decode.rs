//! Fuzz target for provenance records.
//!
//! Arbitrary bytes must decode to an error or to a record that encodes and
//! decodes back to itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use markup_storage::MarkupProvenance;

fuzz_target!(|data: &[u8]| {
    let Ok(provenance) = MarkupProvenance::decode(data) else {
        return;
    };
    let bytes = provenance.encode().expect("decoded provenance re-encodes");
    let again = MarkupProvenance::decode(&bytes).expect("re-encoded provenance decodes");
    assert_eq!(provenance, again);
});
