//! Fuzz target for unsupported-markup capsules.

#![no_main]

use libfuzzer_sys::fuzz_target;
use markup_storage::UnsupportedMarkup;

fuzz_target!(|data: &[u8]| {
    if let Ok(capsule) = UnsupportedMarkup::decode(data) {
        let bytes = capsule.encode().expect("decoded capsule re-encodes");
        assert_eq!(UnsupportedMarkup::decode(&bytes).ok(), Some(capsule));
    }
});
