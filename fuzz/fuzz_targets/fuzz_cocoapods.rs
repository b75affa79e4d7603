#![no_main]

use libfuzzer_sys::fuzz_target;
use std::panic::AssertUnwindSafe;
use torinos::parsers::cocoapods::CocoaPodsParser;
use torinos::parsers::Parser;

fuzz_target!(|data: &[u8]| {
    let parser = CocoaPodsParser::new();

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| parser.parse(data)));

    match result {
        Ok(Ok(normalized)) => {
            for name in normalized.entries.keys() {
                assert!(!name.is_empty(), "entry names must be non-empty");
            }
        }
        Ok(Err(_)) => {}
        Err(_) => panic!("CocoaPodsParser panicked"),
    }
});
