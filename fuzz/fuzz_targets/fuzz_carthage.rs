#![no_main]

use libfuzzer_sys::fuzz_target;
use std::panic::AssertUnwindSafe;
use torinos::parsers::carthage::CarthageParser;
use torinos::parsers::Parser;

fuzz_target!(|data: &[u8]| {
    let parser = CarthageParser::new();

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| parser.parse(data)));

    match result {
        Ok(Ok(normalized)) => {
            for name in normalized.entries.keys() {
                assert!(!name.is_empty(), "entry names must be non-empty");
            }
        }
        Ok(Err(_)) => {}
        Err(_) => panic!("CarthageParser panicked"),
    }
});
