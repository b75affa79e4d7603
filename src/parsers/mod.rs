//! Parsers for iOS/macOS manifest files (Podfile.lock, Cartfile.resolved, *.pbxproj)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ParseFailure;
use crate::file_types::FormatKind;

pub mod carthage;
pub mod cocoapods;
pub mod xcode;

use carthage::CarthageParser;
use cocoapods::CocoaPodsParser;
use xcode::XcodeProjectParser;

/// Name → value pairs extracted from one manifest, sorted by name.
pub type Entries = BTreeMap<String, String>;

/// The normalized outcome of parsing one manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Format the entries were extracted from
    pub format: FormatKind,
    /// Dependency (or setting) name → version (or value)
    pub entries: Entries,
}

impl NormalizedResult {
    pub fn new(format: FormatKind, entries: Entries) -> Self {
        Self { format, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}

/// Trait for parsing manifest files
pub trait Parser: Send + Sync {
    /// The format this parser handles
    fn format(&self) -> FormatKind;

    /// Parse the raw file content into normalized entries
    fn parse(&self, content: &[u8]) -> Result<NormalizedResult, ParseFailure>;
}

static COCOAPODS: CocoaPodsParser = CocoaPodsParser;
static CARTHAGE: CarthageParser = CarthageParser;
static XCODE_PROJECT: XcodeProjectParser = XcodeProjectParser;

/// Select the parser for a classified format.
pub fn parser_for(format: FormatKind) -> &'static dyn Parser {
    match format {
        FormatKind::CocoaPods => &COCOAPODS,
        FormatKind::Carthage => &CARTHAGE,
        FormatKind::XcodeProject => &XCODE_PROJECT,
    }
}

/// Decode content that must be UTF-8 text.
pub(crate) fn utf8_content(content: &[u8], format: FormatKind) -> Result<&str, ParseFailure> {
    std::str::from_utf8(content).map_err(|e| {
        tracing::debug!("{} content is not valid UTF-8: {}", format, e);
        ParseFailure::malformed(format)
    })
}
