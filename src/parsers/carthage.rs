//! Parser for Carthage Cartfile.resolved files
//!
//! One dependency per line: `<origin> "<org/repo>" "<version>"`.
//! Lines that do not have at least three space-separated tokens are skipped
//! rather than failing the whole file.

use tracing::debug;

use super::{Entries, NormalizedResult, Parser, utf8_content};
use crate::error::ParseFailure;
use crate::file_types::FormatKind;

/// Parser for Carthage resolved-lockfiles
#[derive(Debug, Default)]
pub struct CarthageParser;

impl CarthageParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for CarthageParser {
    fn format(&self) -> FormatKind {
        FormatKind::Carthage
    }

    fn parse(&self, content: &[u8]) -> Result<NormalizedResult, ParseFailure> {
        let text = utf8_content(content, FormatKind::Carthage)?;

        let mut entries = Entries::new();
        for (line_idx, line) in text.split('\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            match parse_resolved_line(line) {
                Some((name, version)) => {
                    entries.insert(name, version);
                }
                None => debug!("Skipping Cartfile.resolved line {}: {:?}", line_idx + 1, line),
            }
        }

        debug!("Parsed {} dependencies from Cartfile.resolved", entries.len());
        Ok(NormalizedResult::new(FormatKind::Carthage, entries))
    }
}

/// Extract `(name, version)` from the second and third tokens of a line.
fn parse_resolved_line(line: &str) -> Option<(String, String)> {
    let mut words = line.split(' ');
    let _origin = words.next()?;
    let name = clean_token(words.next()?);
    let version = clean_token(words.next()?);

    if name.is_empty() {
        return None;
    }
    Some((name, version))
}

fn clean_token(token: &str) -> String {
    token.replace('\r', "").trim_matches('"').to_string()
}
