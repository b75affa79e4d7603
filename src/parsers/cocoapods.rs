//! Parser for CocoaPods Podfile.lock files
//!
//! Only the top-level `PODS` section is read. Each element is either a plain
//! descriptor string or a single-key mapping from descriptor to its
//! sub-dependencies:
//!
//! ```yaml
//! PODS:
//!   - Alamofire (4.7.3)
//!   - Firebase/Core (4.8.1):
//!     - FirebaseAnalytics (= 4.0.5)
//! ```

use tracing::debug;

use super::{Entries, NormalizedResult, Parser, utf8_content};
use crate::error::ParseFailure;
use crate::file_types::FormatKind;
use crate::value::Value;

const PODS_KEY: &str = "PODS";

/// Parser for CocoaPods lockfiles
#[derive(Debug, Default)]
pub struct CocoaPodsParser;

impl CocoaPodsParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for CocoaPodsParser {
    fn format(&self) -> FormatKind {
        FormatKind::CocoaPods
    }

    fn parse(&self, content: &[u8]) -> Result<NormalizedResult, ParseFailure> {
        let text = utf8_content(content, FormatKind::CocoaPods)?;

        let document: serde_yml::Value = serde_yml::from_str(text).map_err(|e| {
            debug!("Podfile.lock is not valid YAML: {}", e);
            ParseFailure::malformed(FormatKind::CocoaPods)
        })?;
        let document = Value::from(document);

        let pods = document
            .get(PODS_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| ParseFailure::missing(FormatKind::CocoaPods, PODS_KEY))?;

        let mut entries = Entries::new();
        for pod in pods {
            let Some(descriptor) = pod_descriptor(pod) else {
                debug!("Skipping PODS element of type {}", pod.type_name());
                continue;
            };
            if let Some((name, version)) = split_descriptor(descriptor) {
                entries.insert(name.to_string(), version.to_string());
            }
        }

        debug!("Parsed {} pods from Podfile.lock", entries.len());
        Ok(NormalizedResult::new(FormatKind::CocoaPods, entries))
    }
}

/// The descriptor string of a `PODS` element, ignoring any sub-dependencies.
fn pod_descriptor(pod: &Value) -> Option<&str> {
    match pod {
        Value::String(descriptor) => Some(descriptor),
        Value::Map(map) if map.len() == 1 => map.keys().next().map(String::as_str),
        _ => None,
    }
}

/// Split `"Name (1.2.3)"` into `("Name", "1.2.3")`.
///
/// Descriptors without a version token yield `None`.
fn split_descriptor(descriptor: &str) -> Option<(&str, &str)> {
    let (name, rest) = descriptor.split_once(' ')?;
    let rest = rest.strip_prefix('(').unwrap_or(rest);
    let version = rest.strip_suffix(')').unwrap_or(rest);

    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name, version))
}
