//! File type detection
//!
//! This module maps a manifest file name to the format that knows how to
//! parse it. Classification looks at the name only, never at the content.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ParseFailure;

/// CocoaPods lockfile name
pub const PODFILE_LOCK: &str = "Podfile.lock";

/// Carthage resolved-lockfile name
pub const CARTFILE_RESOLVED: &str = "Cartfile.resolved";

/// Xcode project file extension (without the dot)
pub const PBXPROJ_EXTENSION: &str = "pbxproj";

/// Supported manifest formats.
///
/// Each variant determines which parser handles the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    /// CocoaPods lockfile (Podfile.lock)
    #[serde(rename = "cocoapods")]
    CocoaPods,
    /// Carthage resolved-lockfile (Cartfile.resolved)
    #[serde(rename = "carthage")]
    Carthage,
    /// Xcode project file (*.pbxproj)
    #[serde(rename = "xcproject")]
    XcodeProject,
}

impl FormatKind {
    pub const ALL: [FormatKind; 3] = [
        FormatKind::CocoaPods,
        FormatKind::Carthage,
        FormatKind::XcodeProject,
    ];

    /// Detect the format from a file name.
    ///
    /// Exact names are checked before the extension, and the extension match
    /// is case-sensitive. Returns `None` if the name is not recognized.
    pub fn detect(name: &str) -> Option<Self> {
        if name == PODFILE_LOCK {
            Some(FormatKind::CocoaPods)
        } else if name == CARTFILE_RESOLVED {
            Some(FormatKind::Carthage)
        } else if Path::new(name).extension() == Some(OsStr::new(PBXPROJ_EXTENSION)) {
            Some(FormatKind::XcodeProject)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatKind::CocoaPods => "cocoapods",
            FormatKind::Carthage => "carthage",
            FormatKind::XcodeProject => "xcproject",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a manifest file name, failing with
/// [`ParseFailure::UnrecognizedFileType`] when no format matches.
pub fn classify(name: &str) -> Result<FormatKind, ParseFailure> {
    FormatKind::detect(name).ok_or_else(|| ParseFailure::UnrecognizedFileType {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_detect_cocoapods() {
        assert_eq!(FormatKind::detect("Podfile.lock"), Some(FormatKind::CocoaPods));
    }

    #[test]
    fn test_detect_carthage() {
        assert_eq!(
            FormatKind::detect("Cartfile.resolved"),
            Some(FormatKind::Carthage)
        );
    }

    #[test]
    fn test_detect_xcode_project() {
        assert_eq!(
            FormatKind::detect("project.pbxproj"),
            Some(FormatKind::XcodeProject)
        );
        assert_eq!(
            FormatKind::detect("test.pbxproj"),
            Some(FormatKind::XcodeProject)
        );
    }

    #[test]
    fn test_exact_names_only() {
        // Podfile and Cartfile themselves are not lockfiles
        assert_eq!(FormatKind::detect("Podfile"), None);
        assert_eq!(FormatKind::detect("Cartfile"), None);
        assert_eq!(FormatKind::detect("podfile.lock"), None);
        assert_eq!(FormatKind::detect("Cartfile.resolved.bak"), None);
        assert_eq!(FormatKind::detect(" Podfile.lock"), None);
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        assert_eq!(FormatKind::detect("project.PBXPROJ"), None);
        assert_eq!(FormatKind::detect("project.pbxproj.orig"), None);
        assert_eq!(FormatKind::detect("pbxproj"), None);
    }

    #[test]
    fn test_detect_unknown() {
        for name in ["", "Gemfile.lock", "Package.resolved", "README.md", "x.xcodeproj"] {
            assert_eq!(FormatKind::detect(name), None, "{name}");
        }
    }

    #[test]
    fn test_classify_failure() {
        let err = classify("Gemfile.lock").unwrap_err();
        assert_eq!(err.kind(), FailureKind::UnrecognizedFileType);
        assert_eq!(
            err,
            ParseFailure::UnrecognizedFileType {
                name: "Gemfile.lock".to_string()
            }
        );
    }

    #[test]
    fn test_classify_is_total() {
        for kind in FormatKind::ALL {
            let name = match kind {
                FormatKind::CocoaPods => PODFILE_LOCK.to_string(),
                FormatKind::Carthage => CARTFILE_RESOLVED.to_string(),
                FormatKind::XcodeProject => format!("App.{PBXPROJ_EXTENSION}"),
            };
            assert_eq!(classify(&name), Ok(kind));
        }
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(FormatKind::XcodeProject.to_string(), "xcproject");
        assert_eq!(
            serde_json::to_string(&FormatKind::CocoaPods).unwrap(),
            "\"cocoapods\""
        );
    }
}
