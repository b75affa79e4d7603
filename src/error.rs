//! Failure taxonomy shared by the classifier, the parsers and the analyzer.

use serde::Serialize;
use thiserror::Error;

use crate::file_types::FormatKind;

/// The three ways a manifest can fail to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The file name matched no known manifest name or extension
    UnrecognizedFileType,
    /// The content could not be decoded as YAML / text / property list
    MalformedSyntax,
    /// The content decoded but a required key was absent or had the wrong type
    MissingExpectedSection,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::UnrecognizedFileType => "unrecognized_file_type",
            FailureKind::MalformedSyntax => "malformed_syntax",
            FailureKind::MissingExpectedSection => "missing_expected_section",
        }
    }
}

/// Error returned by [`crate::classify`] and every [`crate::parsers::Parser`].
///
/// Decoder errors from the YAML and property-list backends are logged but not
/// carried here; callers only ever see the kind plus enough context to tell
/// which input and which section failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("unrecognized file type: {name}")]
    UnrecognizedFileType { name: String },

    #[error("malformed {format} content")]
    MalformedSyntax { format: FormatKind },

    #[error("{format} content is missing expected section `{section}`")]
    MissingExpectedSection { format: FormatKind, section: String },
}

impl ParseFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ParseFailure::UnrecognizedFileType { .. } => FailureKind::UnrecognizedFileType,
            ParseFailure::MalformedSyntax { .. } => FailureKind::MalformedSyntax,
            ParseFailure::MissingExpectedSection { .. } => FailureKind::MissingExpectedSection,
        }
    }

    pub(crate) fn malformed(format: FormatKind) -> Self {
        ParseFailure::MalformedSyntax { format }
    }

    pub(crate) fn missing(format: FormatKind, section: impl Into<String>) -> Self {
        ParseFailure::MissingExpectedSection {
            format,
            section: section.into(),
        }
    }
}
