//! torinos - manifest normalization for iOS/macOS projects
//!
//! This crate turns CocoaPods lockfiles, Carthage resolved-lockfiles and Xcode
//! project files into a uniform name → value map, one result per input file.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod file_types;
pub mod parsers;
pub mod reports;
pub mod value;

pub use analyzer::{AnalysisMode, ManifestAnalyzer, ManifestInput, analyze, analyze_each};
pub use error::{FailureKind, ParseFailure};
pub use file_types::{FormatKind, classify};
pub use parsers::NormalizedResult;
