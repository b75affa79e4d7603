//! Batch orchestration: classify each manifest, dispatch it to its parser and
//! collect the results in input order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ParseFailure;
use crate::file_types::classify;
use crate::parsers::{NormalizedResult, parser_for};

/// One manifest to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInput {
    /// File name used for classification (not a path)
    pub name: String,
    /// Raw file content
    pub content: Vec<u8>,
}

impl ManifestInput {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// How a batch reacts to a failing input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// The first failure aborts the whole batch
    #[default]
    Strict,
    /// Every input gets its own outcome
    Lenient,
}

/// Stateless manifest analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestAnalyzer;

impl ManifestAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Classify and parse a single manifest.
    pub fn analyze_one(&self, input: &ManifestInput) -> Result<NormalizedResult, ParseFailure> {
        let format = classify(&input.name)?;
        debug!(
            "Analyzing {} as {} ({} bytes)",
            input.name,
            format,
            input.content.len()
        );
        parser_for(format).parse(&input.content)
    }

    /// Analyze a batch, stopping at the first failure.
    ///
    /// Inputs are processed sequentially in order, so when several inputs are
    /// invalid the reported failure is always the earliest one.
    pub fn analyze(&self, inputs: &[ManifestInput]) -> Result<Vec<NormalizedResult>, ParseFailure> {
        let mut results = Vec::with_capacity(inputs.len());
        for (idx, input) in inputs.iter().enumerate() {
            match self.analyze_one(input) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Batch aborted at input {} ({}): {}", idx, input.name, e);
                    return Err(e);
                }
            }
        }
        info!("Analyzed {} manifests", results.len());
        Ok(results)
    }

    /// Analyze a batch, returning one outcome per input at the same position.
    pub fn analyze_each(
        &self,
        inputs: &[ManifestInput],
    ) -> Vec<Result<NormalizedResult, ParseFailure>> {
        let outcomes: Vec<_> = inputs
            .iter()
            .map(|input| {
                let outcome = self.analyze_one(input);
                if let Err(e) = &outcome {
                    warn!("Failed to analyze {}: {}", input.name, e);
                }
                outcome
            })
            .collect();

        let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
        info!("Analyzed {} manifests ({} failed)", outcomes.len(), failed);
        outcomes
    }

    /// Run a batch in the given mode.
    ///
    /// Strict mode yields either every result or a single failure.
    pub fn run(
        &self,
        mode: AnalysisMode,
        inputs: &[ManifestInput],
    ) -> Vec<Result<NormalizedResult, ParseFailure>> {
        match mode {
            AnalysisMode::Strict => match self.analyze(inputs) {
                Ok(results) => results.into_iter().map(Ok).collect(),
                Err(e) => vec![Err(e)],
            },
            AnalysisMode::Lenient => self.analyze_each(inputs),
        }
    }
}

/// Analyze a batch with the default strict policy.
pub fn analyze(inputs: &[ManifestInput]) -> Result<Vec<NormalizedResult>, ParseFailure> {
    ManifestAnalyzer::new().analyze(inputs)
}

/// Analyze a batch, one outcome per input.
pub fn analyze_each(inputs: &[ManifestInput]) -> Vec<Result<NormalizedResult, ParseFailure>> {
    ManifestAnalyzer::new().analyze_each(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::file_types::FormatKind;

    fn podfile() -> ManifestInput {
        ManifestInput::new("Podfile.lock", "PODS:\n  - Alamofire (4.7.3)\n")
    }

    fn cartfile() -> ManifestInput {
        ManifestInput::new("Cartfile.resolved", "github \"a/b\" \"1.0\"\n")
    }

    #[test]
    fn test_analyze_one_dispatches_by_name() {
        let analyzer = ManifestAnalyzer::new();

        let result = analyzer.analyze_one(&podfile()).unwrap();
        assert_eq!(result.format, FormatKind::CocoaPods);

        let result = analyzer.analyze_one(&cartfile()).unwrap();
        assert_eq!(result.format, FormatKind::Carthage);
    }

    #[test]
    fn test_analyze_preserves_order() {
        let results = analyze(&[cartfile(), podfile(), cartfile()]).unwrap();
        let formats: Vec<_> = results.iter().map(|r| r.format).collect();
        assert_eq!(
            formats,
            vec![FormatKind::Carthage, FormatKind::CocoaPods, FormatKind::Carthage]
        );
    }

    #[test]
    fn test_analyze_empty_batch() {
        assert_eq!(analyze(&[]), Ok(Vec::new()));
        assert!(analyze_each(&[]).is_empty());
    }

    #[test]
    fn test_unknown_file_aborts_batch() {
        let inputs = [podfile(), ManifestInput::new("Gemfile.lock", "GEM\n"), cartfile()];
        let err = analyze(&inputs).unwrap_err();
        assert_eq!(err.kind(), FailureKind::UnrecognizedFileType);
    }

    #[test]
    fn test_first_failure_is_reported() {
        let inputs = [
            podfile(),
            ManifestInput::new("Podfile.lock", "COCOAPODS: 1.4.0\n"),
            ManifestInput::new("unknown.txt", ""),
        ];
        let err = analyze(&inputs).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingExpectedSection);
    }

    #[test]
    fn test_analyze_each_keeps_positions() {
        let inputs = [podfile(), ManifestInput::new("unknown.txt", ""), cartfile()];
        let outcomes = analyze_each(&inputs);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert_eq!(
            outcomes[1].as_ref().unwrap_err().kind(),
            FailureKind::UnrecognizedFileType
        );
        assert_eq!(outcomes[2].as_ref().unwrap().get("a/b"), Some("1.0"));
    }

    #[test]
    fn test_run_modes() {
        let analyzer = ManifestAnalyzer::new();
        let inputs = [podfile(), ManifestInput::new("unknown.txt", ""), cartfile()];

        let strict = analyzer.run(AnalysisMode::Strict, &inputs);
        assert_eq!(strict.len(), 1);
        assert!(strict[0].is_err());

        let lenient = analyzer.run(AnalysisMode::Lenient, &inputs);
        assert_eq!(lenient.len(), 3);

        let valid = [podfile(), cartfile()];
        let strict = analyzer.run(AnalysisMode::Strict, &valid);
        assert!(strict.iter().all(Result::is_ok));
        assert_eq!(strict.len(), 2);
    }

    #[test]
    fn test_batch_matches_single_analysis() {
        let inputs = [podfile(), cartfile()];
        let batch = analyze(&inputs).unwrap();
        for (input, result) in inputs.iter().zip(&batch) {
            assert_eq!(&analyze(std::slice::from_ref(input)).unwrap()[0], result);
        }
    }

    #[test]
    fn test_analysis_mode_serde() {
        let mode: AnalysisMode = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(mode, AnalysisMode::Lenient);
        assert_eq!(AnalysisMode::default(), AnalysisMode::Strict);
    }
}
