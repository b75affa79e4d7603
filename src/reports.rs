//! Analysis report generation
//!
//! This module renders batch outcomes as JSON, a plain-text summary or
//! Markdown.

use serde::Serialize;

use crate::error::{FailureKind, ParseFailure};
use crate::file_types::FormatKind;
use crate::parsers::{Entries, NormalizedResult};

/// One input's outcome, labelled with the file it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportEntry {
    Success {
        file: String,
        format: FormatKind,
        entries: Entries,
    },
    Failure {
        file: String,
        error: FailureKind,
        message: String,
    },
}

impl ReportEntry {
    pub fn new(file: impl Into<String>, outcome: &Result<NormalizedResult, ParseFailure>) -> Self {
        let file = file.into();
        match outcome {
            Ok(result) => ReportEntry::Success {
                file,
                format: result.format,
                entries: result.entries.clone(),
            },
            Err(e) => ReportEntry::Failure {
                file,
                error: e.kind(),
                message: e.to_string(),
            },
        }
    }

    pub fn file(&self) -> &str {
        match self {
            ReportEntry::Success { file, .. } | ReportEntry::Failure { file, .. } => file,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReportEntry::Failure { .. })
    }
}

/// Serialize the `entries` maps of a successful strict batch, in input order.
pub fn generate_entries_json(
    results: &[NormalizedResult],
    pretty: bool,
) -> serde_json::Result<String> {
    let entries: Vec<&Entries> = results.iter().map(|result| &result.entries).collect();
    to_json(&entries, pretty)
}

/// Serialize labelled per-file outcomes.
pub fn generate_json_report(report: &[ReportEntry], pretty: bool) -> serde_json::Result<String> {
    to_json(report, pretty)
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

pub fn generate_summary_report(report: &[ReportEntry]) -> String {
    let mut lines = Vec::with_capacity(report.len() + 2);
    let failed = report.iter().filter(|entry| entry.is_failure()).count();

    for entry in report {
        match entry {
            ReportEntry::Success {
                file,
                format,
                entries,
            } => lines.push(format!("  ✓ {file} ({format}): {} entries", entries.len())),
            ReportEntry::Failure { file, message, .. } => {
                lines.push(format!("  ✗ {file}: {message}"))
            }
        }
    }

    lines.push("  ─────────────".to_string());
    lines.push(format!("  {} manifests, {} failed", report.len(), failed));
    lines.join("\n")
}

pub fn generate_markdown_report(report: &[ReportEntry]) -> String {
    let mut lines = vec![
        "# Manifest Report".to_string(),
        String::new(),
        format!("**Date**: {}", chrono::Local::now().format("%Y-%m-%d")),
        String::new(),
    ];

    for entry in report {
        match entry {
            ReportEntry::Success {
                file,
                format,
                entries,
            } => {
                lines.push(format!("## {file} ({format})"));
                lines.push(String::new());
                if entries.is_empty() {
                    lines.push("_No entries_".to_string());
                } else {
                    lines.push("| Name | Value |".to_string());
                    lines.push("|------|-------|".to_string());
                    for (name, value) in entries {
                        lines.push(format!("| {name} | {value} |"));
                    }
                }
            }
            ReportEntry::Failure {
                file,
                error,
                message,
            } => {
                lines.push(format!("## {file}"));
                lines.push(String::new());
                lines.push(format!("⚠ **{}**: {message}", error.as_str()));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
