use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use torinos::config::{Config, OutputFormat};
use torinos::reports::{
    ReportEntry, generate_entries_json, generate_json_report, generate_markdown_report,
    generate_summary_report,
};
use torinos::{AnalysisMode, ManifestAnalyzer, ManifestInput, classify};

#[derive(Parser)]
#[command(name = "torinos")]
#[command(about = "Normalize CocoaPods, Carthage and Xcode project manifests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze manifest files and print their normalized entries
    Analyze {
        /// Manifest files (Podfile.lock, Cartfile.resolved, *.pbxproj)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Report every file instead of stopping at the first failure
        #[arg(long)]
        lenient: bool,

        /// Path to a JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the manifest format detected for a file name
    Classify {
        /// File name to classify
        name: String,
    },
    /// Profile manifest parsing (for use with cargo-flamegraph)
    ProfileParse {
        /// Path to the manifest file to parse
        #[arg(short, long)]
        file: PathBuf,

        /// Number of iterations (for meaningful profiling)
        #[arg(short, long, default_value = "1000")]
        iterations: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Analyze {
            config: Some(path), ..
        } => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e:#}");
                return ExitCode::FAILURE;
            }
        },
        _ => Config::default(),
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            files,
            output,
            lenient,
            ..
        } => {
            let mode = if lenient {
                AnalysisMode::Lenient
            } else {
                config.analysis.mode
            };
            let format = output.unwrap_or(config.output.format);
            run_analyze(&files, mode, format, config.output.pretty).await
        }
        Commands::Classify { name } => match classify(&name) {
            Ok(format) => {
                println!("{format}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::ProfileParse { file, iterations } => run_profile_parse(&file, iterations).await,
    }
}

/// Read every file concurrently, keeping the order they were given in.
async fn read_inputs(files: &[PathBuf]) -> anyhow::Result<Vec<ManifestInput>> {
    let reads = files.iter().map(|path| async move {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok::<_, anyhow::Error>(ManifestInput::new(file_name(path), content))
    });
    futures::future::try_join_all(reads).await
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}

async fn run_analyze(
    files: &[PathBuf],
    mode: AnalysisMode,
    format: OutputFormat,
    pretty: bool,
) -> ExitCode {
    let inputs = match read_inputs(files).await {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let analyzer = ManifestAnalyzer::new();

    // Strict JSON output is the bare list of entry maps
    if mode == AnalysisMode::Strict && format == OutputFormat::Json {
        return match analyzer.analyze(&inputs) {
            Ok(results) => print_rendered(generate_entries_json(&results, pretty), true),
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let outcomes = analyzer.run(mode, &inputs);
    if mode == AnalysisMode::Strict {
        if let Some(Err(e)) = outcomes.first() {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }

    let report: Vec<ReportEntry> = inputs
        .iter()
        .zip(&outcomes)
        .map(|(input, outcome)| ReportEntry::new(input.name.as_str(), outcome))
        .collect();
    let succeeded = !report.iter().any(ReportEntry::is_failure);

    match format {
        OutputFormat::Json => print_rendered(generate_json_report(&report, pretty), succeeded),
        OutputFormat::Summary => print_rendered(Ok(generate_summary_report(&report)), succeeded),
        OutputFormat::Markdown => print_rendered(Ok(generate_markdown_report(&report)), succeeded),
    }
}

fn print_rendered(rendered: serde_json::Result<String>, succeeded: bool) -> ExitCode {
    match rendered {
        Ok(text) => {
            println!("{text}");
            if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_profile_parse(file: &Path, iterations: usize) -> ExitCode {
    let content = match tokio::fs::read(file).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {e}");
            return ExitCode::FAILURE;
        }
    };

    let input = ManifestInput::new(file_name(file), content);
    if let Err(e) = classify(&input.name) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    eprintln!("Profiling parse operations for: {}", file.display());
    eprintln!("Iterations: {iterations}");
    eprintln!("File size: {} bytes", input.content.len());

    let analyzer = ManifestAnalyzer::new();
    let start = Instant::now();

    for _ in 0..iterations {
        let _ = std::hint::black_box(analyzer.analyze_one(&input));
    }

    let elapsed = start.elapsed();
    eprintln!("\nProfiling complete!");
    eprintln!("Total time: {elapsed:?}");
    eprintln!(
        "Average per iteration: {:?}",
        average_per_iteration(elapsed, iterations)
    );

    ExitCode::SUCCESS
}

fn average_per_iteration(elapsed: Duration, iterations: usize) -> Duration {
    elapsed.div_f64(iterations.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_per_iteration() {
        let elapsed = Duration::from_secs(1);
        assert_eq!(average_per_iteration(elapsed, 4), Duration::from_millis(250));
        assert_eq!(average_per_iteration(elapsed, 0), elapsed);
    }

    #[test]
    fn test_average_per_iteration_beyond_u32() {
        let elapsed = Duration::from_secs(1);
        let average = average_per_iteration(elapsed, usize::MAX);
        assert!(average < Duration::from_nanos(1));
    }
}
