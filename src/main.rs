//! cloudaudit - compliance report for a cloud resource snapshot
//!
//! Reads a JSON array of resource records and writes the compliance report
//! as pretty-printed JSON.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cloudaudit::core::{BoxedSink, BoxedSource};
use cloudaudit::io::{JsonFileSink, JsonFileSource, JsonReaderSource, JsonWriterSink};
use cloudaudit::{ComplianceEngine, EngineConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Exit status when `--fail-on-violation` is set and a resource is non-compliant.
const VIOLATION_EXIT_CODE: u8 = 2;

/// Input argument that selects standard input.
const STDIN_INPUT: &str = "-";

/// cloudaudit - compliance report for a cloud resource snapshot
#[derive(Parser, Debug)]
#[command(name = "cloudaudit")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of resource records (`-` for stdin)
    input: String,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Engine configuration file (policies and options)
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Attach NSGs without a resource group to VMs without one
    #[arg(long)]
    match_unset_resource_group: bool,

    /// Exit with status 2 when any resource is non-compliant
    #[arg(long)]
    fail_on_violation: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Builds the log filter. A directive from `RUST_LOG` wins over `--log-level`.
fn log_filter(env_directive: Option<&str>, log_level: &str) -> EnvFilter {
    env_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(log_level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let env_directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(log_filter(env_directive.as_deref(), &cli.log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(cli, std::io::stdin().lock())
}

/// Evaluates the input named on the command line and writes the report.
///
/// `stdin` is read when the input is `-`.
fn run<R: Read + 'static>(cli: Cli, stdin: R) -> Result<ExitCode> {
    let mut config = match &cli.policy {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load policy file {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if cli.match_unset_resource_group {
        config = config.with_match_unset_resource_group(true);
    }

    let engine = ComplianceEngine::builder()
        .with_config(config)
        .build()
        .context("invalid engine configuration")?;

    let source: BoxedSource = if cli.input == STDIN_INPUT {
        Box::new(JsonReaderSource::new("stdin", stdin))
    } else {
        Box::new(JsonFileSource::new(&cli.input))
    };

    let sink: BoxedSink = match &cli.output {
        Some(path) => Box::new(JsonFileSink::new(path)),
        None => Box::new(JsonWriterSink::new("stdout", std::io::stdout())),
    };

    let summary = engine
        .run(source.as_ref(), sink.as_ref())
        .context("compliance evaluation failed")?;

    if cli.fail_on_violation && !summary.is_compliant() {
        tracing::warn!(
            non_compliant = summary.non_compliant,
            "Non-compliant resources found"
        );
        return Ok(ExitCode::from(VIOLATION_EXIT_CODE));
    }

    Ok(ExitCode::SUCCESS)
}
