mod analyzer;
mod cli;
mod config;
mod graph;
mod language;
mod manifest;
mod output;
mod parser;
mod request;
mod resolver;
mod universe;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use analyzer::Analyzer;
use cli::Cli;
use config::AnalyzerConfig;
use manifest::PluginManifest;
use output::{PluginOutput, write_output};
use request::AnalysisRequest;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the response, so logs go to stderr.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("python_analyzer={log_level}")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if cli.manifest {
        return match print_manifest() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        };
    }

    let (response, status) = match run(&cli) {
        Ok(response) => (response, ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!("{err:#}");
            (PluginOutput::failure(format!("{err:#}")), ExitCode::FAILURE)
        }
    };

    if let Err(err) = write_output(&response, io::stdout().lock(), cli.compact) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    status
}

/// One request in, one response out.
fn run(cli: &Cli) -> Result<PluginOutput> {
    let request = AnalysisRequest::load(cli.input.as_deref())?;
    let project_root = request.resolved_root()?;
    tracing::debug!(
        root = %project_root.display(),
        changed = request.changed_files.len(),
        project = request.project_files.len(),
        "received analysis request"
    );

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load_file(path),
        None => AnalyzerConfig::load(&project_root),
    }
    .with_flags(cli.report_parse_errors, cli.all_aliases);

    let analyzer = Analyzer::new(config.options());
    Ok(analyzer.analyze(&request, &project_root).into())
}

fn print_manifest() -> Result<()> {
    let json = serde_json::to_string_pretty(&PluginManifest::current())
        .context("failed to serialize plugin manifest")?;
    println!("{json}");
    Ok(())
}
