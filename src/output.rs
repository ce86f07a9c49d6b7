use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::graph::edge::DependencyEdge;

/// Name reported in every response's metadata.
pub const PLUGIN_NAME: &str = "python-analyzer";
/// Version reported in every response's metadata.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything one analysis run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// De-duplicated edges in first-seen order.
    pub dependencies: Vec<DependencyEdge>,
    /// Distinct source files in the full universe, not only the changed ones.
    pub files_analyzed: usize,
    /// Wall-clock time from analyzer construction to assembly.
    pub analysis_time_millis: u128,
    pub errors: Vec<String>,
}

/// Run metadata in the host's wire format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    pub files_analyzed: usize,
    /// Formatted as `"<ms>ms"`.
    pub analysis_time: String,
    pub plugin_name: &'static str,
    pub plugin_version: &'static str,
}

/// The response object written to stdout. Success and failure share this shape.
#[derive(Debug, Serialize)]
pub struct PluginOutput {
    pub dependencies: Vec<DependencyEdge>,
    pub metadata: PluginMetadata,
    pub errors: Vec<String>,
}

impl From<AnalysisResult> for PluginOutput {
    fn from(result: AnalysisResult) -> Self {
        Self {
            dependencies: result.dependencies,
            metadata: PluginMetadata {
                files_analyzed: result.files_analyzed,
                analysis_time: format!("{}ms", result.analysis_time_millis),
                plugin_name: PLUGIN_NAME,
                plugin_version: PLUGIN_VERSION,
            },
            errors: result.errors,
        }
    }
}

impl PluginOutput {
    /// Response for a top-level failure: no edges, nothing analyzed, one error.
    pub fn failure(message: impl Into<String>) -> Self {
        AnalysisResult {
            dependencies: Vec::new(),
            files_analyzed: 0,
            analysis_time_millis: 0,
            errors: vec![message.into()],
        }
        .into()
    }
}

/// Write `output` as JSON followed by a newline.
///
/// - `compact = false`: two-space indented JSON (default).
/// - `compact = true`: a single line.
pub fn write_output<W: Write>(output: &PluginOutput, mut writer: W, compact: bool) -> Result<()> {
    let serialized = if compact {
        serde_json::to_writer(&mut writer, output)
    } else {
        serde_json::to_writer_pretty(&mut writer, output)
    };
    serialized.context("failed to serialize analysis response")?;

    writeln!(writer).context("failed to write analysis response")?;
    writer.flush().context("failed to flush analysis response")
}
