use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// A single file sent by the host: project-relative path plus full text.
///
/// The host also sends `changeType`, `linesAdded`, `isChanged` and friends; those are
/// accepted and ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    /// Deleted files arrive without text.
    #[serde(default)]
    pub content: String,
}

/// The request object read from stdin (or `--input`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Files whose imports are analyzed. Order here fixes the order of the output edges.
    #[serde(default)]
    pub changed_files: Vec<FileRecord>,
    /// Broader context used only as resolution targets. May overlap `changed_files`.
    #[serde(default)]
    pub project_files: Vec<FileRecord>,
    #[serde(default)]
    pub project_root: Option<String>,
}

impl AnalysisRequest {
    /// Decode a request from raw JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to decode analysis request")
    }

    /// Read and decode a request from `path`, or from stdin when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let text = match path {
            Some(p) => std::fs::read_to_string(p)
                .with_context(|| format!("failed to read request from {}", p.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read request from stdin")?;
                buf
            }
        };
        Self::from_json(&text)
    }

    /// The resolution anchor: `projectRoot` when present and non-empty, otherwise the
    /// process working directory.
    pub fn resolved_root(&self) -> Result<PathBuf> {
        match self.project_root.as_deref() {
            Some(root) if !root.trim().is_empty() => Ok(PathBuf::from(root)),
            _ => std::env::current_dir().context("failed to determine working directory"),
        }
    }
}
