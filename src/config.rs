use std::path::Path;

use serde::Deserialize;

use crate::analyzer::{AliasMode, AnalyzerOptions};
use crate::resolver::StdlibTable;

/// File name looked up at the project root.
pub const CONFIG_FILE: &str = "python-analyzer.toml";

/// Per-project adjustments to the stdlib denylist.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StdlibConfig {
    /// Extra root module names to treat as external (never resolved).
    pub extra: Vec<String>,
    /// Built-in stdlib names to treat as project modules (the project shadows them).
    pub allow: Vec<String>,
}

/// Configuration loaded from `python-analyzer.toml`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Surface per-file parse failures in the response's `errors` instead of skipping silently.
    pub report_parse_errors: bool,
    /// Emit an edge for every alias of `import a, b, c` rather than only the first that resolves.
    pub resolve_all_aliases: bool,
    pub stdlib: StdlibConfig,
}

impl AnalyzerConfig {
    /// Load configuration from `python-analyzer.toml` in the given root directory.
    ///
    /// Returns a default configuration if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        Self::load_file(&root.join(CONFIG_FILE))
    }

    /// Load configuration from an explicit path. Same fallback rules as [`Self::load`].
    pub fn load_file(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(
                        "failed to parse {}: {err}. Using defaults.",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    "failed to read {}: {err}. Using defaults.",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Fold in command-line switches. Flags can only turn options on.
    pub fn with_flags(mut self, report_parse_errors: bool, all_aliases: bool) -> Self {
        self.report_parse_errors |= report_parse_errors;
        self.resolve_all_aliases |= all_aliases;
        self
    }

    /// The analyzer settings this configuration describes.
    pub fn options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            alias_mode: if self.resolve_all_aliases {
                AliasMode::All
            } else {
                AliasMode::FirstMatch
            },
            report_parse_errors: self.report_parse_errors,
            stdlib: StdlibTable::with_overrides(&self.stdlib.extra, &self.stdlib.allow),
        }
    }
}
