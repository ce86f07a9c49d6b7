use serde::Serialize;

use crate::language::dotted_extensions;
use crate::output::{PLUGIN_NAME, PLUGIN_VERSION};

/// The `plugin.json` a host reads to discover this analyzer.
///
/// `executable` is relative to the plugin directory. `runtime` is omitted: the analyzer is a
/// native binary, so the host runs it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct PluginManifest {
    pub name: String,
    pub executable: String,
    pub extensions: Vec<String>,
    pub description: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

impl PluginManifest {
    /// Manifest describing this build.
    pub fn current() -> Self {
        Self {
            name: PLUGIN_NAME.to_owned(),
            executable: PLUGIN_NAME.to_owned(),
            extensions: dotted_extensions(),
            description: env!("CARGO_PKG_DESCRIPTION").to_owned(),
            version: PLUGIN_VERSION.to_owned(),
            runtime: None,
        }
    }
}
