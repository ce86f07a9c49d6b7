use std::path::Path;

/// Role a recognized extension plays during module resolution.
///
/// Uses a plain enum (not trait objects). Cheap to copy and pattern-matched at the
/// candidate-generation boundary in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Importable module source (`.py`).
    Module,
    /// Type stub (`.pyi`). Probed last, after the package marker.
    Stub,
}

impl SourceKind {
    /// Extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceKind::Module => "py",
            SourceKind::Stub => "pyi",
        }
    }

    /// Map a bare extension (no dot) to its kind. Case-sensitive, like Python's import system.
    pub fn from_extension(ext: &str) -> Option<SourceKind> {
        match ext {
            "py" => Some(SourceKind::Module),
            "pyi" => Some(SourceKind::Stub),
            _ => None,
        }
    }
}

/// Every extension the analyzer recognizes, in manifest order.
pub const SOURCE_KINDS: &[SourceKind] = &[SourceKind::Module, SourceKind::Stub];

/// File name that marks a directory as a regular package.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Returns true iff `path` ends in a recognized Python source extension.
///
/// Works on the raw request path: both `/` and `\` separated paths are accepted.
pub fn is_source_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(SourceKind::from_extension)
        .is_some()
}

/// Extensions formatted the way the plugin host expects them (`".py"`).
pub fn dotted_extensions() -> Vec<String> {
    SOURCE_KINDS
        .iter()
        .map(|kind| format!(".{}", kind.extension()))
        .collect()
}
