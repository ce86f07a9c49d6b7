use serde::Serialize;

use crate::parser::imports::ImportKind;

/// The relationship an edge records. Serialized as the edge's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeKind {
    /// `import a.b`
    #[serde(rename = "import")]
    Import,
    /// `from a.b import x`
    #[serde(rename = "from-import")]
    FromImport,
}

impl EdgeKind {
    /// Strength reported for this kind of edge.
    pub fn strength(&self) -> Strength {
        match self {
            EdgeKind::Import => Strength::Critical,
            EdgeKind::FromImport => Strength::Strong,
        }
    }
}

impl From<ImportKind> for EdgeKind {
    fn from(kind: ImportKind) -> Self {
        match kind {
            ImportKind::Import => EdgeKind::Import,
            ImportKind::ImportFrom => EdgeKind::FromImport,
        }
    }
}

/// Coarse confidence/criticality of a dependency, in the host's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strength {
    /// Direct module import; breaks at import time.
    Critical,
    /// Named import from a module.
    Strong,
}

/// File -> File: `from` imports `to`, observed at `line`.
///
/// Both endpoints are universe keys (project-relative, `/`-separated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub strength: Strength,
    pub line: usize,
    /// The statement as written, e.g. `from pkg.sub import x`.
    pub context: String,
}

impl DependencyEdge {
    pub fn new(from: &str, to: String, kind: EdgeKind, line: usize, context: String) -> Self {
        Self {
            from: from.to_owned(),
            to,
            kind,
            strength: kind.strength(),
            line,
            context,
        }
    }
}
