pub mod imports;
pub mod languages;

use thiserror::Error;
use tree_sitter::{LanguageError, Node, Parser, Tree};

use imports::{ImportStatement, extract_imports};
use languages::python_language;

/// Statements the grammar still accepts but Python 3 rejects (`print "x"`, `exec "code"`).
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Why a single file could not be turned into a syntax tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The grammar could not be loaded. Affects every file, so callers treat it as fatal
    /// for the whole run rather than skipping one file.
    #[error("failed to load the Python grammar: {0}")]
    Language(#[from] LanguageError),
    /// tree-sitter gave up without producing a tree.
    #[error("tree-sitter returned no tree for {path}")]
    NoTree { path: String },
    /// The tree contains ERROR or MISSING nodes, or a Python 2 only statement.
    #[error("syntax error at line {line}")]
    Syntax { line: usize },
}

/// A reusable Python parser. One instance is built per run and fed every changed file.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Build a parser with the Python grammar loaded.
    ///
    /// # Errors
    /// Returns [`ParseError::Language`] if the bundled grammar is ABI-incompatible with the
    /// linked tree-sitter runtime.
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&python_language())?;
        Ok(Self { parser })
    }

    /// Parse `source` into a syntax tree.
    ///
    /// tree-sitter always recovers, so a tree with error nodes is reported as
    /// [`ParseError::Syntax`] instead of being handed to the extractor half-formed. So is a
    /// Python 2 file: the grammar parses `print "x"` cleanly, Python 3 does not.
    pub fn parse(&mut self, path: &str, source: &str) -> Result<Tree, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree {
                path: path.to_owned(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::Syntax {
                line: first_error_line(root),
            });
        }
        if let Some(line) = first_legacy_line(root) {
            return Err(ParseError::Syntax { line });
        }

        Ok(tree)
    }

    /// Parse a file and extract its import statements.
    ///
    /// The tree is dropped after extraction; only the statements are kept.
    pub fn parse_imports(
        &mut self,
        path: &str,
        source: &str,
    ) -> Result<Vec<ImportStatement>, ParseError> {
        let tree = self.parse(path, source)?;
        Ok(extract_imports(&tree, source.as_bytes()))
    }
}

/// 1-based line of the first ERROR or MISSING node in pre-order.
fn first_error_line(root: Node) -> usize {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return node.start_position().row + 1;
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    root.start_position().row + 1
}

/// 1-based line of the first Python 2 only statement in pre-order, if any.
fn first_legacy_line(root: Node) -> Option<usize> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if LEGACY_STATEMENTS.contains(&node.kind()) {
            return Some(node.start_position().row + 1);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}
