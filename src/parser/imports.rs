use tree_sitter::{Node, Tree};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// The flavor of import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// Plain import: `import a.b.c [as x]`
    Import,
    /// From-import: `from a.b import x, y [as z]`
    ImportFrom,
}

/// One module reference observed in a source file.
///
/// Transient: produced by [`extract_imports`], consumed by the resolver, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    pub kind: ImportKind,
    /// Dotted module name as written, without leading relative dots (e.g. `"pkg.sub"`).
    pub raw_name: String,
    /// Count of leading relative dots. `0` for absolute imports.
    pub level: usize,
    /// 1-based line of the statement.
    pub line: usize,
    /// Names brought in by a from-import (`*` for a wildcard). Empty for plain imports.
    pub imported_symbols: Vec<String>,
}

impl ImportSite {
    /// Human-readable reconstruction of the statement this site came from.
    ///
    /// - `import a.b`
    /// - `from ..pkg.mod import x, y`
    pub fn context(&self) -> String {
        match self.kind {
            ImportKind::Import => format!("import {}", self.raw_name),
            ImportKind::ImportFrom => format!(
                "from {}{} import {}",
                ".".repeat(self.level),
                self.raw_name,
                self.imported_symbols.join(", ")
            ),
        }
    }
}

/// A single import statement and the module references it makes.
///
/// Plain imports carry one site per alias, in source order (`import a, b` has two).
/// From-imports always carry exactly one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub kind: ImportKind,
    /// 1-based line of the `import`/`from` keyword.
    pub line: usize,
    pub sites: Vec<ImportSite>,
}

// ---------------------------------------------------------------------------
// Helper utilities
// ---------------------------------------------------------------------------

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

/// Reassemble a `dotted_name` from its identifiers so stray whitespace or comments inside
/// the path (`import a . b`) never leak into the module name.
fn dotted_name_text(node: Node, source: &[u8]) -> String {
    let mut cursor = node.walk();
    let parts: Vec<&str> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "identifier")
        .map(|c| node_text(c, source))
        .collect();

    if parts.is_empty() {
        node_text(node, source).to_owned()
    } else {
        parts.join(".")
    }
}

/// Name from a `name` field entry: either a bare `dotted_name` or an `aliased_import`,
/// whose alias is dropped.
fn imported_name(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "dotted_name" => Some(dotted_name_text(node, source)),
        "aliased_import" => node
            .child_by_field_name("name")
            .map(|n| dotted_name_text(n, source)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Statement extraction
// ---------------------------------------------------------------------------

/// `import a.b, c as d`
fn extract_plain_import(node: Node, source: &[u8]) -> Option<ImportStatement> {
    let line = line_of(node);
    let mut cursor = node.walk();
    let sites: Vec<ImportSite> = node
        .children_by_field_name("name", &mut cursor)
        .filter_map(|n| imported_name(n, source))
        .map(|raw_name| ImportSite {
            kind: ImportKind::Import,
            raw_name,
            level: 0,
            line,
            imported_symbols: Vec::new(),
        })
        .collect();

    if sites.is_empty() {
        None
    } else {
        Some(ImportStatement {
            kind: ImportKind::Import,
            line,
            sites,
        })
    }
}

/// Split a `relative_import` node into its dot count and optional module name.
fn relative_parts(node: Node, source: &[u8]) -> (usize, Option<String>) {
    let mut level = 0;
    let mut module = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_prefix" => {
                level += node_text(child, source).chars().filter(|c| *c == '.').count();
            }
            "." => level += 1,
            "dotted_name" => module = Some(dotted_name_text(child, source)),
            _ => {}
        }
    }

    (level, module)
}

/// Names listed after `import` in a from-import; `["*"]` for a wildcard.
fn imported_symbols(node: Node, source: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    let symbols: Vec<String> = node
        .children_by_field_name("name", &mut cursor)
        .filter_map(|n| imported_name(n, source))
        .collect();

    if !symbols.is_empty() {
        return symbols;
    }

    let mut cursor = node.walk();
    let has_wildcard = node
        .named_children(&mut cursor)
        .any(|c| c.kind() == "wildcard_import");
    if has_wildcard {
        vec!["*".to_owned()]
    } else {
        Vec::new()
    }
}

/// `from .pkg import x` / `from pkg.sub import y as z` / `from mod import *`
///
/// Returns `None` for `from . import x`: with no module name there is nothing to resolve.
fn extract_from_import(node: Node, source: &[u8]) -> Option<ImportStatement> {
    let module_node = node.child_by_field_name("module_name")?;
    let (level, module) = match module_node.kind() {
        "dotted_name" => (0, Some(dotted_name_text(module_node, source))),
        "relative_import" => relative_parts(module_node, source),
        _ => return None,
    };
    let raw_name = module?;
    let line = line_of(node);

    Some(ImportStatement {
        kind: ImportKind::ImportFrom,
        line,
        sites: vec![ImportSite {
            kind: ImportKind::ImportFrom,
            raw_name,
            level,
            line,
            imported_symbols: imported_symbols(node, source),
        }],
    })
}

/// Extract every import statement from a parsed Python tree.
///
/// The whole tree is walked, so imports nested in functions, classes, conditionals and
/// try-blocks are included. Statements come out shallow-first, ordered by how deeply Python's
/// own AST nests them and by source order within a depth. Besides each `block`, that depth
/// counts:
///
/// - an `except` handler, which sits one level below its `try`
/// - the n-th `elif` of a chain, which is an `if` nested n levels into the `else` branch
/// - a trailing `else` after n `elif`s, which hangs off the innermost of those
///
/// `from __future__ import ...` is a compiler directive and produces nothing.
pub fn extract_imports(tree: &Tree, source: &[u8]) -> Vec<ImportStatement> {
    let mut found: Vec<(usize, ImportStatement)> = Vec::new();
    let mut stack: Vec<(Node, usize)> = vec![(tree.root_node(), 0)];

    while let Some((node, depth)) = stack.pop() {
        match node.kind() {
            "import_statement" => {
                if let Some(stmt) = extract_plain_import(node, source) {
                    found.push((depth, stmt));
                }
                continue;
            }
            "import_from_statement" => {
                if let Some(stmt) = extract_from_import(node, source) {
                    found.push((depth, stmt));
                }
                continue;
            }
            "future_import_statement" => continue,
            _ => {}
        }

        let child_depth = if node.kind() == "block" { depth + 1 } else { depth };
        let mut cursor = node.walk();
        let mut elifs = 0;
        let children: Vec<(Node, usize)> = node
            .named_children(&mut cursor)
            .map(|child| {
                let extra = match child.kind() {
                    "except_clause" | "except_group_clause" => 1,
                    "elif_clause" => {
                        elifs += 1;
                        elifs
                    }
                    "else_clause" if node.kind() == "if_statement" => elifs,
                    _ => 0,
                };
                (child, child_depth + extra)
            })
            .collect();
        stack.extend(children.into_iter().rev());
    }

    // Stable: source order is kept within a depth.
    found.sort_by_key(|(depth, _)| *depth);
    found.into_iter().map(|(_, stmt)| stmt).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::languages::python_language;

    fn parse_py(source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&python_language()).unwrap();
        parser.parse(source.as_bytes(), None).unwrap()
    }

    fn extract(source: &str) -> Vec<ImportStatement> {
        let tree = parse_py(source);
        extract_imports(&tree, source.as_bytes())
    }

    // Test 1: plain import
    #[test]
    fn test_plain_import() {
        let stmts = extract("import b\n");
        assert_eq!(stmts.len(), 1);
        let site = &stmts[0].sites[0];
        assert_eq!(site.kind, ImportKind::Import);
        assert_eq!(site.raw_name, "b");
        assert_eq!(site.level, 0);
        assert_eq!(site.line, 1);
        assert!(site.imported_symbols.is_empty());
        assert_eq!(site.context(), "import b");
    }

    // Test 2: dotted and aliased plain imports, several per statement
    #[test]
    fn test_plain_import_multiple_aliases() {
        let stmts = extract("import os, pkg.sub as s, c\n");
        assert_eq!(stmts.len(), 1, "one statement");
        let names: Vec<_> = stmts[0].sites.iter().map(|s| s.raw_name.as_str()).collect();
        assert_eq!(names, vec!["os", "pkg.sub", "c"]);
        assert_eq!(stmts[0].sites[1].context(), "import pkg.sub", "alias is not repeated");
    }

    // Test 3: absolute from-import
    #[test]
    fn test_from_import_absolute() {
        let stmts = extract("x = 1\nfrom pkg.sub import x, y as z\n");
        assert_eq!(stmts.len(), 1);
        let site = &stmts[0].sites[0];
        assert_eq!(site.kind, ImportKind::ImportFrom);
        assert_eq!(site.raw_name, "pkg.sub");
        assert_eq!(site.level, 0);
        assert_eq!(site.line, 2);
        assert_eq!(site.imported_symbols, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(site.context(), "from pkg.sub import x, y");
    }

    // Test 4: relative from-import keeps its dot count
    #[test]
    fn test_from_import_relative_levels() {
        let stmts = extract("from .sibling import a\nfrom ..parent.mod import b\n");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].sites[0].level, 1);
        assert_eq!(stmts[0].sites[0].raw_name, "sibling");
        assert_eq!(stmts[1].sites[0].level, 2);
        assert_eq!(stmts[1].sites[0].raw_name, "parent.mod");
        assert_eq!(stmts[1].sites[0].context(), "from ..parent.mod import b");
    }

    // Test 5: from-import without a module name is skipped entirely
    #[test]
    fn test_from_dot_import_is_skipped() {
        let stmts = extract("from . import c\nfrom .. import d, e\n");
        assert!(stmts.is_empty(), "got {:?}", stmts);
    }

    // Test 6: wildcard and parenthesized lists
    #[test]
    fn test_wildcard_and_parenthesized() {
        let src = "from helpers import *\nfrom models import (\n    User,\n    Group,\n)\n";
        let stmts = extract(src);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].sites[0].imported_symbols, vec!["*".to_string()]);
        assert_eq!(stmts[0].sites[0].context(), "from helpers import *");
        assert_eq!(
            stmts[1].sites[0].imported_symbols,
            vec!["User".to_string(), "Group".to_string()]
        );
        assert_eq!(stmts[1].line, 2);
    }

    // Test 7: nested imports are found, after module-level ones
    #[test]
    fn test_nested_imports_come_after_top_level() {
        let src = "\
def load():
    import late
    return late

try:
    import optional
except ImportError:
    optional = None

import early
";
        let stmts = extract(src);
        let names: Vec<_> = stmts.iter().map(|s| s.sites[0].raw_name.as_str()).collect();
        assert_eq!(names, vec!["early", "late", "optional"]);
        assert_eq!(stmts[0].line, 10);
        assert_eq!(stmts[1].line, 2);
    }

    // Test 8: imports inside class bodies and conditionals
    #[test]
    fn test_imports_in_class_and_if() {
        let src = "\
class Repo:
    from store import backend

if TYPE_CHECKING:
    from typing_ext import Protocol
";
        let stmts = extract(src);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].kind, ImportKind::ImportFrom);
        assert_eq!(stmts[0].sites[0].raw_name, "store");
        assert_eq!(stmts[1].sites[0].raw_name, "typing_ext");
    }

    // Test 9: __future__ imports are not dependencies
    #[test]
    fn test_future_import_ignored() {
        let stmts = extract("from __future__ import annotations\nimport b\n");
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].sites[0].raw_name, "b");
    }

    // Test 10: no imports at all
    #[test]
    fn test_no_imports() {
        assert!(extract("def f():\n    return 42\n").is_empty());
    }

    fn lines(stmts: &[ImportStatement]) -> Vec<usize> {
        stmts.iter().map(|s| s.line).collect()
    }

    // Test 11: an except handler is one level deeper than a function body
    #[test]
    fn test_except_handler_after_function_body() {
        let src = "try:\n    pass\nexcept ImportError:\n    import b\n\ndef f():\n    import b\n";
        assert_eq!(lines(&extract(src)), vec![7, 4]);
    }

    // Test 12: each elif nests one level further than the last
    #[test]
    fn test_elif_chain_depth() {
        let src = "if x:\n    pass\nelif y:\n    import c\n\ndef f():\n    import b\n";
        let names: Vec<_> = extract(src)
            .iter()
            .map(|s| s.sites[0].raw_name.clone())
            .collect();
        assert_eq!(names, vec!["b", "c"]);

        let src = "\
if a:
    import one
elif b:
    import two
elif c:
    import three
else:
    import four

try:
    pass
except ValueError:
    import five
";
        // one: 1, two: 2, three: 3, four: 3 (after two elifs), five: 2
        assert_eq!(lines(&extract(src)), vec![2, 4, 13, 6, 8]);
    }

    // Test 13: the if-body and a plain else stay level with a function body
    #[test]
    fn test_if_else_and_match_case_depth() {
        let src = "\
if x:
    import a
else:
    import b

match cmd:
    case 1:
        import c

def f():
    import d
";
        // a, b and d are one level down; a case body is two (match, then case).
        assert_eq!(lines(&extract(src)), vec![2, 4, 11, 8]);
    }
}
