use tree_sitter::Language;

/// Return the tree-sitter [`Language`] used for every recognized source file.
///
/// # Grammar selection rules
/// - `.py`  -> Python grammar (`LANGUAGE`)
/// - `.pyi` -> Python grammar as well. Stubs are syntactically plain Python; their `...`
///   bodies and annotations parse without a dedicated grammar.
pub fn python_language() -> Language {
    tree_sitter_python::LANGUAGE.into()
}
