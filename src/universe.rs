use std::collections::HashMap;

use crate::language::is_source_file;
use crate::request::FileRecord;

/// Normalize a request path into a universe key.
///
/// - `\` separators become `/`
/// - empty and `.` segments are dropped (so `./pkg//a.py` becomes `pkg/a.py`)
/// - `..` pops the previous segment; a leading `..` that cannot be popped is kept
/// - a leading `/` (absolute path) is preserved
pub fn normalize_path(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

/// Every file known to this run, keyed by normalized project-relative path.
///
/// Built once per run and used for O(1) existence checks during resolution.
#[derive(Debug, Default)]
pub struct FileUniverse {
    files: HashMap<String, FileRecord>,
}

impl FileUniverse {
    /// Merge project files and changed files into one map.
    ///
    /// Project files go in first, changed files second: a changed file's record wins when
    /// both sets carry the same path.
    pub fn build(changed: &[FileRecord], project: &[FileRecord]) -> Self {
        let mut files = HashMap::with_capacity(changed.len() + project.len());
        for record in project.iter().chain(changed) {
            files.insert(normalize_path(&record.path), record.clone());
        }
        Self { files }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&FileRecord> {
        self.files.get(key)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Number of distinct source files in the universe (the `filesAnalyzed` figure).
    pub fn source_file_count(&self) -> usize {
        self.files.keys().filter(|k| is_source_file(k)).count()
    }
}
