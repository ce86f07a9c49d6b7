pub mod stdlib;

pub use stdlib::StdlibTable;

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::language::{PACKAGE_MARKER, SourceKind};
use crate::universe::FileUniverse;

/// The outcome of resolving a single module reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Resolved to a file in the universe. Holds its `/`-separated project-relative path.
    Resolved(String),
    /// The root component is on the stdlib denylist. Never looked up.
    Stdlib,
    /// No candidate file exists in the universe, or every candidate fell outside the root.
    Unresolved,
}

impl ResolutionOutcome {
    pub fn into_path(self) -> Option<String> {
        match self {
            ResolutionOutcome::Resolved(path) => Some(path),
            ResolutionOutcome::Stdlib | ResolutionOutcome::Unresolved => None,
        }
    }
}

/// Maps module references onto files in a [`FileUniverse`].
///
/// Resolution is conservative: it only reports a match when a concrete file in the
/// universe exists, so it can never point an edge at a file the host did not send.
pub struct ModuleResolver<'a> {
    universe: &'a FileUniverse,
    project_root: PathBuf,
    stdlib: StdlibTable,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(universe: &'a FileUniverse, project_root: &Path, stdlib: StdlibTable) -> Self {
        Self {
            universe,
            project_root: normalize_lexically(project_root),
            stdlib,
        }
    }

    /// Resolve `raw_name` (written with `level` leading dots) as imported from `from_file`.
    ///
    /// Candidates are probed in order and the first one present in the universe wins:
    ///
    /// 1. `<base>.py`
    /// 2. `<base>/__init__.py`
    /// 3. `<base>.pyi`
    ///
    /// where `<base>` is `project_root/raw/name` for absolute imports, or the directory of
    /// `from_file` raised by `level - 1` parents for relative ones.
    pub fn resolve(&self, raw_name: &str, level: usize, from_file: &str) -> ResolutionOutcome {
        if self.stdlib.is_stdlib(raw_name) {
            tracing::trace!(from = from_file, module = raw_name, "stdlib module, skipping");
            return ResolutionOutcome::Stdlib;
        }

        let Some(base) = self.base_path(raw_name, level, from_file) else {
            tracing::trace!(
                from = from_file,
                module = raw_name,
                level,
                "relative import climbs above the project root"
            );
            return ResolutionOutcome::Unresolved;
        };

        for candidate in candidates(&base) {
            // A candidate outside the project root is simply not a match.
            let Some(key) = self.relative_key(&candidate) else {
                continue;
            };
            if self.universe.contains(&key) {
                tracing::trace!(from = from_file, module = raw_name, to = %key, "resolved");
                return ResolutionOutcome::Resolved(key);
            }
        }

        tracing::trace!(from = from_file, module = raw_name, level, "no matching file");
        ResolutionOutcome::Unresolved
    }

    /// Directory-plus-module path that the candidate extensions are appended to.
    fn base_path(&self, raw_name: &str, level: usize, from_file: &str) -> Option<PathBuf> {
        let module: PathBuf = raw_name.split('.').collect();

        if level == 0 {
            return Some(self.project_root.join(module));
        }

        // Level 1 is the package containing `from_file`; each extra dot climbs one parent.
        let from_dir = Path::new(from_file).parent().unwrap_or(Path::new(""));
        let mut dir = normalize_lexically(&self.project_root.join(from_dir));
        for _ in 1..level {
            if !dir.pop() {
                return None;
            }
        }
        Some(dir.join(module))
    }

    /// Universe key for `candidate`, or `None` when it does not sit under the project root.
    fn relative_key(&self, candidate: &Path) -> Option<String> {
        let normalized = normalize_lexically(candidate);
        let relative = normalized.strip_prefix(&self.project_root).ok()?;

        let parts = relative
            .components()
            .map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<&str>>>()?;

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

/// Candidate files for `base`, in probe order.
fn candidates(base: &Path) -> [PathBuf; 3] {
    [
        with_extension_appended(base, SourceKind::Module),
        base.join(PACKAGE_MARKER),
        with_extension_appended(base, SourceKind::Stub),
    ]
}

/// `base` + `.ext`. Unlike `Path::with_extension`, never replaces part of a dotted name.
fn with_extension_appended(base: &Path, kind: SourceKind) -> PathBuf {
    let mut raw = OsString::from(base.as_os_str());
    raw.push(".");
    raw.push(kind.extension());
    PathBuf::from(raw)
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the root of an absolute path is dropped (as `/..` is `/`); at the start of a
/// relative path it is kept.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
