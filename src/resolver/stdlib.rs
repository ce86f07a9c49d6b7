use std::collections::HashSet;

/// Root names of standard-library modules that never resolve to a project file.
///
/// This is a denylist, not a model of Python's import order. It is known to be incomplete:
/// a less common stdlib module missing here is treated as a project module (and only yields
/// an edge if a matching file exists), and a project package that shares a root name with
/// an entry here is shadowed. Both cases are adjustable per project through the `[stdlib]`
/// table in `python-analyzer.toml`.
pub const BUILTIN_STDLIB_MODULES: &[&str] = &[
    "__future__",
    "abc",
    "argparse",
    "array",
    "ast",
    "asyncio",
    "atexit",
    "base64",
    "bisect",
    "builtins",
    "bz2",
    "calendar",
    "cmath",
    "codecs",
    "collections",
    "concurrent",
    "configparser",
    "contextlib",
    "contextvars",
    "copy",
    "csv",
    "ctypes",
    "dataclasses",
    "datetime",
    "decimal",
    "difflib",
    "email",
    "enum",
    "errno",
    "fnmatch",
    "fractions",
    "functools",
    "gc",
    "getpass",
    "glob",
    "gzip",
    "hashlib",
    "heapq",
    "hmac",
    "html",
    "http",
    "importlib",
    "inspect",
    "io",
    "ipaddress",
    "itertools",
    "json",
    "locale",
    "logging",
    "lzma",
    "math",
    "mimetypes",
    "multiprocessing",
    "numbers",
    "operator",
    "os",
    "pathlib",
    "pickle",
    "platform",
    "pprint",
    "queue",
    "random",
    "re",
    "secrets",
    "select",
    "shlex",
    "shutil",
    "signal",
    "socket",
    "sqlite3",
    "ssl",
    "stat",
    "statistics",
    "string",
    "struct",
    "subprocess",
    "sys",
    "tarfile",
    "tempfile",
    "textwrap",
    "threading",
    "time",
    "timeit",
    "traceback",
    "types",
    "typing",
    "unicodedata",
    "unittest",
    "urllib",
    "uuid",
    "warnings",
    "weakref",
    "xml",
    "zipfile",
    "zlib",
    "zoneinfo",
];

/// The effective stdlib denylist for one run: the built-in table plus per-project overrides.
#[derive(Debug, Clone)]
pub struct StdlibTable {
    names: HashSet<String>,
}

impl Default for StdlibTable {
    fn default() -> Self {
        Self {
            names: BUILTIN_STDLIB_MODULES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl StdlibTable {
    /// Built-in table, then `extra` added, then `allow` removed.
    ///
    /// `allow` wins over `extra` when a name appears in both.
    pub fn with_overrides(extra: &[String], allow: &[String]) -> Self {
        let mut table = Self::default();
        table.names.extend(extra.iter().cloned());
        for name in allow {
            table.names.remove(name);
        }
        table
    }

    /// True when the root component (text before the first dot) of `module_name` is listed.
    pub fn is_stdlib(&self, module_name: &str) -> bool {
        let root = module_name.split('.').next().unwrap_or(module_name);
        self.names.contains(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_component_is_checked() {
        let table = StdlibTable::default();
        assert!(table.is_stdlib("os"));
        assert!(table.is_stdlib("os.path"));
        assert!(table.is_stdlib("xml.etree.ElementTree"));
        assert!(!table.is_stdlib("myapp.os"));
        assert!(!table.is_stdlib("osmosis"));
    }

    #[test]
    fn test_third_party_is_not_stdlib() {
        let table = StdlibTable::default();
        assert!(!table.is_stdlib("requests"));
        assert!(!table.is_stdlib("numpy.linalg"));
    }

    #[test]
    fn test_overrides() {
        let table = StdlibTable::with_overrides(
            &["attr".to_string(), "logging".to_string()],
            &["logging".to_string()],
        );
        assert!(table.is_stdlib("attr.validators"), "extra names are denied");
        assert!(!table.is_stdlib("logging"), "allow removes a built-in name");
        assert!(table.is_stdlib("json"), "other built-ins survive");
    }
}
