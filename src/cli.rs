use std::path::PathBuf;

use clap::Parser;

/// Python dependency analyzer plugin.
///
/// Reads an analysis request (changed files, project files, project root) as JSON on stdin
/// and writes the resolved file-to-file import edges as JSON on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "python-analyzer",
    version,
    about,
    long_about = None,
)]
pub struct Cli {
    /// Read the request from this file instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Configuration file (defaults to `python-analyzer.toml` under the project root).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report files that fail to parse in the response's `errors` instead of skipping them silently.
    #[arg(long)]
    pub report_parse_errors: bool,

    /// Emit an edge for every module of `import a, b, c`, not only the first that resolves.
    #[arg(long)]
    pub all_aliases: bool,

    /// Write the response as a single JSON line instead of indented JSON.
    #[arg(long)]
    pub compact: bool,

    /// Enable debug logging on stderr (`RUST_LOG` takes precedence).
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the plugin manifest (`plugin.json`) and exit.
    #[arg(long, exclusive = true)]
    pub manifest: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_plugin_mode() {
        let cli = Cli::try_parse_from(["python-analyzer"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.report_parse_errors);
        assert!(!cli.all_aliases);
        assert!(!cli.compact);
        assert!(!cli.manifest);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "python-analyzer",
            "--input",
            "req.json",
            "--report-parse-errors",
            "--all-aliases",
            "--compact",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("req.json")));
        assert!(cli.report_parse_errors);
        assert!(cli.all_aliases);
        assert!(cli.compact);
        assert!(cli.verbose);
    }

    #[test]
    fn test_manifest_is_exclusive() {
        assert!(Cli::try_parse_from(["python-analyzer", "--manifest"]).is_ok());
        assert!(Cli::try_parse_from(["python-analyzer", "--manifest", "--compact"]).is_err());
    }
}
