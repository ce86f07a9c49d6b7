use std::path::Path;
use std::time::Instant;

use thiserror::Error;

use crate::graph::DependencySet;
use crate::graph::edge::DependencyEdge;
use crate::language::is_source_file;
use crate::output::AnalysisResult;
use crate::parser::imports::ImportStatement;
use crate::parser::{ParseError, PythonParser};
use crate::request::AnalysisRequest;
use crate::resolver::{ModuleResolver, StdlibTable};
use crate::universe::{FileUniverse, normalize_path};

/// How a plain import naming several modules (`import a, b, c`) becomes edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasMode {
    /// Try the aliases in order; the first one that resolves is the statement's only edge.
    #[default]
    FirstMatch,
    /// Every alias that resolves produces an edge.
    All,
}

/// Knobs for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    pub alias_mode: AliasMode,
    /// Append per-file parse failures to `errors` instead of skipping them silently.
    pub report_parse_errors: bool,
    pub stdlib: StdlibTable,
}

/// A fault outside per-file isolation. Ends the file loop; edges gathered so far are kept.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("{0}")]
    Parser(#[from] ParseError),
}

/// Single-shot dependency analysis over one request.
///
/// Pipeline: universe -> classify -> parse -> extract -> resolve -> dedup -> assemble.
pub struct Analyzer {
    options: AnalyzerOptions,
    started: Instant,
}

impl Analyzer {
    /// Starts the clock reported as `analysisTime`.
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            options,
            started: Instant::now(),
        }
    }

    /// Analyze every changed source file of `request`, anchored at `project_root`.
    ///
    /// Never fails: per-file problems skip that file, and a run-level fault is recorded in
    /// `errors` alongside whatever edges were found before it.
    pub fn analyze(&self, request: &AnalysisRequest, project_root: &Path) -> AnalysisResult {
        let universe = FileUniverse::build(&request.changed_files, &request.project_files);
        let files_analyzed = universe.source_file_count();

        if files_analyzed == 0 {
            tracing::debug!(
                files = universe.len(),
                "no Python source files in request, nothing to analyze"
            );
            return self.assemble(DependencySet::new(), 0, Vec::new());
        }

        let resolver = ModuleResolver::new(&universe, project_root, self.options.stdlib.clone());
        let mut dependencies = DependencySet::new();
        let mut errors = Vec::new();

        if let Err(err) = self.analyze_changed(
            request,
            &universe,
            &resolver,
            &mut dependencies,
            &mut errors,
        ) {
            tracing::error!("analysis aborted: {err}");
            errors.push(format!("Analysis error: {err}"));
        }

        tracing::debug!(
            edges = dependencies.len(),
            files = files_analyzed,
            errors = errors.len(),
            "analysis finished"
        );
        self.assemble(dependencies, files_analyzed, errors)
    }

    /// The file loop. Per-file parse failures are contained here; anything returned as `Err`
    /// is a run-level fault.
    fn analyze_changed(
        &self,
        request: &AnalysisRequest,
        universe: &FileUniverse,
        resolver: &ModuleResolver,
        dependencies: &mut DependencySet,
        errors: &mut Vec<String>,
    ) -> Result<(), AnalyzerError> {
        let mut parser = PythonParser::new()?;

        for record in &request.changed_files {
            if !is_source_file(&record.path) {
                continue;
            }

            let from = normalize_path(&record.path);
            // The universe holds the winning record when a path was sent more than once.
            let content = universe
                .get(&from)
                .map_or(record.content.as_str(), |r| r.content.as_str());

            let statements = match parser.parse_imports(&from, content) {
                Ok(statements) => statements,
                Err(err @ ParseError::Language(_)) => return Err(err.into()),
                Err(err) => {
                    tracing::debug!(file = %from, "skipping file: {err}");
                    if self.options.report_parse_errors {
                        errors.push(format!("Parse error in {from}: {err}"));
                    }
                    continue;
                }
            };

            tracing::debug!(file = %from, statements = statements.len(), "extracted imports");
            for statement in &statements {
                tracing::trace!(
                    file = %from,
                    line = statement.line,
                    kind = ?statement.kind,
                    modules = statement.sites.len(),
                    "import statement"
                );
                dependencies.extend(self.statement_edges(statement, &from, resolver));
            }
        }

        Ok(())
    }

    /// Edges contributed by one statement, honoring the alias mode.
    fn statement_edges(
        &self,
        statement: &ImportStatement,
        from: &str,
        resolver: &ModuleResolver,
    ) -> Vec<DependencyEdge> {
        let resolved = statement.sites.iter().filter_map(|site| {
            resolver
                .resolve(&site.raw_name, site.level, from)
                .into_path()
                .map(|to| DependencyEdge::new(from, to, site.kind.into(), site.line, site.context()))
        });

        match self.options.alias_mode {
            AliasMode::FirstMatch => resolved.take(1).collect(),
            AliasMode::All => resolved.collect(),
        }
    }

    fn assemble(
        &self,
        dependencies: DependencySet,
        files_analyzed: usize,
        errors: Vec<String>,
    ) -> AnalysisResult {
        AnalysisResult {
            dependencies: dependencies.into_edges(),
            files_analyzed,
            analysis_time_millis: self.started.elapsed().as_millis(),
            errors,
        }
    }
}
