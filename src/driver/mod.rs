//! Per-unit driver
//!
//! Finds `.jack` source units, runs the analyzer on each one, and writes one
//! XML artifact per unit. Each unit gets its own lexer, parser, and emitter,
//! and its artifact is built fully in memory: a unit that fails never leaves a
//! partial file behind, and never stops the remaining units from running.

pub mod errors;

pub use errors::{DriverError, DriverResult};

use crate::emitter::{self, Layout};
use crate::parser::{self, Lexer, ParseError};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension of analyzable source files
pub const SOURCE_EXTENSION: &str = "jack";

/// Extension of written artifacts
pub const ARTIFACT_EXTENSION: &str = "xml";

/// Which artifact to produce for a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// The full parse tree (`Foo.xml`)
    #[default]
    Tree,
    /// The flat token stream (`FooT.xml`)
    Tokens,
}

/// Options shared by every unit of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub output: OutputKind,
    pub layout: Layout,
    /// Directory for artifacts; next to each source when `None`
    pub out_dir: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Artifact path for `source`: `Foo.jack` → `Foo.xml` or `FooT.xml`.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match self.output {
            OutputKind::Tree => format!("{}.{}", stem, ARTIFACT_EXTENSION),
            OutputKind::Tokens => format!("{}T.{}", stem, ARTIFACT_EXTENSION),
        };

        match &self.out_dir {
            Some(dir) => dir.join(name),
            None => source.with_file_name(name),
        }
    }
}

/// Outcome of a multi-unit run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Artifacts written, in processing order
    pub written: Vec<PathBuf>,
    /// Units (or input paths) that failed
    pub failures: Vec<DriverError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Analyze one unit's source text and return the complete artifact.
pub fn analyze_source(source: &str, config: &AnalyzerConfig) -> Result<String, ParseError> {
    match config.output {
        OutputKind::Tree => {
            let tree = parser::parse_source(source)?;
            Ok(emitter::render_tree(&tree, config.layout))
        }
        OutputKind::Tokens => {
            let tokens = Lexer::new(source).tokenize()?;
            Ok(emitter::render_tokens(&tokens, config.layout))
        }
    }
}

/// Resolve an input path to the source units it names.
///
/// A `.jack` file names itself; a directory names the `.jack` files directly
/// inside it, sorted by file name.
pub fn collect_sources(path: &Path) -> DriverResult<Vec<PathBuf>> {
    if path.is_dir() {
        let mut sources = Vec::new();
        let entries = fs::read_dir(path).map_err(|e| DriverError::io(path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| DriverError::io(path, e))?;
            let candidate = entry.path();
            if candidate.is_file() && is_source(&candidate) {
                sources.push(candidate);
            }
        }

        if sources.is_empty() {
            return Err(DriverError::NoSources(path.to_path_buf()));
        }
        sources.sort();
        Ok(sources)
    } else if is_source(path) {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(DriverError::NotASource(path.to_path_buf()))
    }
}

/// Analyze the unit at `path` and write its artifact, returning the artifact path.
pub fn analyze_file(path: &Path, config: &AnalyzerConfig) -> DriverResult<PathBuf> {
    debug!(source = %path.display(), "analyzing");

    let source = fs::read_to_string(path).map_err(|e| DriverError::io(path, e))?;
    let artifact = analyze_source(&source, config).map_err(|e| DriverError::Analyze {
        path: path.to_path_buf(),
        source: e,
    })?;

    let output = config.output_path(path);
    if let Some(dir) = &config.out_dir {
        fs::create_dir_all(dir).map_err(|e| DriverError::io(dir, e))?;
    }
    fs::write(&output, artifact).map_err(|e| DriverError::io(&output, e))?;

    info!(source = %path.display(), artifact = %output.display(), "wrote artifact");
    Ok(output)
}

/// Analyze every unit named by `inputs`, continuing past failures.
///
/// A unit whose artifact path was already written earlier in the run fails
/// with [`DriverError::OutputCollision`] instead of overwriting it.
pub fn run(inputs: &[PathBuf], config: &AnalyzerConfig) -> RunReport {
    let mut report = RunReport::default();
    // artifact path -> source that produced it
    let mut claimed: FxHashMap<PathBuf, PathBuf> = FxHashMap::default();

    for input in inputs {
        let sources = match collect_sources(input) {
            Ok(sources) => sources,
            Err(err) => {
                debug!(input = %input.display(), "{}", err);
                report.failures.push(err);
                continue;
            }
        };

        for source in sources {
            let artifact = config.output_path(&source);
            if let Some(previous) = claimed.get(&artifact) {
                let err = DriverError::OutputCollision {
                    path: source,
                    artifact,
                    previous: previous.clone(),
                };
                debug!("{}", err);
                report.failures.push(err);
                continue;
            }

            match analyze_file(&source, config) {
                Ok(output) => {
                    claimed.insert(output.clone(), source);
                    report.written.push(output);
                }
                Err(err) => {
                    debug!("{}", err);
                    report.failures.push(err);
                }
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "analysis finished"
    );
    report
}

fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
