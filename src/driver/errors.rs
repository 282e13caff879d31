//! Error types for driving the analyzer over files
//!
//! [`DriverError`] is scoped to a single source unit: the driver records it
//! and moves on to the next unit instead of aborting the run.

use crate::parser::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to analyze one source unit or to locate source units
#[derive(Debug, Error)]
pub enum DriverError {
    /// Reading a source or writing an artifact failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source text was rejected by the lexer or parser
    #[error("{}: {source}", .path.display())]
    Analyze {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A path that is neither a `.jack` file nor a directory
    #[error("{}: not a .jack file or directory", .0.display())]
    NotASource(PathBuf),

    /// Two units of one run map to the same artifact path
    #[error(
        "{}: artifact {} was already written for {}",
        .path.display(),
        .artifact.display(),
        .previous.display()
    )]
    OutputCollision {
        path: PathBuf,
        artifact: PathBuf,
        previous: PathBuf,
    },

    /// A directory without any `.jack` files
    #[error("{}: no .jack files found", .0.display())]
    NoSources(PathBuf),
}

impl DriverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DriverError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;
