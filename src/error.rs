//! Errors returned when loading an instance from disk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::instance::ValidationError;
use crate::parser::ParseError;

/// Failure while reading, parsing or validating instance files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// The file the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => Some(path),
            LoadError::Validation(_) => None,
        }
    }
}
