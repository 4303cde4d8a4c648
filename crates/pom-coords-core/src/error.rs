//! Errors raised while extracting coordinates from a pom.xml.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoordsError {
    #[error("Failed to parse XML: {message}")]
    Parse { message: String },

    #[error("Expected a <project> root element, found <{root}>")]
    MissingProject { root: String },

    #[error("Missing <{field}> in {path} after effective-pom resolution")]
    MissingField {
        field: &'static str,
        path: PathBuf,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    #[error("Effective POM output {path} is the POM being resolved")]
    OutputIsInput { path: PathBuf },

    #[error("Maven did not finish within {timeout:?}")]
    MavenTimeout { timeout: Duration },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoordsError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoordsError>;
