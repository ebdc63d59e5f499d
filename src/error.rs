//! Error taxonomy for a substitution run.
//!
//! Configuration problems abort before any I/O, fetch and decode problems
//! abort the run, and per-file problems are collected into the run report.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubstituteError {
    /// Bad flags, config file, or environment overrides.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown placeholder format '{0}' (expected one of: dollar, dollar-curly, handlebars, dollar-handlebars)")]
    UnknownFormat(String),

    /// Network failure or a non-2xx response from the secrets endpoint.
    #[error("failed to fetch secrets: {0}")]
    Fetch(String),

    /// The secrets payload could not be decoded into a name/value mapping.
    #[error("failed to decode secrets payload: {0}")]
    Decode(String),

    /// Read or write failure on a single file.
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SubstituteError {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SubstituteError::File {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SubstituteError>;
