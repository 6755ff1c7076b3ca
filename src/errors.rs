use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by [`Tree`](crate::tree::Tree) operations.
///
/// "Not found" is never an error: lookups return `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Settings could not be read, parsed or serialized.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("config error: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
