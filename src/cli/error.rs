//! CLI-level errors (wraps tree and settings errors)

use thiserror::Error;

use crate::errors::{SettingsError, TreeError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Tree(TreeError::InvalidArgument(_)) => crate::exitcode::DATAERR,
            CliError::Tree(TreeError::InvalidState(_)) => crate::exitcode::SOFTWARE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_each_error_kind_then_maps_to_sysexits_code() {
        let state = CliError::from(TreeError::InvalidState("empty".into()));
        let arg = CliError::from(TreeError::InvalidArgument("stale".into()));
        let settings = CliError::from(SettingsError::Invalid("nope".into()));
        let io = CliError::io("stdin", std::io::Error::other("closed"));

        assert_eq!(arg.exit_code(), 65);
        assert_eq!(state.exit_code(), 70);
        assert_eq!(io.exit_code(), 74);
        assert_eq!(settings.exit_code(), 78);
    }
}
