#![forbid(unsafe_code)]

//! Error type shared by every pipeline stage

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for a successful run (also help, version and generate-cfg)
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for runtime failures
pub const EXIT_ERROR: i32 = 1;
/// Exit status for usage errors
pub const EXIT_USAGE: i32 = 2;

/// Errors that end a run
#[derive(Debug, Error)]
pub enum AppError {
    /// The positional argument does not name a regular file
    #[error("'{}': no such file or not a regular file", .0.display())]
    NotARegularFile(PathBuf),

    /// An I/O operation failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML
    #[error("syntax error in config file '{}': {message}", path.display())]
    ConfigSyntax { path: PathBuf, message: String },

    /// The merged `color` preference is not a recognized value
    #[error("invalid color option '{0}' (expected never, always or auto)")]
    InvalidColor(String),

    /// `--generate-cfg` refuses to overwrite an existing file
    #[error("config file '{}' already exists", .0.display())]
    ConfigExists(PathBuf),

    /// Neither an override nor a home directory is available for `--generate-cfg`
    #[error("cannot determine where to write the config file (set STATCAT_CFG or HOME)")]
    NoConfigLocation,

    /// A required external program could not be started
    #[error("required program '{0}' was not found in PATH")]
    MissingDependency(String),

    /// The external command ran but exited unsuccessfully
    #[error("'{command}' failed ({status})")]
    CommandFailed { command: String, status: String },

    /// A SIGINT or SIGTERM arrived
    #[error("interrupted")]
    Interrupted,
}

impl AppError {
    /// Wraps an I/O error with a short description of what was being done
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        AppError::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::NotARegularFile(_) => EXIT_USAGE,
            AppError::Interrupted => EXIT_SUCCESS,
            _ => EXIT_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            AppError::NotARegularFile(PathBuf::from("missing")).exit_code(),
            EXIT_USAGE
        );
        assert_eq!(AppError::InvalidColor("blue".into()).exit_code(), EXIT_ERROR);
        assert_eq!(
            AppError::MissingDependency("stat".into()).exit_code(),
            EXIT_ERROR
        );
        assert_eq!(AppError::Interrupted.exit_code(), EXIT_SUCCESS);
    }

    #[test]
    fn test_messages_name_the_subject() {
        let err = AppError::ConfigSyntax {
            path: PathBuf::from("/tmp/x.toml"),
            message: "expected `=`".into(),
        };
        assert!(err.to_string().contains("/tmp/x.toml"));
        assert!(err.to_string().contains("expected `=`"));

        let err = AppError::io("reading 'a.txt'", io::Error::other("boom"));
        assert_eq!(err.to_string(), "reading 'a.txt': boom");
    }
}
