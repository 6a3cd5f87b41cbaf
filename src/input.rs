#![forbid(unsafe_code)]

//! Resolving and reading the input file

use crate::error::AppError;
use crate::signal::CancelToken;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Positional argument meaning "standard input"
pub const STDIN_SENTINEL: &str = "-";

/// Where the content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Resolves the optional positional argument
    ///
    /// Absent or `-` selects stdin. Anything else must be a regular file
    /// (symlinks are followed); otherwise this is a usage error.
    pub fn resolve(arg: Option<&Path>) -> Result<Source, AppError> {
        match arg {
            None => Ok(Source::Stdin),
            Some(path) if path.as_os_str() == STDIN_SENTINEL => Ok(Source::Stdin),
            Some(path) => match fs::metadata(path) {
                Ok(meta) if meta.is_file() => Ok(Source::File(path.to_path_buf())),
                _ => Err(AppError::NotARegularFile(path.to_path_buf())),
            },
        }
    }

    /// Name shown in the header
    pub fn display_name(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    /// Argument handed to `stat`
    pub fn stat_target(&self) -> OsString {
        match self {
            Source::Stdin => OsString::from(STDIN_SENTINEL),
            Source::File(path) => path.clone().into_os_string(),
        }
    }

    /// Reads the whole source as text, replacing invalid UTF-8
    pub fn read(&self, token: &CancelToken) -> Result<String, AppError> {
        let bytes = match self {
            Source::Stdin => token
                .run(|| {
                    let mut buf = Vec::new();
                    io::stdin().lock().read_to_end(&mut buf).map(|_| buf)
                })?
                .map_err(|e| AppError::io("reading standard input", e))?,
            Source::File(path) => fs::read(path)
                .map_err(|e| AppError::io(format!("reading '{}'", path.display()), e))?,
        };

        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}
