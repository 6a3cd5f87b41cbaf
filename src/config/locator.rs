#![forbid(unsafe_code)]

//! Config file discovery
//!
//! Candidates are checked in order and the first existing regular file wins:
//!
//! 1. `$STATCAT_CFG`
//! 2. `./.statcat.toml`
//! 3. `$XDG_CONFIG_HOME/statcat/config.toml`
//! 4. `$HOME/.config/statcat/config.toml`
//! 5. `$HOME/.statcat.toml`

use crate::error::AppError;
use directories::BaseDirs;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "STATCAT_CFG";

/// File name looked up in the working and home directories
pub const DOTFILE_NAME: &str = ".statcat.toml";

/// Directory name under the XDG config home
pub const APP_DIR_NAME: &str = "statcat";

/// File name inside the XDG application directory
pub const XDG_FILE_NAME: &str = "config.toml";

/// Where a candidate path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    EnvOverride,
    WorkingDir,
    XdgConfigHome,
    XdgFallback,
    Home,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateKind::EnvOverride => CONFIG_ENV_VAR,
            CandidateKind::WorkingDir => "working directory",
            CandidateKind::XdgConfigHome => "XDG_CONFIG_HOME",
            CandidateKind::XdgFallback => "~/.config",
            CandidateKind::Home => "home directory",
        };
        f.write_str(label)
    }
}

/// A path that may hold the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub path: PathBuf,
}

/// Inputs to the config search
///
/// Holding these in a value keeps the search independent of the process
/// environment, so it can be driven from tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEnv {
    pub cwd: Option<PathBuf>,
    pub override_path: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl SearchEnv {
    /// Captures the search inputs from the running process
    pub fn from_process() -> Self {
        SearchEnv {
            cwd: std::env::current_dir().ok(),
            override_path: non_empty(std::env::var_os(CONFIG_ENV_VAR)).map(PathBuf::from),
            xdg_config_home: non_empty(std::env::var_os("XDG_CONFIG_HOME"))
                .map(PathBuf::from)
                .filter(|path| path.is_absolute()),
            home: BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
        }
    }

    /// All candidate paths, highest precedence first
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(5);

        if let Some(path) = &self.override_path {
            candidates.push(Candidate {
                kind: CandidateKind::EnvOverride,
                path: path.clone(),
            });
        }
        if let Some(cwd) = &self.cwd {
            candidates.push(Candidate {
                kind: CandidateKind::WorkingDir,
                path: cwd.join(DOTFILE_NAME),
            });
        }
        if let Some(xdg) = &self.xdg_config_home {
            candidates.push(Candidate {
                kind: CandidateKind::XdgConfigHome,
                path: xdg.join(APP_DIR_NAME).join(XDG_FILE_NAME),
            });
        }
        if let Some(home) = &self.home {
            candidates.push(Candidate {
                kind: CandidateKind::XdgFallback,
                path: home.join(".config").join(APP_DIR_NAME).join(XDG_FILE_NAME),
            });
            candidates.push(Candidate {
                kind: CandidateKind::Home,
                path: home.join(DOTFILE_NAME),
            });
        }

        candidates
    }

    /// Returns the first candidate that is an existing regular file
    pub fn locate(&self) -> Option<Candidate> {
        self.candidates()
            .into_iter()
            .find(|candidate| candidate.path.is_file())
    }

    /// Path that `--generate-cfg` writes to
    ///
    /// The override wins if set; otherwise the XDG location, falling back to
    /// `~/.config`.
    pub fn generate_target(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.override_path {
            return Ok(path.clone());
        }
        if let Some(xdg) = &self.xdg_config_home {
            return Ok(xdg.join(APP_DIR_NAME).join(XDG_FILE_NAME));
        }
        self.home
            .as_deref()
            .map(|home| home.join(".config").join(APP_DIR_NAME).join(XDG_FILE_NAME))
            .ok_or(AppError::NoConfigLocation)
    }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}
