#![forbid(unsafe_code)]

//! Invocation of the external `stat` command

use crate::error::AppError;
use crate::output::presenter::Presenter;
use crate::prefs::Category;
use crate::signal::CancelToken;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Output, Stdio};
use termcolor::WriteColor;

/// Program run for metadata
pub const STAT_PROGRAM: &str = "stat";

/// A shell-free command line: program plus one target argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCommand {
    program: OsString,
    target: OsString,
}

impl StatCommand {
    /// `stat <target>`
    pub fn new(target: impl Into<OsString>) -> Self {
        Self::with_program(STAT_PROGRAM, target)
    }

    /// Same shape with a different program
    pub fn with_program(program: impl Into<OsString>, target: impl Into<OsString>) -> Self {
        StatCommand {
            program: program.into(),
            target: target.into(),
        }
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(&self.target)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl fmt::Display for StatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.program.to_string_lossy(),
            self.target.to_string_lossy()
        )
    }
}

/// Runs (or, in dry-run mode, only shows) a [`StatCommand`]
pub struct StatRunner<'a> {
    presenter: &'a Presenter<'a>,
    dry_run: bool,
}

impl<'a> StatRunner<'a> {
    pub fn new(presenter: &'a Presenter<'a>, dry_run: bool) -> Self {
        StatRunner { presenter, dry_run }
    }

    /// Shows or executes `command`
    ///
    /// Dry run writes the command line to `err` and spawns nothing. Otherwise
    /// the command's stdout is indented onto `out`; on failure its stderr is
    /// copied to `err` and an error is returned.
    pub fn run(
        &self,
        command: &StatCommand,
        out: &mut dyn WriteColor,
        err: &mut dyn WriteColor,
        token: &CancelToken,
    ) -> Result<(), AppError> {
        if self.dry_run {
            self.presenter
                .write_line(err, Category::DryRun, &command.to_string())
                .map_err(|e| AppError::io("writing to stderr", e))?;
            return Ok(());
        }

        let output = execute(command, token)?;

        if !output.status.success() {
            if !output.stderr.is_empty() {
                err.write_all(&output.stderr)
                    .and_then(|()| err.flush())
                    .map_err(|e| AppError::io("writing to stderr", e))?;
            }
            return Err(AppError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        self.presenter
            .write_indented(out, Category::Data, &stdout)
            .and_then(|()| out.flush())
            .map_err(|e| AppError::io("writing to stdout", e))
    }
}

/// Spawns the command and waits for it, watching `token` meanwhile
fn execute(command: &StatCommand, token: &CancelToken) -> Result<Output, AppError> {
    let child = command.to_command().spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            AppError::MissingDependency(command.program.to_string_lossy().into_owned())
        }
        _ => AppError::io(format!("running '{command}'"), e),
    })?;

    let label = command.to_string();
    token
        .run(move || child.wait_with_output())?
        .map_err(|e| AppError::io(format!("waiting for '{label}'"), e))
}
