#![forbid(unsafe_code)]

//! The run pipeline
//!
//! Stages run once each, in order: config search and load, preference merge,
//! input resolution and read, presentation, `stat`. The cancellation token is
//! checked between stages.

use crate::cli::Cli;
use crate::config::statcat_toml;
use crate::config::{Candidate, SearchEnv};
use crate::error::AppError;
use crate::input::Source;
use crate::output::{Presenter, StatCommand, StatRunner};
use crate::prefs::{Category, Layer, Preferences, resolve};
use crate::signal::CancelToken;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

/// Environment variable enabling debug diagnostics
pub const DEBUG_ENV_VAR: &str = "STATCAT_DEBUG";

/// True if `STATCAT_DEBUG` is set to something other than empty or `0`
pub fn debug_from_env() -> bool {
    std::env::var_os(DEBUG_ENV_VAR).is_some_and(|value| !value.is_empty() && value != "0")
}

/// Outcome of the config search, kept for diagnostics
#[derive(Debug, Clone, Default)]
pub struct ConfigTrace {
    pub candidates: Vec<Candidate>,
    pub found: Option<Candidate>,
}

/// Locates and loads the config file
pub fn load_config(env: &SearchEnv) -> Result<(ConfigTrace, Layer), AppError> {
    let trace = ConfigTrace {
        candidates: env.candidates(),
        found: env.locate(),
    };
    let layer = statcat_toml::load_optional(trace.found.as_ref().map(|c| c.path.as_path()))?;
    Ok((trace, layer))
}

/// Handles `--generate-cfg`, returning the path written
pub fn generate_config(env: &SearchEnv) -> Result<PathBuf, AppError> {
    let target = env.generate_target()?;
    statcat_toml::generate(&target)
}

/// State carried through one run
pub struct Session {
    prefs: Preferences,
    debug: bool,
    source: Option<Source>,
    content: Option<String>,
}

impl Session {
    pub fn new(prefs: Preferences, debug: bool) -> Self {
        Session {
            prefs,
            debug,
            source: None,
            content: None,
        }
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn presenter(&self) -> Presenter<'_> {
        Presenter::new(&self.prefs.palette, self.prefs.color)
    }

    /// Writes a progress line when verbose
    fn verbose(&self, err: &mut dyn WriteColor, message: &str) -> Result<(), AppError> {
        if !self.prefs.verbose {
            return Ok(());
        }
        self.presenter()
            .write_line(err, Category::Verbose, &format!("statcat: {message}"))
            .map_err(|e| AppError::io("writing to stderr", e))
    }

    /// Writes a diagnostic line when debugging
    fn debug(&self, err: &mut dyn WriteColor, message: &str) -> Result<(), AppError> {
        if !self.debug {
            return Ok(());
        }
        self.presenter()
            .write_line(err, Category::Debug, &format!("statcat: debug: {message}"))
            .map_err(|e| AppError::io("writing to stderr", e))
    }

    /// Reports the config search and, when debugging, the effective settings
    pub fn report_config(
        &self,
        trace: &ConfigTrace,
        merged: &Layer,
        err: &mut dyn WriteColor,
    ) -> Result<(), AppError> {
        for candidate in &trace.candidates {
            let state = if trace.found.as_ref() == Some(candidate) {
                "using"
            } else if candidate.path.is_file() {
                "shadowed"
            } else {
                "absent"
            };
            self.debug(
                err,
                &format!("config {} ({}): {state}", candidate.path.display(), candidate.kind),
            )?;
        }

        match &trace.found {
            Some(found) => self.verbose(err, &format!("config: {}", found.path.display()))?,
            None => self.verbose(err, "config: none found, using defaults")?,
        }

        if self.debug {
            self.debug(err, &format!("color enabled: {}", self.prefs.color))?;
            let dump = statcat_toml::render(merged)?;
            self.presenter()
                .write_indented(err, Category::Dump, &dump)
                .map_err(|e| AppError::io("writing to stderr", e))?;
        }
        Ok(())
    }

    /// Reads the input, prints it and runs `stat`
    pub fn execute(
        &mut self,
        file: Option<&Path>,
        out: &mut dyn WriteColor,
        err: &mut dyn WriteColor,
        token: &CancelToken,
    ) -> Result<(), AppError> {
        token.check()?;
        let source = Source::resolve(file)?;
        self.verbose(err, &format!("reading {}", source.display_name()))?;

        let content = source.read(token)?;
        self.debug(err, &format!("read {} bytes", content.len()))?;
        self.source = Some(source);
        self.content = Some(content);

        token.check()?;
        self.present(out)?;

        token.check()?;
        self.run_stat(out, err, token)
    }

    fn present(&self, out: &mut dyn WriteColor) -> Result<(), AppError> {
        let (Some(source), Some(content)) = (&self.source, &self.content) else {
            return Ok(());
        };
        self.presenter()
            .present_file(out, &source.display_name(), content)
            .map_err(|e| AppError::io("writing to stdout", e))
    }

    fn run_stat(
        &self,
        out: &mut dyn WriteColor,
        err: &mut dyn WriteColor,
        token: &CancelToken,
    ) -> Result<(), AppError> {
        let Some(source) = &self.source else {
            return Ok(());
        };
        let command = StatCommand::new(source.stat_target());
        if !self.prefs.dry_run {
            self.verbose(err, &format!("running {command}"))?;
        }

        let presenter = self.presenter();
        StatRunner::new(&presenter, self.prefs.dry_run).run(&command, out, err, token)
    }
}

/// Runs the whole pipeline against the real terminal streams
pub fn run(cli: &Cli, env: &SearchEnv, debug: bool, token: &CancelToken) -> Result<(), AppError> {
    if cli.generate_cfg {
        let written = generate_config(env)?;
        eprintln!("statcat: wrote default config to {}", written.display());
        return Ok(());
    }

    token.check()?;
    let (trace, config) = load_config(env)?;
    let (merged, prefs) = resolve(&Layer::defaults(), &config, &cli.to_layer(), || {
        io::stdout().is_terminal()
    })?;

    let choice = if prefs.color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout: Box<dyn WriteColor> = if prefs.quiet {
        Box::new(NoColor::new(io::sink()))
    } else {
        Box::new(StandardStream::stdout(choice))
    };
    let mut stderr = StandardStream::stderr(choice);

    let mut session = Session::new(prefs, debug);
    session.report_config(&trace, &merged, &mut stderr)?;
    let result = session.execute(cli.file.as_deref(), stdout.as_mut(), &mut stderr, token);

    // Flush failures after a clean run still count
    stdout
        .flush()
        .map_err(|e| AppError::io("writing to stdout", e))?;
    result
}
