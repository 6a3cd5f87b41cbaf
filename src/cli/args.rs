#![forbid(unsafe_code)]

//! Command-line argument definitions

use crate::prefs::{ColorSetting, Layer};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// When to colorize output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Never,
    Always,
    Auto,
}

impl ColorWhen {
    fn as_str(self) -> &'static str {
        match self {
            ColorWhen::Never => "never",
            ColorWhen::Always => "always",
            ColorWhen::Auto => "auto",
        }
    }
}

/// Print a file's contents followed by its stat(1) metadata
#[derive(Debug, Parser)]
#[command(name = "statcat", version, about, long_about = None)]
pub struct Cli {
    /// Colorize output: never, always or auto (bare -c means auto)
    #[arg(
        short = 'c',
        long,
        value_name = "WHEN",
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "auto"
    )]
    pub color: Option<ColorWhen>,

    /// Set a palette color, e.g. --palette=header='bold red' (repeatable)
    ///
    /// Keys: data, debug, dump, dry_run, filename, header, verbose.
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_palette_entry)]
    pub palette: Vec<(String, String)>,

    /// Print the stat command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Write a default config file and exit
    #[arg(long)]
    pub generate_cfg: bool,

    /// Suppress standard output
    #[arg(short, long)]
    pub quiet: bool,

    /// Report progress on standard error
    #[arg(short, long)]
    pub verbose: bool,

    /// File to show; `-` or absent reads standard input
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Builds the command-line preference layer
    ///
    /// Boolean flags are only recorded when given, so an absent flag never
    /// overrides the config file.
    pub fn to_layer(&self) -> Layer {
        Layer {
            color: self
                .color
                .map(|when| ColorSetting::Word(when.as_str().to_string())),
            dry_run: self.dry_run.then_some(true),
            quiet: self.quiet.then_some(true),
            verbose: self.verbose.then_some(true),
            palette: self.palette.iter().cloned().collect(),
        }
    }
}

/// Splits a `KEY=VALUE` palette argument
///
/// Only the shape is checked here; unknown keys and invalid colors are
/// filtered during the merge.
fn parse_palette_entry(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing palette key in '{arg}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
