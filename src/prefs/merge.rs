#![forbid(unsafe_code)]

//! Preference layers and the precedence merge
//!
//! Three layers feed the merge: built-in defaults, values from the config
//! file and values from the command line. Precedence is
//! `opts > config > defaults`, applied field by field; the palette merges
//! entry by entry and only accepts known categories with valid color specs.

use crate::error::AppError;
use crate::prefs::palette::{Category, Palette, is_valid_color_spec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw value of the `color` preference before normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSetting {
    Flag(bool),
    Word(String),
}

impl ColorSetting {
    /// Collapses the setting to a boolean
    ///
    /// `is_tty` is consulted only for `auto` and true-like values.
    pub fn resolve(&self, is_tty: impl FnOnce() -> bool) -> Result<bool, AppError> {
        match self {
            ColorSetting::Flag(true) => Ok(is_tty()),
            ColorSetting::Flag(false) => Ok(false),
            ColorSetting::Word(word) => match word.trim().to_ascii_lowercase().as_str() {
                "always" => Ok(true),
                "never" | "false" | "no" | "off" => Ok(false),
                "auto" | "true" | "yes" | "on" => Ok(is_tty()),
                _ => Err(AppError::InvalidColor(word.clone())),
            },
        }
    }
}

/// One preference layer; `None` means "not set at this layer"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    pub color: Option<ColorSetting>,
    pub dry_run: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    /// Unvalidated `category -> color spec` entries
    pub palette: BTreeMap<String, String>,
}

impl Layer {
    /// The built-in defaults
    pub fn defaults() -> Self {
        let palette = [
            (Category::Data, "default"),
            (Category::Debug, "magenta"),
            (Category::Dump, "bright_blue"),
            (Category::DryRun, "bold yellow"),
            (Category::Filename, "bold cyan"),
            (Category::Header, "green"),
            (Category::Verbose, "cyan"),
        ]
        .into_iter()
        .map(|(category, spec)| (category.as_str().to_string(), spec.to_string()))
        .collect();

        Layer {
            color: Some(ColorSetting::Word("auto".to_string())),
            dry_run: Some(false),
            quiet: Some(false),
            verbose: Some(false),
            palette,
        }
    }

    /// Returns `self` with every value set in `higher` laid over it
    ///
    /// Palette entries from `higher` are taken only when the key names a known
    /// category and the value is a valid color spec; anything else is dropped
    /// and the value from `self` stays.
    pub fn overlay(mut self, higher: &Layer) -> Layer {
        if let Some(color) = &higher.color {
            self.color = Some(color.clone());
        }
        self.dry_run = higher.dry_run.or(self.dry_run);
        self.quiet = higher.quiet.or(self.quiet);
        self.verbose = higher.verbose.or(self.verbose);

        for (key, spec) in &higher.palette {
            if key.parse::<Category>().is_ok() && is_valid_color_spec(spec) {
                self.palette.insert(key.clone(), spec.clone());
            }
        }

        self
    }
}

/// Merged, normalized preferences that drive the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub color: bool,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub palette: Palette,
}

/// Merges the three layers into a single layer, without normalizing
pub fn merge_layers(defaults: &Layer, config: &Layer, opts: &Layer) -> Layer {
    // opts over config first, then the result over defaults
    let upper = config.clone().overlay(opts);
    defaults.clone().overlay(&upper)
}

/// Merges the layers and normalizes the result
///
/// `is_tty` reports whether standard output is a terminal; it is called at
/// most once, during color normalization.
pub fn resolve(
    defaults: &Layer,
    config: &Layer,
    opts: &Layer,
    is_tty: impl FnOnce() -> bool,
) -> Result<(Layer, Preferences), AppError> {
    let merged = merge_layers(defaults, config, opts);

    let color = match &merged.color {
        Some(setting) => setting.resolve(is_tty)?,
        None => false,
    };

    let prefs = Preferences {
        color,
        dry_run: merged.dry_run.unwrap_or(false),
        quiet: merged.quiet.unwrap_or(false),
        verbose: merged.verbose.unwrap_or(false),
        palette: Palette::from_entries(&merged.palette),
    };

    Ok((merged, prefs))
}
