#![forbid(unsafe_code)]

//! Reading and writing `statcat` config files
//!
//! The file is parsed as a TOML table and the known keys are picked out of
//! it. Unknown keys and values of the wrong type are ignored, so older and
//! newer config files keep loading.

use crate::error::AppError;
use crate::prefs::{ColorSetting, Layer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Serialized form of a layer
#[derive(Debug, Serialize)]
struct ConfigDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a ColorSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quiet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verbose: Option<bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    palette: BTreeMap<String, String>,
}

/// Loads a config file into a layer
pub fn load(path: &Path) -> Result<Layer, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("reading config file '{}'", path.display()), e))?;
    parse(&content, path)
}

/// Loads the config file if one was located; an absent file is an empty layer
pub fn load_optional(path: Option<&Path>) -> Result<Layer, AppError> {
    match path {
        Some(path) => load(path),
        None => Ok(Layer::default()),
    }
}

/// Parses config file content; `path` is only used for error messages
pub fn parse(content: &str, path: &Path) -> Result<Layer, AppError> {
    let table: toml::Table = toml::from_str(content).map_err(|e| AppError::ConfigSyntax {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    Ok(layer_from_table(&table))
}

/// Extracts the recognized keys from a parsed table
pub fn layer_from_table(table: &toml::Table) -> Layer {
    let flag = |key: &str| table.get(key).and_then(toml::Value::as_bool);

    let color = table
        .get("color")
        .and_then(|value| value.clone().try_into::<ColorSetting>().ok());

    let palette = table
        .get("palette")
        .and_then(toml::Value::as_table)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default();

    Layer {
        color,
        dry_run: flag("dry_run"),
        quiet: flag("quiet"),
        verbose: flag("verbose"),
        palette,
    }
}

/// Renders a layer as a TOML document
pub fn render(layer: &Layer) -> Result<String, AppError> {
    let document = ConfigDocument {
        color: layer.color.as_ref(),
        dry_run: layer.dry_run,
        quiet: layer.quiet,
        verbose: layer.verbose,
        palette: layer.palette.clone(),
    };
    toml::to_string_pretty(&document)
        .map_err(|e| AppError::io("rendering config", io::Error::other(e)))
}

/// Renders the built-in defaults, as written by `--generate-cfg`
pub fn render_defaults() -> Result<String, AppError> {
    Ok(format!(
        "# statcat configuration\n\
         # Precedence: command-line options > this file > built-in defaults\n\n{}",
        render(&Layer::defaults())?
    ))
}

/// Writes the default config to `target`
///
/// Parent directories are created. An existing file is never replaced.
pub fn generate(target: &Path) -> Result<PathBuf, AppError> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::io(format!("creating directory '{}'", parent.display()), e)
        })?;
    }

    let content = render_defaults()?;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => AppError::ConfigExists(target.to_path_buf()),
            _ => AppError::io(format!("creating config file '{}'", target.display()), e),
        })?;
    file.write_all(content.as_bytes())
        .map_err(|e| AppError::io(format!("writing config file '{}'", target.display()), e))?;

    Ok(target.to_path_buf())
}
