//! Preference layers, palette and the precedence merge

pub mod merge;
pub mod palette;

pub use merge::{ColorSetting, Layer, Preferences, merge_layers, resolve};
pub use palette::{Category, Hue, NamedColor, Palette, Style};
