#![forbid(unsafe_code)]

//! Output categories and the color model used by the palette
//!
//! A color spec is a whitespace separated list of tokens, for example
//! `"bold yellow"`, `"bright_blue on_black"` or `"#ff8800 underline"`.
//! Parsing is total: every string either yields a [`Style`] or `None`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use termcolor::{Color, ColorSpec};

/// Output categories that can be styled through the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Data,
    Debug,
    Dump,
    DryRun,
    Filename,
    Header,
    Verbose,
}

impl Category {
    /// Every category, in palette order
    pub const ALL: [Category; 7] = [
        Category::Data,
        Category::Debug,
        Category::Dump,
        Category::DryRun,
        Category::Filename,
        Category::Header,
        Category::Verbose,
    ];

    /// Name used in config files and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Data => "data",
            Category::Debug => "debug",
            Category::Dump => "dump",
            Category::DryRun => "dry_run",
            Category::Filename => "filename",
            Category::Header => "header",
            Category::Verbose => "verbose",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The eight basic terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    const ALL: [(&'static str, NamedColor); 8] = [
        ("black", NamedColor::Black),
        ("red", NamedColor::Red),
        ("green", NamedColor::Green),
        ("yellow", NamedColor::Yellow),
        ("blue", NamedColor::Blue),
        ("magenta", NamedColor::Magenta),
        ("cyan", NamedColor::Cyan),
        ("white", NamedColor::White),
    ];

    fn parse(name: &str) -> Option<NamedColor> {
        Self::ALL
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, color)| *color)
    }

    /// Index in the standard 16-color ANSI table
    fn ansi_index(self) -> u8 {
        match self {
            NamedColor::Black => 0,
            NamedColor::Red => 1,
            NamedColor::Green => 2,
            NamedColor::Yellow => 3,
            NamedColor::Blue => 4,
            NamedColor::Magenta => 5,
            NamedColor::Cyan => 6,
            NamedColor::White => 7,
        }
    }

    fn to_termcolor(self) -> Color {
        match self {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
        }
    }
}

/// A single foreground or background color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hue {
    Named(NamedColor),
    Bright(NamedColor),
    Rgb(u8, u8, u8),
}

impl Hue {
    fn parse(token: &str) -> Option<Hue> {
        if let Some(hex) = token.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(inner) = token
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_triple(inner);
        }
        if let Some(name) = token.strip_prefix("bright_") {
            return NamedColor::parse(name).map(Hue::Bright);
        }
        NamedColor::parse(token).map(Hue::Named)
    }

    fn to_termcolor(self) -> Color {
        match self {
            Hue::Named(color) => color.to_termcolor(),
            Hue::Bright(color) => Color::Ansi256(color.ansi_index() + 8),
            Hue::Rgb(r, g, b) => Color::Rgb(r, g, b),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Hue> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Hue::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_rgb_triple(inner: &str) -> Option<Hue> {
    let channels: Vec<u8> = inner
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(Hue::Rgb(*r, *g, *b)),
        _ => None,
    }
}

/// A validated color spec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Hue>,
    pub bg: Option<Hue>,
    pub bold: bool,
    pub dimmed: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    /// Parses a color spec, returning `None` if any token is unrecognized
    pub fn parse(spec: &str) -> Option<Style> {
        let mut style = Style::default();
        let mut tokens = spec.split_whitespace().peekable();

        // An empty spec is not a spec
        tokens.peek()?;

        for token in tokens {
            let token = token.to_ascii_lowercase();
            match token.as_str() {
                "bold" => style.bold = true,
                "dim" | "dimmed" => style.dimmed = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "default" | "none" => {}
                _ => {
                    if let Some(bg) = token.strip_prefix("on_") {
                        if style.bg.is_some() {
                            return None;
                        }
                        style.bg = Some(Hue::parse(bg)?);
                    } else {
                        if style.fg.is_some() {
                            return None;
                        }
                        style.fg = Some(Hue::parse(&token)?);
                    }
                }
            }
        }

        Some(style)
    }

    /// Converts to a termcolor spec
    pub fn to_color_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(self.fg.map(Hue::to_termcolor))
            .set_bg(self.bg.map(Hue::to_termcolor))
            .set_bold(self.bold)
            .set_dimmed(self.dimmed)
            .set_italic(self.italic)
            .set_underline(self.underline);
        spec
    }
}

/// True if `spec` is a valid color spec
pub fn is_valid_color_spec(spec: &str) -> bool {
    Style::parse(spec).is_some()
}

/// Fully resolved palette: one style per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: BTreeMap<Category, Style>,
}

impl Palette {
    /// Builds a palette from raw `name -> spec` entries
    ///
    /// Entries with an unknown category name or an invalid spec are skipped.
    /// Categories without an entry get the plain style.
    pub fn from_entries(entries: &BTreeMap<String, String>) -> Self {
        let mut styles: BTreeMap<Category, Style> = Category::ALL
            .into_iter()
            .map(|category| (category, Style::default()))
            .collect();

        for (name, spec) in entries {
            if let (Ok(category), Some(style)) = (name.parse::<Category>(), Style::parse(spec)) {
                styles.insert(category, style);
            }
        }

        Palette { styles }
    }

    /// Style for the given category
    pub fn style(&self, category: Category) -> Style {
        self.styles.get(&category).copied().unwrap_or_default()
    }

    /// termcolor spec for the given category
    pub fn color_spec(&self, category: Category) -> ColorSpec {
        self.style(category).to_color_spec()
    }
}
