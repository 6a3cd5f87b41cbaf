#![forbid(unsafe_code)]

//! Formatted, optionally colorized output of file contents

use crate::output::ansi::strip_ansi;
use crate::prefs::{Category, Palette};
use std::io::{self, Write};
use termcolor::WriteColor;

/// Indentation applied to every non-empty content line
pub const INDENT: &str = "  ";

/// Writes text in palette styles
///
/// With color off, escape sequences already present in the text are removed
/// so that nothing styled leaks through.
pub struct Presenter<'a> {
    palette: &'a Palette,
    color: bool,
}

impl<'a> Presenter<'a> {
    /// Creates a new Presenter with the given palette and color setting
    pub fn new(palette: &'a Palette, color: bool) -> Self {
        Presenter { palette, color }
    }

    /// Writes `text` in the style of `category`
    pub fn write_styled(
        &self,
        out: &mut dyn WriteColor,
        category: Category,
        text: &str,
    ) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.color {
            out.set_color(&self.palette.color_spec(category))?;
            out.write_all(text.as_bytes())?;
            out.reset()
        } else {
            out.write_all(strip_ansi(text).as_bytes())
        }
    }

    /// Writes one styled line followed by a newline
    pub fn write_line(
        &self,
        out: &mut dyn WriteColor,
        category: Category,
        text: &str,
    ) -> io::Result<()> {
        self.write_styled(out, category, text)?;
        writeln!(out)
    }

    /// Writes `text` with every non-empty line indented
    ///
    /// Empty lines stay empty and a missing final newline is supplied.
    /// Line terminators are copied as they are, including a `\r` before `\n`.
    pub fn write_indented(
        &self,
        out: &mut dyn WriteColor,
        category: Category,
        text: &str,
    ) -> io::Result<()> {
        for piece in text.split_inclusive('\n') {
            let line = piece.strip_suffix('\n').unwrap_or(piece);
            let (body, cr) = match line.strip_suffix('\r') {
                Some(body) => (body, "\r"),
                None => (line, ""),
            };
            if !body.is_empty() {
                out.write_all(INDENT.as_bytes())?;
                self.write_styled(out, category, body)?;
            }
            out.write_all(cr.as_bytes())?;
            writeln!(out)?;
        }
        Ok(())
    }

    /// Prints the header, the indented content and a trailing blank line
    ///
    /// Empty content prints nothing.
    pub fn present_file(&self, out: &mut dyn WriteColor, name: &str, content: &str) -> io::Result<()> {
        if content.is_empty() {
            return Ok(());
        }

        // Header: File '<name>' contents
        self.write_styled(out, Category::Header, "File '")?;
        self.write_styled(out, Category::Filename, name)?;
        self.write_line(out, Category::Header, "' contents")?;

        self.write_indented(out, Category::Data, content)?;
        writeln!(out)?;
        out.flush()
    }
}
