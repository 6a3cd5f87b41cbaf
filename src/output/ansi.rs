#![forbid(unsafe_code)]

//! Removal of terminal escape sequences

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// CSI sequences (colors, cursor movement) and OSC sequences (titles, links)
static ESCAPE_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("valid escape pattern")
});

/// Strips escape sequences, borrowing the input when there is nothing to strip
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    ESCAPE_SEQUENCE.replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(strip_ansi("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn test_strips_sgr_colors() {
        assert_eq!(strip_ansi("\x1b[1;31mred\x1b[0m text"), "red text");
        assert_eq!(strip_ansi("\x1b[38;2;255;0;0mtrue\x1b[m"), "true");
    }

    #[test]
    fn test_strips_osc_sequences() {
        assert_eq!(strip_ansi("\x1b]0;title\x07body"), "body");
        assert_eq!(
            strip_ansi("\x1b]8;;http://x\x1b\\link\x1b]8;;\x1b\\"),
            "link"
        );
    }

    #[test]
    fn test_keeps_surrounding_text() {
        assert_eq!(strip_ansi("a\x1b[2Kb\nc"), "ab\nc");
    }
}
