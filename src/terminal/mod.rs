//! Terminal module: The drawing primitives windows paint with.
//!
//! [`Screen`] is the curses-like surface handed to repaint handlers. Two
//! implementations are provided:
//!
//! - [`GridScreen`]: draws into an in-memory [`Buffer`](crate::Buffer)
//! - [`AnsiScreen`]: queues ANSI sequences and flushes them in one write

mod grid;
mod output;

pub use grid::GridScreen;
pub use output::{AnsiScreen, OutputBuffer};

use crate::buffer::Style;
use crate::color::{ColorId, Palette};
use std::borrow::Cow;

/// A drawable terminal surface.
///
/// Coordinates are absolute, 0-indexed `(row, col)`. Window-relative
/// drawing goes through [`WindowCtx`](crate::window::WindowCtx).
pub trait Screen {
    /// Screen size as `(cols, rows)`.
    fn size(&self) -> (u16, u16);

    /// Current cursor position as `(row, col)`.
    fn cursor(&self) -> (u16, u16);

    /// Palette used to resolve color ids.
    fn palette(&self) -> &Palette;

    /// Move the cursor.
    fn move_to(&mut self, row: u16, col: u16);

    /// Write text at the cursor in the current style, advancing the cursor.
    fn add_str(&mut self, text: &str);

    /// Blank from the cursor to the end of the screen line.
    fn clear_to_eol(&mut self);

    /// Set the style used by subsequent writes and clears.
    fn set_style(&mut self, style: Style);

    /// Set the current style to the palette entry for `cid`.
    fn set_color_by_id(&mut self, cid: ColorId) {
        let style = self.palette().get(cid);
        self.set_style(style);
    }

    /// Set the current style to `cid` laid over the `Normal` style.
    fn set_normal_backed_color_by_id(&mut self, cid: ColorId) {
        let style = self.palette().normal_backed(cid);
        self.set_style(style);
    }
}

/// Make `text` safe to print on a single line.
///
/// C0 controls are shown in caret notation (`^J`, `^[`), `DEL` as `^?`, and
/// C1 controls as U+FFFD, so nothing reaches the terminal that could move
/// the cursor or start an escape sequence.
pub fn printable(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match u8::try_from(c) {
            Ok(0x7f) => out.push_str("^?"),
            Ok(b) if b < 0x20 => {
                out.push('^');
                out.push(char::from(b'@' + b));
            }
            _ if c.is_control() => out.push(char::REPLACEMENT_CHARACTER),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_passes_plain_text() {
        assert!(matches!(printable("plain text, 日本"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_printable_caret_notation() {
        assert_eq!(printable("a\nb\rc\td"), "a^Jb^Mc^Id");
        assert_eq!(printable("\x1b[2J"), "^[[2J");
        assert_eq!(printable("\x00\x7f"), "^@^?");
    }

    #[test]
    fn test_printable_c1_controls() {
        assert_eq!(printable("x\u{9b}2Jy"), "x\u{fffd}2Jy");
    }
}
