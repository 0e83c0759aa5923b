//! `OutputBuffer` and `AnsiScreen`: Single-syscall ANSI output.

use super::{printable, Screen};
use crate::buffer::{Modifiers, Rgb, Style};
use crate::color::Palette;
use crossterm::cursor::MoveTo;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{Command, QueueableCommand};
use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A [`Screen`] that renders to ANSI escape sequences.
///
/// Nothing reaches the terminal until [`AnsiScreen::flush_to`] is called.
#[derive(Debug)]
pub struct AnsiScreen {
    out: OutputBuffer,
    palette: Palette,
    cols: u16,
    rows: u16,
    row: u16,
    col: u16,
}

impl AnsiScreen {
    /// Create a screen of the given size using the default palette.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self::with_palette(cols, rows, Palette::default())
    }

    /// Create a screen with a custom palette.
    pub fn with_palette(cols: u16, rows: u16, palette: Palette) -> Self {
        Self {
            out: OutputBuffer::with_capacity(4096),
            palette,
            cols,
            rows,
            row: 0,
            col: 0,
        }
    }

    /// The queued output.
    pub const fn output(&self) -> &OutputBuffer {
        &self.out
    }

    /// Update the screen size after a terminal resize.
    pub const fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Write the queued output and start a new frame.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.out.flush_to(writer)?;
        self.out.clear();
        Ok(())
    }

    fn emit(&mut self, command: impl Command) {
        // Writes into the in-memory buffer cannot fail.
        let _ = self.out.queue(command);
    }
}

impl Screen for AnsiScreen {
    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn cursor(&self) -> (u16, u16) {
        (self.row, self.col)
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }

    fn move_to(&mut self, row: u16, col: u16) {
        self.row = row;
        self.col = col;
        self.emit(MoveTo(col, row));
    }

    fn add_str(&mut self, text: &str) {
        let text = printable(text);
        let room = usize::from(self.cols.saturating_sub(self.col));
        let mut used = 0;
        let mut end = 0;
        for (idx, grapheme) in text.grapheme_indices(true) {
            let width = grapheme.width();
            if used + width > room {
                break;
            }
            used += width;
            end = idx + grapheme.len();
        }

        if let Some(visible) = text.get(..end).filter(|s| !s.is_empty()) {
            self.emit(Print(visible));
            #[allow(clippy::cast_possible_truncation)]
            let advance = used as u16;
            self.col += advance;
        }
    }

    fn clear_to_eol(&mut self) {
        self.emit(Clear(ClearType::UntilNewLine));
    }

    fn set_style(&mut self, style: Style) {
        self.emit(SetAttribute(Attribute::Reset));
        if let Some(fg) = style.fg {
            self.emit(SetForegroundColor(to_color(fg)));
        }
        if let Some(bg) = style.bg {
            self.emit(SetBackgroundColor(to_color(bg)));
        }
        for (modifier, attribute) in ATTRIBUTES {
            if style.modifiers.contains(modifier) {
                self.emit(SetAttribute(attribute));
            }
        }
    }
}

const ATTRIBUTES: [(Modifiers, Attribute); 8] = [
    (Modifiers::BOLD, Attribute::Bold),
    (Modifiers::DIM, Attribute::Dim),
    (Modifiers::ITALIC, Attribute::Italic),
    (Modifiers::UNDERLINE, Attribute::Underlined),
    (Modifiers::BLINK, Attribute::SlowBlink),
    (Modifiers::REVERSED, Attribute::Reverse),
    (Modifiers::HIDDEN, Attribute::Hidden),
    (Modifiers::STRIKETHROUGH, Attribute::CrossedOut),
];

const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorId;

    fn replay(screen: &AnsiScreen) -> vt100::Parser {
        let (cols, rows) = screen.size();
        let mut parser = vt100::Parser::new(rows, cols, 0);
        parser.process(screen.output().as_bytes());
        parser
    }

    #[test]
    fn test_ansi_text_lands_at_cursor() {
        let mut screen = AnsiScreen::new(20, 5);
        screen.move_to(4, 3);
        screen.add_str("Hello");
        assert_eq!(screen.cursor(), (4, 8));

        let parser = replay(&screen);
        assert_eq!(parser.screen().cell(4, 3).unwrap().contents(), "H");
        assert_eq!(parser.screen().cell(4, 7).unwrap().contents(), "o");
    }

    #[test]
    fn test_ansi_colors_follow_palette() {
        let mut screen = AnsiScreen::new(20, 1);
        screen.set_color_by_id(ColorId::Error);
        screen.add_str("E");

        let expected = Palette::default().get(ColorId::Error).fg.unwrap();
        let parser = replay(&screen);
        let cell = parser.screen().cell(0, 0).unwrap();
        assert_eq!(cell.fgcolor(), vt100::Color::Rgb(expected.r, expected.g, expected.b));
        assert!(cell.bold());
    }

    #[test]
    fn test_ansi_clear_to_eol() {
        let mut screen = AnsiScreen::new(10, 1);
        screen.add_str("abcdefghij");
        screen.move_to(0, 4);
        screen.clear_to_eol();

        let parser = replay(&screen);
        assert_eq!(parser.screen().contents(), "abcd");
    }

    #[test]
    fn test_ansi_add_str_clips_at_edge() {
        let mut screen = AnsiScreen::new(6, 2);
        screen.move_to(0, 2);
        screen.add_str("abc日x");
        assert_eq!(screen.cursor(), (0, 5));

        let parser = replay(&screen);
        assert_eq!(parser.screen().contents(), "  abc");
    }

    #[test]
    fn test_ansi_add_str_never_emits_controls() {
        let mut screen = AnsiScreen::new(20, 3);
        screen.move_to(0, 0);
        screen.add_str("keep me");
        screen.move_to(2, 0);
        screen.add_str("x\r\n\x1b[2Jy");

        assert!(!screen.output().as_bytes().windows(4).any(|w| w == b"\x1b[2J"));
        let parser = replay(&screen);
        assert_eq!(parser.screen().contents(), "keep me\n\nx^M^J^[[2Jy");
        assert_eq!(screen.cursor(), (2, 11));
    }

    #[test]
    fn test_ansi_flush_drains_buffer() {
        let mut screen = AnsiScreen::new(10, 1);
        screen.add_str("x");
        let mut sink = Vec::new();
        screen.flush_to(&mut sink).unwrap();
        assert!(!sink.is_empty());
        assert!(screen.output().is_empty());
    }
}
