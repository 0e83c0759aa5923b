//! `GridScreen`: A [`Screen`] that draws into a cell [`Buffer`].

use super::{printable, Screen};
use crate::buffer::{Buffer, Style};
use crate::color::Palette;
use unicode_segmentation::UnicodeSegmentation;

/// Off-screen terminal backed by a [`Buffer`].
///
/// Every primitive call is counted, which lets callers verify that a
/// widget stayed silent.
#[derive(Debug, Clone)]
pub struct GridScreen {
    buffer: Buffer,
    palette: Palette,
    style: Style,
    row: u16,
    col: u16,
    ops: u64,
}

impl GridScreen {
    /// Create a blank screen using the default palette.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self::with_palette(cols, rows, Palette::default())
    }

    /// Create a blank screen with a custom palette.
    pub fn with_palette(cols: u16, rows: u16, palette: Palette) -> Self {
        Self {
            buffer: Buffer::new(cols, rows),
            palette,
            style: Style::RESET,
            row: 0,
            col: 0,
            ops: 0,
        }
    }

    /// The drawn cells.
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Text of screen row `row`.
    pub fn row_text(&self, row: u16) -> String {
        self.buffer.row_text(row)
    }

    /// Number of primitive calls made so far.
    pub const fn ops(&self) -> u64 {
        self.ops
    }

    /// The style that subsequent writes will use.
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Resize the grid, keeping what fits.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buffer.resize(cols, rows);
        self.row = self.row.min(rows.saturating_sub(1));
        self.col = self.col.min(cols);
    }
}

impl Screen for GridScreen {
    fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }

    fn cursor(&self) -> (u16, u16) {
        (self.row, self.col)
    }

    fn palette(&self) -> &Palette {
        &self.palette
    }

    fn move_to(&mut self, row: u16, col: u16) {
        self.ops += 1;
        self.row = row;
        self.col = col;
    }

    fn add_str(&mut self, text: &str) {
        self.ops += 1;
        for grapheme in printable(text).graphemes(true) {
            if self.col >= self.buffer.width() {
                break;
            }
            let width = self.buffer.set_grapheme(self.col, self.row, grapheme, self.style);
            self.col += u16::from(width);
        }
    }

    fn clear_to_eol(&mut self) {
        self.ops += 1;
        let len = self.buffer.width().saturating_sub(self.col);
        self.buffer.clear_span(self.col, self.row, len, self.style);
    }

    fn set_style(&mut self, style: Style) {
        self.ops += 1;
        self.style = style;
    }
}
