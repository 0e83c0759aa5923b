//! Buffer: A grid of cells representing the terminal screen.
//!
//! Cells are stored in row-major order in one contiguous `Vec`.

use super::cell::{Cell, Style};

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to blanks.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::blank(); size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).and_then(|i| self.cells.get(i))
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.index_of(x, y).and_then(|i| self.cells.get_mut(i)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Set a grapheme at (x, y).
    ///
    /// For wide characters this also sets a continuation cell at (x+1, y).
    /// A wide character that would straddle the right edge is replaced by
    /// a blank.
    ///
    /// Returns the number of columns consumed, or 0 if out of bounds.
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, style: Style) -> u8 {
        if self.index_of(x, y).is_none() {
            return 0;
        }

        #[allow(clippy::cast_possible_truncation)]
        let width = unicode_width::UnicodeWidthStr::width(grapheme).min(2) as u8;

        if width == 2 {
            if self.index_of(x + 1, y).is_none() {
                self.set(x, y, Cell::blank().with_style(style));
                return 1;
            }
            self.set(x + 1, y, Cell::wide_continuation().with_style(style));
        }

        self.set(x, y, Cell::from_grapheme(grapheme).with_style(style));
        width.max(1)
    }

    /// Fill `len` cells of row `y`, starting at column `x`, with blanks.
    pub fn clear_span(&mut self, x: u16, y: u16, len: u16, style: Style) {
        let end = x.saturating_add(len).min(self.width);
        for col in x..end {
            self.set(col, y, Cell::blank().with_style(style));
        }
    }

    /// Resize the buffer, preserving content where possible.
    ///
    /// New cells are initialized to blanks.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut resized = Self::new(new_width, new_height);
        for y in 0..self.height.min(new_height) {
            for x in 0..self.width.min(new_width) {
                if let Some(cell) = self.get(x, y) {
                    resized.set(x, y, cell.clone());
                }
            }
        }
        *self = resized;
    }

    /// The text of row `y`, continuation cells skipped.
    ///
    /// Returns an empty string if the row is out of bounds.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter_map(Cell::grapheme)
            .collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_buffer_zero_width() {
        Buffer::new(0, 24);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(!buffer.set(0, 24, Cell::new('X')));
    }

    #[test]
    fn test_buffer_set_grapheme() {
        let mut buffer = Buffer::new(10, 2);
        let style = Style::RESET.fg(Rgb::WHITE);

        assert_eq!(buffer.set_grapheme(0, 0, "A", style), 1);
        assert_eq!(buffer.get(0, 0).unwrap().grapheme(), Some("A"));
        assert_eq!(buffer.get(0, 0).unwrap().style(), style);

        assert_eq!(buffer.set_grapheme(5, 0, "日", style), 2);
        assert_eq!(buffer.get(5, 0).unwrap().grapheme(), Some("日"));
        assert!(buffer.get(6, 0).unwrap().is_wide_continuation());
    }

    #[test]
    fn test_buffer_wide_at_edge() {
        let mut buffer = Buffer::new(4, 1);
        assert_eq!(buffer.set_grapheme(3, 0, "日", Style::RESET), 1);
        assert_eq!(buffer.get(3, 0).unwrap().grapheme(), Some(" "));
    }

    #[test]
    fn test_buffer_clear_span() {
        let mut buffer = Buffer::new(6, 1);
        for (x, c) in "abcdef".chars().enumerate() {
            buffer.set(u16::try_from(x).unwrap(), 0, Cell::new(c));
        }
        buffer.clear_span(2, 0, 100, Style::RESET);
        assert_eq!(buffer.row_text(0), "ab    ");
    }

    #[test]
    fn test_buffer_resize() {
        let mut buffer = Buffer::new(80, 24);
        buffer.set(5, 5, Cell::new('X'));

        buffer.resize(100, 30);
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.get(5, 5).unwrap().grapheme(), Some("X"));

        buffer.resize(10, 10);
        assert_eq!(buffer.get(5, 5).unwrap().grapheme(), Some("X"));
        assert!(buffer.get(15, 15).is_none());
    }

    #[test]
    fn test_buffer_row_text() {
        let mut buffer = Buffer::new(5, 2);
        buffer.set_grapheme(0, 1, "日", Style::RESET);
        buffer.set_grapheme(2, 1, "x", Style::RESET);
        assert_eq!(buffer.row_text(1), "日x  ");
        assert_eq!(buffer.row_text(9), "");
    }
}
