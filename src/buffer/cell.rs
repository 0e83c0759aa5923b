//! Cell: The atomic unit of an off-screen terminal grid.
//!
//! A cell holds one grapheme cluster plus the [`Style`] it was drawn with.
//! Wide characters (CJK, most emoji) occupy two cells: the grapheme lives in
//! the left cell and the right cell is marked as a continuation.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Parse a CSS-style `#rrggbb` string. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_u32)
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use msgline::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::ITALIC;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Foreground, background and modifiers applied to drawn text.
///
/// `None` for a color means the terminal's own default.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Rgb>,
    /// Background color.
    pub bg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// Terminal defaults, no modifiers.
    pub const RESET: Self = Self {
        fg: None,
        bg: None,
        modifiers: Modifiers::empty(),
    };

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Add modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn add_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }
}

/// A single grid cell.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cell {
    /// The grapheme cluster; empty for wide-character continuations.
    symbol: String,
    /// Style the cell was drawn with.
    style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

impl Cell {
    /// A space in the default style.
    pub fn blank() -> Self {
        Self::new(' ')
    }

    /// Create a cell holding a single character.
    pub fn new(c: char) -> Self {
        Self {
            symbol: c.to_string(),
            style: Style::RESET,
        }
    }

    /// Create a cell holding a grapheme cluster.
    pub fn from_grapheme(grapheme: &str) -> Self {
        Self {
            symbol: grapheme.to_string(),
            style: Style::RESET,
        }
    }

    /// The right half of a wide character.
    pub const fn wide_continuation() -> Self {
        Self {
            symbol: String::new(),
            style: Style::RESET,
        }
    }

    /// The grapheme stored in this cell.
    ///
    /// Returns `None` for a wide-character continuation.
    pub fn grapheme(&self) -> Option<&str> {
        if self.symbol.is_empty() {
            None
        } else {
            Some(&self.symbol)
        }
    }

    /// Check if this cell continues the wide character to its left.
    #[inline]
    pub fn is_wide_continuation(&self) -> bool {
        self.symbol.is_empty()
    }

    /// The cell's style.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Set the style (builder pattern).
    #[inline]
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_tuple() {
        let color: Rgb = (255, 128, 64).into();
        assert_eq!(color, Rgb::new(255, 128, 64));
    }

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_u32(0xFF_8040), Rgb::new(255, 128, 64));
        assert_eq!(Rgb::from_hex("#ff8040"), Some(Rgb::new(255, 128, 64)));
        assert_eq!(Rgb::from_hex("00ff00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
    }

    #[test]
    fn test_style_builder() {
        let style = Style::RESET
            .fg(Rgb::WHITE)
            .bg(Rgb::BLACK)
            .add_modifiers(Modifiers::BOLD)
            .add_modifiers(Modifiers::UNDERLINE);
        assert_eq!(style.fg, Some(Rgb::WHITE));
        assert_eq!(style.bg, Some(Rgb::BLACK));
        assert_eq!(style.modifiers, Modifiers::BOLD | Modifiers::UNDERLINE);
    }

    #[test]
    fn test_cell_blank() {
        let cell = Cell::default();
        assert_eq!(cell.grapheme(), Some(" "));
        assert_eq!(cell.style(), Style::RESET);
    }

    #[test]
    fn test_wide_continuation() {
        let cell = Cell::wide_continuation();
        assert!(cell.is_wide_continuation());
        assert_eq!(cell.grapheme(), None);
    }

    #[test]
    fn test_cell_equality() {
        let red = Style::RESET.fg(Rgb::new(255, 0, 0));
        assert_eq!(Cell::new('A').with_style(red), Cell::new('A').with_style(red));
        assert_ne!(Cell::new('A'), Cell::new('A').with_style(red));
        assert_ne!(Cell::new('A'), Cell::new('B'));
    }
}
