//! Window content: The capability set a window kind supplies.

use super::{WindowActions, WindowId, WindowState};
use crate::error::Result;
use crate::terminal::{printable, Screen};
use std::any::Any;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Private data of a window together with its recalc and repaint handlers.
///
/// Dropping the content is the window's free-data step; it happens when
/// the window is destroyed.
pub trait WindowContent: Any + std::fmt::Debug {
    /// Decide whether the visible content is stale.
    ///
    /// Called during a refresh when the window is flagged `RECALC`. Must not
    /// draw; request `REPAINT` through `win` instead.
    fn recalc(&mut self, win: &mut WindowCtx<'_>) -> Result<()> {
        let _ = win;
        Ok(())
    }

    /// Draw the window.
    ///
    /// Called during a refresh when the window is flagged `REPAINT`.
    fn repaint(&mut self, win: &mut WindowCtx<'_>, screen: &mut dyn Screen) -> Result<()> {
        let _ = (win, screen);
        Ok(())
    }

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The view of its window that a handler gets.
///
/// Drawing helpers take window-local coordinates.
#[derive(Debug)]
pub struct WindowCtx<'a> {
    id: WindowId,
    state: &'a WindowState,
    actions: &'a mut WindowActions,
    focused: bool,
}

impl<'a> WindowCtx<'a> {
    pub(crate) fn new(
        id: WindowId,
        state: &'a WindowState,
        actions: &'a mut WindowActions,
        focused: bool,
    ) -> Self {
        Self {
            id,
            state,
            actions,
            focused,
        }
    }

    /// Id of the window.
    pub const fn id(&self) -> WindowId {
        self.id
    }

    /// Current geometry.
    pub const fn state(&self) -> &WindowState {
        self.state
    }

    /// Whether this window holds the focus.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Flag more work for this window.
    pub fn request(&mut self, actions: WindowActions) {
        self.actions.insert(actions);
    }

    /// Move the cursor to a window-local position.
    pub fn move_to(&self, screen: &mut dyn Screen, row: u16, col: u16) {
        screen.move_to(
            self.state.row_offset.saturating_add(row),
            self.state.col_offset.saturating_add(col),
        );
    }

    /// Write text at the cursor, cut off at the window's right edge.
    ///
    /// Control characters are drawn in caret notation, so the text never
    /// leaves the cursor's row.
    pub fn addstr(&self, screen: &mut dyn Screen, text: &str) {
        let (_, col) = screen.cursor();
        let room = self.state.rect().right().saturating_sub(col);
        let text = printable(text);
        let visible = truncate_to_width(&text, usize::from(room));
        if !visible.is_empty() {
            screen.add_str(visible);
        }
    }

    /// Blank from the cursor to the window's right edge.
    ///
    /// A window that reaches the edge of the screen uses the terminal's
    /// clear; a narrower one is padded with spaces so its neighbours
    /// survive.
    pub fn clrtoeol(&self, screen: &mut dyn Screen) {
        let (screen_cols, _) = screen.size();
        let right = self.state.rect().right();
        if right >= screen_cols {
            screen.clear_to_eol();
            return;
        }

        let (_, col) = screen.cursor();
        let pad = usize::from(right.saturating_sub(col));
        if pad > 0 {
            screen.add_str(&" ".repeat(pad));
        }
    }
}

/// The longest prefix of `text` whose display width fits in `cols`.
///
/// Never splits a grapheme cluster.
pub fn truncate_to_width(text: &str, cols: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        used += grapheme.width();
        if used > cols {
            return text.get(..idx).unwrap_or_default();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::GridScreen;

    fn state(col_offset: u16, row_offset: u16, cols: u16, rows: u16) -> WindowState {
        WindowState {
            visible: true,
            cols,
            rows,
            col_offset,
            row_offset,
        }
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("e\u{301}x", 1), "e\u{301}");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_ctx_move_is_window_relative() {
        let st = state(4, 7, 10, 1);
        let mut actions = WindowActions::empty();
        let ctx = WindowCtx::new(WindowId::new(1), &st, &mut actions, false);
        let mut screen = GridScreen::new(20, 10);
        ctx.move_to(&mut screen, 0, 2);
        assert_eq!(screen.cursor(), (7, 6));
    }

    #[test]
    fn test_ctx_addstr_clips_to_window() {
        let st = state(2, 0, 5, 1);
        let mut actions = WindowActions::empty();
        let ctx = WindowCtx::new(WindowId::new(1), &st, &mut actions, false);
        let mut screen = GridScreen::new(20, 1);
        ctx.move_to(&mut screen, 0, 0);
        ctx.addstr(&mut screen, "abcdefgh");
        assert_eq!(screen.row_text(0).trim_end(), "  abcde");
    }

    #[test]
    fn test_ctx_addstr_escapes_controls() {
        let st = state(0, 1, 12, 1);
        let mut actions = WindowActions::empty();
        let ctx = WindowCtx::new(WindowId::new(1), &st, &mut actions, false);
        let mut screen = GridScreen::new(12, 3);
        ctx.move_to(&mut screen, 0, 0);
        ctx.addstr(&mut screen, "a\nb\x1b[2Jcdefgh");
        assert_eq!(screen.row_text(1), "a^Jb^[[2Jcde");
        assert_eq!(screen.row_text(2), " ".repeat(12));
        assert_eq!(screen.cursor(), (1, 12));
    }

    #[test]
    fn test_ctx_clrtoeol_pads_narrow_window() {
        let st = state(0, 0, 4, 1);
        let mut actions = WindowActions::empty();
        let ctx = WindowCtx::new(WindowId::new(1), &st, &mut actions, false);
        let mut screen = GridScreen::new(8, 1);
        screen.add_str("xxxxxxxx");
        ctx.move_to(&mut screen, 0, 1);
        ctx.clrtoeol(&mut screen);
        assert_eq!(screen.row_text(0), "x   xxxx");
    }

    #[test]
    fn test_ctx_request_sets_actions() {
        let st = state(0, 0, 4, 1);
        let mut actions = WindowActions::empty();
        let mut ctx = WindowCtx::new(WindowId::new(1), &st, &mut actions, true);
        assert!(ctx.is_focused());
        ctx.request(WindowActions::REPAINT);
        assert_eq!(actions, WindowActions::REPAINT);
    }
}
