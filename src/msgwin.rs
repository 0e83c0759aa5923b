//! Message window: The line at the bottom of the screen.
//!
//! The message window shows one short message (information, warning or
//! error) in a colour. While it holds the focus it draws nothing at all,
//! which leaves the line to whoever is driving it directly (a prompt or a
//! progress meter). Once the focus moves elsewhere, the next refresh puts
//! the stored message back.
//!
//! # Example
//!
//! ```rust
//! use msgline::{msgwin, rootwin, ColorId, GridScreen};
//!
//! let mut tree = rootwin::init(40, 10).unwrap();
//! let mut screen = GridScreen::new(40, 10);
//!
//! msgwin::set_text(&mut tree, None, Some("Mailbox is read-only."), ColorId::Warning);
//! tree.refresh(&mut screen);
//! assert!(screen.row_text(9).starts_with("Mailbox is read-only."));
//! ```

use crate::color::ColorId;
use crate::error::{Error, Result};
use crate::msgcont;
use crate::notify::{Event, NotifyCallback, NotifyType, NotifyWindow};
use crate::terminal::Screen;
use crate::window::{
    Orientation, SizePolicy, Window, WindowActions, WindowContent, WindowCtx, WindowId,
    WindowTree, WindowType, UNLIMITED,
};
use std::any::Any;
use tracing::{debug, trace};

/// Smallest height the message container may be given.
pub const MIN_HEIGHT: i16 = 1;
/// Largest height the message container may be given.
pub const MAX_HEIGHT: i16 = 3;

/// Private data of a message window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgWinData {
    /// Cached message; `None` draws an empty line.
    pub text: Option<String>,
    /// Colour of the message.
    pub cid: ColorId,
}

impl WindowContent for MsgWinData {
    fn recalc(&mut self, win: &mut WindowCtx<'_>) -> Result<()> {
        if win.is_focused() {
            return Ok(());
        }

        win.request(WindowActions::REPAINT);
        trace!(win = %win.id(), "recalc done, request repaint");
        Ok(())
    }

    fn repaint(&mut self, win: &mut WindowCtx<'_>, screen: &mut dyn Screen) -> Result<()> {
        if win.is_focused() {
            return Ok(());
        }

        win.move_to(screen, 0, 0);
        screen.set_normal_backed_color_by_id(self.cid);
        win.move_to(screen, 0, 0);
        if let Some(text) = self.text.as_deref() {
            win.addstr(screen, text);
        }
        screen.set_color_by_id(ColorId::Normal);
        win.clrtoeol(screen);

        trace!(win = %win.id(), "repaint done");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Bus observer for the message window's own lifecycle events.
fn msgwin_window_observer(nc: &mut NotifyCallback<'_>) -> Result<()> {
    let Event::Window { subtype, data } = *nc.event else {
        return Ok(());
    };
    let win = nc.global_data.ok_or(Error::MissingContext)?;
    let data = data.ok_or(Error::MissingPayload)?;

    if data.win != win {
        return Ok(());
    }

    match subtype {
        NotifyWindow::State => {
            nc.windows.request(win, WindowActions::RECALC);
            debug!(win = %win, flags = ?data.flags, "window state done, request recalc");
        }
        NotifyWindow::Delete => {
            nc.windows.notify_mut().observer_remove(nc.observer);
            debug!(win = %win, "window delete done");
        }
        NotifyWindow::Add | NotifyWindow::Focus => {}
    }
    Ok(())
}

/// Create a detached message window.
///
/// The window is one row high and as wide as its parent allows. It starts
/// with no text in [`ColorId::Normal`].
pub fn new(tree: &mut WindowTree) -> WindowId {
    let win = Window::new(
        WindowType::Message,
        Orientation::Vertical,
        SizePolicy::Fixed,
        UNLIMITED,
        1,
    )
    .with_content(Box::<MsgWinData>::default());

    let id = tree.insert(win);
    tree.notify_mut().observer_add(NotifyType::Window, msgwin_window_observer, Some(id));
    id
}

fn resolve(tree: &WindowTree, win: Option<WindowId>) -> Option<WindowId> {
    win.or_else(|| msgcont::get_msgwin(tree))
}

/// Get the text of a message window.
///
/// With `win` of `None` the window is looked up through the message
/// container.
pub fn get_text(tree: &WindowTree, win: Option<WindowId>) -> Option<&str> {
    let win = resolve(tree, win)?;
    tree.wdata::<MsgWinData>(win)?.text.as_deref()
}

/// Set the text of a message window.
///
/// Passing `None` or an empty string for `text` clears the message. The
/// line is redrawn at the next refresh, unless the window holds the focus
/// at that point.
pub fn set_text(tree: &mut WindowTree, win: Option<WindowId>, text: Option<&str>, cid: ColorId) {
    let Some(win) = resolve(tree, win) else {
        return;
    };
    let Some(data) = tree.wdata_mut::<MsgWinData>(win) else {
        return;
    };

    data.text = text.filter(|t| !t.is_empty()).map(str::to_owned);
    data.cid = cid;

    tree.request(win, WindowActions::RECALC);
}

/// Clear the text of a message window.
pub fn clear_text(tree: &mut WindowTree, win: Option<WindowId>) {
    set_text(tree, win, None, ColorId::Normal);
}

/// The message window, if the message container holds one.
pub fn get_window(tree: &WindowTree) -> Option<WindowId> {
    msgcont::get_msgwin(tree)
}

/// Width of the message window in columns; 0 if there is none.
pub fn get_width(tree: &WindowTree) -> usize {
    msgcont::get_msgwin(tree)
        .and_then(|win| tree.window(win))
        .map_or(0, |win| usize::from(win.state.cols))
}

/// Resize the message container.
///
/// `height` is clamped to `1..=3` rows. The container's parent is laid out
/// again straight away.
pub fn set_height(tree: &mut WindowTree, height: i16) {
    let Some(win) = msgcont::get_msgwin(tree) else {
        return;
    };
    let Some(cont) = tree.parent(win) else {
        return;
    };

    let height = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    if let Some(cont_win) = tree.window_mut(cont) {
        // The clamp keeps the value positive.
        cont_win.req_rows = height.unsigned_abs();
    }

    if let Some(parent) = tree.parent(cont) {
        tree.reflow(parent);
    }
}
