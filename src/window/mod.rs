//! Window module: The host window tree the message line lives in.
//!
//! Windows are stored in an arena ([`WindowTree`]) and addressed by
//! [`WindowId`]. Parents own their children; a child only keeps its
//! parent's id as a back-reference.
//!
//! ```text
//! Root ─┬─ AllDialogs          (Maximise)
//!       └─ Container           (Fixed, 1-3 rows)
//!            └─ Message        (Fixed, 1 row)
//! ```
//!
//! Each window carries a set of pending [`WindowActions`]. A refresh first
//! runs `recalc` on every window flagged `RECALC`, then `repaint` on every
//! window flagged `REPAINT`.

mod content;
mod reflow;
mod tree;

pub use content::{WindowContent, WindowCtx};
pub use tree::WindowTree;

use crate::layout::Rect;
use bitflags::bitflags;

/// Requested size meaning "as much as the parent allows".
pub const UNLIMITED: u16 = u16::MAX;

/// Identifier of a window in a [`WindowTree`].
///
/// Ids are never reused, so a stale id simply stops resolving.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct WindowId(u32);

impl WindowId {
    pub(crate) const fn new(index: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self(index as u32)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "win#{}", self.0)
    }
}

/// Kind of window, used by containers to find specific children.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WindowType {
    /// The top of the tree, covering the whole terminal.
    Root,
    /// Parent of every dialog.
    AllDialogs,
    /// A plain layout container.
    Container,
    /// The message line.
    Message,
    /// Anything else supplied by the application.
    Custom,
}

/// Direction in which a window stacks its children.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Orientation {
    /// Children are stacked top to bottom.
    #[default]
    Vertical,
    /// Children are placed left to right.
    Horizontal,
}

/// How a window is sized along its parent's stacking axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SizePolicy {
    /// Exactly the requested size (or whatever is left).
    Fixed,
    /// Share the remaining space with the other maximised siblings.
    Maximise,
    /// Just enough for its own children.
    Minimise,
}

/// Roles the host registers so callers can find well-known windows
/// without holding their ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WindowRole {
    /// The container holding the message window.
    MessageContainer,
    /// The parent of all dialogs.
    AllDialogs,
}

/// Geometry computed by the last reflow.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct WindowState {
    /// Whether the window takes part in layout and drawing.
    pub visible: bool,
    /// Width in columns.
    pub cols: u16,
    /// Height in rows.
    pub rows: u16,
    /// Absolute column of the left edge.
    pub col_offset: u16,
    /// Absolute row of the top edge.
    pub row_offset: u16,
}

impl WindowState {
    /// The screen area covered by the window.
    pub const fn rect(&self) -> Rect {
        Rect::new(self.col_offset, self.row_offset, self.cols, self.rows)
    }

    pub(crate) const fn place(&mut self, rect: Rect) {
        self.col_offset = rect.x;
        self.row_offset = rect.y;
        self.cols = rect.width;
        self.rows = rect.height;
    }
}

bitflags! {
    /// Work a window is waiting for.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct WindowActions: u8 {
        /// Decide whether the visible content is stale.
        const RECALC = 0b0000_0001;
        /// Draw the window.
        const REPAINT = 0b0000_0010;
    }
}

/// A node of the window tree.
#[derive(Debug)]
pub struct Window {
    /// Kind of window.
    pub kind: WindowType,
    /// How children are stacked.
    pub orient: Orientation,
    /// Sizing along the parent's stacking axis.
    pub size: SizePolicy,
    /// Requested width, or [`UNLIMITED`].
    pub req_cols: u16,
    /// Requested height, or [`UNLIMITED`].
    pub req_rows: u16,
    /// Current geometry.
    pub state: WindowState,
    /// Pending work.
    pub actions: WindowActions,
    /// Geometry at the time of the last change notification.
    old_state: WindowState,
    parent: Option<WindowId>,
    children: Vec<WindowId>,
    content: Option<Box<dyn WindowContent>>,
}

impl Window {
    /// Create a detached, visible window with no content.
    pub fn new(
        kind: WindowType,
        orient: Orientation,
        size: SizePolicy,
        req_cols: u16,
        req_rows: u16,
    ) -> Self {
        Self {
            kind,
            orient,
            size,
            req_cols,
            req_rows,
            state: WindowState {
                visible: true,
                ..WindowState::default()
            },
            actions: WindowActions::empty(),
            old_state: WindowState::default(),
            parent: None,
            children: Vec::new(),
            content: None,
        }
    }

    /// Attach private data and the handlers that go with it (builder pattern).
    #[must_use]
    pub fn with_content(mut self, content: Box<dyn WindowContent>) -> Self {
        self.content = Some(content);
        self
    }

    /// The parent window, if attached.
    pub const fn parent(&self) -> Option<WindowId> {
        self.parent
    }

    /// Child windows, in stacking order.
    pub fn children(&self) -> &[WindowId] {
        &self.children
    }

    /// The window's private data, if any.
    pub fn content(&self) -> Option<&dyn WindowContent> {
        self.content.as_deref()
    }
}
