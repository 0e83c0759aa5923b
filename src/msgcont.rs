//! Message container: Holds the message window and anything stacked on it.
//!
//! The container sits at the bottom of the root window. Its last child is
//! the one on show; components that need the bottom line for a while push
//! their own window and pop it again when done.

use crate::error::{Error, Result};
use crate::msgwin;
use crate::window::{
    Orientation, SizePolicy, Window, WindowId, WindowRole, WindowTree, WindowType, UNLIMITED,
};
use tracing::debug;

/// Create a detached message container holding a fresh message window.
pub fn new(tree: &mut WindowTree) -> Result<WindowId> {
    let cont = tree.insert(Window::new(
        WindowType::Container,
        Orientation::Vertical,
        SizePolicy::Fixed,
        UNLIMITED,
        1,
    ));
    let win = msgwin::new(tree);
    tree.add_child(cont, win)?;
    Ok(cont)
}

/// The registered message container.
pub fn get_container(tree: &WindowTree) -> Option<WindowId> {
    tree.lookup_role(WindowRole::MessageContainer)
}

/// The message window, if it is the container's visible, topmost child.
pub fn get_msgwin(tree: &WindowTree) -> Option<WindowId> {
    let cont = get_container(tree)?;
    let &last = tree.children(cont).last()?;
    let win = tree.window(last)?;
    (win.kind == WindowType::Message && win.state.visible).then_some(last)
}

/// Stack `win` on top of the container, hiding what was shown before.
pub fn push_window(tree: &mut WindowTree, win: WindowId) -> Result<()> {
    let cont = get_container(tree).ok_or(Error::NoSuchWindow(win))?;
    if let Some(&last) = tree.children(cont).last() {
        tree.set_visible(last, false)?;
    }
    tree.add_child(cont, win)?;
    debug!(win = %win, "pushed onto message container");

    reflow_container(tree, cont);
    Ok(())
}

/// Take the topmost window off the container and show the one below it.
///
/// The popped window is detached, not destroyed. The bottom window always
/// stays, so popping a container with one child returns `None`.
pub fn pop_window(tree: &mut WindowTree) -> Option<WindowId> {
    let cont = get_container(tree)?;
    let children = tree.children(cont);
    if children.len() < 2 {
        return None;
    }
    let top = *children.last()?;
    let below = children[children.len() - 2];

    tree.detach(top).ok()?;
    tree.set_visible(below, true).ok()?;
    debug!(win = %top, "popped from message container");

    reflow_container(tree, cont);
    Some(top)
}

fn reflow_container(tree: &mut WindowTree, cont: WindowId) {
    let target = tree.parent(cont).unwrap_or(cont);
    tree.reflow(target);
}
