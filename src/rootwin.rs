//! Root window: Builds the standard screen layout.
//!
//! ```text
//! Root ─┬─ AllDialogs          (Maximise)
//!       └─ MessageContainer    (Fixed)
//!            └─ Message
//! ```

use crate::error::Result;
use crate::msgcont;
use crate::window::{
    Orientation, SizePolicy, Window, WindowRole, WindowTree, WindowType, UNLIMITED,
};
use tracing::{info, warn};

/// Build the standard layout for a `cols` x `rows` terminal.
///
/// Both well-known windows are registered under their [`WindowRole`], and
/// the tree is laid out once.
pub fn init(cols: u16, rows: u16) -> Result<WindowTree> {
    let mut tree = WindowTree::new(cols, rows);
    let root = tree.root();

    let dialogs = tree.insert(Window::new(
        WindowType::AllDialogs,
        Orientation::Vertical,
        SizePolicy::Maximise,
        UNLIMITED,
        UNLIMITED,
    ));
    tree.add_child(root, dialogs)?;

    let cont = msgcont::new(&mut tree)?;
    tree.add_child(root, cont)?;

    tree.register_role(WindowRole::AllDialogs, dialogs)?;
    tree.register_role(WindowRole::MessageContainer, cont)?;

    tree.reflow(root);
    info!(cols, rows, "root window ready");
    Ok(tree)
}

/// Build the standard layout for the current terminal size.
pub fn init_from_terminal() -> Result<WindowTree> {
    let (cols, rows) = crossterm::terminal::size()?;
    init(cols, rows)
}

/// Destroy the well-known windows and forget their roles.
pub fn cleanup(tree: &mut WindowTree) {
    for role in [WindowRole::MessageContainer, WindowRole::AllDialogs] {
        let Some(win) = tree.unregister_role(role) else {
            continue;
        };
        if let Err(err) = tree.destroy(win) {
            warn!(?role, error = %err, "cleanup failed");
        }
    }
    info!("root window cleaned up");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgwin;

    #[test]
    fn test_init_layout() {
        let tree = init(80, 24).unwrap();
        let root = tree.root();
        assert_eq!(tree.children(root).len(), 2);

        let dialogs = tree.lookup_role(WindowRole::AllDialogs).unwrap();
        let cont = tree.lookup_role(WindowRole::MessageContainer).unwrap();
        assert_eq!(tree.window(dialogs).unwrap().state.rect().height, 23);
        assert_eq!(tree.window(cont).unwrap().state.row_offset, 23);

        let win = msgwin::get_window(&tree).unwrap();
        assert_eq!(tree.window(win).unwrap().state.cols, 80);
        assert_eq!(tree.generation(), 1);
    }

    #[test]
    fn test_cleanup() {
        let mut tree = init(80, 24).unwrap();
        cleanup(&mut tree);
        assert_eq!(tree.len(), 1);
        assert!(tree.notify().is_empty());
        assert_eq!(msgwin::get_window(&tree), None);
        assert_eq!(tree.lookup_role(WindowRole::AllDialogs), None);
    }

    #[test]
    fn test_resize_follows_terminal() {
        let mut tree = init(80, 24).unwrap();
        tree.resize(100, 30);
        assert_eq!(msgwin::get_width(&tree), 100);
        let win = msgwin::get_window(&tree).unwrap();
        assert_eq!(tree.window(win).unwrap().state.row_offset, 29);
    }
}
