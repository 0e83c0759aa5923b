//! Reflow: Compute window geometry from size policies.
//!
//! Space along the stacking axis is handed out in three passes: `Fixed`
//! children take their request, `Minimise` children take what their own
//! children need, and `Maximise` children share whatever is left.

use super::{Orientation, SizePolicy, WindowId, WindowState, WindowTree};
use crate::layout::Rect;
use crate::notify::{Event, NotifyWindow, WindowNotifyFlags};
use tracing::{debug, trace};

impl WindowTree {
    /// Lay out the children of `id` (recursively) inside its current area.
    ///
    /// Afterwards every window in the subtree whose geometry or visibility
    /// changed receives a [`NotifyWindow::State`] event.
    pub fn reflow(&mut self, id: WindowId) {
        if !self.contains(id) {
            return;
        }
        self.bump_generation();
        debug!(win = %id, generation = self.generation(), "reflow");

        self.layout(id);
        self.notify_changes(id);
    }

    fn layout(&mut self, id: WindowId) {
        let Some(win) = self.window(id) else {
            return;
        };
        let area = win.state.rect();
        let vertical = win.orient == Orientation::Vertical;
        let children = win.children.clone();

        let (main_total, cross_total) = if vertical {
            (area.height, area.width)
        } else {
            (area.width, area.height)
        };
        let extents = self.share_main_axis(&children, vertical, main_total);

        let mut offset: u16 = 0;
        for (&child, extent) in children.iter().zip(extents) {
            let Some(win) = self.window_mut(child) else {
                continue;
            };

            let rect = if win.state.visible {
                let req_cross = if vertical { win.req_cols } else { win.req_rows };
                let cross = if win.size == SizePolicy::Fixed {
                    req_cross.min(cross_total)
                } else {
                    cross_total
                };
                if vertical {
                    Rect::new(area.x, area.y.saturating_add(offset), cross, extent)
                } else {
                    Rect::new(area.x.saturating_add(offset), area.y, extent, cross)
                }
            } else {
                Rect::new(area.x, area.y, 0, 0)
            };

            win.state.place(rect);
            offset = offset.saturating_add(rect_extent(rect, vertical));
            trace!(win = %child, ?rect, "placed");

            self.layout(child);
        }
    }

    /// Split `total` cells along the stacking axis between `children`.
    fn share_main_axis(&self, children: &[WindowId], vertical: bool, total: u16) -> Vec<u16> {
        let mut extents = vec![0u16; children.len()];
        let mut left = total;

        for pass in [SizePolicy::Fixed, SizePolicy::Minimise] {
            for (i, &child) in children.iter().enumerate() {
                let Some(win) = self.window(child).filter(|w| w.state.visible) else {
                    continue;
                };
                if win.size != pass {
                    continue;
                }
                let want = match pass {
                    SizePolicy::Fixed if vertical => win.req_rows,
                    SizePolicy::Fixed => win.req_cols,
                    _ => self.demand(child, vertical),
                };
                extents[i] = want.min(left);
                left -= extents[i];
            }
        }

        let maximised: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|&(_, &child)| {
                self.window(child)
                    .is_some_and(|w| w.state.visible && w.size == SizePolicy::Maximise)
            })
            .map(|(i, _)| i)
            .collect();

        if let Ok(count) = u16::try_from(maximised.len()) {
            if count > 0 {
                let share = left / count;
                let extra = left % count;
                for (k, &i) in maximised.iter().enumerate() {
                    extents[i] = if k == 0 { share + extra } else { share };
                }
            }
        }

        extents
    }

    /// How much room a window needs along one axis.
    fn demand(&self, id: WindowId, vertical: bool) -> u16 {
        let Some(win) = self.window(id).filter(|w| w.state.visible) else {
            return 0;
        };
        let req = if vertical { win.req_rows } else { win.req_cols };
        if win.size == SizePolicy::Fixed && req != super::UNLIMITED {
            return req;
        }

        let stacked = (win.orient == Orientation::Vertical) == vertical;
        let needs = win.children.iter().map(|&c| self.demand(c, vertical));
        if stacked {
            needs.fold(0, u16::saturating_add)
        } else {
            needs.max().unwrap_or(0)
        }
    }

    fn notify_changes(&mut self, id: WindowId) {
        let mut changed = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let Some(win) = self.window_mut(id) else {
                continue;
            };
            let flags = state_changes(&win.old_state, &win.state);
            if !flags.is_empty() {
                win.old_state = win.state;
                changed.push((id, flags));
            }
            stack.extend(win.children.iter().rev());
        }

        for (id, flags) in changed {
            self.send(Event::window(NotifyWindow::State, id, flags));
        }
    }
}

const fn rect_extent(rect: Rect, vertical: bool) -> u16 {
    if vertical {
        rect.height
    } else {
        rect.width
    }
}

fn state_changes(old: &WindowState, new: &WindowState) -> WindowNotifyFlags {
    let mut flags = WindowNotifyFlags::empty();
    if new.visible != old.visible {
        flags |= if new.visible {
            WindowNotifyFlags::VISIBLE
        } else {
            WindowNotifyFlags::HIDDEN
        };
    }
    if new.col_offset != old.col_offset || new.row_offset != old.row_offset {
        flags |= WindowNotifyFlags::MOVED;
    }
    if new.rows > old.rows {
        flags |= WindowNotifyFlags::TALLER;
    } else if new.rows < old.rows {
        flags |= WindowNotifyFlags::SHORTER;
    }
    if new.cols > old.cols {
        flags |= WindowNotifyFlags::WIDER;
    } else if new.cols < old.cols {
        flags |= WindowNotifyFlags::NARROWER;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::notify::{NotifyCallback, NotifyType};
    use crate::window::{Window, WindowType, UNLIMITED};

    fn add(
        tree: &mut WindowTree,
        parent: WindowId,
        orient: Orientation,
        size: SizePolicy,
        cols: u16,
        rows: u16,
    ) -> WindowId {
        let id = tree.insert(Window::new(WindowType::Custom, orient, size, cols, rows));
        tree.add_child(parent, id).unwrap();
        id
    }

    // A vertical window that takes whatever room is left.
    fn filler(tree: &mut WindowTree, parent: WindowId) -> WindowId {
        add(tree, parent, Orientation::Vertical, SizePolicy::Maximise, UNLIMITED, UNLIMITED)
    }

    fn rect_of(tree: &WindowTree, id: WindowId) -> Rect {
        tree.window(id).unwrap().state.rect()
    }

    // Records the flags of every State event on the root's req_cols.
    fn record_flags(nc: &mut NotifyCallback<'_>) -> Result<()> {
        if let Event::Window {
            subtype: NotifyWindow::State,
            data: Some(data),
        } = nc.event
        {
            if Some(data.win) == nc.global_data {
                let root = nc.windows.root();
                nc.windows.window_mut(root).unwrap().req_cols = u16::from(data.flags.bits());
            }
        }
        Ok(())
    }

    fn recorded(tree: &WindowTree) -> WindowNotifyFlags {
        let bits = tree.window(tree.root()).unwrap().req_cols;
        WindowNotifyFlags::from_bits_truncate(u8::try_from(bits).unwrap())
    }

    #[test]
    fn test_reflow_fixed_then_maximise() {
        let mut tree = WindowTree::new(80, 24);
        let root = tree.root();
        let body = filler(&mut tree, root);
        let line = add(&mut tree, root, Orientation::Vertical, SizePolicy::Fixed, UNLIMITED, 1);
        tree.reflow(root);

        assert_eq!(rect_of(&tree, body), Rect::new(0, 0, 80, 23));
        assert_eq!(rect_of(&tree, line), Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_reflow_maximise_shares_remainder() {
        let mut tree = WindowTree::new(10, 7);
        let root = tree.root();
        let a = filler(&mut tree, root);
        let b = filler(&mut tree, root);
        tree.reflow(root);

        assert_eq!(rect_of(&tree, a), Rect::new(0, 0, 10, 4));
        assert_eq!(rect_of(&tree, b), Rect::new(0, 4, 10, 3));
    }

    #[test]
    fn test_reflow_minimise_uses_children_demand() {
        let mut tree = WindowTree::new(20, 10);
        let root = tree.root();
        let fill = filler(&mut tree, root);
        let bar = add(
            &mut tree,
            root,
            Orientation::Vertical,
            SizePolicy::Minimise,
            UNLIMITED,
            UNLIMITED,
        );
        add(&mut tree, bar, Orientation::Vertical, SizePolicy::Fixed, UNLIMITED, 2);
        add(&mut tree, bar, Orientation::Vertical, SizePolicy::Fixed, UNLIMITED, 1);
        tree.reflow(root);

        assert_eq!(rect_of(&tree, bar), Rect::new(0, 7, 20, 3));
        assert_eq!(rect_of(&tree, fill), Rect::new(0, 0, 20, 7));
    }

    #[test]
    fn test_reflow_fixed_caps_cross_axis() {
        let mut tree = WindowTree::new(20, 4);
        let root = tree.root();
        let row = add(&mut tree, root, Orientation::Horizontal, SizePolicy::Fixed, UNLIMITED, 1);
        let left = add(&mut tree, row, Orientation::Vertical, SizePolicy::Fixed, 5, 3);
        let right = filler(&mut tree, row);
        tree.reflow(root);

        assert_eq!(rect_of(&tree, left), Rect::new(0, 0, 5, 1));
        assert_eq!(rect_of(&tree, right), Rect::new(5, 0, 15, 1));
    }

    #[test]
    fn test_reflow_fixed_larger_than_parent() {
        let mut tree = WindowTree::new(10, 2);
        let root = tree.root();
        let a = add(&mut tree, root, Orientation::Vertical, SizePolicy::Fixed, UNLIMITED, 5);
        let b = add(&mut tree, root, Orientation::Vertical, SizePolicy::Fixed, UNLIMITED, 1);
        tree.reflow(root);

        assert_eq!(rect_of(&tree, a).height, 2);
        assert_eq!(rect_of(&tree, b).height, 0);
    }

    #[test]
    fn test_reflow_hidden_gets_nothing() {
        let mut tree = WindowTree::new(10, 6);
        let root = tree.root();
        let a = add(&mut tree, root, Orientation::Vertical, SizePolicy::Fixed, UNLIMITED, 2);
        let b = filler(&mut tree, root);
        tree.set_visible(a, false).unwrap();
        tree.reflow(root);

        assert!(rect_of(&tree, a).is_empty());
        assert_eq!(rect_of(&tree, b), Rect::new(0, 0, 10, 6));
    }

    #[test]
    fn test_reflow_counts_generations() {
        let mut tree = WindowTree::new(10, 6);
        let root = tree.root();
        filler(&mut tree, root);
        assert_eq!(tree.generation(), 0);
        tree.reflow(root);
        tree.reflow(root);
        assert_eq!(tree.generation(), 2);
        tree.reflow(WindowId::new(77));
        assert_eq!(tree.generation(), 2);
    }

    #[test]
    fn test_reflow_sends_state_flags() {
        let mut tree = WindowTree::new(10, 6);
        let root = tree.root();
        let a = add(&mut tree, root, Orientation::Vertical, SizePolicy::Fixed, UNLIMITED, 2);
        let b = filler(&mut tree, root);
        tree.notify_mut().observer_add(NotifyType::Window, record_flags, Some(b));

        tree.reflow(root);
        let first = recorded(&tree);
        assert_eq!(
            first,
            WindowNotifyFlags::VISIBLE
                | WindowNotifyFlags::MOVED
                | WindowNotifyFlags::TALLER
                | WindowNotifyFlags::WIDER
        );

        tree.window_mut(a).unwrap().req_rows = 4;
        tree.reflow(root);
        let second = recorded(&tree);
        assert_eq!(second, WindowNotifyFlags::MOVED | WindowNotifyFlags::SHORTER);
    }

    #[test]
    fn test_state_changes_none() {
        let state = WindowState {
            visible: true,
            cols: 3,
            rows: 3,
            col_offset: 1,
            row_offset: 1,
        };
        assert!(state_changes(&state, &state).is_empty());
    }
}
