//! `WindowTree`: Arena of windows, focus token, role registry and bus.

use super::{
    Orientation, SizePolicy, Window, WindowActions, WindowContent, WindowCtx, WindowId,
    WindowRole, WindowType,
};
use crate::error::{Error, Result};
use crate::layout::Rect;
use crate::notify::{Event, Notify, NotifyCallback, NotifyWindow, WindowNotifyFlags};
use crate::terminal::Screen;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// The host window manager.
///
/// Owns every window, the single focus token, the notification bus and the
/// registry that maps well-known roles to windows.
#[derive(Debug)]
pub struct WindowTree {
    /// Window slots; a destroyed window leaves `None` behind.
    windows: Vec<Option<Window>>,
    root: WindowId,
    focus: Option<WindowId>,
    notify: Notify,
    roles: HashMap<WindowRole, WindowId>,
    /// Number of reflows performed.
    generation: u64,
}

impl WindowTree {
    /// Create a tree whose root covers a `cols` x `rows` terminal.
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut root = Window::new(
            WindowType::Root,
            Orientation::Vertical,
            SizePolicy::Fixed,
            cols,
            rows,
        );
        root.state.place(Rect::new(0, 0, cols, rows));

        Self {
            windows: vec![Some(root)],
            root: WindowId::new(0),
            focus: None,
            notify: Notify::default(),
            roles: HashMap::new(),
            generation: 0,
        }
    }

    /// The root window.
    pub const fn root(&self) -> WindowId {
        self.root
    }

    /// Add a detached window to the arena.
    pub fn insert(&mut self, window: Window) -> WindowId {
        let id = WindowId::new(self.windows.len());
        self.windows.push(Some(window));
        trace!(win = %id, "window created");
        id
    }

    /// Attach a detached window as the last child of `parent`.
    pub fn add_child(&mut self, parent: WindowId, child: WindowId) -> Result<()> {
        if !self.contains(parent) {
            return Err(Error::NoSuchWindow(parent));
        }
        let win = self.window_mut(child).ok_or(Error::NoSuchWindow(child))?;
        if let Some(old) = win.parent.replace(parent) {
            warn!(win = %child, parent = %old, "window re-parented");
            if let Some(old) = self.window_mut(old) {
                old.children.retain(|&c| c != child);
            }
        }
        if let Some(parent) = self.window_mut(parent) {
            parent.children.push(child);
        }

        self.send(Event::window(NotifyWindow::Add, child, WindowNotifyFlags::empty()));
        Ok(())
    }

    /// Detach a window from its parent, keeping it and its subtree alive.
    pub fn detach(&mut self, id: WindowId) -> Result<()> {
        if id == self.root {
            return Err(Error::RootWindow);
        }
        let win = self.window_mut(id).ok_or(Error::NoSuchWindow(id))?;
        if let Some(parent) = win.parent.take() {
            if let Some(parent) = self.window_mut(parent) {
                parent.children.retain(|&c| c != id);
            }
        }
        Ok(())
    }

    /// Check whether `id` is a live window.
    pub fn contains(&self, id: WindowId) -> bool {
        self.window(id).is_some()
    }

    /// Number of live windows, the root included.
    pub fn len(&self) -> usize {
        self.windows.iter().flatten().count()
    }

    /// Always `false`: the root lives as long as the tree.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a window.
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id.index()).and_then(Option::as_ref)
    }

    /// Look up a window mutably.
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// The parent of `id`.
    pub fn parent(&self, id: WindowId) -> Option<WindowId> {
        self.window(id).and_then(|w| w.parent)
    }

    /// The children of `id`; empty for unknown windows.
    pub fn children(&self, id: WindowId) -> &[WindowId] {
        self.window(id).map_or(&[], |w| w.children.as_slice())
    }

    /// Typed access to a window's private data.
    pub fn wdata<T: WindowContent>(&self, id: WindowId) -> Option<&T> {
        self.window(id)?.content.as_deref()?.as_any().downcast_ref()
    }

    /// Typed mutable access to a window's private data.
    pub fn wdata_mut<T: WindowContent>(&mut self, id: WindowId) -> Option<&mut T> {
        self.window_mut(id)?
            .content
            .as_deref_mut()?
            .as_any_mut()
            .downcast_mut()
    }

    /// Flag work for a window; ignored for unknown windows.
    pub fn request(&mut self, id: WindowId, actions: WindowActions) {
        if let Some(win) = self.window_mut(id) {
            win.actions.insert(actions);
        }
    }

    /// Show or hide a window. Takes effect at the next reflow.
    pub fn set_visible(&mut self, id: WindowId, visible: bool) -> Result<()> {
        let win = self.window_mut(id).ok_or(Error::NoSuchWindow(id))?;
        win.state.visible = visible;
        Ok(())
    }

    /// Check whether a window and all its ancestors are visible.
    pub fn is_visible(&self, id: WindowId) -> bool {
        let mut cur = Some(id);
        while let Some(id) = cur {
            match self.window(id) {
                Some(win) if win.state.visible => cur = win.parent,
                _ => return false,
            }
        }
        true
    }

    /// The window holding the focus.
    pub const fn focus(&self) -> Option<WindowId> {
        self.focus
    }

    /// Check whether `id` holds the focus.
    pub fn is_focused(&self, id: WindowId) -> bool {
        self.focus == Some(id)
    }

    /// Hand the focus to `id`, or to nobody.
    ///
    /// Both the previous and the new holder are flagged `RECALC`, since
    /// whether they may draw has changed. Unknown windows are ignored.
    /// Returns the previous holder.
    pub fn set_focus(&mut self, id: Option<WindowId>) -> Option<WindowId> {
        let old = self.focus;
        if let Some(new) = id {
            if !self.contains(new) {
                warn!(win = %new, "focus requested for unknown window");
                return old;
            }
        }
        if old == id {
            return old;
        }

        self.focus = id;
        for win in [old, id].into_iter().flatten() {
            self.request(win, WindowActions::RECALC);
        }
        debug!(from = ?old, to = ?id, "focus changed");

        if let Some(new) = id {
            self.send(Event::window(NotifyWindow::Focus, new, WindowNotifyFlags::empty()));
        }
        old
    }

    /// The notification bus.
    pub const fn notify(&self) -> &Notify {
        &self.notify
    }

    /// The notification bus, mutably.
    pub const fn notify_mut(&mut self) -> &mut Notify {
        &mut self.notify
    }

    /// Deliver an event to every matching observer.
    pub fn send(&mut self, event: Event) {
        for observer in self.notify.snapshot() {
            if !observer.wants(&event) || !self.notify.contains(observer.id) {
                continue;
            }
            let mut nc = NotifyCallback {
                event: &event,
                global_data: observer.global_data,
                observer: observer.id,
                windows: self,
            };
            if let Err(err) = (observer.callback)(&mut nc) {
                debug!(?event, error = %err, "observer rejected event");
            }
        }
    }

    /// Make `id` findable under `role`.
    pub fn register_role(&mut self, role: WindowRole, id: WindowId) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::NoSuchWindow(id));
        }
        self.roles.insert(role, id);
        Ok(())
    }

    /// Forget the window registered under `role`.
    pub fn unregister_role(&mut self, role: WindowRole) -> Option<WindowId> {
        self.roles.remove(&role)
    }

    /// The live window registered under `role`.
    pub fn lookup_role(&self, role: WindowRole) -> Option<WindowId> {
        self.roles.get(&role).copied().filter(|&id| self.contains(id))
    }

    /// Resize the terminal and lay everything out again.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let root = self.root;
        if let Some(win) = self.window_mut(root) {
            win.req_cols = cols;
            win.req_rows = rows;
            win.state.place(Rect::new(0, 0, cols, rows));
        }
        self.reflow(root);
    }

    /// Number of reflows performed so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub(super) const fn bump_generation(&mut self) {
        self.generation += 1;
    }

    /// Destroy a window and everything below it.
    ///
    /// Children go first. Each window is announced with a `Delete` event
    /// while it still exists, then dropped along with its private data.
    pub fn destroy(&mut self, id: WindowId) -> Result<()> {
        self.detach(id)?;
        self.free(id);
        Ok(())
    }

    fn free(&mut self, id: WindowId) {
        for child in self.children(id).to_vec() {
            self.free(child);
        }

        self.send(Event::window(NotifyWindow::Delete, id, WindowNotifyFlags::empty()));

        if self.focus == Some(id) {
            self.focus = None;
        }
        self.roles.retain(|_, win| *win != id);
        if let Some(slot) = self.windows.get_mut(id.index()) {
            *slot = None;
        }
        debug!(win = %id, "window destroyed");
    }

    /// Run `recalc` on every visible window flagged `RECALC`.
    pub fn recalc(&mut self) {
        for id in self.visible_preorder() {
            let focused = self.is_focused(id);
            let Some(win) = self.window_mut(id) else {
                continue;
            };
            if !win.actions.contains(WindowActions::RECALC) {
                continue;
            }
            win.actions.remove(WindowActions::RECALC);

            let Window {
                state,
                actions,
                content,
                ..
            } = win;
            if let Some(content) = content.as_deref_mut() {
                let mut ctx = WindowCtx::new(id, state, actions, focused);
                if let Err(err) = content.recalc(&mut ctx) {
                    warn!(win = %id, error = %err, "recalc failed");
                }
            }
        }
    }

    /// Run `repaint` on every visible window flagged `REPAINT`.
    ///
    /// A window that reflow left without rows or columns has nowhere to
    /// draw; its flag is dropped without calling the content.
    pub fn repaint(&mut self, screen: &mut dyn Screen) {
        for id in self.visible_preorder() {
            let focused = self.is_focused(id);
            let Some(win) = self.window_mut(id) else {
                continue;
            };
            if !win.actions.contains(WindowActions::REPAINT) {
                continue;
            }
            win.actions.remove(WindowActions::REPAINT);
            if win.state.rect().is_empty() {
                trace!(win = %id, "repaint skipped, no area");
                continue;
            }

            let Window {
                state,
                actions,
                content,
                ..
            } = win;
            if let Some(content) = content.as_deref_mut() {
                let mut ctx = WindowCtx::new(id, state, actions, focused);
                if let Err(err) = content.repaint(&mut ctx, screen) {
                    warn!(win = %id, error = %err, "repaint failed");
                }
            }
        }
    }

    /// One refresh cycle: recalc, then repaint.
    pub fn refresh(&mut self, screen: &mut dyn Screen) {
        self.recalc();
        self.repaint(screen);
    }

    /// Visible windows reachable from the root, parents before children.
    fn visible_preorder(&self) -> Vec<WindowId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(win) = self.window(id) else {
                continue;
            };
            if !win.state.visible {
                continue;
            }
            order.push(id);
            stack.extend(win.children.iter().rev());
        }
        order
    }
}
