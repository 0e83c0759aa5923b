//! Notification bus: Lifecycle events for windows and colors.
//!
//! Observers register for a channel ([`NotifyType`]) with a callback and an
//! optional context window. [`WindowTree::send`] delivers an [`Event`] to
//! every matching observer in registration order. Callbacks get mutable
//! access to the tree, so they can flag work or remove themselves.

use crate::color::ColorId;
use crate::error::Result;
use crate::window::{WindowId, WindowTree};
use bitflags::bitflags;

/// Event channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NotifyType {
    /// Every channel.
    All,
    /// Window lifecycle.
    Window,
    /// Palette changes.
    Color,
}

/// Sub-type of a window event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NotifyWindow {
    /// A window was attached to a parent.
    Add,
    /// A window is about to be destroyed.
    Delete,
    /// A window's size, position or visibility changed.
    State,
    /// A window gained the focus.
    Focus,
}

bitflags! {
    /// What changed in a [`NotifyWindow::State`] event.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct WindowNotifyFlags: u8 {
        /// Became visible.
        const VISIBLE = 0b0000_0001;
        /// Became hidden.
        const HIDDEN = 0b0000_0010;
        /// Origin moved.
        const MOVED = 0b0000_0100;
        /// Gained rows.
        const TALLER = 0b0000_1000;
        /// Lost rows.
        const SHORTER = 0b0001_0000;
        /// Gained columns.
        const WIDER = 0b0010_0000;
        /// Lost columns.
        const NARROWER = 0b0100_0000;
    }
}

/// Payload of a window event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EventWindow {
    /// The window the event is about.
    pub win: WindowId,
    /// Details of a state change; empty for other sub-types.
    pub flags: WindowNotifyFlags,
}

/// An event travelling on the bus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// Window lifecycle event.
    Window {
        /// What happened.
        subtype: NotifyWindow,
        /// Which window it happened to.
        data: Option<EventWindow>,
    },
    /// A palette entry changed.
    Color {
        /// The affected color id.
        cid: ColorId,
    },
}

impl Event {
    /// Build a window event with a payload.
    pub const fn window(subtype: NotifyWindow, win: WindowId, flags: WindowNotifyFlags) -> Self {
        Self::Window {
            subtype,
            data: Some(EventWindow { win, flags }),
        }
    }

    /// The channel this event travels on.
    pub const fn event_type(&self) -> NotifyType {
        match self {
            Self::Window { .. } => NotifyType::Window,
            Self::Color { .. } => NotifyType::Color,
        }
    }
}

/// Handle of a registered observer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ObserverId(u32);

/// Observer callback.
///
/// Returning an error tells the bus the event was malformed for this
/// observer; the bus logs it and carries on.
pub type ObserverFn = fn(&mut NotifyCallback<'_>) -> Result<()>;

/// Everything an observer is called with.
#[derive(Debug)]
pub struct NotifyCallback<'a> {
    /// The event being delivered.
    pub event: &'a Event,
    /// Context supplied when the observer was registered.
    pub global_data: Option<WindowId>,
    /// The observer being called.
    pub observer: ObserverId,
    /// The host tree.
    pub windows: &'a mut WindowTree,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Observer {
    pub(crate) id: ObserverId,
    event_type: NotifyType,
    pub(crate) callback: ObserverFn,
    pub(crate) global_data: Option<WindowId>,
}

impl Observer {
    pub(crate) fn wants(&self, event: &Event) -> bool {
        self.event_type == NotifyType::All || self.event_type == event.event_type()
    }
}

/// Registry of observers.
#[derive(Debug, Default)]
pub struct Notify {
    observers: Vec<Observer>,
    next_id: u32,
}

impl Notify {
    /// Register `callback` for events on `event_type`.
    pub fn observer_add(
        &mut self,
        event_type: NotifyType,
        callback: ObserverFn,
        global_data: Option<WindowId>,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push(Observer {
            id,
            event_type,
            callback,
            global_data,
        });
        id
    }

    /// Deregister an observer.
    ///
    /// Takes effect immediately, even while an event is being delivered.
    /// Returns `false` if the observer was not registered.
    pub fn observer_remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    /// Check whether an observer is still registered.
    pub fn contains(&self, id: ObserverId) -> bool {
        self.observers.iter().any(|o| o.id == id)
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Observers registered right now; later registrations don't see the
    /// event being delivered.
    pub(crate) fn snapshot(&self) -> Vec<Observer> {
        self.observers.clone()
    }
}
