//! # msgline
//!
//! A focus-gated message line for terminal user interfaces.
//!
//! The message window is a one-row widget at the bottom of the screen. It
//! shows the latest informational or error message, and steps aside while
//! another component (a prompt, a progress meter) holds the focus.
//!
//! ## Core Concepts
//!
//! - **Window tree**: An arena of windows laid out by size policy
//! - **Deferred drawing**: Windows are flagged for recalc/repaint and drawn
//!   in one refresh pass
//! - **Focus gate**: A focused message window draws nothing
//! - **Notification bus**: Windows learn about geometry changes and their
//!   own destruction through observers
//!
//! ## Example
//!
//! ```rust
//! use msgline::{msgwin, rootwin, ColorId, GridScreen};
//!
//! let mut tree = rootwin::init(80, 24).unwrap();
//! let mut screen = GridScreen::new(80, 24);
//!
//! msgwin::set_text(&mut tree, None, Some("3 new messages"), ColorId::Message);
//! tree.refresh(&mut screen);
//!
//! assert_eq!(msgwin::get_text(&tree, None), Some("3 new messages"));
//! assert!(screen.row_text(23).starts_with("3 new messages"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod layout;
pub mod msgcont;
pub mod msgwin;
pub mod notify;
pub mod rootwin;
pub mod terminal;
pub mod window;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, Modifiers, Rgb, Style};
pub use color::{ColorId, Palette};
pub use config::Config;
pub use error::{Error, Result};
pub use layout::Rect;
pub use msgwin::MsgWinData;
pub use notify::{Event, Notify, NotifyType, NotifyWindow, WindowNotifyFlags};
pub use terminal::{AnsiScreen, GridScreen, Screen};
pub use window::{
    Window, WindowActions, WindowContent, WindowCtx, WindowId, WindowRole, WindowTree,
    WindowType,
};
