//! Crate-wide error type.

use crate::window::WindowId;
use thiserror::Error;

/// Errors raised by the window tree, the notification bus and configuration.
///
/// The message window itself never surfaces errors to its callers; these
/// only travel between the host and its handlers.
#[derive(Debug, Error)]
pub enum Error {
    /// A window id that is not (or no longer) part of the tree.
    #[error("no such window: {0}")]
    NoSuchWindow(WindowId),

    /// The root window only goes away with the tree.
    #[error("the root window cannot be destroyed")]
    RootWindow,

    /// An observer was invoked without its context.
    #[error("observer called without a context")]
    MissingContext,

    /// A window event arrived without its payload.
    #[error("window event carries no payload")]
    MissingPayload,

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Terminal I/O failed.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying error.
        #[from]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
