//! Buffer module: The off-screen grid used by [`GridScreen`](crate::terminal::GridScreen).
//!
//! This module contains:
//! - [`Cell`]: One grapheme plus its style
//! - [`Buffer`]: A grid of cells representing the terminal screen
//! - [`Rgb`], [`Style`]: Color and attribute representation
//! - [`Modifiers`]: Text style bitflags

mod cell;
#[allow(clippy::module_inception)]
mod buffer;

pub use cell::{Cell, Modifiers, Rgb, Style};
pub use buffer::Buffer;
