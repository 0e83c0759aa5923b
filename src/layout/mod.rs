//! Layout module: Screen rectangles.
//!
//! Window geometry is computed by [`WindowTree::reflow`](crate::WindowTree::reflow);
//! this module only provides the [`Rect`] it is expressed in.

mod rect;

pub use rect::Rect;
