//! Rendering module
//!
//! Every entity is a filled box, so a 2D canvas is all the browser needs.
//! `shapes` is platform-free; `canvas` paints it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

pub use shapes::{DrawRect, ShapeKind, draw_list, fill_color};
