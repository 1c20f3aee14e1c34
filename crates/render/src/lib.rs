//! Rendering adapter: converts grid state into layered draw instructions.
//!
//! # Invariants
//! - The renderer never mutates the grid or its entities.
//! - Every emitted portrayal carries the coordinates of the cell it was
//!   collected at; the renderer is the single source of truth for position.
//! - A portrayal with no layer aborts the frame instead of defaulting.

mod canvas;
mod portrayal;
mod snapshot;

pub use canvas::{CanvasGrid, CanvasInit, DEFAULT_CANVAS_SIZE, RenderError};
pub use portrayal::{Portrayal, PortrayalSpec, Shape};
pub use snapshot::GridSnapshot;

pub fn crate_info() -> &'static str {
    "gridcanvas-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
