//! Grid model: 2-D multi-occupancy cell space for simulation entities.
//!
//! # Invariants
//! - Cell contents preserve insertion order within a cell.
//! - Read paths never mutate the grid.
//! - Out-of-bounds coordinates are errors, not panics.

pub mod grid;

pub use grid::{CellCoord, CellSource, DenseGrid, GridError};
