use serde::{Deserialize, Serialize};

/// A 2D cell coordinate in the grid, 0-indexed from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Errors from grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Read-only view of a cell grid, as seen by consumers such as renderers.
///
/// Implementors expose dimensions and per-cell entity lookup. Callers must
/// keep `x < width()` and `y < height()` when calling `cell_contents`;
/// coordinates come from iterating those same dimensions.
pub trait CellSource {
    /// The entity type occupying cells.
    type Entity;

    /// Grid width in cells.
    fn width(&self) -> u32;

    /// Grid height in cells.
    fn height(&self) -> u32;

    /// Entities occupying cell `(x, y)`, in stable lookup order.
    fn cell_contents(&self, x: u32, y: u32) -> &[Self::Entity];
}

/// Dense row-major grid where each cell holds zero or more entities.
///
/// Within a cell, entities keep the order they were placed in. Iterating
/// the grid row-major plus this per-cell order gives consumers a stable,
/// reproducible enumeration for a given grid state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseGrid<E> {
    width: u32,
    height: u32,
    cells: Vec<Vec<E>>,
}

impl<E> DenseGrid<E> {
    /// Create an empty grid of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let mut cells = Vec::new();
        cells.resize_with((width as usize) * (height as usize), Vec::new);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Place an entity into cell `(x, y)`, appending after any occupants.
    pub fn place(&mut self, x: u32, y: u32, entity: E) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.cells[idx].push(entity);
        tracing::debug!(x, y, "placed entity");
        Ok(())
    }

    /// Entities occupying cell `(x, y)`, in placement order.
    pub fn cell(&self, x: u32, y: u32) -> Result<&[E], GridError> {
        let idx = self.index(x, y)?;
        Ok(&self.cells[idx])
    }

    /// Remove and return all entities from cell `(x, y)`.
    pub fn take(&mut self, x: u32, y: u32) -> Result<Vec<E>, GridError> {
        let idx = self.index(x, y)?;
        tracing::debug!(x, y, "emptied cell");
        Ok(std::mem::take(&mut self.cells[idx]))
    }

    /// Total number of entities across all cells.
    pub fn entity_count(&self) -> usize {
        self.cells.iter().map(|c| c.len()).sum()
    }

    /// Whether the grid holds no entities.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    /// All cell coordinates in row-major order (`y` outer, `x` inner).
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| CellCoord::new(x, y)))
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize) * (self.width as usize) + (x as usize))
    }
}

impl<E> CellSource for DenseGrid<E> {
    type Entity = E;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn cell_contents(&self, x: u32, y: u32) -> &[E] {
        debug_assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside the {}x{} grid",
            self.width,
            self.height
        );
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        &self.cells[idx]
    }
}
