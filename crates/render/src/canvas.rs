use std::marker::PhantomData;

use gridcanvas_grid::CellSource;
use serde::{Deserialize, Serialize};

use crate::portrayal::{Portrayal, PortrayalSpec};
use crate::snapshot::GridSnapshot;

/// Default canvas edge length in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 500;

/// Errors from renderer construction and per-frame rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("portrayal for an entity at cell ({x}, {y}) declares no layer")]
    MissingLayer { x: u32, y: u32 },
}

/// Client bootstrap descriptor: canvas pixel size plus grid cell size.
///
/// Emitted once per renderer, not per frame, so the front end can allocate
/// a drawing surface before the first snapshot arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasInit {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub grid_width: u32,
    pub grid_height: u32,
}

/// Converts grid state into a layered [`GridSnapshot`] once per step.
///
/// Owns a user-supplied portrayal function mapping one entity to an
/// optional [`PortrayalSpec`]. `None` means "do not draw this entity this
/// frame" (hidden or dead agents) and is not an error. The renderer holds
/// only immutable configuration; every call to [`CanvasGrid::render`]
/// produces a fresh snapshot.
pub struct CanvasGrid<A, F>
where
    F: Fn(&A) -> Option<PortrayalSpec>,
{
    portray: F,
    grid_width: u32,
    grid_height: u32,
    canvas_width: u32,
    canvas_height: u32,
    _entity: PhantomData<fn(&A)>,
}

impl<A, F> CanvasGrid<A, F>
where
    F: Fn(&A) -> Option<PortrayalSpec>,
{
    /// Create a renderer for a `grid_width` x `grid_height` grid with the
    /// default 500x500 canvas. Zero dimensions are rejected eagerly.
    pub fn new(portray: F, grid_width: u32, grid_height: u32) -> Result<Self, RenderError> {
        if grid_width == 0 || grid_height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: grid_width,
                height: grid_height,
            });
        }
        Ok(Self {
            portray,
            grid_width,
            grid_height,
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            _entity: PhantomData,
        })
    }

    /// Override the canvas pixel size carried in the bootstrap descriptor.
    /// Canvas size never affects the render algorithm.
    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// The one-shot descriptor for the client bootstrap handshake.
    pub fn init_descriptor(&self) -> CanvasInit {
        CanvasInit {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
        }
    }

    /// Render one frame: walk every cell row-major (`y` outer, `x` inner),
    /// portray each occupant, and group results by layer.
    ///
    /// The visited cell's coordinates are stamped onto each portrayal
    /// unconditionally. A portrayal that declares no layer fails the frame
    /// with [`RenderError::MissingLayer`]; nothing partial is returned.
    /// The grid is read-only for the duration of the call.
    pub fn render<G>(&self, grid: &G) -> Result<GridSnapshot, RenderError>
    where
        G: CellSource<Entity = A>,
    {
        let _span = tracing::info_span!("render_snapshot").entered();

        let mut snapshot = GridSnapshot::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                for entity in grid.cell_contents(x, y) {
                    let Some(spec) = (self.portray)(entity) else {
                        continue;
                    };
                    let Some(layer) = spec.layer else {
                        tracing::debug!(x, y, "portrayal missing layer, aborting frame");
                        return Err(RenderError::MissingLayer { x, y });
                    };
                    snapshot.push(Portrayal::from_spec(spec, x, y, layer));
                }
            }
        }

        tracing::trace!(
            layers = snapshot.layer_count(),
            portrayals = snapshot.len(),
            "snapshot complete"
        );
        Ok(snapshot)
    }
}
