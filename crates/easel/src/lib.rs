//! easel
//!
//! Infrastructure for an animated drawing surface:
//! - `canvas`: raster canvas with an overlap-safe `copy_area`
//! - `anim`: a frame loop that only runs while its element is visible
//! - `dom`: the host environment both sit on
//!
//! # Example
//! ```rust
//! use easel::{Canvas, Point, Rect, RasterSurface};
//!
//! let mut canvas = Canvas::new(100, 100);
//! // Scroll the whole canvas up by one row.
//! canvas.copy_area(Rect::new(0.0, 1.0, 100.0, 100.0), Point::new(0.0, 0.0));
//! ```

mod ticker;

pub use ticker::Ticker;

pub use easel_canvas::{copy_area, plan_copy, Canvas, CanvasError, Color, CopyPlan, Point, RasterSurface, Rect};
pub use easel_anim::{LoopError, LoopState, StateChangeFn, VisibilityStrategy, VisibleLoop};

// Re-export sub-crates for advanced usage
pub use easel_canvas as canvas;
pub use easel_dom as dom;
pub use easel_anim as anim;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
