//! easel Canvas
//!
//! Raster canvas surface and the overlap-safe area copy used by the easel
//! drawing surface.
//!
//! Features:
//! - `Canvas`: RGBA backing store with rectangle fills and pixel access
//! - `RasterSurface`: the same-surface drawImage primitive
//! - `copy_area`: clipped self-copy that survives overlapping and
//!   out-of-bounds source/destination rectangles

pub mod geometry;
pub mod surface;
pub mod canvas;
pub mod blit;

pub use geometry::{Rect, Point};
pub use surface::RasterSurface;
pub use canvas::{Canvas, Color};
pub use blit::{copy_area, plan_copy, CopyPlan};

/// Canvas error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid data length: expected {expected}, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
}
