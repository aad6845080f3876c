//! Raster surfaces
//!
//! The drawing-surface capability `copy_area` works against.

use crate::blit;
use crate::geometry::{Point, Rect};

/// A drawable raster surface with a fixed-size backing store.
///
/// Implementors provide the same-surface form of `drawImage`:
/// the surface is both the image source and the destination.
pub trait RasterSurface {
    /// Width of the backing store in pixels
    fn width(&self) -> u32;
    
    /// Height of the backing store in pixels
    fn height(&self) -> u32;
    
    /// Draw the `(sx, sy, sw, sh)` region of this surface into
    /// `(dx, dy, dw, dh)` on the same surface.
    #[allow(clippy::too_many_arguments)]
    fn draw_self(
        &mut self,
        sx: f64, sy: f64, sw: f64, sh: f64,
        dx: f64, dy: f64, dw: f64, dh: f64,
    );
    
    /// Copy `src` to `dest` on this surface, clipped to the surface bounds.
    ///
    /// See [`blit::copy_area`].
    fn copy_area(&mut self, src: Rect, dest: Point) {
        blit::copy_area(self, src, dest);
    }
}

impl<S: RasterSurface + ?Sized> RasterSurface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }
    
    fn height(&self) -> u32 {
        (**self).height()
    }
    
    #[allow(clippy::too_many_arguments)]
    fn draw_self(
        &mut self,
        sx: f64, sy: f64, sw: f64, sh: f64,
        dx: f64, dy: f64, dw: f64, dh: f64,
    ) {
        (**self).draw_self(sx, sy, sw, sh, dx, dy, dw, dh);
    }
}
