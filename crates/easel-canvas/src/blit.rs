//! Overlap-safe area copy
//!
//! Copying a region of a canvas onto itself with `drawImage` is unreliable on
//! several backends when the source and destination rectangles overlap or hang
//! off the edge of the canvas. `copy_area` clips both rectangles up front so the
//! primitive only ever sees a region that is in bounds on the read side and
//! the write side.
//!
//! The clamps run in a fixed order per axis: destination low edge, source low
//! edge, then a shared high edge taken from whichever of the two origins lies
//! further along. Reordering them yields wrong offsets.

use tracing::trace;

use crate::geometry::{Point, Rect};
use crate::surface::RasterSurface;

/// A clipped copy, ready for the surface primitive.
///
/// `src` is the region to read; `dest` is where its top-left corner lands.
/// The destination extent always equals the source extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyPlan {
    pub src: Rect,
    pub dest: Point,
}

impl CopyPlan {
    /// Destination rectangle covered by the copy
    pub fn dest_rect(&self) -> Rect {
        Rect::new(self.dest.x, self.dest.y, self.src.width, self.src.height)
    }
}

/// Compute the clipped copy of `src` to `dest` on a `surface_width` x
/// `surface_height` surface.
///
/// Returns `None` when nothing would be copied.
pub fn plan_copy(surface_width: f64, surface_height: f64, src: Rect, dest: Point) -> Option<CopyPlan> {
    let Rect { x: mut src_x, y: mut src_y, width: mut w, height: mut h } = src;
    let Point { x: mut dest_x, y: mut dest_y } = dest;
    
    // Trivial rejects, one per span.
    if src_x + w < 0.0 || src_x > surface_width {
        return None;
    }
    if dest_x + w < 0.0 || dest_x > surface_width {
        return None;
    }
    if src_y + h < 0.0 || src_y > surface_height {
        return None;
    }
    if dest_y + h < 0.0 || dest_y > surface_height {
        return None;
    }
    
    if dest_x < 0.0 {
        w += dest_x;
        src_x -= dest_x;
        dest_x = 0.0;
    }
    if src_x < 0.0 {
        dest_x -= src_x;
        w += src_x;
        src_x = 0.0;
    }
    
    if dest_y < 0.0 {
        h += dest_y;
        src_y -= dest_y;
        dest_y = 0.0;
    }
    if src_y < 0.0 {
        dest_y -= src_y;
        h += src_y;
        src_y = 0.0;
    }
    
    let m_x = src_x.max(dest_x);
    if m_x >= surface_width {
        return None;
    }
    if m_x + w > surface_width {
        w = surface_width - m_x;
    }
    
    let m_y = src_y.max(dest_y);
    if m_y >= surface_height {
        return None;
    }
    if m_y + h > surface_height {
        h = surface_height - m_y;
    }
    
    let src = Rect::new(src_x, src_y, w, h);
    if src.is_empty() {
        return None;
    }
    
    Some(CopyPlan {
        src,
        dest: Point::new(dest_x, dest_y),
    })
}

/// Copy the `src` region of `surface` so its top-left corner lands on `dest`.
///
/// Parts of either rectangle outside the surface are dropped. Degenerate or
/// fully off-surface input is a silent no-op.
pub fn copy_area<S: RasterSurface + ?Sized>(surface: &mut S, src: Rect, dest: Point) {
    let width = surface.width() as f64;
    let height = surface.height() as f64;
    
    let Some(plan) = plan_copy(width, height, src, dest) else {
        trace!(?src, ?dest, width, height, "copy_area: nothing to copy");
        return;
    };
    
    trace!(?plan, "copy_area");
    let Rect { x, y, width: w, height: h } = plan.src;
    surface.draw_self(x, y, w, h, plan.dest.x, plan.dest.y, w, h);
}
