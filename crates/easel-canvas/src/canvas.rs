//! Canvas backing store
//!
//! RGBA8 pixel buffer with the handful of 2D-context operations the drawing
//! surface needs, and a same-surface `drawImage` with well-defined overlap
//! behaviour.

use crate::surface::RasterSurface;
use crate::CanvasError;

use tracing::trace;

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Canvas pixel store
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Canvas width
    width: u32,
    /// Canvas height
    height: u32,
    /// Pixel data (RGBA)
    data: Vec<u8>,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        let data = vec![0u8; width as usize * height as usize * 4];
        Self { width, height, data }
    }
    
    /// Create from existing RGBA data
    pub fn from_data(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CanvasError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CanvasError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }
    
    /// Get canvas width
    pub fn width(&self) -> u32 {
        self.width
    }
    
    /// Get canvas height
    pub fn height(&self) -> u32 {
        self.height
    }
    
    /// Get pixel data
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    
    /// Get mutable pixel data
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
    
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
    
    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        Some(Color::rgba(self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3]))
    }
    
    /// Set pixel at (x, y); out-of-range writes are ignored
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.data[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
    
    /// Fill a rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let x0 = x.max(0.0) as u32;
        let y0 = y.max(0.0) as u32;
        let x1 = (x + width).max(0.0).min(self.width as f64) as u32;
        let y1 = (y + height).max(0.0).min(self.height as f64) as u32;
        
        for py in y0..y1 {
            for px in x0..x1 {
                self.put_pixel(px, py, color);
            }
        }
    }
    
    /// Clear a rectangle to transparent black
    pub fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.fill_rect(x, y, width, height, Color::TRANSPARENT);
    }
    
    /// Unscaled copy. Rows are visited away from the destination so no row is
    /// read after it has been overwritten; within a row `copy_within` handles
    /// the overlap.
    ///
    /// Origins must already be floored. Both spans are clamped against the
    /// store in `f64` before anything is converted to an index.
    fn copy_unscaled(&mut self, sx: f64, sy: f64, dx: f64, dy: f64, w: f64, h: f64) {
        let Some((src_x, dst_x, cols)) = shared_span(sx, dx, w, self.width as f64) else {
            return;
        };
        let Some((src_y, dst_y, rows)) = shared_span(sy, dy, h, self.height as f64) else {
            return;
        };
        
        let stride = self.width as usize;
        let len = cols * 4;
        let copy_row = |data: &mut [u8], row: usize| {
            let src = ((src_y + row) * stride + src_x) * 4;
            let dst = ((dst_y + row) * stride + dst_x) * 4;
            data.copy_within(src..src + len, dst);
        };
        
        if dst_y > src_y {
            for row in (0..rows).rev() {
                copy_row(self.data.as_mut_slice(), row);
            }
        } else {
            for row in 0..rows {
                copy_row(self.data.as_mut_slice(), row);
            }
        }
    }
    
    /// Scaled copy (nearest neighbour) through a snapshot of the store.
    ///
    /// Only destination pixels inside the store are visited, so the work is
    /// bounded by the store size whatever the requested extent.
    #[allow(clippy::too_many_arguments)]
    fn copy_scaled(&mut self, sx: f64, sy: f64, sw: f64, sh: f64, dx: f64, dy: f64, dw: f64, dh: f64) {
        if !(dw > 0.0 && dh > 0.0 && sw > 0.0 && sh > 0.0) {
            return;
        }
        let (origin_x, origin_y) = (dx.floor(), dy.floor());
        let Some(cols) = store_range(origin_x, dw.trunc(), self.width as f64) else {
            return;
        };
        let Some(rows) = store_range(origin_y, dh.trunc(), self.height as f64) else {
            return;
        };
        
        let snapshot = self.data.clone();
        let scale_x = sw / dw;
        let scale_y = sh / dh;
        let width = self.width as f64;
        let height = self.height as f64;
        let stride = self.width as usize;
        
        for dest_y in rows {
            let src_y = (sy + (dest_y as f64 - origin_y) * scale_y).floor();
            if !(0.0..height).contains(&src_y) {
                continue;
            }
            let src_y = src_y as usize;
            
            for dest_x in cols.clone() {
                let src_x = (sx + (dest_x as f64 - origin_x) * scale_x).floor();
                if !(0.0..width).contains(&src_x) {
                    continue;
                }
                
                let src_idx = (src_y * stride + src_x as usize) * 4;
                let dst_idx = (dest_y * stride + dest_x) * 4;
                self.data[dst_idx..dst_idx + 4].copy_from_slice(&snapshot[src_idx..src_idx + 4]);
            }
        }
    }
}

/// Intersects a source span and a destination span of the same length with
/// `[0, limit)`. Returns the clamped source start, destination start and
/// length in pixels, or `None` when nothing of the copy lands in the store.
fn shared_span(src: f64, dst: f64, extent: f64, limit: f64) -> Option<(usize, usize, usize)> {
    let start = 0f64.max(-src).max(-dst);
    let end = extent.min(limit - src).min(limit - dst);
    if !(start < end) {
        return None;
    }
    
    let max = limit as usize;
    let src_start = (src + start).clamp(0.0, limit) as usize;
    let dst_start = (dst + start).clamp(0.0, limit) as usize;
    let len = ((end - start) as usize)
        .min(max - src_start)
        .min(max - dst_start);
    (len > 0).then_some((src_start, dst_start, len))
}

/// Store coordinates covered by `[origin, origin + extent)`, clipped to
/// `[0, limit)`.
fn store_range(origin: f64, extent: f64, limit: f64) -> Option<std::ops::Range<usize>> {
    let start = origin.max(0.0);
    let end = (origin + extent).min(limit);
    if !(start < end) {
        return None;
    }
    Some(start as usize..end.ceil() as usize)
}

impl RasterSurface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }
    
    fn height(&self) -> u32 {
        self.height
    }
    
    #[allow(clippy::too_many_arguments)]
    fn draw_self(
        &mut self,
        sx: f64, sy: f64, sw: f64, sh: f64,
        dx: f64, dy: f64, dw: f64, dh: f64,
    ) {
        if ![sx, sy, sw, sh, dx, dy, dw, dh].iter().all(|v| v.is_finite()) {
            trace!(sx, sy, sw, sh, dx, dy, dw, dh, "Skipping draw with non-finite arguments");
            return;
        }
        
        if sw == dw && sh == dh {
            if !(sw > 0.0 && sh > 0.0) {
                return;
            }
            self.copy_unscaled(sx.floor(), sy.floor(), dx.floor(), dy.floor(), sw, sh);
        } else {
            self.copy_scaled(sx, sy, sw, sh, dx, dy, dw, dh);
        }
    }
}
