//! Canvas geometry
//!
//! Rectangles and points in canvas pixel units.

/// Axis-aligned rectangle in canvas coordinates.
///
/// Width and height may be zero or negative; such a rectangle covers no
/// pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    
    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    
    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
    
    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
    
    /// True when the rectangle covers no pixels (also for NaN extents).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
