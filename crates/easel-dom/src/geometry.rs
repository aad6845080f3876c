//! Geometry APIs
//!
//! DOMRect and the rectangle tests intersection observation is built on.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create empty rect
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    
    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }
    
    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    
    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
    
    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }
    
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
    
    /// Same rect moved by (dx, dy)
    pub fn translate(&self, dx: f64, dy: f64) -> DOMRect {
        DOMRect::from_xywh(self.x + dx, self.y + dy, self.width, self.height)
    }
    
    /// Check if rects intersect (touching edges count)
    pub fn intersects(&self, other: &DOMRect) -> bool {
        !(self.right() < other.x ||
          self.x > other.right() ||
          self.bottom() < other.y ||
          self.y > other.bottom())
    }
    
    /// Get intersection rect
    pub fn intersection(&self, other: &DOMRect) -> Option<DOMRect> {
        if !self.intersects(other) {
            return None;
        }
        
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        
        Some(DOMRect::from_xywh(x, y, right - x, bottom - y))
    }
}
