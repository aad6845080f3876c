//! Intersection Observer API
//!
//! Observe element visibility and intersection with the viewport.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::geometry::DOMRect;
use crate::ElementId;

/// Observer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

/// Callback receiving the entries of one observation update
pub type IntersectionCallback = Box<dyn FnMut(&[IntersectionObserverEntry])>;

/// Intersection observer options
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverInit {
    /// Ratios at which to notify
    pub thresholds: Vec<f64>,
}

impl Default for IntersectionObserverInit {
    fn default() -> Self {
        Self { thresholds: vec![0.0] }
    }
}

/// Intersection observer entry
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionObserverEntry {
    pub target: ElementId,
    pub bounding_client_rect: DOMRect,
    pub intersection_rect: DOMRect,
    pub root_bounds: Option<DOMRect>,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
    pub time: f64,
}

/// Intersection observer watching a single target
pub struct IntersectionObserver {
    id: ObserverId,
    target: ElementId,
    thresholds: Vec<f64>,
    /// (threshold index, is_intersecting) at the last notification
    previous: Option<(usize, bool)>,
    callback: Rc<RefCell<IntersectionCallback>>,
}

impl IntersectionObserver {
    pub fn new(
        id: ObserverId,
        target: ElementId,
        init: IntersectionObserverInit,
        callback: IntersectionCallback,
    ) -> Self {
        let mut thresholds = init.thresholds;
        thresholds.retain(|t| (0.0..=1.0).contains(t));
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        thresholds.sort_by(f64::total_cmp);
        
        Self {
            id,
            target,
            thresholds,
            previous: None,
            callback: Rc::new(RefCell::new(callback)),
        }
    }
    
    pub fn id(&self) -> ObserverId {
        self.id
    }
    
    pub fn target(&self) -> ElementId {
        self.target
    }
    
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
    
    pub(crate) fn callback(&self) -> Rc<RefCell<IntersectionCallback>> {
        self.callback.clone()
    }
    
    /// Run one observation update for the target.
    ///
    /// `target_rect` is the target's client rect, or `None` once the target
    /// has left the document. Returns an entry when the first update runs or
    /// the target crossed a threshold since the last notification.
    pub fn update(
        &mut self,
        target_rect: Option<DOMRect>,
        root_bounds: DOMRect,
        time: f64,
    ) -> Option<IntersectionObserverEntry> {
        let rect = target_rect.unwrap_or_default();
        let intersection = target_rect.and_then(|r| r.intersection(&root_bounds));
        let is_intersecting = intersection.is_some();
        
        let ratio = match intersection {
            Some(i) if rect.area() > 0.0 => i.area() / rect.area(),
            Some(_) => 1.0,
            None => 0.0,
        };
        
        let index = if is_intersecting {
            self.thresholds.iter().filter(|&&t| ratio >= t).count()
        } else {
            0
        };
        
        if self.previous == Some((index, is_intersecting)) {
            return None;
        }
        self.previous = Some((index, is_intersecting));
        
        Some(IntersectionObserverEntry {
            target: self.target,
            bounding_client_rect: rect,
            intersection_rect: intersection.unwrap_or_default(),
            root_bounds: Some(root_bounds),
            intersection_ratio: ratio,
            is_intersecting,
            time,
        })
    }
}

impl fmt::Debug for IntersectionObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntersectionObserver")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("thresholds", &self.thresholds)
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}
