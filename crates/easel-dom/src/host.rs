//! Host capabilities
//!
//! Everything a visibility-gated animation needs from its environment.

use crate::animation_frame::{FrameCallback, FrameRequestId};
use crate::events::{ListenerId, ScrollListener};
use crate::geometry::DOMRect;
use crate::observer::{IntersectionCallback, ObserverId};
use crate::{DomError, ElementId};

/// A single-threaded host environment.
///
/// Methods take `&self`: callbacks registered here may call back into the
/// host while they run.
pub trait Host {
    /// Run `callback` once on the next rendering update.
    fn request_animation_frame(&self, callback: FrameCallback) -> FrameRequestId;
    
    /// Drop a frame callback that has not run yet.
    fn cancel_animation_frame(&self, id: FrameRequestId);
    
    /// Whether `observe_intersection` is available.
    fn supports_intersection_observer(&self) -> bool;
    
    /// Observe `target` against the viewport with the default threshold.
    fn observe_intersection(
        &self,
        target: ElementId,
        callback: IntersectionCallback,
    ) -> Result<ObserverId, DomError>;
    
    /// Stop an observer; its callback never runs again.
    fn disconnect_observer(&self, id: ObserverId);
    
    /// Listen for document scroll events.
    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId;
    
    fn remove_scroll_listener(&self, id: ListenerId);
    
    /// Element rect in viewport coordinates; all zero for unknown elements.
    fn bounding_client_rect(&self, element: ElementId) -> DOMRect;
    
    /// Viewport height
    fn inner_height(&self) -> f64;
    
    fn contains_element(&self, element: ElementId) -> bool;
}
