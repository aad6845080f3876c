//! easel DOM
//!
//! The slice of a browser host the easel drawing surface talks to:
//! element geometry, the viewport and its scroll offset, animation frames,
//! intersection observers and scroll listeners.
//!
//! `Host` is the capability seam; `Window` is the in-process implementation
//! driven by an explicit rendering `tick`.

use std::fmt;

pub mod geometry;
pub mod host;
pub mod animation_frame;
pub mod observer;
pub mod events;
mod window;

pub use geometry::DOMRect;
pub use host::Host;
pub use animation_frame::{AnimationFrameQueue, FrameCallback, FrameRequestId};
pub use observer::{
    IntersectionCallback, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ObserverId,
};
pub use events::{EventListeners, ListenerId, ScrollListener};
pub use window::{Window, WindowConfig};

/// Element identifier (index into the window's element table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),
    
    #[error("Not supported: {0}")]
    NotSupported(&'static str),
}
