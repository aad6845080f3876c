//! Visibility strategies
//!
//! Where the visible/hidden signal comes from. The strategy is probed once
//! when a loop attaches and never changes afterwards.

use std::rc::{Rc, Weak};

use easel_dom::{DOMRect, DomError, Host, IntersectionObserverEntry, ListenerId, ObserverId};
use tracing::trace;

use crate::visible_loop::{set_running, LoopCore};

/// Source of the visibility signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityStrategy {
    /// Intersection observer on the element: visible while the reported
    /// intersection ratio is above zero.
    IntersectionObserver,
    /// Document scroll listener: visible while the element's client rect
    /// overlaps the viewport vertically.
    ScrollFallback,
}

impl VisibilityStrategy {
    /// Pick the strategy the host supports, preferring intersection observers
    pub fn probe(host: &dyn Host) -> Self {
        if host.supports_intersection_observer() {
            Self::IntersectionObserver
        } else {
            Self::ScrollFallback
        }
    }
    
    /// Start feeding the signal into `core`.
    pub(crate) fn register(self, core: &Rc<LoopCore>) -> Result<Registration, DomError> {
        let weak = Rc::downgrade(core);
        
        match self {
            Self::IntersectionObserver => {
                let id = core.host.observe_intersection(
                    core.element,
                    Box::new(move |entries: &[IntersectionObserverEntry]| {
                        let (Some(core), Some(entry)) = (weak.upgrade(), entries.first()) else {
                            return;
                        };
                        trace!(ratio = entry.intersection_ratio, "Intersection update");
                        set_running(&core, entry.intersection_ratio > 0.0);
                    }),
                )?;
                Ok(Registration::Observer(id))
            }
            Self::ScrollFallback => {
                let id = core
                    .host
                    .add_scroll_listener(Box::new(move || check_scroll_visibility(&weak)));
                check_scroll_visibility(&Rc::downgrade(core));
                Ok(Registration::ScrollListener(id))
            }
        }
    }
}

/// Host-side registration feeding a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Registration {
    Observer(ObserverId),
    ScrollListener(ListenerId),
}

impl Registration {
    pub(crate) fn unregister(self, host: &dyn Host) {
        match self {
            Self::Observer(id) => host.disconnect_observer(id),
            Self::ScrollListener(id) => host.remove_scroll_listener(id),
        }
    }
}

/// Any vertical overlap between `rect` and a viewport of `inner_height`.
///
/// Horizontal position is not considered.
pub fn is_vertically_visible(rect: &DOMRect, inner_height: f64) -> bool {
    !(rect.bottom() < 0.0 || rect.top() > inner_height)
}

fn check_scroll_visibility(core: &Weak<LoopCore>) {
    let Some(core) = core.upgrade() else {
        return;
    };
    let rect = core.host.bounding_client_rect(core.element);
    let visible = is_vertically_visible(&rect, core.host.inner_height());
    trace!(top = rect.top(), bottom = rect.bottom(), visible, "Scroll visibility check");
    set_running(&core, visible);
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_dom::{Window, WindowConfig};
    
    #[test]
    fn test_probe() {
        let with = Window::new(WindowConfig::default());
        assert_eq!(VisibilityStrategy::probe(&with), VisibilityStrategy::IntersectionObserver);
        
        let without = Window::new(WindowConfig {
            intersection_observer: false,
            ..WindowConfig::default()
        });
        assert_eq!(VisibilityStrategy::probe(&without), VisibilityStrategy::ScrollFallback);
    }
    
    #[test]
    fn test_vertical_visibility() {
        let h = 600.0;
        assert!(is_vertically_visible(&DOMRect::from_xywh(0.0, 0.0, 10.0, 10.0), h));
        assert!(is_vertically_visible(&DOMRect::from_xywh(0.0, -10.0, 10.0, 10.0), h));
        assert!(is_vertically_visible(&DOMRect::from_xywh(0.0, 600.0, 10.0, 10.0), h));
        assert!(!is_vertically_visible(&DOMRect::from_xywh(0.0, -11.0, 10.0, 10.0), h));
        assert!(!is_vertically_visible(&DOMRect::from_xywh(0.0, 601.0, 10.0, 10.0), h));
    }
    
    #[test]
    fn test_horizontal_offset_ignored() {
        // Far off to the right but vertically inside: counts as visible.
        assert!(is_vertically_visible(&DOMRect::from_xywh(5000.0, 100.0, 10.0, 10.0), 600.0));
    }
}
