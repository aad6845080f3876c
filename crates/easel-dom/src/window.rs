//! Window
//!
//! In-process host: a viewport over a document of laid-out elements, with
//! scroll state, animation frames, intersection observers and scroll
//! listeners. Time only advances through `tick`, which runs one rendering
//! update.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation_frame::{AnimationFrameQueue, FrameCallback, FrameRequestId};
use crate::events::{EventListeners, ListenerId, ScrollListener};
use crate::geometry::DOMRect;
use crate::host::Host;
use crate::observer::{
    IntersectionCallback, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ObserverId,
};
use crate::{DomError, ElementId};

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width
    pub inner_width: f64,
    
    /// Viewport height
    pub inner_height: f64,
    
    /// Expose the IntersectionObserver capability
    pub intersection_observer: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            inner_width: 1280.0,
            inner_height: 720.0,
            intersection_observer: true,
        }
    }
}

#[derive(Debug)]
struct WindowState {
    inner_width: f64,
    inner_height: f64,
    intersection_observer: bool,
    scroll_x: f64,
    scroll_y: f64,
    scroll_pending: bool,
    /// Document-space layout rects
    elements: HashMap<ElementId, DOMRect>,
    next_element: u32,
    frames: AnimationFrameQueue,
    observers: Vec<IntersectionObserver>,
    next_observer: u32,
    scroll_listeners: EventListeners,
}

impl WindowState {
    fn client_rect(&self, element: ElementId) -> Option<DOMRect> {
        self.elements
            .get(&element)
            .map(|rect| rect.translate(-self.scroll_x, -self.scroll_y))
    }
    
    fn viewport(&self) -> DOMRect {
        DOMRect::from_xywh(0.0, 0.0, self.inner_width, self.inner_height)
    }
}

/// Shared handle to a window. Clones refer to the same window.
#[derive(Debug, Clone)]
pub struct Window {
    state: Rc<RefCell<WindowState>>,
}

impl Window {
    pub fn new(config: WindowConfig) -> Self {
        debug!(?config, "Creating window");
        Self {
            state: Rc::new(RefCell::new(WindowState {
                inner_width: config.inner_width,
                inner_height: config.inner_height,
                intersection_observer: config.intersection_observer,
                scroll_x: 0.0,
                scroll_y: 0.0,
                scroll_pending: false,
                elements: HashMap::new(),
                next_element: 0,
                frames: AnimationFrameQueue::new(),
                observers: Vec::new(),
                next_observer: 0,
                scroll_listeners: EventListeners::new(),
            })),
        }
    }
    
    // Elements
    
    /// Add an element with a document-space layout rect
    pub fn create_element(&self, rect: DOMRect) -> ElementId {
        let mut state = self.state.borrow_mut();
        state.next_element += 1;
        let id = ElementId(state.next_element);
        state.elements.insert(id, rect);
        id
    }
    
    /// Move or resize an element
    pub fn set_element_rect(&self, element: ElementId, rect: DOMRect) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        match state.elements.get_mut(&element) {
            Some(slot) => {
                *slot = rect;
                Ok(())
            }
            None => Err(DomError::UnknownElement(element)),
        }
    }
    
    /// Remove an element from the document
    pub fn remove_element(&self, element: ElementId) -> Result<(), DomError> {
        self.state
            .borrow_mut()
            .elements
            .remove(&element)
            .map(|_| ())
            .ok_or(DomError::UnknownElement(element))
    }
    
    // Viewport
    
    pub fn inner_width(&self) -> f64 {
        self.state.borrow().inner_width
    }
    
    pub fn scroll_x(&self) -> f64 {
        self.state.borrow().scroll_x
    }
    
    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }
    
    /// Scroll to a document position. The scroll event fires on the next tick.
    pub fn scroll_to(&self, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        if state.scroll_x == x && state.scroll_y == y {
            return;
        }
        state.scroll_x = x;
        state.scroll_y = y;
        state.scroll_pending = true;
    }
    
    pub fn scroll_by(&self, dx: f64, dy: f64) {
        let (x, y) = {
            let state = self.state.borrow();
            (state.scroll_x + dx, state.scroll_y + dy)
        };
        self.scroll_to(x, y);
    }
    
    /// Resize the viewport
    pub fn resize(&self, inner_width: f64, inner_height: f64) {
        let mut state = self.state.borrow_mut();
        state.inner_width = inner_width;
        state.inner_height = inner_height;
    }
    
    // Inspection
    
    /// Frame callbacks waiting for the next tick
    pub fn pending_animation_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }
    
    pub fn listener_count(&self) -> usize {
        self.state.borrow().scroll_listeners.len()
    }
    
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }
    
    // Observers
    
    /// Observe `target` with explicit options
    pub fn observe_intersection_with(
        &self,
        target: ElementId,
        init: IntersectionObserverInit,
        callback: IntersectionCallback,
    ) -> Result<ObserverId, DomError> {
        let mut state = self.state.borrow_mut();
        if !state.intersection_observer {
            return Err(DomError::NotSupported("IntersectionObserver"));
        }
        if !state.elements.contains_key(&target) {
            return Err(DomError::UnknownElement(target));
        }
        
        state.next_observer += 1;
        let id = ObserverId(state.next_observer);
        state.observers.push(IntersectionObserver::new(id, target, init, callback));
        trace!(?id, %target, "Observing intersection");
        Ok(id)
    }
    
    // Rendering update
    
    /// Run one rendering update at `timestamp` (ms): scroll event, animation
    /// frame callbacks, then intersection observations.
    pub fn tick(&self, timestamp: f64) {
        self.dispatch_scroll();
        self.run_animation_frames(timestamp);
        self.update_intersection_observations(timestamp);
    }
    
    fn dispatch_scroll(&self) {
        let listeners = {
            let mut state = self.state.borrow_mut();
            if !std::mem::take(&mut state.scroll_pending) {
                return;
            }
            state.scroll_listeners.snapshot()
        };
        trace!(listeners = listeners.len(), "Dispatching scroll");
        
        for (id, listener) in listeners {
            // Listeners removed by an earlier listener do not fire.
            if !self.state.borrow().scroll_listeners.contains(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut listener) => (*listener)(),
                Err(_) => trace!(?id, "Scroll listener already running"),
            }
        }
    }
    
    fn run_animation_frames(&self, timestamp: f64) {
        let batch = self.state.borrow_mut().frames.begin_frame();
        if !batch.is_empty() {
            trace!(frames = batch.len(), timestamp, "Running animation frames");
        }
        
        for (id, callback) in batch {
            if self.state.borrow_mut().frames.claim(id) {
                callback(timestamp);
            }
        }
    }
    
    fn update_intersection_observations(&self, time: f64) {
        let deliveries: Vec<(ObserverId, Rc<RefCell<IntersectionCallback>>, IntersectionObserverEntry)> = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let viewport = state.viewport();
            let (scroll_x, scroll_y) = (state.scroll_x, state.scroll_y);
            let elements = &state.elements;
            
            state
                .observers
                .iter_mut()
                .filter_map(|observer| {
                    let rect = elements
                        .get(&observer.target())
                        .map(|rect| rect.translate(-scroll_x, -scroll_y));
                    observer
                        .update(rect, viewport, time)
                        .map(|entry| (observer.id(), observer.callback(), entry))
                })
                .collect()
        };
        
        for (id, callback, entry) in deliveries {
            if !self.state.borrow().observers.iter().any(|o| o.id() == id) {
                continue;
            }
            trace!(?id, ratio = entry.intersection_ratio, "Delivering intersection entry");
            match callback.try_borrow_mut() {
                Ok(mut callback) => (*callback)(std::slice::from_ref(&entry)),
                Err(_) => trace!(?id, "Intersection callback already running"),
            }
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl Host for Window {
    fn request_animation_frame(&self, callback: FrameCallback) -> FrameRequestId {
        self.state.borrow_mut().frames.request(callback)
    }
    
    fn cancel_animation_frame(&self, id: FrameRequestId) {
        self.state.borrow_mut().frames.cancel(id);
    }
    
    fn supports_intersection_observer(&self) -> bool {
        self.state.borrow().intersection_observer
    }
    
    fn observe_intersection(
        &self,
        target: ElementId,
        callback: IntersectionCallback,
    ) -> Result<ObserverId, DomError> {
        self.observe_intersection_with(target, IntersectionObserverInit::default(), callback)
    }
    
    fn disconnect_observer(&self, id: ObserverId) {
        self.state.borrow_mut().observers.retain(|o| o.id() != id);
    }
    
    fn add_scroll_listener(&self, listener: ScrollListener) -> ListenerId {
        self.state.borrow_mut().scroll_listeners.add(listener)
    }
    
    fn remove_scroll_listener(&self, id: ListenerId) {
        self.state.borrow_mut().scroll_listeners.remove(id);
    }
    
    fn bounding_client_rect(&self, element: ElementId) -> DOMRect {
        self.state.borrow().client_rect(element).unwrap_or_default()
    }
    
    fn inner_height(&self) -> f64 {
        self.state.borrow().inner_height
    }
    
    fn contains_element(&self, element: ElementId) -> bool {
        self.state.borrow().elements.contains_key(&element)
    }
}
