//! Document event listeners
//!
//! Registry for `scroll` listeners on the document.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Scroll event listener
pub type ScrollListener = Box<dyn FnMut()>;

/// Listener handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

/// Registered listeners, in registration order
#[derive(Default)]
pub struct EventListeners {
    listeners: Vec<(ListenerId, Rc<RefCell<ScrollListener>>)>,
    next_id: u32,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Add a listener
    pub fn add(&mut self, listener: ScrollListener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Rc::new(RefCell::new(listener))));
        id
    }
    
    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }
    
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(registered, _)| *registered == id)
    }
    
    /// Listeners to call for one dispatch
    pub fn snapshot(&self) -> Vec<(ListenerId, Rc<RefCell<ScrollListener>>)> {
        self.listeners.clone()
    }
    
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<ListenerId> = self.listeners.iter().map(|(id, _)| *id).collect();
        f.debug_struct("EventListeners")
            .field("listeners", &ids)
            .field("next_id", &self.next_id)
            .finish()
    }
}
