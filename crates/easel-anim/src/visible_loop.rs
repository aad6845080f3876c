//! Visibility-gated frame loop
//!
//! `VisibleLoop` runs a per-frame callback on every animation frame while its
//! element is visible and stops requesting frames once it is not.
//!
//! States are `Stopped` (initial) and `Running`. Only a change of the
//! visibility signal, or teardown, moves between them; evaluating an unchanged
//! signal does nothing. Each frame calls the per-frame callback first and only
//! then, if still running, requests the next frame, so a stop issued during
//! the callback ends the chain without an extra frame. At most one frame
//! request is outstanding per loop.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use easel_dom::{DomError, ElementId, FrameRequestId, Host};
use tracing::{debug, trace, warn};

use crate::strategy::{Registration, VisibilityStrategy};
use crate::LoopError;

/// Per-frame callback, called with the frame timestamp (ms)
pub type PerFrameFn = Box<dyn FnMut(f64)>;

/// Observer of Stopped/Running transitions; receives the new running flag
pub type StateChangeFn = Box<dyn FnMut(bool)>;

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

impl LoopState {
    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}

impl From<bool> for LoopState {
    fn from(running: bool) -> Self {
        if running {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }
}

/// State shared between the handle and the host callbacks.
///
/// Host callbacks only hold `Weak` references, so dropping the handle ends
/// every chain.
pub(crate) struct LoopCore {
    pub(crate) host: Rc<dyn Host>,
    pub(crate) element: ElementId,
    state: Cell<LoopState>,
    pending_frame: Cell<Option<FrameRequestId>>,
    per_frame: RefCell<PerFrameFn>,
    on_state_change: Option<RefCell<StateChangeFn>>,
    /// Transitions not yet reported to `on_state_change`, oldest first
    notifications: RefCell<VecDeque<bool>>,
}

/// Apply a visibility signal.
pub(crate) fn set_running(core: &Rc<LoopCore>, running: bool) {
    let next = LoopState::from(running);
    if core.state.get() == next {
        return;
    }
    core.state.set(next);
    debug!(element = %core.element, state = ?next, "Visible loop state change");
    
    if let Some(on_state_change) = &core.on_state_change {
        core.notifications.borrow_mut().push_back(running);
        // A transition made from inside the observer is queued here and
        // delivered by the outer call once the observer returns.
        if let Ok(mut on_state_change) = on_state_change.try_borrow_mut() {
            loop {
                let next = core.notifications.borrow_mut().pop_front();
                let Some(flag) = next else {
                    break;
                };
                (*on_state_change)(flag);
            }
        } else {
            trace!(element = %core.element, running, "Deferring nested state change notification");
        }
    }
    
    // The observer may already have flipped the state back.
    if core.state.get().is_running() {
        schedule_frame(core);
    }
}

fn schedule_frame(core: &Rc<LoopCore>) {
    if core.pending_frame.get().is_some() {
        return;
    }
    let weak = Rc::downgrade(core);
    let id = core.host.request_animation_frame(Box::new(move |timestamp| {
        if let Some(core) = weak.upgrade() {
            run_frame(&core, timestamp);
        }
    }));
    core.pending_frame.set(Some(id));
}

fn run_frame(core: &Rc<LoopCore>, timestamp: f64) {
    core.pending_frame.set(None);
    trace!(element = %core.element, timestamp, "Frame");
    
    match core.per_frame.try_borrow_mut() {
        Ok(mut per_frame) => (*per_frame)(timestamp),
        Err(_) => warn!(element = %core.element, "Per-frame callback re-entered, skipping frame"),
    }
    
    if core.state.get().is_running() {
        schedule_frame(core);
    }
}

/// Handle to an attached visibility-gated loop.
///
/// Dropping the handle (or calling [`detach`](Self::detach)) unregisters the
/// visibility source and stops the loop.
pub struct VisibleLoop {
    core: Rc<LoopCore>,
    strategy: VisibilityStrategy,
    registration: Option<Registration>,
}

impl VisibleLoop {
    /// Attach a loop to `element`.
    ///
    /// `per_frame` runs once per animation frame while the element is visible.
    /// `on_state_change`, if given, is told about every Stopped/Running
    /// transition. With the scroll fallback the element is checked right away,
    /// so `on_state_change` may fire before this returns.
    pub fn attach<H, F>(
        host: H,
        element: ElementId,
        per_frame: F,
        on_state_change: Option<StateChangeFn>,
    ) -> Result<Self, LoopError>
    where
        H: Host + 'static,
        F: FnMut(f64) + 'static,
    {
        if !host.contains_element(element) {
            return Err(DomError::UnknownElement(element).into());
        }
        
        let host: Rc<dyn Host> = Rc::new(host);
        let strategy = VisibilityStrategy::probe(host.as_ref());
        debug!(%element, ?strategy, "Attaching visible loop");
        
        let core = Rc::new(LoopCore {
            host,
            element,
            state: Cell::new(LoopState::Stopped),
            pending_frame: Cell::new(None),
            per_frame: RefCell::new(Box::new(per_frame)),
            on_state_change: on_state_change.map(RefCell::new),
            notifications: RefCell::new(VecDeque::new()),
        });
        let registration = strategy.register(&core)?;
        
        Ok(Self {
            core,
            strategy,
            registration: Some(registration),
        })
    }
    
    pub fn state(&self) -> LoopState {
        self.core.state.get()
    }
    
    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }
    
    pub fn strategy(&self) -> VisibilityStrategy {
        self.strategy
    }
    
    pub fn element(&self) -> ElementId {
        self.core.element
    }
    
    /// Whether a frame request is outstanding
    pub fn has_pending_frame(&self) -> bool {
        self.core.pending_frame.get().is_some()
    }
    
    /// Unregister from the host and stop.
    pub fn detach(mut self) {
        self.teardown();
    }
    
    fn teardown(&mut self) {
        let Some(registration) = self.registration.take() else {
            return;
        };
        debug!(element = %self.core.element, "Detaching visible loop");
        registration.unregister(self.core.host.as_ref());
        
        if let Some(id) = self.core.pending_frame.take() {
            self.core.host.cancel_animation_frame(id);
        }
        set_running(&self.core, false);
    }
}

impl Drop for VisibleLoop {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for VisibleLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibleLoop")
            .field("element", &self.core.element)
            .field("state", &self.core.state.get())
            .field("strategy", &self.strategy)
            .field("pending_frame", &self.core.pending_frame.get())
            .finish()
    }
}
