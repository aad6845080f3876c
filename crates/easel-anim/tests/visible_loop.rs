//! VisibleLoop against the in-process window
//!
//! Both visibility strategies, driven by explicit rendering ticks.

use std::cell::RefCell;
use std::rc::Rc;

use easel_anim::{LoopState, StateChangeFn, VisibilityStrategy, VisibleLoop};
use easel_dom::{DOMRect, ElementId, Window, WindowConfig};

const VIEWPORT_HEIGHT: f64 = 600.0;

fn window(intersection_observer: bool) -> Window {
    Window::new(WindowConfig {
        inner_width: 800.0,
        inner_height: VIEWPORT_HEIGHT,
        intersection_observer,
    })
}

/// Collects per-frame timestamps and state-change notifications.
#[derive(Default, Clone)]
struct Recorder {
    frames: Rc<RefCell<Vec<f64>>>,
    changes: Rc<RefCell<Vec<bool>>>,
}

impl Recorder {
    fn attach(&self, win: &Window, element: ElementId) -> VisibleLoop {
        let frames = self.frames.clone();
        let changes = self.changes.clone();
        let on_change: StateChangeFn = Box::new(move |running| changes.borrow_mut().push(running));
        
        VisibleLoop::attach(
            win.clone(),
            element,
            move |t| frames.borrow_mut().push(t),
            Some(on_change),
        )
        .unwrap()
    }
    
    fn frames(&self) -> Vec<f64> {
        self.frames.borrow().clone()
    }
    
    fn changes(&self) -> Vec<bool> {
        self.changes.borrow().clone()
    }
}

/// Element placed `offset` pixels below the initial viewport
fn element_below(win: &Window, offset: f64) -> ElementId {
    win.create_element(DOMRect::from_xywh(0.0, VIEWPORT_HEIGHT + offset, 300.0, 100.0))
}

// ============================================================================
// STRATEGY SELECTION
// ============================================================================

#[test]
fn test_prefers_intersection_observer() {
    let win = window(true);
    let el = element_below(&win, -300.0);
    let anim = Recorder::default().attach(&win, el);
    
    assert_eq!(anim.strategy(), VisibilityStrategy::IntersectionObserver);
    assert_eq!(win.observer_count(), 1);
    assert_eq!(win.listener_count(), 0);
}

#[test]
fn test_falls_back_to_scroll_listener() {
    let win = window(false);
    let el = element_below(&win, -300.0);
    let anim = Recorder::default().attach(&win, el);
    
    assert_eq!(anim.strategy(), VisibilityStrategy::ScrollFallback);
    assert_eq!(win.observer_count(), 0);
    assert_eq!(win.listener_count(), 1);
}

// ============================================================================
// OFF-SCREEN START
// ============================================================================

#[test]
fn test_offscreen_start_intersection_observer() {
    let win = window(true);
    let el = element_below(&win, 1000.0);
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    for t in 0..5 {
        win.tick(t as f64 * 16.0);
    }
    assert!(rec.changes().is_empty());
    assert!(rec.frames().is_empty());
    assert_eq!(anim.state(), LoopState::Stopped);
    
    win.scroll_to(0.0, 1100.0);
    win.tick(80.0);
    assert_eq!(rec.changes(), vec![true]);
    assert!(rec.frames().is_empty());
    
    win.tick(96.0);
    assert_eq!(rec.frames(), vec![96.0]);
}

#[test]
fn test_offscreen_start_scroll_fallback() {
    let win = window(false);
    let el = element_below(&win, 1000.0);
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    win.tick(0.0);
    win.scroll_to(0.0, 500.0);
    win.tick(16.0);
    assert!(rec.changes().is_empty());
    assert!(rec.frames().is_empty());
    assert!(!anim.is_running());
    
    // Scroll events are dispatched before frame callbacks, so the first
    // frame lands in the same update.
    win.scroll_to(0.0, 1050.0);
    win.tick(32.0);
    assert_eq!(rec.changes(), vec![true]);
    assert_eq!(rec.frames(), vec![32.0]);
}

#[test]
fn test_scroll_fallback_checks_immediately() {
    let win = window(false);
    let el = element_below(&win, -300.0);
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    assert_eq!(rec.changes(), vec![true]);
    assert!(anim.is_running());
    assert!(anim.has_pending_frame());
}

// ============================================================================
// IDEMPOTENCE
// ============================================================================

#[test]
fn test_repeated_visible_signal_notifies_once() {
    let win = window(false);
    let el = element_below(&win, -300.0);
    let rec = Recorder::default();
    let _anim = rec.attach(&win, el);
    
    // Every scroll re-evaluates the signal; it stays visible.
    for step in 1..=4 {
        win.scroll_by(0.0, 10.0);
        win.tick(step as f64 * 16.0);
        assert!(win.pending_animation_frames() <= 1);
    }
    
    assert_eq!(rec.changes(), vec![true]);
    assert_eq!(rec.frames(), vec![16.0, 32.0, 48.0, 64.0]);
}

#[test]
fn test_flapping_visibility_keeps_single_chain() {
    let win = window(false);
    let el = element_below(&win, -300.0);
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    let mut t = 0.0;
    for _ in 0..3 {
        // Out on one update, back in on the next.
        win.scroll_to(0.0, 5000.0);
        win.tick(t);
        win.scroll_to(0.0, 0.0);
        win.tick(t + 1.0);
        assert_eq!(win.pending_animation_frames(), 1);
        t += 16.0;
    }
    
    assert!(anim.is_running());
    assert_eq!(rec.changes(), vec![true, false, true, false, true, false, true]);
}

// ============================================================================
// STOPPING
// ============================================================================

#[test]
fn test_stop_lets_outstanding_frame_run_once() {
    let win = window(true);
    let el = element_below(&win, -300.0);
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    win.tick(0.0);
    win.tick(16.0);
    win.scroll_to(0.0, 5000.0);
    win.tick(32.0);
    assert_eq!(rec.changes(), vec![true, false]);
    assert!(!anim.is_running());
    
    win.tick(48.0);
    win.tick(64.0);
    assert_eq!(rec.frames(), vec![16.0, 32.0, 48.0]);
    assert!(!anim.has_pending_frame());
}

#[test]
fn test_restart_after_stop() {
    let win = window(true);
    let el = element_below(&win, -300.0);
    let rec = Recorder::default();
    let _anim = rec.attach(&win, el);
    
    win.tick(0.0);
    win.scroll_to(0.0, 5000.0);
    win.tick(16.0);
    win.tick(32.0);
    win.scroll_to(0.0, 0.0);
    win.tick(48.0);
    win.tick(64.0);
    
    assert_eq!(rec.changes(), vec![true, false, true]);
    // 32.0 is the request that was already queued when the loop stopped.
    assert_eq!(rec.frames(), vec![16.0, 32.0, 64.0]);
}

#[test]
fn test_detach_unregisters() {
    let win = window(true);
    let el = element_below(&win, -300.0);
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    win.tick(0.0);
    anim.detach();
    assert_eq!(rec.changes(), vec![true, false]);
    assert_eq!(win.observer_count(), 0);
    assert_eq!(win.pending_animation_frames(), 0);
    
    win.tick(16.0);
    assert!(rec.frames().is_empty());
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[test]
fn test_scroll_fallback_ignores_horizontal_position() {
    let win = window(false);
    let el = win.create_element(DOMRect::from_xywh(10_000.0, 100.0, 50.0, 50.0));
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    assert!(anim.is_running());
}

#[test]
fn test_intersection_observer_respects_horizontal_position() {
    let win = window(true);
    let el = win.create_element(DOMRect::from_xywh(10_000.0, 100.0, 50.0, 50.0));
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    win.tick(0.0);
    assert!(!anim.is_running());
}

#[test]
fn test_element_moved_into_view() {
    let win = window(true);
    let el = element_below(&win, 1000.0);
    let rec = Recorder::default();
    let anim = rec.attach(&win, el);
    
    win.tick(0.0);
    win.set_element_rect(el, DOMRect::from_xywh(0.0, 10.0, 300.0, 100.0)).unwrap();
    win.tick(16.0);
    assert!(anim.is_running());
}

#[test]
fn test_independent_loops() {
    let win = window(true);
    let top = element_below(&win, -500.0);
    let bottom = element_below(&win, 500.0);
    let (rec_top, rec_bottom) = (Recorder::default(), Recorder::default());
    let _a = rec_top.attach(&win, top);
    let _b = rec_bottom.attach(&win, bottom);
    
    win.tick(0.0);
    win.tick(16.0);
    assert_eq!(rec_top.frames(), vec![16.0]);
    assert!(rec_bottom.frames().is_empty());
    assert_eq!(win.pending_animation_frames(), 1);
}
