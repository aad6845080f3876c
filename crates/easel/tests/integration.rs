//! Integration tests - canvas and visibility-gated animation together
//!
//! A scrolling canvas animated only while its element is on screen.

use std::cell::RefCell;
use std::rc::Rc;

use easel::dom::{DOMRect, Window, WindowConfig};
use easel::{Canvas, Color, Point, RasterSurface, Rect, Ticker, VisibilityStrategy, VisibleLoop};

fn window(intersection_observer: bool) -> Window {
    Window::new(WindowConfig {
        inner_width: 800.0,
        inner_height: 600.0,
        intersection_observer,
    })
}

// ============================================================================
// TICKER
// ============================================================================

#[test]
fn test_ticker_pauses_offscreen() {
    for intersection_observer in [true, false] {
        let win = window(intersection_observer);
        let el = win.create_element(DOMRect::from_xywh(0.0, 100.0, 64.0, 16.0));
        let ticker = Ticker::attach(win.clone(), el, 64, 16, 2, |_| Color::rgb(0, 255, 0), None).unwrap();
        
        for t in 0..10 {
            win.tick(t as f64 * 16.0);
        }
        let drawn = ticker.frames_drawn();
        assert!(drawn >= 9, "drew {} frames", drawn);
        
        win.scroll_to(0.0, 2000.0);
        for t in 10..13 {
            win.tick(t as f64 * 16.0);
        }
        assert!(!ticker.is_running());
        
        // Once the outstanding request has run, nothing more is drawn.
        let paused_at = ticker.frames_drawn();
        for t in 13..20 {
            win.tick(t as f64 * 16.0);
        }
        assert_eq!(ticker.frames_drawn(), paused_at);
        
        win.scroll_to(0.0, 0.0);
        for t in 20..25 {
            win.tick(t as f64 * 16.0);
        }
        assert!(ticker.is_running());
        assert!(ticker.frames_drawn() > paused_at);
    }
}

#[test]
fn test_ticker_state_changes() {
    let win = window(true);
    let el = win.create_element(DOMRect::from_xywh(0.0, 100.0, 64.0, 16.0));
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();
    let ticker = Ticker::attach(
        win.clone(),
        el,
        64,
        16,
        1,
        |_| Color::rgb(255, 255, 255),
        Some(Box::new(move |running: bool| l.borrow_mut().push(running))),
    )
    .unwrap();
    
    win.tick(0.0);
    win.tick(16.0);
    win.tick(32.0);
    assert_eq!(*log.borrow(), vec![true]);
    assert_eq!(ticker.animation().strategy(), VisibilityStrategy::IntersectionObserver);
    
    drop(ticker);
    assert_eq!(*log.borrow(), vec![true, false]);
    assert_eq!(win.observer_count(), 0);
}

// ============================================================================
// LOOP + CANVAS
// ============================================================================

#[test]
fn test_loop_drives_canvas_scroll() {
    let win = window(false);
    let el = win.create_element(DOMRect::from_xywh(0.0, 0.0, 10.0, 10.0));
    
    let canvas = Rc::new(RefCell::new(Canvas::new(10, 10)));
    canvas.borrow_mut().fill_rect(0.0, 9.0, 10.0, 1.0, Color::rgb(9, 9, 9));
    
    let c = canvas.clone();
    let anim = VisibleLoop::attach(win.clone(), el, move |_| {
        // Scroll the contents up one row per frame.
        c.borrow_mut().copy_area(Rect::new(0.0, 1.0, 10.0, 10.0), Point::new(0.0, 0.0));
    }, None)
    .unwrap();
    assert_eq!(anim.strategy(), VisibilityStrategy::ScrollFallback);
    
    for t in 0..3 {
        win.tick(t as f64 * 16.0);
    }
    
    let canvas = canvas.borrow();
    assert_eq!(canvas.get_pixel(5, 6), Some(Color::rgb(9, 9, 9)));
    assert_eq!(canvas.get_pixel(5, 5), Some(Color::TRANSPARENT));
    // The bottom row has no source and keeps its paint.
    assert_eq!(canvas.get_pixel(5, 9), Some(Color::rgb(9, 9, 9)));
}

#[test]
fn test_version() {
    assert!(!easel::VERSION.is_empty());
}
