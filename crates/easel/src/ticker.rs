//! Ticker
//!
//! A strip chart: every visible frame scrolls the canvas left by `step`
//! pixels with `copy_area` and paints the freed columns.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use easel_anim::{LoopError, StateChangeFn, VisibleLoop};
use easel_canvas::{Canvas, Color, Point, RasterSurface, Rect};
use easel_dom::{ElementId, Host};
use tracing::trace;

/// Scrolling strip chart bound to an element's visibility
#[derive(Debug)]
pub struct Ticker {
    canvas: Rc<RefCell<Canvas>>,
    frames: Rc<Cell<u64>>,
    animation: VisibleLoop,
}

impl Ticker {
    /// Attach a `width` x `height` ticker to `element`.
    ///
    /// `sample` gives the color of the column painted on frame `n`.
    pub fn attach<H, F>(
        host: H,
        element: ElementId,
        width: u32,
        height: u32,
        step: u32,
        mut sample: F,
        on_state_change: Option<StateChangeFn>,
    ) -> Result<Self, LoopError>
    where
        H: Host + 'static,
        F: FnMut(u64) -> Color + 'static,
    {
        let canvas = Rc::new(RefCell::new(Canvas::new(width, height)));
        let frames = Rc::new(Cell::new(0u64));
        
        let (c, n) = (canvas.clone(), frames.clone());
        let step = step as f64;
        let animation = VisibleLoop::attach(host, element, move |timestamp| {
            let frame = n.get();
            let mut canvas = c.borrow_mut();
            let (w, h) = (canvas.width() as f64, canvas.height() as f64);
            
            canvas.copy_area(Rect::new(step, 0.0, w, h), Point::new(0.0, 0.0));
            canvas.fill_rect(w - step, 0.0, step, h, sample(frame));
            
            trace!(frame, timestamp, "Ticker frame");
            n.set(frame + 1);
        }, on_state_change)?;
        
        Ok(Self { canvas, frames, animation })
    }
    
    pub fn canvas(&self) -> Ref<'_, Canvas> {
        self.canvas.borrow()
    }
    
    /// Frames drawn so far
    pub fn frames_drawn(&self) -> u64 {
        self.frames.get()
    }
    
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }
    
    pub fn animation(&self) -> &VisibleLoop {
        &self.animation
    }
}
