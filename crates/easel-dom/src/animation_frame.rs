//! Animation frames
//!
//! requestAnimationFrame / cancelAnimationFrame bookkeeping. Callbacks queued
//! while a frame is running belong to the next frame.

use std::fmt;

/// One-shot frame callback, called with the frame timestamp (ms)
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Handle returned by a frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub(crate) u32);

/// Pending animation frame callbacks
#[derive(Default)]
pub struct AnimationFrameQueue {
    /// Callbacks for the next frame, in request order
    pending: Vec<(FrameRequestId, FrameCallback)>,
    /// Requests taken by the running frame that have not been called yet
    in_flight: Vec<FrameRequestId>,
    /// Next request ID
    next_id: u32,
}

impl AnimationFrameQueue {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Queue a callback for the next frame
    pub fn request(&mut self, callback: FrameCallback) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.pending.push((id, callback));
        id
    }
    
    /// Cancel a request. Returns false if it already ran or never existed.
    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        if let Some(pos) = self.pending.iter().position(|(pending, _)| *pending == id) {
            self.pending.remove(pos);
            return true;
        }
        if let Some(pos) = self.in_flight.iter().position(|pending| *pending == id) {
            self.in_flight.remove(pos);
            return true;
        }
        false
    }
    
    /// Take the callbacks for the frame that is starting
    pub fn begin_frame(&mut self) -> Vec<(FrameRequestId, FrameCallback)> {
        let batch = std::mem::take(&mut self.pending);
        self.in_flight = batch.iter().map(|(id, _)| *id).collect();
        batch
    }
    
    /// Claim an in-flight request just before calling it.
    /// False means it was cancelled after the frame began.
    pub fn claim(&mut self, id: FrameRequestId) -> bool {
        match self.in_flight.iter().position(|pending| *pending == id) {
            Some(pos) => {
                self.in_flight.remove(pos);
                true
            }
            None => false,
        }
    }
    
    /// Number of callbacks waiting for the next frame
    pub fn len(&self) -> usize {
        self.pending.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl fmt::Debug for AnimationFrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationFrameQueue")
            .field("pending", &self.pending.len())
            .field("in_flight", &self.in_flight)
            .field("next_id", &self.next_id)
            .finish()
    }
}
