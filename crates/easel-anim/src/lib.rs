//! easel Animation
//!
//! Drives a per-frame callback only while its element is on screen.
//!
//! # Example
//! ```rust
//! use easel_anim::VisibleLoop;
//! use easel_dom::{DOMRect, Window, WindowConfig};
//!
//! let window = Window::new(WindowConfig::default());
//! let element = window.create_element(DOMRect::from_xywh(0.0, 0.0, 300.0, 150.0));
//!
//! let animation = VisibleLoop::attach(window.clone(), element, |t| {
//!     let _ = t; // draw the frame for timestamp `t`
//! }, None).unwrap();
//!
//! window.tick(0.0);
//! assert!(animation.is_running());
//! ```

mod strategy;
mod visible_loop;

pub use strategy::{is_vertically_visible, VisibilityStrategy};
pub use visible_loop::{LoopState, PerFrameFn, StateChangeFn, VisibleLoop};

use easel_dom::DomError;

/// Loop error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoopError {
    #[error(transparent)]
    Dom(#[from] DomError),
}
