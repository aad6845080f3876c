//! Example: a ticker that only animates while it is on screen
//!
//! Run with `RUST_LOG=easel=trace,easel_anim=debug` to watch the loop start
//! and stop as the page scrolls.

use easel::dom::{DOMRect, Window, WindowConfig};
use easel::{Color, Ticker};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    
    let config = WindowConfig {
        intersection_observer: std::env::args().nth(1).as_deref() != Some("--scroll-fallback"),
        ..WindowConfig::default()
    };
    let window = Window::new(config);
    let element = window.create_element(DOMRect::from_xywh(0.0, 200.0, 320.0, 40.0));
    
    let ticker = Ticker::attach(
        window.clone(),
        element,
        320,
        40,
        4,
        |n| Color::rgb((n * 7 % 256) as u8, 128, 255),
        Some(Box::new(|running: bool| tracing::info!(running, "Ticker state changed"))),
    )?;
    tracing::info!(strategy = ?ticker.animation().strategy(), "easel v{} ticker attached", easel::VERSION);
    
    let mut timestamp = 0.0;
    for scroll_y in [0.0, 0.0, 0.0, 1200.0, 1200.0, 1200.0, 100.0, 100.0] {
        window.scroll_to(0.0, scroll_y);
        window.tick(timestamp);
        println!(
            "t={:>5.1}ms scroll_y={:>6.1} running={:<5} frames={}",
            timestamp,
            scroll_y,
            ticker.is_running(),
            ticker.frames_drawn()
        );
        timestamp += 16.7;
    }
    
    Ok(())
}
