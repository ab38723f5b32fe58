//! Sprite-movement demo.
//!
//! Opens an 800×600 window with a 100×100 movable sprite. WASD moves it,
//! clamped to the window. V toggles the 60 fps frame cap, C toggles between
//! dt-based and fixed-step movement, Escape quits.

mod app;
mod player;

use anyhow::Result;

use scoot_engine::device::GpuInit;
use scoot_engine::logging::{LoggingConfig, init_logging};
use scoot_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use crate::app::DemoApp;
use crate::player::{WINDOW_HEIGHT, WINDOW_WIDTH};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "scoot demo".to_string(),
        initial_size: LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64),
    };

    Runtime::run(config, GpuInit::default(), DemoApp::new())
}
