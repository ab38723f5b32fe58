//! Scoot engine crate.
//!
//! Owns the platform + GPU runtime pieces the demo binary runs on: window
//! and event loop, keyboard input state, frame timing, draw list, and the
//! wgpu shape renderers.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod texture;
