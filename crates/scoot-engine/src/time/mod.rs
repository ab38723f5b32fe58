//! Time subsystem.
//!
//! Stable, testable frame timing utilities without coupling to the runtime:
//! - `FrameClock` produces per-frame delta-time snapshots
//! - `FramePacer` enforces an optional frame-rate cap by sleeping
//! - `FpsCounter` smooths frame counts into a displayable rate

mod fps;
mod frame_clock;
mod pacer;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
