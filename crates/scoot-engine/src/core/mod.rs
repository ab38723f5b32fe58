//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform
//! loop) and application code, providing a consistent per-frame context
//! without leaking runtime internals.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
