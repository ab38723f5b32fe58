//! Paint model shared between the demo and renderers.
//!
//! Scope is color representation only (linear premultiplied alpha).
//! Geometry types remain in `coords`.

mod color;

pub use color::Color;
