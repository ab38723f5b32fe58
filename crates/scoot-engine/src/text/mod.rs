//! Font ownership for the overlay text renderer.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
