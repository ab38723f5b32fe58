//! Shape renderers.

mod common;

pub mod line;
pub mod rect;
pub mod sprite;
pub mod text;
