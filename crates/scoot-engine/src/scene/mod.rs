//! Scene (draw stream) types: renderer-agnostic draw commands with
//! deterministic ordering (z-index, then insertion order).

mod cmd;
mod list;
mod order;

pub use cmd::{DrawCmd, LineCmd, RectCmd, SpriteCmd, TextCmd};
pub use list::{DrawItem, DrawList};
pub use order::{SortKey, ZIndex};
