//! Keyboard input.
//!
//! `InputState` holds "is down" information for the window; `InputFrame`
//! records the press/release edges that happened during the current frame.
//! Movement reads held keys from the state; toggles read fresh presses from
//! the frame so a held key flips a flag exactly once.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
