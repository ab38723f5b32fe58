use std::collections::HashSet;

use super::types::Key;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys); `InputFrame` provides
/// the rising edges seen this frame. The runtime clears the frame after each
/// `on_frame` callback.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame (rising edges only).
    pub keys_pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }

    /// Whether `key` saw a fresh press this frame.
    #[inline]
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
