//! Keyboard Input Module
//!
//! Held-key state for player movement, using generic key codes so no
//! windowing system is involved. Front ends (or scripted drivers) translate
//! their own events into [`KeyCode`]s.

/// Generic key codes for the keys the garden responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,

    // Tool selection
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks the current state of movement keys.
///
/// Held keys produce continuous movement every frame until released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// W key - move forward
    pub forward: bool,
    /// S key - move backward
    pub backward: bool,
    /// A key - strafe left
    pub left: bool,
    /// D key - strafe right
    pub right: bool,
    /// Space - fly up
    pub up: bool,
    /// Left shift - fly down
    pub down: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::W => &mut self.forward,
            KeyCode::S => &mut self.backward,
            KeyCode::A => &mut self.left,
            KeyCode::D => &mut self.right,
            KeyCode::Space => &mut self.up,
            KeyCode::ShiftLeft => &mut self.down,
            KeyCode::Tab | KeyCode::Unknown => return false,
        };
        *slot = pressed;
        true
    }

    /// Check if any movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Reset all movement keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }

    /// Get the up/down movement direction (-1, 0, or 1).
    pub fn up_axis(&self) -> i32 {
        (self.up as i32) - (self.down as i32)
    }
}
