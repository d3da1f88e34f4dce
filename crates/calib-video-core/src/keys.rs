//! Keyboard events shared by the selection and playback loops.

/// A decoded key event from the display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Tab,
    Other(i32),
}

impl Key {
    /// Map a raw `wait_key` code. Negative codes mean the poll timed out.
    pub fn from_code(code: i32) -> Option<Key> {
        match code {
            c if c < 0 => None,
            32 => Some(Key::Space),
            13 => Some(Key::Enter),
            27 => Some(Key::Escape),
            9 => Some(Key::Tab),
            c => Some(Key::Other(c)),
        }
    }
}
