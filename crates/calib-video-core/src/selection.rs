//! Frame-selection state machine.
//!
//! Pure transition logic for the interactive capture loop. The display and
//! key polling live behind a seam in `calib-video`, so tests can drive the
//! machine with scripted keys instead of a real window.

use crate::Key;

/// Where the interactive selector currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Streaming frames, waiting for a capture request.
    #[default]
    Browsing,
    /// A capture preview is on screen, waiting for a decision key.
    AwaitingConfirm,
}

/// What the selection loop should do after feeding a key to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    /// Show the next frame.
    Continue,
    /// Run detection on the current frame and show the preview.
    AttemptCapture,
    /// Commit the current frame to the accepted list.
    Commit,
    /// Drop the preview and resume browsing.
    Discard,
    /// End selection early.
    Finish,
}

impl SelectionState {
    /// Advance on a key event. `None` (poll timeout) keeps browsing.
    pub fn on_key(&mut self, key: Option<Key>) -> SelectionStep {
        match (*self, key) {
            (SelectionState::Browsing, Some(Key::Space)) => {
                *self = SelectionState::AwaitingConfirm;
                SelectionStep::AttemptCapture
            }
            (SelectionState::Browsing, Some(Key::Escape)) => SelectionStep::Finish,
            (SelectionState::Browsing, _) => SelectionStep::Continue,
            (SelectionState::AwaitingConfirm, Some(Key::Enter)) => {
                *self = SelectionState::Browsing;
                SelectionStep::Commit
            }
            (SelectionState::AwaitingConfirm, Some(Key::Escape)) => SelectionStep::Finish,
            (SelectionState::AwaitingConfirm, _) => {
                *self = SelectionState::Browsing;
                SelectionStep::Discard
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_then_enter_commits() {
        let mut state = SelectionState::default();
        assert_eq!(state.on_key(Some(Key::Space)), SelectionStep::AttemptCapture);
        assert_eq!(state.on_key(Some(Key::Enter)), SelectionStep::Commit);
        assert_eq!(state, SelectionState::Browsing);
    }

    #[test]
    fn any_other_decision_key_discards_the_preview() {
        let mut state = SelectionState::default();
        state.on_key(Some(Key::Space));
        assert_eq!(state.on_key(Some(Key::Other(113))), SelectionStep::Discard);
        assert_eq!(state, SelectionState::Browsing);
    }

    #[test]
    fn escape_finishes_from_either_state() {
        let mut state = SelectionState::default();
        assert_eq!(state.on_key(Some(Key::Escape)), SelectionStep::Finish);

        let mut state = SelectionState::default();
        state.on_key(Some(Key::Space));
        assert_eq!(state.on_key(Some(Key::Escape)), SelectionStep::Finish);
    }

    #[test]
    fn timeout_keeps_browsing() {
        let mut state = SelectionState::default();
        assert_eq!(state.on_key(None), SelectionStep::Continue);
        assert_eq!(state, SelectionState::Browsing);
    }
}
