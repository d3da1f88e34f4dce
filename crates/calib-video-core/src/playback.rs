//! Playback state machine for the undistortion preview.

use crate::Key;

/// Which rendering of the frame is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Distortion-corrected view. Playback starts here.
    #[default]
    Rectified,
    /// Pass-through of the decoded frame.
    Original,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Rectified => ViewMode::Original,
            ViewMode::Original => ViewMode::Rectified,
        }
    }

    /// Status label drawn on the frame.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Rectified => "Rectified",
            ViewMode::Original => "Original",
        }
    }
}

/// Pause/view state of the playback loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub view: ViewMode,
    pub paused: bool,
}

/// What the playback loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStep {
    /// Advance to the next frame.
    ShowNext,
    /// Block until the next key arrives.
    AwaitKey,
    Exit,
}

impl PlaybackState {
    /// Advance on a key event.
    ///
    /// While paused, any key resumes; Escape and Tab keep their meaning, so
    /// a Tab both toggles the view and resumes.
    pub fn on_key(&mut self, key: Option<Key>) -> PlaybackStep {
        if self.paused {
            return match key {
                None => PlaybackStep::AwaitKey,
                Some(Key::Escape) => PlaybackStep::Exit,
                Some(Key::Tab) => {
                    self.view = self.view.toggled();
                    self.paused = false;
                    PlaybackStep::ShowNext
                }
                Some(_) => {
                    self.paused = false;
                    PlaybackStep::ShowNext
                }
            };
        }
        match key {
            Some(Key::Escape) => PlaybackStep::Exit,
            Some(Key::Space) => {
                self.paused = true;
                PlaybackStep::AwaitKey
            }
            Some(Key::Tab) => {
                self.view = self.view.toggled();
                PlaybackStep::ShowNext
            }
            _ => PlaybackStep::ShowNext,
        }
    }
}
