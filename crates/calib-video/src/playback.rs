//! Undistorted playback with interactive controls.

use calib_video_core::{CameraIntrinsics, PlaybackState, PlaybackStep, ViewMode};

use crate::display::{draw_label, FrameSink};
use crate::error::Result;
use crate::source::FrameSource;
use crate::undistort::Undistorter;
use crate::writer::CorrectedVideoWriter;

/// Plays a frame stream with the distortion model applied.
///
/// Space pauses, Tab toggles between the corrected and the original view,
/// Escape exits. One pass, strictly forward, no buffering. When a writer is
/// attached, every frame's rectified rendering is persisted regardless of
/// the preview toggle.
pub struct UndistortionPlayer {
    undistorter: Undistorter,
    state: PlaybackState,
    wait_ms: i32,
}

impl UndistortionPlayer {
    pub fn new(intrinsics: &CameraIntrinsics, wait_ms: i32) -> Result<Self> {
        Ok(Self {
            undistorter: Undistorter::new(intrinsics)?,
            state: PlaybackState::default(),
            wait_ms,
        })
    }

    /// Play `source` through `sink` until the stream ends or the user exits.
    /// Returns the final playback state.
    pub fn play<S, D>(
        &mut self,
        source: &mut S,
        sink: &mut D,
        mut writer: Option<&mut CorrectedVideoWriter>,
    ) -> Result<PlaybackState>
    where
        S: FrameSource + ?Sized,
        D: FrameSink + ?Sized,
    {
        while let Some(frame) = source.next_frame()? {
            let mut display = if self.state.view == ViewMode::Rectified || writer.is_some() {
                let rectified = self.undistorter.apply(&frame)?;
                if let Some(w) = writer.as_deref_mut() {
                    w.write(&rectified)?;
                }
                match self.state.view {
                    ViewMode::Rectified => rectified,
                    ViewMode::Original => frame,
                }
            } else {
                frame
            };
            draw_label(&mut display, self.state.view.label())?;
            sink.show(&display)?;

            let key = sink.wait_key(self.wait_ms)?;
            match self.state.on_key(key) {
                PlaybackStep::ShowNext => {}
                PlaybackStep::Exit => return Ok(self.state),
                PlaybackStep::AwaitKey => loop {
                    let key = sink.wait_key(0)?;
                    match self.state.on_key(key) {
                        PlaybackStep::AwaitKey => continue,
                        PlaybackStep::ShowNext => break,
                        PlaybackStep::Exit => return Ok(self.state),
                    }
                },
            }
        }
        Ok(self.state)
    }
}
