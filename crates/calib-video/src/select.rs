//! Frame selection from the decoded stream.

use calib_video_core::{SelectionState, SelectionStep};
use log::info;
use opencv::core::Mat;
use opencv::prelude::*;

use crate::detect::PatternDetector;
use crate::display::{draw_label, FrameSink};
use crate::error::{PipelineError, Result};
use crate::source::FrameSource;

/// Accept every frame without prompting.
///
/// An N-frame stream yields exactly N accepted frames; an empty stream is
/// fatal for the calibration stage and reported as such here.
pub fn select_all_frames<S>(source: &mut S) -> Result<Vec<Mat>>
where
    S: FrameSource + ?Sized,
{
    let mut selected = Vec::new();
    while let Some(frame) = source.next_frame()? {
        selected.push(frame);
    }
    finish(selected)
}

/// Interactive selection: browse frames, Space previews a capture with the
/// detection overlay, Enter commits it, Escape ends selection early.
///
/// A frame is committed even when detection was incomplete; the collector
/// skips it later. Any other key at the preview discards the capture.
pub fn select_frames_interactively<S, D>(
    source: &mut S,
    sink: &mut D,
    detector: &PatternDetector,
    wait_ms: i32,
) -> Result<Vec<Mat>>
where
    S: FrameSource + ?Sized,
    D: FrameSink + ?Sized,
{
    let mut selected = Vec::new();
    let mut state = SelectionState::default();

    'frames: while let Some(frame) = source.next_frame()? {
        let mut display = frame.try_clone()?;
        draw_label(&mut display, &format!("NSelect: {}", selected.len()))?;
        sink.show(&display)?;

        let mut key = sink.wait_key(wait_ms)?;
        loop {
            match state.on_key(key) {
                SelectionStep::Continue | SelectionStep::Discard => continue 'frames,
                SelectionStep::AttemptCapture => {
                    let detection = detector.detect(&frame)?;
                    let mut preview = frame.try_clone()?;
                    detector.draw_overlay(&mut preview, &detection)?;
                    sink.show(&preview)?;
                    key = sink.wait_key(0)?;
                }
                SelectionStep::Commit => {
                    selected.push(frame);
                    continue 'frames;
                }
                SelectionStep::Finish => break 'frames,
            }
        }
    }
    finish(selected)
}

fn finish(selected: Vec<Mat>) -> Result<Vec<Mat>> {
    if selected.is_empty() {
        return Err(PipelineError::EmptySelection);
    }
    info!("selected {} calibration frames", selected.len());
    Ok(selected)
}
