//! Display and key-input seam.
//!
//! The interactive loops only talk to [`FrameSink`], so tests drive them
//! with scripted keys instead of a real window.

use calib_video_core::Key;
use opencv::core::{Mat, Point, Scalar};
use opencv::{highgui, imgproc};

use crate::error::Result;

/// Display surface plus single-key polling.
pub trait FrameSink {
    fn show(&mut self, frame: &Mat) -> Result<()>;

    /// Poll one key; `delay_ms <= 0` blocks until a key arrives.
    fn wait_key(&mut self, delay_ms: i32) -> Result<Option<Key>>;
}

/// A `highgui` window, destroyed on drop so early exits clean up too.
pub struct HighguiWindow {
    name: String,
}

impl HighguiWindow {
    pub fn new(name: &str) -> Result<Self> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            name: name.to_owned(),
        })
    }
}

impl FrameSink for HighguiWindow {
    fn show(&mut self, frame: &Mat) -> Result<()> {
        highgui::imshow(&self.name, frame)?;
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: i32) -> Result<Option<Key>> {
        let code = highgui::wait_key(delay_ms.max(0))?;
        Ok(Key::from_code(code))
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.name);
    }
}

/// Draw a status label on the frame: green, top-left.
pub fn draw_label(frame: &mut Mat, text: &str) -> Result<()> {
    imgproc::put_text(
        frame,
        text,
        Point::new(10, 150),
        imgproc::FONT_HERSHEY_DUPLEX,
        2.0,
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        2,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}
