use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::shared::frame::Frame;
use crate::video::domain::display_sink::DisplaySink;

/// Presents frames by overwriting a single preview image file.
///
/// Each frame is written next to the target and renamed over it, so a
/// viewer polling the file never sees a half-written image.
pub struct ImageFileSink {
    path: PathBuf,
    staging: PathBuf,
    presented: usize,
}

impl ImageFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "preview.png".into());
        let staging = path.with_file_name(format!(".{name}"));
        Self {
            path,
            staging,
            presented: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    fn write(&self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let img = RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;
        img.save(&self.staging)?;
        fs::rename(&self.staging, &self.path)?;
        Ok(())
    }
}

impl DisplaySink for ImageFileSink {
    fn present(&mut self, frame: &Frame) {
        match self.write(frame) {
            Ok(()) => self.presented += 1,
            Err(e) => log::error!(
                "Failed to present frame {} to {}: {e}",
                frame.index(),
                self.path.display()
            ),
        }
    }
}
