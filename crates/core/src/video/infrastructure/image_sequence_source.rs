use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::{FramePoll, FrameSource};

/// Frame source replaying the image files of a directory in name order.
///
/// Each poll decodes the next file to RGBA. Files that fail to decode are
/// reported as [`FramePoll::NotReady`] and skipped.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    position: usize,
    looping: bool,
    next_index: usize,
}

impl ImageSequenceSource {
    /// Lists the image files in `dir`. Fails when the directory cannot be
    /// read or holds no images.
    pub fn open(dir: &Path, looping: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image_file(p))
            .collect();
        if paths.is_empty() {
            return Err(format!("no image files in {}", dir.display()).into());
        }
        paths.sort();
        log::info!("Frame source: {} images in {}", paths.len(), dir.display());
        Ok(Self {
            paths,
            position: 0,
            looping,
            next_index: 0,
        })
    }

    pub fn image_count(&self) -> usize {
        self.paths.len()
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> FramePoll {
        if self.position >= self.paths.len() {
            if !self.looping {
                return FramePoll::Ended;
            }
            self.position = 0;
        }
        let path = &self.paths[self.position];
        self.position += 1;

        match image::open(path) {
            Ok(img) => {
                let frame = Frame::from_rgba_image(img.to_rgba8(), self.next_index);
                self.next_index += 1;
                FramePoll::Ready(frame)
            }
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                FramePoll::NotReady
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([value, value, value]));
        img.save(dir.join(name)).unwrap();
    }

    fn expect_frame(poll: FramePoll) -> Frame {
        match poll {
            FramePoll::Ready(frame) => frame,
            other => panic!("expected a frame, got {other:?}"),
        }
    }

    #[test]
    fn test_frames_in_name_order_then_ended() {
        let tmp = TempDir::new().unwrap();
        write_png(tmp.path(), "b.png", 4, 3, 20);
        write_png(tmp.path(), "a.png", 4, 3, 10);
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let mut source = ImageSequenceSource::open(tmp.path(), false).unwrap();
        assert_eq!(source.image_count(), 2);

        let first = expect_frame(source.next_frame());
        assert_eq!(first.pixel(0, 0), [10, 10, 10, 255]);
        assert_eq!(first.index(), 0);
        let second = expect_frame(source.next_frame());
        assert_eq!(second.pixel(3, 2), [20, 20, 20, 255]);
        assert_eq!(second.index(), 1);
        assert!(matches!(source.next_frame(), FramePoll::Ended));
    }

    #[test]
    fn test_looping_restarts_with_increasing_index() {
        let tmp = TempDir::new().unwrap();
        write_png(tmp.path(), "only.png", 2, 2, 50);
        let mut source = ImageSequenceSource::open(tmp.path(), true).unwrap();
        for expected in 0..3 {
            assert_eq!(expect_frame(source.next_frame()).index(), expected);
        }
    }

    #[test]
    fn test_undecodable_file_is_not_ready() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.png"), b"not a png").unwrap();
        write_png(tmp.path(), "b.png", 2, 2, 5);
        let mut source = ImageSequenceSource::open(tmp.path(), false).unwrap();
        assert!(matches!(source.next_frame(), FramePoll::NotReady));
        assert_eq!(expect_frame(source.next_frame()).index(), 0);
    }

    #[test]
    fn test_directory_without_images_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(ImageSequenceSource::open(tmp.path(), false).is_err());
    }

    #[test]
    fn test_missing_directory_is_error() {
        assert!(ImageSequenceSource::open(Path::new("/nonexistent/frames"), false).is_err());
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        assert!(is_image_file(Path::new("shot.JPG")));
        assert!(!is_image_file(Path::new("clip.mp4")));
        assert!(!is_image_file(Path::new("README")));
    }
}
