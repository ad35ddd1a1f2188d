use crate::shared::frame::Frame;

use super::detection::Detection;

/// Domain interface for face detection.
///
/// Returns the faces that pass the detector's confidence threshold, in the
/// order the model reported them. Backends may keep inference buffers,
/// hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
