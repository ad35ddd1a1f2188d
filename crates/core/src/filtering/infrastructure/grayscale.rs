use crate::shared::frame::Frame;

use super::color;

/// Luma of every pixel replicated into R, G and B, with opaque alpha.
pub fn apply(frame: &Frame) -> Frame {
    let plane = color::rgba_to_luma(frame);
    color::luma_to_rgba(&plane, frame.width(), frame.height(), frame.index())
}
