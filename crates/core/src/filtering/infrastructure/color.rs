use crate::shared::frame::{Frame, CHANNELS};

// BT.601 luma weights in 14-bit fixed point.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + LUMA_ROUND) >> LUMA_SHIFT) as u8
}

/// Single-channel luma plane of an RGBA frame (alpha ignored).
pub fn rgba_to_luma(frame: &Frame) -> Vec<u8> {
    frame
        .data()
        .chunks_exact(CHANNELS)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Expand a luma plane back to an opaque RGBA frame.
pub fn luma_to_rgba(plane: &[u8], width: u32, height: u32, index: usize) -> Frame {
    let mut data = Vec::with_capacity(plane.len() * CHANNELS);
    for &v in plane {
        data.extend_from_slice(&[v, v, v, 255]);
    }
    Frame::new(data, width, height, index)
}

/// Interleaved BGR copy of an RGBA frame.
pub fn rgba_to_bgr(frame: &Frame) -> Vec<u8> {
    let mut bgr = Vec::with_capacity(frame.data().len() / CHANNELS * 3);
    for px in frame.data().chunks_exact(CHANNELS) {
        bgr.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    bgr
}
