use ndarray::{Array4, ArrayView3};

use crate::filtering::infrastructure::color;
use crate::shared::frame::Frame;

/// Source sample pair and weight for one output coordinate.
#[derive(Clone, Copy)]
struct Tap {
    lo: usize,
    hi: usize,
    frac: f32,
}

/// Bilinear taps mapping `dst_len` output samples onto `src_len` inputs
/// with pixel centers aligned.
fn bilinear_taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let scale = src_len as f32 / dst_len as f32;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let pos = ((d as f32 + 0.5) * scale - 0.5).max(0.0);
            let lo = (pos.floor() as usize).min(last);
            Tap {
                lo,
                hi: (lo + 1).min(last),
                frac: pos - lo as f32,
            }
        })
        .collect()
}

/// Network input blob from a frame: BGR, bilinearly resized to
/// `size × size`, per-channel `mean` subtracted, NCHW layout `[1, 3, size, size]`.
///
/// Values are not scaled and channels are not swapped back to RGB.
pub fn blob_from_frame(
    frame: &Frame,
    size: u32,
    mean: [f32; 3],
) -> Result<Array4<f32>, ndarray::ShapeError> {
    let (fw, fh) = (frame.width() as usize, frame.height() as usize);
    let side = size as usize;
    let bgr = color::rgba_to_bgr(frame);
    let src = ArrayView3::from_shape((fh, fw, 3), &bgr)?;

    let mut blob = Array4::<f32>::zeros((1, 3, side, side));
    if frame.is_empty() {
        return Ok(blob);
    }
    let xs = bilinear_taps(fw, side);
    let ys = bilinear_taps(fh, side);
    for (oy, ty) in ys.iter().enumerate() {
        for (ox, tx) in xs.iter().enumerate() {
            for c in 0..3 {
                let a = src[[ty.lo, tx.lo, c]] as f32;
                let b = src[[ty.lo, tx.hi, c]] as f32;
                let top = a + (b - a) * tx.frac;
                let a = src[[ty.hi, tx.lo, c]] as f32;
                let b = src[[ty.hi, tx.hi, c]] as f32;
                let bottom = a + (b - a) * tx.frac;
                blob[[0, c, oy, ox]] = top + (bottom - top) * ty.frac - mean[c];
            }
        }
    }
    Ok(blob)
}
