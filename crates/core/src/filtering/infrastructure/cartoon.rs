use crate::shared::frame::{Frame, CHANNELS};

use super::color;
use super::gaussian;
use super::neighborhood;

const MEDIAN_APERTURE: usize = 7;
const THRESHOLD_BLOCK: usize = 9;
const THRESHOLD_OFFSET: i32 = 9;
const SMOOTHING_KERNEL: usize = 5;

/// Flat colour regions outlined by dark edges.
///
/// Edges come from an adaptive mean threshold over the median-filtered
/// luma; colour comes from a light Gaussian blur of the input. Edge pixels
/// lose their colour, alpha is kept.
pub fn apply(frame: &Frame) -> Frame {
    let width = frame.width() as usize;
    let height = frame.height() as usize;

    let gray = color::rgba_to_luma(frame);
    let smoothed = neighborhood::median_blur(&gray, width, height, MEDIAN_APERTURE);
    let edges = edge_mask(&smoothed, width, height);

    let mut output = frame.clone();
    let kernel = gaussian::gaussian_kernel_1d(SMOOTHING_KERNEL, None);
    let mut temp = Vec::new();
    gaussian::separable_gaussian_blur(output.data_mut(), width, height, CHANNELS, &kernel, &mut temp);

    // Mask alpha is opaque, so AND-ing only touches colour channels.
    for (px, &mask) in output.data_mut().chunks_exact_mut(CHANNELS).zip(&edges) {
        px[0] &= mask;
        px[1] &= mask;
        px[2] &= mask;
    }
    output
}

/// 255 where a pixel is brighter than its local mean minus the offset,
/// 0 on (darker) edge pixels.
fn edge_mask(plane: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mean = neighborhood::box_mean(plane, width, height, THRESHOLD_BLOCK);
    plane
        .iter()
        .zip(&mean)
        .map(|(&v, &m)| {
            if v as i32 - m as i32 > -THRESHOLD_OFFSET {
                255
            } else {
                0
            }
        })
        .collect()
}
