use rand::Rng;

use crate::shared::frame::Frame;

/// Upper bound of the per-channel noise range.
const MAX_NOISE: f64 = 255.0;
/// Noise range per intensity step.
const NOISE_PER_INTENSITY: f64 = 2.5;
/// Weight of the noise mask in the blend (the source keeps weight 1.0).
const NOISE_WEIGHT: f64 = 0.5;

/// Width of the uniform noise range for an intensity in `0..=100`.
pub fn noise_amount(intensity: u8) -> f64 {
    (intensity as f64 * NOISE_PER_INTENSITY).min(MAX_NOISE)
}

/// Adds freshly sampled uniform noise to every channel, alpha included.
///
/// Each mask value is `floor(u * amount)` with `u` uniform in `[0, 1)`;
/// the output is `saturate(src + 0.5 * mask)` with ties rounded to even.
pub fn apply<R: Rng + ?Sized>(frame: &Frame, intensity: u8, rng: &mut R) -> Frame {
    let amount = noise_amount(intensity);
    let mask: Vec<u8> = (0..frame.data().len())
        .map(|_| (rng.random::<f64>() * amount).floor() as u8)
        .collect();

    let data = frame
        .data()
        .iter()
        .zip(&mask)
        .map(|(&src, &noise)| blend(src, noise))
        .collect();
    Frame::new(data, frame.width(), frame.height(), frame.index())
}

#[inline]
fn blend(src: u8, noise: u8) -> u8 {
    (src as f64 + noise as f64 * NOISE_WEIGHT)
        .round_ties_even()
        .clamp(0.0, 255.0) as u8
}
