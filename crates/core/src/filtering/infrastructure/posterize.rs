use crate::shared::frame::Frame;

/// Quantization levels per channel.
pub const DEFAULT_LEVELS: u32 = 4;

/// Lookup table snapping each byte to the nearest of `levels` evenly spaced
/// values: `min(255, round(i / step) * step)` with `step = 255 / (levels - 1)`.
pub fn build_lut(levels: u32) -> [u8; 256] {
    let step = 255.0 / (levels.max(2) - 1) as f64;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let quantized = (i as f64 / step).round() * step;
        *entry = quantized.min(255.0) as u8;
    }
    lut
}

/// Posterizes every channel, alpha included, through the same table.
pub fn apply(frame: &Frame, lut: &[u8; 256]) -> Frame {
    let data = frame.data().iter().map(|&v| lut[v as usize]).collect();
    Frame::new(data, frame.width(), frame.height(), frame.index())
}
