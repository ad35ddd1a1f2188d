use std::sync::OnceLock;

use crate::shared::frame::{Frame, CHANNELS};

use super::color;

/// Piecewise-linear "jet" ramp: dark blue → blue → cyan → yellow → red →
/// dark red across the luma range.
fn jet_lut() -> &'static [[u8; 3]; 256] {
    static LUT: OnceLock<[[u8; 3]; 256]> = OnceLock::new();
    LUT.get_or_init(|| {
        let mut lut = [[0u8; 3]; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            let x = i as f64 / 255.0;
            *entry = [jet_channel(x, 3.0), jet_channel(x, 2.0), jet_channel(x, 1.0)];
        }
        lut
    })
}

/// One channel of the jet ramp: a trapezoid peaking around `center / 4`.
fn jet_channel(x: f64, center: f64) -> u8 {
    let v = (1.5 - (4.0 * x - center).abs()).clamp(0.0, 1.0);
    (v * 255.0).round() as u8
}

/// False-color rendering of the frame's luma.
pub fn apply(frame: &Frame) -> Frame {
    let lut = jet_lut();
    let plane = color::rgba_to_luma(frame);
    let mut data = Vec::with_capacity(plane.len() * CHANNELS);
    for &v in &plane {
        let [r, g, b] = lut[v as usize];
        data.extend_from_slice(&[r, g, b, 255]);
    }
    Frame::new(data, frame.width(), frame.height(), frame.index())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_maps_to_blue() {
        let [r, g, b] = jet_lut()[0];
        assert_eq!((r, g), (0, 0));
        assert_eq!(b, 128);
    }

    #[test]
    fn test_bright_maps_to_red() {
        let [r, g, b] = jet_lut()[255];
        assert_eq!((g, b), (0, 0));
        assert_eq!(r, 128);
    }

    #[test]
    fn test_midtone_is_green_dominant() {
        let [r, g, b] = jet_lut()[128];
        assert_eq!(g, 255);
        assert!(g > r && g > b);
    }

    #[test]
    fn test_ramp_passes_through_cyan_and_yellow() {
        let [r, g, b] = jet_lut()[80];
        assert!(b == 255 && g > 128 && r < 64, "got {:?}", [r, g, b]);
        let [r, g, b] = jet_lut()[175];
        assert!(r == 255 && g > 128 && b < 64, "got {:?}", [r, g, b]);
    }

    #[test]
    fn test_apply_uses_luma_and_is_opaque() {
        // Luma of pure white is 255.
        let out = apply(&Frame::filled(3, 2, [255, 255, 255, 0], 4));
        assert_eq!(out.pixel(2, 1), [128, 0, 0, 255]);
        assert_eq!((out.width(), out.height(), out.index()), (3, 2, 4));
    }
}
