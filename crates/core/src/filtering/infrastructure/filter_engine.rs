use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::detection::domain::detector_slot::DetectorSlot;
use crate::filtering::domain::control_snapshot::ControlSnapshot;
use crate::filtering::domain::filter_error::FilterError;
use crate::filtering::domain::filter_kind::FilterKind;
use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::frame::Frame;

use super::face_blur::FaceBlurFilter;
use super::{cartoon, colormap, grayscale, noise, posterize};

/// Dispatches each frame to the filter selected in the control snapshot.
pub struct FilterEngine {
    face_blur: FaceBlurFilter,
    rng: StdRng,
    posterize_lut: [u8; 256],
}

impl FilterEngine {
    pub fn new(detector: DetectorSlot) -> Self {
        Self::with_rng(detector, StdRng::from_os_rng())
    }

    /// Engine with a caller-provided noise generator.
    pub fn with_rng(detector: DetectorSlot, rng: StdRng) -> Self {
        Self {
            face_blur: FaceBlurFilter::new(detector),
            rng,
            posterize_lut: posterize::build_lut(posterize::DEFAULT_LEVELS),
        }
    }
}

impl FrameFilter for FilterEngine {
    fn apply(&mut self, frame: &Frame, controls: &ControlSnapshot) -> Result<Frame, FilterError> {
        let output = match controls.filter {
            FilterKind::None => frame.clone(),
            FilterKind::Gray => grayscale::apply(frame),
            FilterKind::Noisy => noise::apply(frame, controls.intensity, &mut self.rng),
            FilterKind::Colorize => colormap::apply(frame),
            FilterKind::FaceBlurDnn => self.face_blur.apply(frame)?,
            FilterKind::Cartoon => cartoon::apply(frame),
            FilterKind::Posterize => posterize::apply(frame, &self.posterize_lut),
        };
        log::debug!("Applied: {}", controls.filter);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn engine() -> FilterEngine {
        FilterEngine::with_rng(DetectorSlot::new(), StdRng::seed_from_u64(9))
    }

    fn sample_frame(width: u32, height: u32) -> Frame {
        let mut frame = Frame::blank(width, height, 1);
        for (i, px) in frame.data_mut().chunks_exact_mut(4).enumerate() {
            px[0] = (i * 3 % 256) as u8;
            px[1] = (i * 5 % 256) as u8;
            px[2] = (i * 11 % 256) as u8;
        }
        frame
    }

    #[rstest]
    #[case(FilterKind::None)]
    #[case(FilterKind::Gray)]
    #[case(FilterKind::Noisy)]
    #[case(FilterKind::Colorize)]
    #[case(FilterKind::FaceBlurDnn)]
    #[case(FilterKind::Cartoon)]
    #[case(FilterKind::Posterize)]
    fn test_every_filter_preserves_dimensions(#[case] kind: FilterKind) {
        let mut engine = engine();
        for (w, h) in [(1, 1), (3, 7), (33, 17)] {
            let frame = sample_frame(w, h);
            let out = engine
                .apply(&frame, &ControlSnapshot::new(kind, 60))
                .unwrap();
            assert!(out.same_size(&frame), "{kind} changed {w}x{h}");
            assert_eq!(out.index(), frame.index());
        }
    }

    #[test]
    fn test_none_is_identity() {
        let frame = sample_frame(6, 4);
        let out = engine().apply(&frame, &ControlSnapshot::default()).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn test_noisy_with_zero_intensity_is_identity() {
        let frame = sample_frame(6, 4);
        let controls = ControlSnapshot::new(FilterKind::Noisy, 0);
        assert_eq!(engine().apply(&frame, &controls).unwrap(), frame);
    }

    #[test]
    fn test_gray_is_idempotent_on_gray_frames() {
        let mut engine = engine();
        let controls = ControlSnapshot::new(FilterKind::Gray, 0);
        let once = engine.apply(&sample_frame(9, 9), &controls).unwrap();
        let twice = engine.apply(&once, &controls).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_posterize_uses_four_levels() {
        let frame = Frame::filled(2, 2, [100, 0, 255, 255], 0);
        let controls = ControlSnapshot::new(FilterKind::Posterize, 0);
        let out = engine().apply(&frame, &controls).unwrap();
        assert_eq!(out.pixel(0, 0), [85, 0, 255, 255]);
    }

    #[test]
    fn test_face_blur_without_detector_passes_through() {
        let frame = sample_frame(12, 8);
        let controls = ControlSnapshot::new(FilterKind::FaceBlurDnn, 0);
        assert_eq!(engine().apply(&frame, &controls).unwrap(), frame);
    }
}
