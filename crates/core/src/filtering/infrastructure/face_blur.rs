use crate::detection::domain::detector_slot::{DetectorSlot, DetectorStatus};
use crate::filtering::domain::filter_error::FilterError;
use crate::shared::frame::{Frame, CHANNELS};

use super::gaussian::{self, RoiRect};

/// Aperture of the face blur, in pixels along each axis.
pub const FACE_BLUR_KERNEL: usize = 55;
/// Standard deviation of the face blur along each axis.
pub const FACE_BLUR_SIGMA: f64 = 30.0;

/// Blurs every face the shared detector reports.
///
/// Boxes are processed in detection order on one working copy, so a box
/// overlapping an earlier one blurs already-blurred pixels. Pixels near a
/// box edge mix in the image around the box; only the frame edge is
/// reflected. Nothing outside the boxes is written.
pub struct FaceBlurFilter {
    detector: DetectorSlot,
    kernel: Vec<f32>,
    roi: Vec<u8>,
    temp: Vec<f32>,
    warned_status: Option<DetectorStatus>,
}

impl FaceBlurFilter {
    pub fn new(detector: DetectorSlot) -> Self {
        Self {
            detector,
            kernel: gaussian::gaussian_kernel_1d(FACE_BLUR_KERNEL, Some(FACE_BLUR_SIGMA)),
            roi: Vec::new(),
            temp: Vec::new(),
            warned_status: None,
        }
    }

    pub fn apply(&mut self, frame: &Frame) -> Result<Frame, FilterError> {
        let detections = match self.detector.with_ready(|d| d.detect(frame)) {
            Ok(result) => result.map_err(FilterError::detection)?,
            Err(status) => {
                self.warn_not_ready(status);
                return Ok(frame.clone());
            }
        };

        let fw = frame.width();
        let fh = frame.height();
        let mut output = frame.clone();
        for region in detections.iter().filter_map(|d| d.to_region(fw, fh)) {
            let rect = RoiRect {
                x: region.x as usize,
                y: region.y as usize,
                w: region.width as usize,
                h: region.height as usize,
            };
            let window = rect.expanded(FACE_BLUR_KERNEL / 2, fw as usize, fh as usize);
            window.extract(output.data(), fw as usize, CHANNELS, &mut self.roi);
            gaussian::separable_gaussian_blur(
                &mut self.roi,
                window.w,
                window.h,
                CHANNELS,
                &self.kernel,
                &mut self.temp,
            );
            rect.write_back_from(&window, &self.roi, output.data_mut(), fw as usize, CHANNELS);
        }
        log::debug!("Frame {}: blurred {} face(s)", frame.index(), detections.len());
        Ok(output)
    }

    /// Warns on the first pass-through frame of each detector state.
    fn warn_not_ready(&mut self, status: DetectorStatus) {
        if self.warned_status == Some(status) {
            return;
        }
        self.warned_status = Some(status);
        match status {
            DetectorStatus::Failed => log::warn!(
                "Face detector failed to load ({}), passing frames through",
                self.detector.failure().unwrap_or_default()
            ),
            other => log::warn!("Face detector {other}, passing frames through"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::detection::Detection;
    use crate::detection::domain::detection_network::DetectionNetwork;
    use crate::detection::domain::face_detector::FaceDetector;
    use crate::detection::infrastructure::model_descriptor::NetworkDescriptor;
    use crate::detection::infrastructure::ssd_face_detector::SsdFaceDetector;
    use crate::shared::region::Region;
    use ndarray::Array4;

    struct FixedDetector(Vec<Detection>);

    impl FaceDetector for FixedDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenDetector;

    impl FaceDetector for BrokenDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Err("model exploded".into())
        }
    }

    struct CannedNetwork(Vec<f32>);

    impl DetectionNetwork for CannedNetwork {
        fn forward(&mut self, _blob: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
            Ok(self.0.clone())
        }
    }

    fn det(confidence: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
        Detection {
            confidence,
            x1,
            y1,
            x2,
            y2,
        }
    }

    /// 40x40 checkerboard of 8-pixel squares, so any blur changes pixels.
    fn checkerboard() -> Frame {
        let mut frame = Frame::blank(40, 40, 3);
        for (i, px) in frame.data_mut().chunks_exact_mut(4).enumerate() {
            let (x, y) = (i % 40, i / 40);
            let v = if (x / 8 + y / 8) % 2 == 0 { 30 } else { 220 };
            px[0] = v;
            px[1] = v;
            px[2] = v;
        }
        frame
    }

    fn region_pixels(frame: &Frame, r: Region) -> Vec<[u8; 4]> {
        let mut out = Vec::new();
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                out.push(frame.pixel(x as u32, y as u32));
            }
        }
        out
    }

    fn assert_unchanged_outside(before: &Frame, after: &Frame, blurred: &[Region]) {
        for y in 0..before.height() {
            for x in 0..before.width() {
                if blurred.iter().any(|r| r.contains(x as i32, y as i32)) {
                    continue;
                }
                assert_eq!(before.pixel(x, y), after.pixel(x, y), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_unloaded_detector_passes_through() {
        let mut filter = FaceBlurFilter::new(DetectorSlot::new());
        let frame = checkerboard();
        assert_eq!(filter.apply(&frame).unwrap(), frame);
        assert_eq!(filter.warned_status, Some(DetectorStatus::Unloaded));
    }

    #[test]
    fn test_loading_and_failed_detector_pass_through() {
        let slot = DetectorSlot::new();
        let mut filter = FaceBlurFilter::new(slot.clone());
        let frame = checkerboard();

        slot.begin_loading();
        assert_eq!(filter.apply(&frame).unwrap(), frame);
        assert_eq!(filter.warned_status, Some(DetectorStatus::Loading));

        slot.publish(Err("no weights".into()));
        assert_eq!(filter.apply(&frame).unwrap(), frame);
        assert_eq!(filter.warned_status, Some(DetectorStatus::Failed));
    }

    #[test]
    fn test_blurs_only_detected_region() {
        let slot = DetectorSlot::ready(Box::new(FixedDetector(vec![det(0.9, 0.1, 0.1, 0.5, 0.5)])));
        let mut filter = FaceBlurFilter::new(slot);
        let frame = checkerboard();
        let out = filter.apply(&frame).unwrap();

        let face = Region::new(4, 4, 16, 16);
        assert_ne!(region_pixels(&out, face), region_pixels(&frame, face));
        assert_unchanged_outside(&frame, &out, &[face]);
        assert_eq!((out.width(), out.height(), out.index()), (40, 40, 3));
    }

    #[test]
    fn test_low_confidence_box_left_untouched() {
        let output = vec![
            0.0, 1.0, 0.9, 0.1, 0.1, 0.4, 0.4, //
            0.0, 1.0, 0.3, 0.6, 0.6, 0.9, 0.9,
        ];
        let detector = SsdFaceDetector::new(
            Box::new(CannedNetwork(output)),
            NetworkDescriptor::default(),
        );
        let mut filter = FaceBlurFilter::new(DetectorSlot::ready(Box::new(detector)));
        let frame = checkerboard();
        let out = filter.apply(&frame).unwrap();

        let confident = Region::new(4, 4, 12, 12);
        let doubtful = Region::new(24, 24, 12, 12);
        assert_ne!(region_pixels(&out, confident), region_pixels(&frame, confident));
        assert_eq!(region_pixels(&out, doubtful), region_pixels(&frame, doubtful));
        assert_unchanged_outside(&frame, &out, &[confident]);
    }

    #[test]
    fn test_overlapping_boxes_blur_in_order() {
        let a = det(0.9, 0.0, 0.0, 0.5, 0.5);
        let b = det(0.8, 0.3, 0.3, 0.8, 0.8);
        let frame = checkerboard();

        let mut both = FaceBlurFilter::new(DetectorSlot::ready(Box::new(FixedDetector(vec![a, b]))));
        let mut first = FaceBlurFilter::new(DetectorSlot::ready(Box::new(FixedDetector(vec![a]))));
        let mut second = FaceBlurFilter::new(DetectorSlot::ready(Box::new(FixedDetector(vec![b]))));

        let combined = both.apply(&frame).unwrap();
        let sequential = second.apply(&first.apply(&frame).unwrap()).unwrap();
        assert_eq!(combined, sequential);
        assert_unchanged_outside(
            &frame,
            &combined,
            &[Region::new(0, 0, 20, 20), Region::new(12, 12, 20, 20)],
        );
    }

    #[test]
    fn test_box_past_frame_edge_is_clamped() {
        let slot = DetectorSlot::ready(Box::new(FixedDetector(vec![det(0.9, 0.8, -0.2, 1.4, 0.3)])));
        let mut filter = FaceBlurFilter::new(slot);
        let frame = checkerboard();
        let out = filter.apply(&frame).unwrap();
        assert_unchanged_outside(&frame, &out, &[Region::new(32, 0, 8, 12)]);
        assert_ne!(out, frame);
    }

    #[test]
    fn test_uniform_box_darkens_toward_dark_surround() {
        let mut frame = Frame::blank(100, 100, 0);
        for (i, px) in frame.data_mut().chunks_exact_mut(4).enumerate() {
            let (x, y) = (i % 100, i / 100);
            if (40..60).contains(&x) && (40..60).contains(&y) {
                px[..3].copy_from_slice(&[200, 200, 200]);
            }
        }
        let slot = DetectorSlot::ready(Box::new(FixedDetector(vec![det(0.9, 0.4, 0.4, 0.6, 0.6)])));
        let mut filter = FaceBlurFilter::new(slot);
        let out = filter.apply(&frame).unwrap();

        let corner = out.pixel(40, 40);
        let centre = out.pixel(50, 50);
        assert!(corner[0] < 200, "corner {corner:?}");
        assert!(centre[0] < 200, "centre {centre:?}");
        assert!(corner[0] < centre[0]);
        assert_eq!(corner[3], 255);
        assert_unchanged_outside(&frame, &out, &[Region::new(40, 40, 20, 20)]);
    }

    #[test]
    fn test_no_faces_returns_equal_copy() {
        let slot = DetectorSlot::ready(Box::new(FixedDetector(Vec::new())));
        let mut filter = FaceBlurFilter::new(slot);
        let frame = checkerboard();
        assert_eq!(filter.apply(&frame).unwrap(), frame);
    }

    #[test]
    fn test_detector_error_is_reported() {
        let mut filter = FaceBlurFilter::new(DetectorSlot::ready(Box::new(BrokenDetector)));
        let err = filter.apply(&checkerboard()).unwrap_err();
        assert!(matches!(err, FilterError::Detection(ref msg) if msg.contains("model exploded")));
    }

    #[test]
    fn test_malformed_network_output_is_reported() {
        let detector = SsdFaceDetector::new(
            Box::new(CannedNetwork(vec![0.0; 8])),
            NetworkDescriptor::default(),
        );
        let mut filter = FaceBlurFilter::new(DetectorSlot::ready(Box::new(detector)));
        assert!(matches!(
            filter.apply(&checkerboard()),
            Err(FilterError::Detection(_))
        ));
    }
}
