use crate::detection::domain::detection::{Detection, RECORD_LEN};
use crate::detection::domain::detection_network::DetectionNetwork;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;

use super::blob::blob_from_frame;
use super::model_descriptor::NetworkDescriptor;

/// Face detector for single-shot detectors with a `[1, 1, N, 7]` output:
/// builds the input blob, runs the network and keeps confident records.
pub struct SsdFaceDetector {
    network: Box<dyn DetectionNetwork>,
    descriptor: NetworkDescriptor,
}

impl SsdFaceDetector {
    pub fn new(network: Box<dyn DetectionNetwork>, descriptor: NetworkDescriptor) -> Self {
        Self {
            network,
            descriptor,
        }
    }
}

impl FaceDetector for SsdFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        if frame.is_empty() {
            return Ok(Vec::new());
        }
        let blob = blob_from_frame(frame, self.descriptor.input_size, self.descriptor.mean)?;
        let raw = self.network.forward(blob)?;
        let threshold = self.descriptor.confidence_threshold;
        let mut detections = Detection::parse_records(&raw)?;
        detections.retain(|d| d.confidence > threshold);
        log::debug!(
            "Frame {}: {} of {} detections above {threshold}",
            frame.index(),
            detections.len(),
            raw.len() / RECORD_LEN
        );
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    /// Network stub returning canned output and recording the input shape.
    struct CannedNetwork {
        output: Vec<f32>,
        seen_shape: std::sync::Arc<std::sync::Mutex<Vec<usize>>>,
    }

    impl DetectionNetwork for CannedNetwork {
        fn forward(&mut self, blob: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
            *self.seen_shape.lock().unwrap() = blob.shape().to_vec();
            Ok(self.output.clone())
        }
    }

    struct FailingNetwork;

    impl DetectionNetwork for FailingNetwork {
        fn forward(&mut self, _blob: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
            Err("inference failed".into())
        }
    }

    fn detector(output: Vec<f32>) -> (SsdFaceDetector, std::sync::Arc<std::sync::Mutex<Vec<usize>>>) {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let network = CannedNetwork {
            output,
            seen_shape: seen.clone(),
        };
        (
            SsdFaceDetector::new(Box::new(network), NetworkDescriptor::default()),
            seen,
        )
    }

    #[test]
    fn test_filters_by_confidence_keeping_order() {
        let output = vec![
            0.0, 1.0, 0.9, 0.1, 0.1, 0.3, 0.3, //
            0.0, 1.0, 0.3, 0.6, 0.6, 0.9, 0.9, //
            0.0, 1.0, 0.5, 0.4, 0.4, 0.5, 0.5, //
            0.0, 1.0, 0.51, 0.5, 0.1, 0.6, 0.2,
        ];
        let (mut det, seen) = detector(output);
        let found = det.detect(&Frame::blank(40, 30, 0)).unwrap();
        let confidences: Vec<f32> = found.iter().map(|d| d.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.51]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 3, 300, 300]);
    }

    #[test]
    fn test_malformed_output_is_an_error() {
        let (mut det, _) = detector(vec![0.0; 9]);
        assert!(det.detect(&Frame::blank(8, 8, 0)).is_err());
    }

    #[test]
    fn test_network_error_propagates() {
        let mut det = SsdFaceDetector::new(Box::new(FailingNetwork), NetworkDescriptor::default());
        let err = det.detect(&Frame::blank(8, 8, 0)).unwrap_err();
        assert!(err.to_string().contains("inference failed"));
    }

    #[test]
    fn test_empty_frame_skips_inference() {
        let mut det = SsdFaceDetector::new(Box::new(FailingNetwork), NetworkDescriptor::default());
        assert!(det.detect(&Frame::blank(0, 0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_descriptor_threshold_applies() {
        let descriptor = NetworkDescriptor {
            confidence_threshold: 0.2,
            input_size: 32,
            ..NetworkDescriptor::default()
        };
        let network = CannedNetwork {
            output: vec![0.0, 1.0, 0.3, 0.1, 0.1, 0.3, 0.3],
            seen_shape: Default::default(),
        };
        let mut det = SsdFaceDetector::new(Box::new(network), descriptor);
        assert_eq!(det.detect(&Frame::blank(8, 8, 0)).unwrap().len(), 1);
    }
}
