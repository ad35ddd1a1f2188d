use ndarray::Array4;

use crate::detection::domain::detection_network::DetectionNetwork;

/// SSD detection network running on ONNX Runtime via `ort`.
///
/// The session is built straight from the weight bytes, so models fetched
/// over HTTP never touch the disk.
pub struct OnnxSsdNetwork {
    session: ort::session::Session,
}

impl OnnxSsdNetwork {
    pub fn from_bytes(weights: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)?
            .with_execution_providers(preferred_execution_providers())?
            .commit_from_memory(weights)?;
        Ok(Self { session })
    }
}

impl DetectionNetwork for OnnxSsdNetwork {
    fn forward(&mut self, blob: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(blob)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("SSD model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        Ok(tensor.iter().copied().collect())
    }
}

/// Preferred execution providers for the current platform; ONNX Runtime
/// falls back to CPU when none of them is available.
fn preferred_execution_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_weights_are_rejected() {
        assert!(OnnxSsdNetwork::from_bytes(b"definitely not an onnx graph").is_err());
    }
}
