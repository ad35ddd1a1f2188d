use ndarray::Array4;

/// A loaded neural network that maps a `1×3×H×W` input blob to a flat
/// output tensor of 7-value detection records.
pub trait DetectionNetwork: Send {
    fn forward(&mut self, blob: Array4<f32>) -> Result<Vec<f32>, Box<dyn std::error::Error>>;
}
