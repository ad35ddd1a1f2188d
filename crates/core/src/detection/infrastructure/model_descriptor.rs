use serde::{Deserialize, Serialize};

/// Preprocessing and post-processing parameters shipped next to the
/// network weights as JSON.
///
/// Every field is optional in the file; an empty file yields the defaults
/// of the ResNet-10 SSD face model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDescriptor {
    /// Side length of the square network input.
    pub input_size: u32,
    /// Per-channel mean subtracted from the input, in B, G, R order.
    pub mean: [f32; 3],
    /// Detections at or below this confidence are dropped.
    pub confidence_threshold: f32,
}

impl Default for NetworkDescriptor {
    fn default() -> Self {
        Self {
            input_size: 300,
            mean: [104.0, 177.0, 123.0],
            confidence_threshold: 0.5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("invalid descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input_size must be positive")]
    ZeroInputSize,
}

impl NetworkDescriptor {
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let descriptor: Self = serde_json::from_str(text)?;
        if descriptor.input_size == 0 {
            return Err(DescriptorError::ZeroInputSize);
        }
        Ok(descriptor)
    }
}
