use std::thread::{self, JoinHandle};

use thiserror::Error;

use crate::detection::domain::detector_slot::DetectorSlot;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::model_store::{ModelStore, ModelStoreError};
use crate::shared::constants::{DESCRIPTOR_FILE_NAME, WEIGHTS_FILE_NAME};

use super::model_descriptor::{DescriptorError, NetworkDescriptor};
use super::onnx_ssd_network::OnnxSsdNetwork;
use super::ssd_face_detector::SsdFaceDetector;

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("failed to fetch model: {0}")]
    Fetch(#[from] ModelStoreError),
    #[error("bad network descriptor: {0}")]
    Descriptor(#[from] DescriptorError),
    #[error("failed to build network session: {0}")]
    Session(String),
}

/// Store-relative locations of the descriptor and weight files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelPaths {
    pub descriptor: String,
    pub weights: String,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            descriptor: DESCRIPTOR_FILE_NAME.to_string(),
            weights: WEIGHTS_FILE_NAME.to_string(),
        }
    }
}

/// Fetches both model files (descriptor first, then weights) and builds
/// an ONNX-backed SSD face detector from them.
pub fn load_detector(
    store: &dyn ModelStore,
    paths: &ModelPaths,
) -> Result<Box<dyn FaceDetector>, ModelLoadError> {
    let (descriptor, weights) = fetch_model(store, paths)?;
    let network =
        OnnxSsdNetwork::from_bytes(&weights).map_err(|e| ModelLoadError::Session(e.to_string()))?;
    Ok(Box::new(SsdFaceDetector::new(Box::new(network), descriptor)))
}

/// Fetches and parses the descriptor, then fetches the weights.
pub fn fetch_model(
    store: &dyn ModelStore,
    paths: &ModelPaths,
) -> Result<(NetworkDescriptor, Vec<u8>), ModelLoadError> {
    let text = store.fetch_text(&paths.descriptor)?;
    let weights = store.fetch_binary(&paths.weights)?;
    let descriptor = NetworkDescriptor::parse(&text)?;
    log::debug!(
        "Fetched descriptor {:?} and {} bytes of weights",
        descriptor,
        weights.len()
    );
    Ok((descriptor, weights))
}

/// Starts the one-shot background load into `slot`.
///
/// Returns `None` without spawning when the slot has already left
/// `Unloaded`. The frame loop never waits on the returned handle.
pub fn spawn_loader<F>(slot: &DetectorSlot, build: F) -> Option<JoinHandle<()>>
where
    F: FnOnce() -> Result<Box<dyn FaceDetector>, ModelLoadError> + Send + 'static,
{
    if !slot.begin_loading() {
        log::debug!("Detector load already started ({})", slot.status());
        return None;
    }
    log::info!("Loading face detector in the background");
    let worker_slot = slot.clone();
    let spawned = thread::Builder::new()
        .name("model-loader".into())
        .spawn(move || {
            let result = build().map_err(|e| e.to_string());
            match &result {
                Ok(_) => log::info!("Face detector ready"),
                Err(reason) => log::error!("Face detector unavailable: {reason}"),
            }
            worker_slot.publish(result);
        });
    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("Failed to start model loader thread: {e}");
            slot.publish(Err(e.to_string()));
            None
        }
    }
}
