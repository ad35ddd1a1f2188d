use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::face_detector::FaceDetector;

/// Lifecycle of the shared face detector.
///
/// Moves `Unloaded → Loading → Ready | Failed` exactly once; nothing resets
/// it afterwards.
pub enum DetectorState {
    Unloaded,
    Loading,
    Ready(Box<dyn FaceDetector>),
    Failed(String),
}

/// Payload-free view of [`DetectorState`] for logging and branching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorStatus {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for DetectorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DetectorStatus::Unloaded => "unloaded",
            DetectorStatus::Loading => "loading",
            DetectorStatus::Ready => "ready",
            DetectorStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl DetectorState {
    pub fn status(&self) -> DetectorStatus {
        match self {
            DetectorState::Unloaded => DetectorStatus::Unloaded,
            DetectorState::Loading => DetectorStatus::Loading,
            DetectorState::Ready(_) => DetectorStatus::Ready,
            DetectorState::Failed(_) => DetectorStatus::Failed,
        }
    }
}

/// Handle to the detector shared between the loader thread and the face
/// blur filter. Cloning shares the same slot.
#[derive(Clone)]
pub struct DetectorSlot {
    state: Arc<Mutex<DetectorState>>,
}

impl Default for DetectorSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorSlot {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DetectorState::Unloaded)),
        }
    }

    /// Slot that starts out with a loaded detector.
    pub fn ready(detector: Box<dyn FaceDetector>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DetectorState::Ready(detector))),
        }
    }

    // A panic while holding the lock leaves the state itself intact.
    fn lock(&self) -> MutexGuard<'_, DetectorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> DetectorStatus {
        self.lock().status()
    }

    /// Claims the slot for a load. Only succeeds from `Unloaded`, so at
    /// most one load is ever started.
    pub fn begin_loading(&self) -> bool {
        let mut state = self.lock();
        if matches!(*state, DetectorState::Unloaded) {
            *state = DetectorState::Loading;
            true
        } else {
            false
        }
    }

    /// Publishes the outcome of a load started with [`begin_loading`].
    ///
    /// Ignored unless the slot is `Loading`, so a published detector is
    /// never replaced.
    ///
    /// [`begin_loading`]: DetectorSlot::begin_loading
    pub fn publish(&self, result: Result<Box<dyn FaceDetector>, String>) {
        let mut state = self.lock();
        if !matches!(*state, DetectorState::Loading) {
            log::warn!(
                "Ignoring detector load result, slot is {}",
                state.status()
            );
            return;
        }
        *state = match result {
            Ok(detector) => DetectorState::Ready(detector),
            Err(reason) => DetectorState::Failed(reason),
        };
    }

    /// Failure message, if loading failed.
    pub fn failure(&self) -> Option<String> {
        match &*self.lock() {
            DetectorState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Runs `f` with the detector if it is ready; otherwise reports the
    /// current status.
    pub fn with_ready<R>(
        &self,
        f: impl FnOnce(&mut dyn FaceDetector) -> R,
    ) -> Result<R, DetectorStatus> {
        let mut state = self.lock();
        match &mut *state {
            DetectorState::Ready(detector) => Ok(f(detector.as_mut())),
            other => Err(other.status()),
        }
    }
}
