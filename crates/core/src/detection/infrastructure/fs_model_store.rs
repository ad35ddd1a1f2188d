use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::detection::domain::model_store::{ModelStore, ModelStoreError};
use crate::shared::constants::APP_DIR_NAME;

/// Model store backed by a local directory.
pub struct FsModelStore {
    root: PathBuf,
}

impl FsModelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the platform model cache directory.
    pub fn in_cache_dir() -> Result<Self, ModelStoreError> {
        model_cache_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl ModelStore for FsModelStore {
    fn fetch_text(&self, path: &str) -> Result<String, ModelStoreError> {
        let full = self.resolve(path);
        fs::read_to_string(&full).map_err(|e| read_error(full, e))
    }

    fn fetch_binary(&self, path: &str) -> Result<Vec<u8>, ModelStoreError> {
        let full = self.resolve(path);
        fs::read(&full).map_err(|e| read_error(full, e))
    }
}

fn read_error(path: PathBuf, source: std::io::Error) -> ModelStoreError {
    if source.kind() == ErrorKind::NotFound {
        ModelStoreError::NotFound(path)
    } else {
        ModelStoreError::Read { path, source }
    }
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/fxcam/models/`
/// - Linux: `$XDG_CACHE_HOME/fxcam/models/` or `~/.cache/fxcam/models/`
/// - Windows: `%LOCALAPPDATA%/fxcam/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelStoreError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME).join("models"))
            .ok_or(ModelStoreError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join(APP_DIR_NAME).join("models"))
            .ok_or(ModelStoreError::NoCacheDir)
    }
}
