use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelStoreError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Where model files come from.
///
/// Paths are relative to the store (a directory, a base URL). Fetching
/// blocks; callers run it off the frame loop.
pub trait ModelStore: Send {
    fn fetch_text(&self, path: &str) -> Result<String, ModelStoreError>;
    fn fetch_binary(&self, path: &str) -> Result<Vec<u8>, ModelStoreError>;
}
