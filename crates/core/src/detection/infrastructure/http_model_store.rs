use crate::detection::domain::model_store::{ModelStore, ModelStoreError};

/// Model store that downloads files relative to a base URL.
pub struct HttpModelStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpModelStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        url_for(&self.base_url, path)
    }

    fn get(&self, path: &str) -> Result<reqwest::blocking::Response, ModelStoreError> {
        let url = self.url_for(path);
        log::info!("Downloading {url}");
        self.client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| ModelStoreError::Download { url, source })
    }
}

impl ModelStore for HttpModelStore {
    fn fetch_text(&self, path: &str) -> Result<String, ModelStoreError> {
        self.get(path)?
            .text()
            .map_err(|source| ModelStoreError::Download {
                url: self.url_for(path),
                source,
            })
    }

    fn fetch_binary(&self, path: &str) -> Result<Vec<u8>, ModelStoreError> {
        self.get(path)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|source| ModelStoreError::Download {
                url: self.url_for(path),
                source,
            })
    }
}

/// Joins `base` and `path` with exactly one slash between them.
fn url_for(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
