use crate::domain::{Site, Storage};
use crate::utils::error::{Result, SiteError};

/// Reads a fixture document stored as JSON.
pub async fn load_site<S: Storage>(storage: &S, path: &str) -> Result<Site> {
    let bytes = storage.read_file(path).await?;
    serde_json::from_slice(&bytes).map_err(|e| SiteError::ModelError {
        message: format!("{}: {}", path, e),
    })
}
