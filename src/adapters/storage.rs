use crate::domain::Storage;
use crate::utils::error::{Result, SiteError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Files under a base directory. Parent directories are created on write.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SiteError::WriteError {
                    path: full_path.display().to_string(),
                    message: format!("cannot create {}: {}", parent.display(), e),
                })?;
        }

        fs::write(&full_path, data)
            .await
            .map_err(|e| SiteError::WriteError {
                path: full_path.display().to_string(),
                message: e.to_string(),
            })
    }
}

/// In-memory storage used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }

    /// Stored paths, sorted.
    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.lock().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl Storage for MemoryStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            SiteError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        storage
            .write_file("site/germany/bundesliga/index.json", b"{}")
            .await
            .unwrap();

        let full = temp_dir.path().join("site/germany/bundesliga/index.json");
        assert!(full.exists());
        assert_eq!(
            storage
                .read_file("site/germany/bundesliga/index.json")
                .await
                .unwrap(),
            b"{}"
        );
    }

    #[tokio::test]
    async fn test_local_storage_parent_that_is_a_file_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("site"), b"not a directory").unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let err = storage
            .write_file("site/germany/index.json", b"{}")
            .await
            .unwrap_err();

        match err {
            SiteError::WriteError { path, .. } => {
                assert!(path.ends_with("site/germany/index.json"), "{}", path)
            }
            other => panic!("expected WriteError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_local_storage_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let err = storage.read_file("nope.json").await.unwrap_err();
        assert!(matches!(err, SiteError::IoError(_)));
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        tokio_test::block_on(async {
            storage.write_file("b.json", b"2").await.unwrap();
            storage.write_file("a.json", b"1").await.unwrap();

            assert_eq!(storage.read_file("a.json").await.unwrap(), b"1");
            assert_eq!(storage.paths().await, vec!["a.json", "b.json"]);
            assert!(storage.read_file("c.json").await.is_err());
        });
    }
}
