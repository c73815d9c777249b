use super::PageDescription;
use crate::domain::Storage;
use serde::Serialize;

/// Outcome of persisting a batch of pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WriteReport {
    /// Storage paths written, in page order.
    pub written: Vec<String>,
    /// One `"<path>: <error>"` entry per page that could not be written.
    pub failures: Vec<String>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Writes each page's data model as pretty JSON under `prefix`.
///
/// A failing page does not stop the remaining ones; every failure lands in
/// the report.
pub async fn write_pages<S: Storage>(
    storage: &S,
    prefix: &str,
    pages: &[PageDescription],
) -> WriteReport {
    let mut report = WriteReport::default();
    let prefix = prefix.trim_matches('/');

    for page in pages {
        let path = if prefix.is_empty() {
            page.output_file()
        } else {
            format!("{}/{}", prefix, page.output_file())
        };

        let bytes = match serde_json::to_vec_pretty(&page.data) {
            Ok(bytes) => bytes,
            Err(e) => {
                report.failures.push(format!("{}: {}", path, e));
                continue;
            }
        };

        match storage.write_file(&path, &bytes).await {
            Ok(()) => {
                tracing::debug!("Wrote {} ({} bytes)", path, bytes.len());
                report.written.push(path);
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {}", path, e);
                report.failures.push(format!("{}: {}", path, e));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::domain::{Country, League, Match, Site};
    use crate::site::compile;
    use crate::utils::error::{Result, SiteError};

    fn site() -> Site {
        Site::with_navigation_from_countries(
            "GermanyResults",
            vec![Country::new(
                "Germany",
                vec![League::new(
                    "Bundesliga",
                    "2025-2026",
                    vec![Match::new(
                        "2026-02-15",
                        "15:30",
                        "Bayern München",
                        "Munich",
                        "Borussia Dortmund",
                        "Dortmund",
                        2,
                        1,
                        "Allianz Arena",
                    )],
                )],
            )],
        )
    }

    /// Rejects writes to any path containing `fail_on`.
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_on: &'static str,
    }

    impl Storage for FlakyStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.inner.read_file(path).await
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if path.contains(self.fail_on) {
                return Err(SiteError::WriteError {
                    path: path.to_string(),
                    message: "disk full".to_string(),
                });
            }
            self.inner.write_file(path, data).await
        }
    }

    #[tokio::test]
    async fn test_write_pages_under_prefix() {
        let storage = MemoryStorage::new();
        let pages = compile(&site());

        let report = write_pages(&storage, "site/", &pages).await;

        assert!(report.is_success());
        assert_eq!(
            report.written,
            vec![
                "site/index.json",
                "site/germany/index.json",
                "site/germany/bundesliga/index.json"
            ]
        );
        let index: serde_json::Value =
            serde_json::from_slice(&storage.get_file("site/index.json").await.unwrap()).unwrap();
        assert_eq!(index["siteName"], "GermanyResults");
    }

    #[tokio::test]
    async fn test_write_pages_without_prefix() {
        let storage = MemoryStorage::new();
        let report = write_pages(&storage, "", &compile(&site())).await;
        assert_eq!(report.written[0], "index.json");
    }

    #[tokio::test]
    async fn test_failed_page_does_not_stop_the_rest() {
        let storage = FlakyStorage {
            inner: MemoryStorage::new(),
            fail_on: "germany/index.json",
        };

        let report = write_pages(&storage, "site", &compile(&site())).await;

        assert!(!report.is_success());
        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with("site/germany/index.json: "));
        assert!(storage
            .inner
            .get_file("site/germany/bundesliga/index.json")
            .await
            .is_some());
    }
}
