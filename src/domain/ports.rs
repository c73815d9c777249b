use crate::domain::fixture::{FixtureRequest, RawFixture};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Source of raw fixtures for one league and season.
///
/// Failures must come back as `Err`, never as a panic, so the refresh
/// pipeline can record them and move on to the next league.
#[async_trait]
pub trait FixtureClient: Send + Sync {
    async fn fetch_fixtures(&self, request: &FixtureRequest) -> Result<Vec<RawFixture>>;
}
