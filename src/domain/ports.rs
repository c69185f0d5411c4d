use crate::domain::model::{BatchOutcome, Manager};
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

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn manager_store(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
}

/// Resolves a manager identifier against records known outside the current line.
///
/// Lookups are synchronous. An `Err` is treated by callers as "not found".
pub trait ManagerLookup {
    fn find_manager(&self, id: &str) -> Result<Option<Manager>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, lines: Vec<String>) -> Result<BatchOutcome>;
    async fn load(&self, outcome: &BatchOutcome) -> Result<String>;
}
