use crate::domain::model::{Country, PostId};
use crate::utils::error::{FetchError, ForwardError, PersistError};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = std::io::Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = std::io::Result<String>> + Send;
}

pub trait ConfigProvider: Validate + Send + Sync {
    fn graphql_endpoint(&self) -> &str;
    fn sink_base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn csv_file(&self) -> &str;
    fn bind_address(&self) -> &str;
    fn max_attempts(&self) -> u32;
    fn backoff_base(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
}

/// Source of the country list.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch(&self) -> std::result::Result<Vec<Country>, FetchError>;
}

/// Downstream service that receives one forwarded country.
#[async_trait]
pub trait CountrySink: Send + Sync {
    async fn forward(&self, country: &Country)
        -> std::result::Result<Option<PostId>, ForwardError>;
}

#[async_trait]
pub trait CountryStore: Send + Sync {
    /// Replaces any previous output. Returns the written location.
    async fn persist(&self, countries: &[Country]) -> std::result::Result<String, PersistError>;
}
