// Application wiring: build the concrete adapters from configuration.

use crate::adapters::{CsvCountryStore, GraphQlCountrySource, RestCountrySink};
use crate::config::cli::LocalStorage;
use crate::core::relay::CountryRelay;
use crate::core::retry::RetryPolicy;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use reqwest::Client;
use std::sync::Arc;

/// One pooled client shared by both upstream adapters.
pub fn build_http_client(config: &dyn ConfigProvider) -> Result<Client> {
    let client = Client::builder().timeout(config.request_timeout()).build()?;
    Ok(client)
}

pub fn build_relay(config: &dyn ConfigProvider, client: Client) -> CountryRelay {
    let policy = RetryPolicy::new(config.max_attempts(), config.backoff_base());

    let source = GraphQlCountrySource::new(client.clone(), config.graphql_endpoint());
    let sink = RestCountrySink::new(client, config.sink_base_url(), policy);
    let store = CsvCountryStore::new(
        LocalStorage::new(config.output_path().to_string()),
        config.csv_file(),
    );

    tracing::debug!(
        graphql = config.graphql_endpoint(),
        sink = sink.posts_url(),
        max_attempts = policy.max_attempts,
        "Relay wired"
    );

    CountryRelay::new(Arc::new(source), Arc::new(sink), Arc::new(store))
}
