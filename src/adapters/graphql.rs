use crate::core::{Country, CountrySource};
use crate::domain::model::{GraphQlRequest, GraphQlResponse, COUNTRIES_QUERY};
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the country list with a single fixed GraphQL query.
#[derive(Debug, Clone)]
pub struct GraphQlCountrySource {
    client: Client,
    endpoint: String,
}

impl GraphQlCountrySource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CountrySource for GraphQlCountrySource {
    async fn fetch(&self) -> Result<Vec<Country>, FetchError> {
        tracing::debug!("Making GraphQL request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest {
                query: COUNTRIES_QUERY,
            })
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        tracing::debug!("GraphQL response status: {}", status);

        if !status.is_success() {
            tracing::warn!("Error fetching countries: {}", status);
            return Err(FetchError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(FetchError::Transport)?;
        let parsed: GraphQlResponse = serde_json::from_str(&body)?;

        if let Some(errors) = parsed.errors.as_ref().filter(|e| !e.is_empty()) {
            tracing::warn!("GraphQL response carried {} error(s): {:?}", errors.len(), errors);
        }

        Ok(parsed.into_countries())
    }
}
