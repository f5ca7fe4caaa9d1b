use crate::core::{CountrySink, CountrySource, CountryStore};
use crate::domain::model::{Country, PostId};
use crate::utils::error::RelayError;
use std::sync::Arc;

/// Sequences fetch, forward and persist for the country endpoints.
#[derive(Clone)]
pub struct CountryRelay {
    source: Arc<dyn CountrySource>,
    sink: Arc<dyn CountrySink>,
    store: Arc<dyn CountryStore>,
}

impl CountryRelay {
    pub fn new(
        source: Arc<dyn CountrySource>,
        sink: Arc<dyn CountrySink>,
        store: Arc<dyn CountryStore>,
    ) -> Self {
        Self {
            source,
            sink,
            store,
        }
    }

    pub async fn fetch_and_relay(&self) -> Result<Vec<Country>, RelayError> {
        let countries = self.source.fetch().await.map_err(|e| {
            tracing::error!("Error fetching countries: {}", e);
            RelayError::Fetch(e)
        })?;

        let Some(selected) = countries.first() else {
            tracing::info!("GraphQL returned no countries");
            return Err(RelayError::NotFound);
        };

        tracing::debug!(
            "Fetched {} countries, forwarding '{}'",
            countries.len(),
            selected.name
        );

        match self.sink.forward(selected).await {
            Ok(Some(id)) => tracing::info!(post_id = id, country = %selected.name, "Country forwarded"),
            Ok(None) => return Err(RelayError::MissingPostId),
            Err(e) => return Err(RelayError::Forward(e)),
        }

        // CSV 寫入失敗不影響回應
        match self.store.persist(&countries).await {
            Ok(location) => tracing::info!("Countries saved to CSV: {}", location),
            Err(e) => tracing::warn!("Error saving countries to CSV: {}", e),
        }

        Ok(countries)
    }

    pub async fn post_single(&self, country: &Country) -> Result<Option<PostId>, RelayError> {
        let id = self.sink.forward(country).await.map_err(|e| {
            tracing::warn!(country = %country.name, "Failed to post country details: {}", e);
            RelayError::Forward(e)
        })?;

        if id.is_none() {
            tracing::debug!(country = %country.name, "REST sink accepted post without an id");
        }

        Ok(id)
    }
}
