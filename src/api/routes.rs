//! Country endpoint handlers.

use crate::api::error_response::ApiError;
use crate::api::AppState;
use crate::core::{Country, PostId};
use crate::utils::error::RelayError;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Inbound body of `postcountry`. Unlike GraphQL records, `name` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct PostCountryRequest {
    pub name: String,
    #[serde(default)]
    pub capital: String,
    #[serde(default)]
    pub currency: String,
}

impl PostCountryRequest {
    fn into_country(self) -> Result<Country, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::new("invalid_country", "Country name is required"));
        }
        Ok(Country::new(self.name, self.capital, self.currency))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCountryResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
}

/// GET /api/country/fetchcountries
///
/// 200 with the full list, 404 when GraphQL returns nothing, 500 otherwise.
pub async fn fetch_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<Country>>, RelayError> {
    let countries = state.relay.fetch_and_relay().await?;
    Ok(Json(countries))
}

/// POST /api/country/postcountry
pub async fn post_country(
    State(state): State<AppState>,
    payload: Result<Json<PostCountryRequest>, JsonRejection>,
) -> Response {
    let parsed = payload
        .map_err(|rejection| ApiError::new("invalid_country", rejection.body_text()))
        .and_then(|Json(request)| request.into_country());

    let country = match parsed {
        Ok(country) => country,
        Err(error) => {
            tracing::debug!("Rejected country body: {}", error.message);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state.relay.post_single(&country).await {
        Ok(id) => Json(PostCountryResponse {
            message: "Country posted successfully.".to_string(),
            id,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}
