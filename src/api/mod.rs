//! HTTP surface: the two country endpoints.

use crate::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod error_response;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Create the API router
///
/// - `GET /api/country/fetchcountries` - fetch, forward the first country, save CSV
/// - `POST /api/country/postcountry` - forward one country from the request body
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/country/fetchcountries", get(routes::fetch_countries))
        .route("/api/country/postcountry", post(routes::post_country))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on `bind_address` until Ctrl+C / SIGTERM.
pub async fn start_api_server(state: AppState, bind_address: &str) -> Result<()> {
    let app = create_router(state);

    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!(address = %bind_address, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
