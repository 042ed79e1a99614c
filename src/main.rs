mod api;
mod config;
mod engine;
mod error;
mod geo;
mod integrations;
mod models;
mod observability;
mod state;
#[cfg(test)]
mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::integrations::geocoder::HttpGeocoder;
use crate::integrations::notifier::HttpNotifier;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    // One timeout-bound client for both collaborators; a slow provider can
    // stall a request for at most this long.
    let http_client = reqwest::Client::builder()
        .user_agent(concat!("delivery-dispatch/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_millis(config.upstream_timeout_ms))
        .build()
        .map_err(|err| error::AppError::Internal(format!("failed to build http client: {err}")))?;

    let geocoder = Arc::new(HttpGeocoder::new(
        http_client.clone(),
        config.geocoder_base_url.clone(),
    ));
    let notifier = Arc::new(HttpNotifier::new(
        http_client,
        config.sms_gateway_url.clone(),
        config.email_gateway_url.clone(),
    ));

    let shared_state = Arc::new(state::AppState::new(
        geocoder,
        notifier,
        config.event_buffer_size,
    ));

    let app = api::rest::router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| error::AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| error::AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
