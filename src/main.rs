//! Przelewy24 webhook server.
//!
//! Loads configuration from the environment, wires the gateway client into the
//! notification handler and serves the webhook and health routes.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use przelewy24::adapters::events::LoggingEventPublisher;
use przelewy24::adapters::http::{app_router, WebhookAppState};
use przelewy24::adapters::przelewy24::{
    Przelewy24ApiClient, Przelewy24Client, Przelewy24ClientConfig,
};
use przelewy24::application::HandleTransactionNotificationHandler;
use przelewy24::config::{AppConfig, LogFormat, ServerConfig};
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config.server);

    let gateway_config = &config.gateway;
    let defaults = gateway_config.payload_defaults();

    let client_config = Przelewy24ClientConfig::new(
        gateway_config.mode,
        gateway_config.crc.expose_secret().clone(),
        defaults.clone(),
    )
    .with_timeout(gateway_config.timeout());
    let gateway = Arc::new(Przelewy24Client::new(client_config)?);

    if let Some(api_config) = gateway_config.api_config() {
        let api_client = Przelewy24ApiClient::new(api_config)?;
        tracing::info!(endpoint = api_client.endpoint_url(), "REST API credentials configured");
    }

    let handler = HandleTransactionNotificationHandler::new(
        gateway,
        Arc::new(LoggingEventPublisher::new()),
        defaults,
    )
    .with_verification(gateway_config.verify_transactions);

    let state = WebhookAppState::new(Arc::new(handler))
        .with_trusted_forwarded_headers(config.server.trust_forwarded_headers);
    let app = app_router(state, gateway_config.routes_enabled());

    let addr = config.server.socket_addr()?;
    tracing::info!(
        addr = %addr,
        mode = %gateway_config.mode,
        webhook = gateway_config.routes_enabled(),
        "Starting Przelewy24 webhook server"
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
