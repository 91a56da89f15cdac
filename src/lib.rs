//! Backend proxy for the NASA explorer dashboard, plus the typed client
//! and view models the dashboard builds on.
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod hooks;
pub mod rate_limit;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use crate::clients::NasaClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::services::NasaService;

/// Wire the upstream client, shaping service and router from a configuration
pub fn build_app(config: &AppConfig) -> anyhow::Result<axum::Router> {
    let nasa_client = NasaClient::new(config)?;
    let nasa_service = NasaService::new(nasa_client);
    let state = AppState::new(nasa_service, &config.environment);
    Ok(routes::build_router(state, config))
}
