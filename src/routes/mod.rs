/// Application routes configuration
use crate::config::AppConfig;
use crate::handlers::{
    get_apod, get_epic_images, get_mars_photos, get_neo, health, not_found, search_library,
    AppState,
};
use crate::rate_limit::RateLimitLayer;
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Build the application router with all routes
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let nasa = Router::new()
        .route("/apod", get(get_apod))
        .route("/mars/:rover/photos", get(get_mars_photos))
        .route("/neo", get(get_neo))
        .route("/epic/images", get(get_epic_images))
        .route("/search", get(search_library));

    let api = Router::new()
        .route("/health", get(health))
        .nest("/nasa", nasa);

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        .layer(cors_layer(&config.allowed_origins))
        .layer(RateLimitLayer::new(
            config.rate_limit.max_requests,
            config.rate_limit.window,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_credentials(true)
}
