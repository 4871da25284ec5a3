use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::{
    client::DownloaderClient,
    config::{AppConfig, CorsConfig},
    error::ApiError,
    routes,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: DownloaderClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let client = DownloaderClient::new(&config)
            .map_err(|error| ApiError::internal(format!("Could not build HTTP client: {error}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub fn build_router(state: AppState) -> Result<Router, ApiError> {
    if state.config.allowed_origins.is_empty() {
        warn!("ALLOWED_ORIGINS is not set; allowing local development origins only");
    }
    let cors = cors_layer(CorsConfig::from_origins(&state.config.allowed_origins)?);

    Ok(Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/platforms", get(routes::list_platforms))
        .route("/api/lookup/{platform}", post(routes::lookup))
        .route("/api/youtube/proxy", get(routes::youtube_proxy))
        .route("/", get(routes::landing_page).post(routes::submit_landing))
        .route(
            "/{platform}",
            get(routes::platform_page).post(routes::submit_page),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run(config: AppConfig) -> Result<(), ApiError> {
    let addr = config.bind_addr.clone();
    info!(
        "Downloader APIs: {} (social), {} (YouTube)",
        config.downloader_api_base, config.youtube_api_base
    );

    let app = build_router(AppState::new(config)?)?;
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|error| ApiError::internal(format!("Could not bind {addr}: {error}")))?;

    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|error| ApiError::internal(format!("HTTP server error: {error}")))
}

fn cors_layer(config: CorsConfig) -> CorsLayer {
    info!(
        "CORS allow-list: {}",
        config.origins().collect::<Vec<_>>().join(", ")
    );

    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let allowed = origin.to_str().is_ok_and(|value| config.allows(value));
        debug!("CORS origin {:?} allowed={}", origin, allowed);
        allowed
    });

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
