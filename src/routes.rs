use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::non_empty,
    error::ApiError,
    media::MediaResult,
    platform::Platform,
    providers::youtube::{self, Quality},
    render::{self, Outcome, PageView},
    server::AppState,
};

const DEFAULT_PROXY_QUALITY: &str = "720";

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub request_id: Uuid,
    pub platform: Platform,
    pub fetched_at: DateTime<Utc>,
    pub media: MediaResult,
}

#[derive(Debug, Serialize)]
pub struct PlatformSummary {
    slug: &'static str,
    name: &'static str,
    path: String,
}

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    url: Option<String>,
    quality: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    url: String,
    #[serde(default)]
    quality: Option<String>,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

pub async fn list_platforms() -> Json<Vec<PlatformSummary>> {
    Json(
        Platform::ALL
            .into_iter()
            .map(|platform| PlatformSummary {
                slug: platform.slug(),
                name: platform.display_name(),
                path: platform.page_path(),
            })
            .collect(),
    )
}

pub async fn lookup(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<LookupRequest>,
) -> Result<Json<LookupResponse>, ApiError> {
    let platform = Platform::from_slug(&slug).ok_or_else(|| ApiError::unknown_platform(&slug))?;
    let request_id = Uuid::new_v4();
    let media = resolve_media(
        &state,
        request_id,
        platform,
        &payload.url,
        payload.quality.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(Json(LookupResponse {
        request_id,
        platform,
        fetched_at: Utc::now(),
        media,
    }))
}

/// Validates the input, calls the platform's API and classifies any failure
/// into the message the user will see.
pub async fn resolve_media(
    state: &AppState,
    request_id: Uuid,
    platform: Platform,
    raw_url: &str,
    raw_quality: &str,
) -> Result<MediaResult, ApiError> {
    let url = platform.validate_input(raw_url)?;
    let (url, quality) = if platform == Platform::YouTube {
        (youtube::normalize_url(&url), Quality::parse(raw_quality)?)
    } else {
        (url, Quality::Auto)
    };

    info!(
        "[{request_id}] {} lookup for {:?} (quality {})",
        platform.slug(),
        url,
        quality.api_value()
    );

    state
        .client
        .lookup(platform, &url, quality.api_value())
        .await
        .map_err(|error| {
            warn!("[{request_id}] {} lookup failed: {error}", platform.slug());
            ApiError::upstream(platform, &error)
        })
}

pub async fn youtube_proxy(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let Some(url) = query.url.as_deref().and_then(non_empty) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "URL parameter is required"})),
        )
            .into_response();
    };
    let quality = query
        .quality
        .as_deref()
        .and_then(non_empty)
        .unwrap_or(DEFAULT_PROXY_QUALITY);

    info!("Proxying YouTube request for {url:?} (quality {quality})");

    match state.client.relay_youtube(url, quality).await {
        Ok(body) => Json(body).into_response(),
        Err(error) => {
            warn!("YouTube proxy error: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Failed to fetch video data",
                    "error": error.to_string(),
                })),
            )
                .into_response()
        }
    }
}

pub async fn landing_page() -> Html<String> {
    Html(render::platform_page(&PageView::blank(Platform::TikTok)))
}

pub async fn platform_page(Path(slug): Path<String>) -> Response {
    match Platform::from_slug(&slug) {
        Some(platform) => Html(render::platform_page(&PageView::blank(platform))).into_response(),
        None => not_found(&slug),
    }
}

pub async fn submit_landing(State(state): State<AppState>, Form(form): Form<PageForm>) -> Response {
    submit(&state, Platform::TikTok, form).await
}

pub async fn submit_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<PageForm>,
) -> Response {
    match Platform::from_slug(&slug) {
        Some(platform) => submit(&state, platform, form).await,
        None => not_found(&slug),
    }
}

async fn submit(state: &AppState, platform: Platform, form: PageForm) -> Response {
    let raw_quality = form.quality.as_deref().unwrap_or_default();
    let quality = Quality::parse(raw_quality).unwrap_or_default();
    let result = resolve_media(state, Uuid::new_v4(), platform, &form.url, raw_quality).await;

    let (status, outcome) = match &result {
        Ok(media) => (StatusCode::OK, Outcome::Resolved(media)),
        Err(error) => (error.status, Outcome::Failed(&error.message)),
    };
    let view = PageView {
        platform,
        url: form.url.trim(),
        quality,
        outcome,
    };

    (status, Html(render::platform_page(&view))).into_response()
}

fn not_found(slug: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(render::not_found_page(slug))).into_response()
}
