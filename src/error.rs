use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::platform::Platform;

const TIMEOUT_MESSAGE: &str =
    "Request timed out. The server might be busy, please try again later.";
const NETWORK_MESSAGE: &str =
    "Network connection issue. Please check your internet connection and try again.";

/// Failure talking to a downloader API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("could not reach upstream: {0}")]
    Network(String),

    #[error("upstream answered with status {0}")]
    Status(StatusCode),

    #[error("upstream reported failure: {}", .0.as_deref().unwrap_or("no message"))]
    Unsuccessful(Option<String>),

    #[error("upstream payload could not be read: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = error.status() {
            FetchError::Status(status)
        } else if error.is_decode() || error.is_body() {
            FetchError::Malformed(error.to_string())
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

impl FetchError {
    /// The message a user sees for this failure on the given platform's page.
    pub fn user_message(&self, platform: Platform) -> String {
        if platform == Platform::YouTube {
            return format!("Download failed: {}", self.youtube_detail());
        }

        match self {
            FetchError::Timeout => TIMEOUT_MESSAGE.to_string(),
            FetchError::Network(_) => NETWORK_MESSAGE.to_string(),
            FetchError::Status(status) => {
                format!("Server error: {}. Please try again later.", status.as_u16())
            }
            FetchError::Unsuccessful(_) => unsuccessful_message(platform).to_string(),
            FetchError::Malformed(_) => fallback_message(platform).to_string(),
        }
    }

    fn youtube_detail(&self) -> String {
        match self {
            FetchError::Timeout => TIMEOUT_MESSAGE.to_string(),
            FetchError::Network(_) => NETWORK_MESSAGE.to_string(),
            FetchError::Status(status) => format!(
                "Server error ({}): {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
            FetchError::Unsuccessful(message) => message
                .as_deref()
                .and_then(crate::config::non_empty)
                .unwrap_or("Failed to get video download link")
                .to_string(),
            FetchError::Malformed(_) => "Failed to fetch video data".to_string(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            FetchError::Timeout => "UPSTREAM_TIMEOUT",
            FetchError::Network(_) => "UPSTREAM_UNREACHABLE",
            FetchError::Status(_) => "UPSTREAM_STATUS",
            FetchError::Unsuccessful(_) | FetchError::Malformed(_) => "UPSTREAM_REJECTED",
        }
    }
}

fn unsuccessful_message(platform: Platform) -> &'static str {
    match platform {
        Platform::TikTok | Platform::Douyin | Platform::YouTube => {
            "Failed to fetch video data. Please try again with a different video."
        }
        Platform::Instagram => {
            "Failed to fetch Instagram content. Please try again with a different link."
        }
        Platform::Facebook => fallback_message(platform),
        Platform::Terabox => "Unable to process this link. Please check the URL and try again.",
    }
}

fn fallback_message(platform: Platform) -> &'static str {
    match platform {
        Platform::TikTok | Platform::Douyin | Platform::YouTube => {
            "An error occurred while fetching the video. Please try again."
        }
        Platform::Instagram => "An error occurred while fetching the content. Please try again.",
        Platform::Facebook => "Failed to download video. Please check the URL and try again.",
        Platform::Terabox => "An error occurred. Please try again later.",
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<&'static str>,
}

impl ApiError {
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            code: Some("INVALID_URL"),
        }
    }

    pub fn invalid_quality(value: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Unsupported quality: {value}"),
            code: Some("INVALID_QUALITY"),
        }
    }

    pub fn unknown_platform(slug: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Unknown platform: {slug}"),
            code: Some("UNKNOWN_PLATFORM"),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            code: None,
        }
    }

    pub fn upstream(platform: Platform, error: &FetchError) -> Self {
        Self {
            status: error.status_code(),
            message: error.user_message(platform),
            code: Some(error.code()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            code: self.code,
        });

        (self.status, body).into_response()
    }
}
