use std::{collections::BTreeSet, time::Duration};

use url::Url;

use crate::error::ApiError;

const DEFAULT_DOWNLOADER_API_BASE: &str = "https://api.ferdev.my.id";
const DEFAULT_YOUTUBE_API_BASE: &str = "https://restapi.rizk.my.id";
const DEFAULT_YOUTUBE_API_KEY: &str = "free";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 15;
const DEFAULT_YOUTUBE_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
    pub downloader_api_base: String,
    pub youtube_api_base: String,
    pub youtube_api_key: String,
    pub request_timeout: Duration,
    pub youtube_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so callers can
    /// feed values without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name).and_then(|value| non_empty(&value).map(ToString::to_string))
        };
        let read_u64 = |name: &str| {
            read(name)
                .and_then(|value| value.parse::<u64>().ok())
                .filter(|value| *value > 0)
        };

        let allowed_origins = read("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self {
            bind_addr: resolve_bind_addr(read("APP_ADDR"), read("PORT")),
            allowed_origins,
            downloader_api_base: read("DOWNLOADER_API_BASE")
                .map(|value| trim_base(&value))
                .unwrap_or_else(|| DEFAULT_DOWNLOADER_API_BASE.to_string()),
            youtube_api_base: read("YOUTUBE_API_BASE")
                .map(|value| trim_base(&value))
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_BASE.to_string()),
            youtube_api_key: read("YOUTUBE_API_KEY")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_API_KEY.to_string()),
            request_timeout: Duration::from_secs(
                read_u64("REQUEST_TIMEOUT_SECONDS").unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            ),
            youtube_timeout: Duration::from_secs(
                read_u64("YOUTUBE_TIMEOUT_SECONDS").unwrap_or(DEFAULT_YOUTUBE_TIMEOUT_SECONDS),
            ),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Origins whose browsers may call the JSON API, each kept as
/// `scheme://host[:port]` with the default port left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    origins: BTreeSet<String>,
}

impl CorsConfig {
    /// An empty list means the local development origins.
    pub fn from_origins(configured: &[String]) -> Result<Self, ApiError> {
        let entries: Vec<&str> = if configured.is_empty() {
            LOCAL_ORIGINS.to_vec()
        } else {
            configured.iter().map(String::as_str).collect()
        };

        let origins = entries
            .into_iter()
            .map(|entry| {
                origin_key(entry).ok_or_else(|| {
                    ApiError::internal(format!(
                        "ALLOWED_ORIGINS entry {entry:?} is not an http(s) origin such as https://example.com"
                    ))
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { origins })
    }

    pub fn allows(&self, origin: &str) -> bool {
        origin_key(origin).is_some_and(|key| self.origins.contains(&key))
    }

    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }
}

fn origin_key(value: &str) -> Option<String> {
    let url = Url::parse(value.trim()).ok()?;
    let bare = url.path() == "/" && url.query().is_none() && url.fragment().is_none();
    if !bare || !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    Some(url.origin().ascii_serialization())
}

fn resolve_bind_addr(app_addr: Option<String>, port: Option<String>) -> String {
    if let Some(configured) = app_addr {
        return configured;
    }

    if let Some(port) = port.and_then(|value| value.parse::<u16>().ok()) {
        return format!("0.0.0.0:{port}");
    }

    DEFAULT_BIND_ADDR.to_string()
}

fn trim_base(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
