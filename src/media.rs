use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::{error::FetchError, platform::Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Video,
    Audio,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub username: String,
    pub text: String,
}

/// What a page renders after a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaResult {
    pub platform: Platform,
    pub title: String,
    pub author: Option<Author>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub size: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub stats: Vec<Stat>,
    pub links: Vec<DownloadLink>,
    pub comments: Vec<Comment>,
}

impl MediaResult {
    pub fn new(platform: Platform, title: impl Into<String>) -> Self {
        Self {
            platform,
            title: title.into(),
            author: None,
            description: None,
            thumbnail: None,
            duration: None,
            size: None,
            published_at: None,
            stats: Vec::new(),
            links: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Links without a usable http(s) URL are dropped.
    pub fn push_link(&mut self, label: impl Into<String>, url: Option<String>, kind: LinkKind) {
        if let Some(url) = url.and_then(web_url) {
            self.links.push(DownloadLink {
                label: label.into(),
                url,
                kind,
            });
        }
    }

    pub fn push_stat(&mut self, label: &'static str, value: Option<String>) {
        if let Some(value) = value.and_then(normalize_text) {
            self.stats.push(Stat { label, value });
        }
    }

    /// A result without a single usable link is treated as a rejected payload.
    pub fn finish(self) -> Result<Self, FetchError> {
        if self.links.is_empty() {
            return Err(FetchError::Unsuccessful(Some(
                "response carried no download links".to_string(),
            )));
        }
        Ok(self)
    }
}

pub fn normalize_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Keeps a third-party URL only if it is an absolute http or https URL.
pub fn web_url(value: String) -> Option<String> {
    let trimmed = normalize_text(value)?;
    let parsed = Url::parse(&trimmed).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(trimmed)
}

pub fn format_duration_ms(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let compact = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{compact} {}", UNITS[unit])
}

/// Renders a count with thousands separators, e.g. `12,345`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(character);
    }
    grouped
}
