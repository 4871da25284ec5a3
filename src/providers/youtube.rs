use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{UpstreamPayload, body, decode_body, loose_string};
use crate::{
    error::{ApiError, FetchError},
    media::{Author, LinkKind, MediaResult, normalize_text, web_url},
    platform::Platform,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "240p")]
    P240,
    #[serde(rename = "144p")]
    P144,
}

impl Quality {
    pub const ALL: [Quality; 7] = [
        Quality::Auto,
        Quality::P1080,
        Quality::P720,
        Quality::P480,
        Quality::P360,
        Quality::P240,
        Quality::P144,
    ];

    /// Empty input means `auto`.
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let value = value.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Ok(Quality::Auto);
        }
        Self::ALL
            .into_iter()
            .find(|quality| {
                quality.label() == value
                    || (*quality != Quality::Auto && quality.api_value() == value)
            })
            .ok_or_else(|| ApiError::invalid_quality(&value))
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Auto => "auto",
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
            Quality::P240 => "240p",
            Quality::P144 => "144p",
        }
    }

    /// Value of the `quality` query parameter the API expects.
    pub fn api_value(self) -> &'static str {
        match self {
            Quality::Auto | Quality::P720 => "720",
            Quality::P1080 => "1080",
            Quality::P480 => "480",
            Quality::P360 => "360",
            Quality::P240 => "240",
            Quality::P144 => "144",
        }
    }
}

/// Strips tracking and playlist parameters so the API sees a canonical URL.
pub fn normalize_url(raw: &str) -> String {
    let url = raw.trim();

    if url.contains("youtube.com/watch") {
        let video_id = url
            .split_once('?')
            .map(|(_, query)| query)
            .into_iter()
            .flat_map(|query| query.split('&'))
            .find_map(|pair| pair.strip_prefix("v="))
            .map(|id| id.split('#').next().unwrap_or(id))
            .filter(|id| !id.is_empty());
        if let Some(id) = video_id {
            return format!("https://www.youtube.com/watch?v={id}");
        }
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        let id = rest
            .split(['?', '&', '#'])
            .next()
            .unwrap_or_default();
        if !id.is_empty() {
            return format!("https://youtu.be/{id}");
        }
    }

    url.to_string()
}

#[derive(Debug, Deserialize)]
pub struct YouTubeResponse {
    #[serde(default, deserialize_with = "loose_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    message: Option<String>,
    #[serde(default, deserialize_with = "body")]
    result: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YouTubeResult {
    title: Option<String>,
    #[serde(default)]
    metadata: YouTubeMetadata,
    author: Option<YouTubeAuthor>,
    format: Option<String>,
    quality: Option<String>,
    media: Option<String>,
    #[serde(default)]
    quality_options: Vec<YouTubeQualityOption>,
}

#[derive(Debug, Default, Deserialize)]
struct YouTubeMetadata {
    #[serde(default, deserialize_with = "loose_string")]
    duration: Option<String>,
    thumbnail: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    views: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YouTubeAuthor {
    name: Option<String>,
    url: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YouTubeQualityOption {
    #[serde(default, deserialize_with = "loose_string")]
    quality: Option<String>,
    url: Option<String>,
}

impl UpstreamPayload for YouTubeResponse {
    fn into_media(self) -> Result<MediaResult, FetchError> {
        let message = self.message.and_then(normalize_text);
        let result: YouTubeResult = match self.result {
            Some(result) if self.status.as_deref() == Some("success") => decode_body(result)?,
            _ => return Err(FetchError::Unsuccessful(message)),
        };
        if result
            .media
            .as_deref()
            .is_none_or(|media| media.trim().is_empty())
        {
            return Err(FetchError::Unsuccessful(message));
        }

        let title = result
            .title
            .and_then(normalize_text)
            .unwrap_or_else(|| "YouTube Video".to_string());

        let mut media = MediaResult::new(Platform::YouTube, title);
        media.author = result.author.and_then(|author| {
            Some(Author {
                name: author.name.and_then(normalize_text)?,
                avatar: author.image.and_then(web_url),
                profile_url: author.url.and_then(web_url),
            })
        });
        media.description = result.metadata.description.and_then(normalize_text);
        media.thumbnail = result.metadata.thumbnail.and_then(web_url);
        media.duration = result.metadata.duration.and_then(normalize_text);
        media.push_stat("Views", result.metadata.views);

        let quality = result
            .quality
            .and_then(normalize_text)
            .unwrap_or_else(|| "720".to_string());
        let format = result
            .format
            .and_then(normalize_text)
            .unwrap_or_else(|| "mp4".to_string());
        media.push_link(
            format!("Download {} {}", quality_label(&quality), format.to_uppercase()),
            result.media,
            LinkKind::Video,
        );

        for option in result.quality_options {
            if let Some(quality) = option.quality.and_then(normalize_text) {
                media.push_link(
                    format!("Download {}", quality_label(&quality)),
                    option.url,
                    LinkKind::Video,
                );
            }
        }

        media.finish()
    }
}

fn quality_label(quality: &str) -> String {
    if quality.ends_with('p') {
        quality.to_string()
    } else {
        format!("{quality}p")
    }
}
