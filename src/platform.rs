use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
    Douyin,
    Facebook,
    Terabox,
    YouTube,
}

/// Static copy shown around a platform's form.
pub struct PageCopy {
    pub heading: &'static str,
    pub placeholder: &'static str,
    pub hint: &'static str,
    pub example: Option<&'static str>,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::TikTok,
        Platform::Instagram,
        Platform::Douyin,
        Platform::Facebook,
        Platform::Terabox,
        Platform::YouTube,
    ];

    pub fn from_slug(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.slug() == value)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Douyin => "douyin",
            Platform::Facebook => "facebook",
            Platform::Terabox => "terabox",
            Platform::YouTube => "youtube",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::Douyin => "Douyin",
            Platform::Facebook => "Facebook",
            Platform::Terabox => "Terabox",
            Platform::YouTube => "YouTube",
        }
    }

    /// TikTok is the landing page.
    pub fn page_path(self) -> String {
        match self {
            Platform::TikTok => "/".to_string(),
            other => format!("/{}", other.slug()),
        }
    }

    pub fn copy(self) -> PageCopy {
        match self {
            Platform::TikTok => PageCopy {
                heading: "Tiktok Video Downloader",
                placeholder: "Paste TikTok video URL here...",
                hint: "Enter a valid TikTok video URL to download videos without watermark",
                example: Some("https://www.tiktok.com/@username/video/1234567890123456789"),
            },
            Platform::Instagram => PageCopy {
                heading: "Instagram Content Downloader",
                placeholder: "Paste Instagram post or reel URL here...",
                hint: "Enter a valid Instagram post or reel URL to download content",
                example: None,
            },
            Platform::Douyin => PageCopy {
                heading: "Douyin Video Downloader",
                placeholder: "Paste Douyin video URL here...",
                hint: "Enter a valid Douyin video URL to download videos without watermark",
                example: None,
            },
            Platform::Facebook => PageCopy {
                heading: "Facebook Video Downloader",
                placeholder: "Paste Facebook video URL here...",
                hint: "Enter a valid Facebook video URL to download videos",
                example: None,
            },
            Platform::Terabox => PageCopy {
                heading: "TeraBox Downloader",
                placeholder: "Paste TeraBox link here...",
                hint: "Enter a valid TeraBox file URL to download your files",
                example: Some("https://terabox.com/s/xxxxx or https://1024terabox.com/s/xxxxx"),
            },
            Platform::YouTube => PageCopy {
                heading: "YouTube Video Downloader",
                placeholder: "Paste YouTube video URL here...",
                hint: "Enter a valid YouTube video URL to download videos",
                example: None,
            },
        }
    }

    /// Rejects input that can never resolve, before any request is made.
    pub fn validate_input(self, raw: &str) -> Result<String, ApiError> {
        let url = raw.trim();
        let required_marker = match self {
            Platform::TikTok => Some("tiktok.com"),
            Platform::Instagram => Some("instagram.com"),
            Platform::YouTube => Some("youtu"),
            Platform::Douyin | Platform::Facebook | Platform::Terabox => None,
        };

        let accepted = !url.is_empty()
            && required_marker.is_none_or(|marker| url.contains(marker));
        if accepted {
            Ok(url.to_string())
        } else {
            Err(ApiError::invalid_url(self.invalid_input_message()))
        }
    }

    pub fn invalid_input_message(self) -> &'static str {
        match self {
            Platform::TikTok => "Please enter a valid TikTok URL",
            Platform::Instagram => "Please enter a valid Instagram URL",
            Platform::Douyin => "Please enter a valid Douyin URL",
            Platform::Facebook => "Please enter a Facebook video URL",
            Platform::Terabox => "Please enter a valid TeraBox URL",
            Platform::YouTube => "Please enter a valid YouTube URL",
        }
    }
}
