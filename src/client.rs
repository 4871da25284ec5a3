use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::AppConfig,
    error::FetchError,
    media::MediaResult,
    platform::Platform,
    providers::{
        UpstreamPayload, douyin::DouyinResponse, facebook::FacebookResponse,
        instagram::InstagramResponse, terabox::TeraboxResponse, tiktok::TikTokResponse,
        youtube::YouTubeResponse,
    },
};

const YOUTUBE_FORMAT: &str = "mp4";

/// Talks to the downloader APIs. Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct DownloaderClient {
    http: reqwest::Client,
    downloader_api_base: String,
    youtube_api_base: String,
    youtube_api_key: String,
    request_timeout: Duration,
    youtube_timeout: Duration,
}

impl DownloaderClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("linkgrab/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            downloader_api_base: config.downloader_api_base.clone(),
            youtube_api_base: config.youtube_api_base.clone(),
            youtube_api_key: config.youtube_api_key.clone(),
            request_timeout: config.request_timeout,
            youtube_timeout: config.youtube_timeout,
        })
    }

    /// Builds the upstream URL for a lookup. `quality` is the API value and is
    /// only used for YouTube.
    pub fn endpoint(&self, platform: Platform, url: &str, quality: &str) -> String {
        let encoded = urlencoding::encode(url);
        match platform {
            Platform::YouTube => format!(
                "{}/ytdown?url={encoded}&format={YOUTUBE_FORMAT}&quality={}&apikey={}",
                self.youtube_api_base,
                urlencoding::encode(quality),
                urlencoding::encode(&self.youtube_api_key),
            ),
            other => format!(
                "{}/downloader/{}?link={encoded}",
                self.downloader_api_base,
                other.slug()
            ),
        }
    }

    fn timeout_for(&self, platform: Platform) -> Duration {
        match platform {
            Platform::YouTube => self.youtube_timeout,
            _ => self.request_timeout,
        }
    }

    /// Resolves `url` into download links. The URL is expected to have been
    /// validated already.
    pub async fn lookup(
        &self,
        platform: Platform,
        url: &str,
        quality: &str,
    ) -> Result<MediaResult, FetchError> {
        let endpoint = self.endpoint(platform, url, quality);
        let timeout = self.timeout_for(platform);

        match platform {
            Platform::TikTok => self.fetch::<TikTokResponse>(&endpoint, timeout).await,
            Platform::Instagram => self.fetch::<InstagramResponse>(&endpoint, timeout).await,
            Platform::Douyin => self.fetch::<DouyinResponse>(&endpoint, timeout).await,
            Platform::Facebook => self.fetch::<FacebookResponse>(&endpoint, timeout).await,
            Platform::Terabox => self.fetch::<TeraboxResponse>(&endpoint, timeout).await,
            Platform::YouTube => self.fetch::<YouTubeResponse>(&endpoint, timeout).await,
        }
    }

    async fn fetch<T: UpstreamPayload>(
        &self,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<MediaResult, FetchError> {
        debug!("GET {endpoint}");
        let response = self
            .http
            .get(endpoint)
            .header(ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        let payload: T = serde_json::from_slice(&bytes)
            .map_err(|error| FetchError::Malformed(error.to_string()))?;
        payload.into_media()
    }

    /// Upstream call behind the YouTube proxy route. Whatever JSON the API
    /// answers with is handed back untouched, error statuses included.
    pub async fn relay_youtube(&self, url: &str, quality: &str) -> Result<Value, FetchError> {
        let endpoint = self.endpoint(Platform::YouTube, url, quality);
        debug!("GET {endpoint}");

        let response = self
            .http
            .get(&endpoint)
            .header(ACCEPT, "application/json")
            .timeout(self.youtube_timeout)
            .send()
            .await?;

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|error| FetchError::Malformed(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DownloaderClient {
        let config = AppConfig::from_lookup(|name| match name {
            "DOWNLOADER_API_BASE" => Some("https://dl.example".to_string()),
            "YOUTUBE_API_BASE" => Some("https://yt.example".to_string()),
            "YOUTUBE_API_KEY" => Some("k ey".to_string()),
            _ => None,
        });
        DownloaderClient::new(&config).unwrap()
    }

    #[test]
    fn social_endpoints_encode_the_link() {
        assert_eq!(
            client().endpoint(
                Platform::TikTok,
                "https://www.tiktok.com/@a/video/1?lang=en&x=1",
                "720"
            ),
            "https://dl.example/downloader/tiktok?link=https%3A%2F%2Fwww.tiktok.com%2F%40a%2Fvideo%2F1%3Flang%3Den%26x%3D1"
        );
        assert_eq!(
            client().endpoint(Platform::Terabox, "https://terabox.com/s/1", "720"),
            "https://dl.example/downloader/terabox?link=https%3A%2F%2Fterabox.com%2Fs%2F1"
        );
    }

    #[test]
    fn youtube_endpoint_carries_format_quality_and_key() {
        assert_eq!(
            client().endpoint(Platform::YouTube, "https://youtu.be/abc", "1080"),
            "https://yt.example/ytdown?url=https%3A%2F%2Fyoutu.be%2Fabc&format=mp4&quality=1080&apikey=k%20ey"
        );
    }
}
