use serde::Deserialize;
use serde_json::Value;

use super::{UpstreamPayload, body, decode_body, loose_u64, truthy};
use crate::{
    error::FetchError,
    media::{LinkKind, MediaResult, normalize_text, web_url},
    platform::Platform,
};

/// Unlike the sibling endpoints this one spells `success` correctly and
/// nests the payload under `result`.
#[derive(Debug, Deserialize)]
pub struct DouyinResponse {
    #[serde(default, deserialize_with = "truthy")]
    success: bool,
    #[serde(default, deserialize_with = "loose_u64")]
    status: Option<u64>,
    #[serde(default, deserialize_with = "body")]
    result: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DouyinResult {
    title: Option<String>,
    thumbnail: Option<String>,
    #[serde(default)]
    download: DouyinDownloads,
}

#[derive(Debug, Default, Deserialize)]
struct DouyinDownloads {
    no_watermark: Option<String>,
    with_watermark: Option<String>,
    mp3: Option<String>,
}

impl UpstreamPayload for DouyinResponse {
    fn into_media(self) -> Result<MediaResult, FetchError> {
        if !(self.success && self.status == Some(200)) {
            return Err(FetchError::Unsuccessful(None));
        }
        let result: DouyinResult = match self.result {
            Some(result) => decode_body(result)?,
            None => return Err(FetchError::Malformed("missing result".to_string())),
        };

        let mut media = MediaResult::new(Platform::Douyin, "Douyin Video");
        media.description = result.title.and_then(normalize_text);
        media.thumbnail = result.thumbnail.and_then(web_url);

        media.push_link(
            "Download Without Watermark",
            result.download.no_watermark,
            LinkKind::Video,
        );
        media.push_link(
            "Download With Watermark",
            result.download.with_watermark,
            LinkKind::Video,
        );
        media.push_link("Download Audio Only", result.download.mp3, LinkKind::Audio);

        media.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_download_block() {
        let response: DouyinResponse = serde_json::from_value(json!({
            "success": true,
            "status": 200,
            "author": "api",
            "result": {
                "title": "晚安",
                "thumbnail": "https://cdn.example/t.jpg",
                "download": {
                    "no_watermark": "https://cdn.example/nowm.mp4",
                    "with_watermark": "https://cdn.example/wm.mp4",
                    "mp3": "https://cdn.example/a.mp3"
                }
            }
        }))
        .unwrap();

        let media = response.into_media().unwrap();
        assert_eq!(media.title, "Douyin Video");
        assert_eq!(media.description.as_deref(), Some("晚安"));
        assert_eq!(media.links.len(), 3);
        assert_eq!(media.links[0].url, "https://cdn.example/nowm.mp4");
    }

    #[test]
    fn misspelled_flag_is_not_accepted_here() {
        let response: DouyinResponse = serde_json::from_value(json!({
            "succes": true,
            "status": 200,
            "result": {"download": {"mp3": "https://cdn.example/a.mp3"}}
        }))
        .unwrap();
        assert!(response.into_media().is_err());
    }

    #[test]
    fn failure_envelope_with_text_body_is_unsuccessful() {
        let response: DouyinResponse = serde_json::from_value(json!({
            "success": false,
            "status": 404,
            "result": "video not found"
        }))
        .unwrap();
        assert!(matches!(
            response.into_media(),
            Err(FetchError::Unsuccessful(None))
        ));
    }
}
