use serde::Deserialize;
use serde_json::Value;

use super::{UpstreamPayload, body, decode_body, loose_u64, truthy};
use crate::{
    error::FetchError,
    media::{LinkKind, MediaResult, format_duration_ms, normalize_text, web_url},
    platform::Platform,
};

#[derive(Debug, Deserialize)]
pub struct FacebookResponse {
    #[serde(default, deserialize_with = "truthy")]
    succes: bool,
    #[serde(default, deserialize_with = "loose_u64")]
    status: Option<u64>,
    #[serde(default, deserialize_with = "body")]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FacebookVideo {
    #[serde(default, deserialize_with = "loose_u64")]
    duration_ms: Option<u64>,
    sd: Option<String>,
    hd: Option<String>,
    title: Option<String>,
    thumbnail: Option<String>,
}

impl UpstreamPayload for FacebookResponse {
    fn into_media(self) -> Result<MediaResult, FetchError> {
        let video: FacebookVideo = match self.data {
            Some(video) if self.succes && self.status == Some(200) => decode_body(video)?,
            _ => return Err(FetchError::Unsuccessful(None)),
        };

        let title = video
            .title
            .and_then(normalize_text)
            .unwrap_or_else(|| "Facebook Video".to_string());

        let mut media = MediaResult::new(Platform::Facebook, title);
        media.thumbnail = video.thumbnail.and_then(web_url);
        media.duration = video.duration_ms.map(format_duration_ms);

        media.push_link("Download HD Quality", video.hd, LinkKind::Video);
        media.push_link("Download SD Quality", video.sd, LinkKind::Video);

        media.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hd_comes_before_sd() {
        let response: FacebookResponse = serde_json::from_value(json!({
            "succes": true,
            "status": 200,
            "data": {
                "url": "https://www.facebook.com/watch?v=1",
                "duration_ms": 125000,
                "sd": "https://video.xx.fbcdn.net/sd.mp4",
                "hd": "https://video.xx.fbcdn.net/hd.mp4",
                "title": "",
                "thumbnail": "https://scontent.xx.fbcdn.net/t.jpg"
            }
        }))
        .unwrap();

        let media = response.into_media().unwrap();
        assert_eq!(media.title, "Facebook Video");
        assert_eq!(media.duration.as_deref(), Some("2:05"));
        assert_eq!(media.links[0].label, "Download HD Quality");
        assert_eq!(media.links[1].label, "Download SD Quality");
    }

    #[test]
    fn sd_only_is_still_usable() {
        let response: FacebookResponse = serde_json::from_value(json!({
            "succes": true,
            "status": 200,
            "data": {"sd": "https://video.xx.fbcdn.net/sd.mp4", "hd": null}
        }))
        .unwrap();
        let media = response.into_media().unwrap();
        assert_eq!(media.links.len(), 1);
    }

    #[test]
    fn failure_envelope_with_text_body_is_unsuccessful() {
        let response: FacebookResponse = serde_json::from_value(json!({
            "succes": false,
            "status": "400",
            "data": ["no video"]
        }))
        .unwrap();
        assert!(matches!(
            response.into_media(),
            Err(FetchError::Unsuccessful(None))
        ));
    }
}
