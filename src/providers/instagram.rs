use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use super::{UpstreamPayload, body, decode_body, loose_u64, truthy};
use crate::{
    error::FetchError,
    media::{Author, Comment, LinkKind, MediaResult, format_count, normalize_text, web_url},
    platform::Platform,
};

const MAX_COMMENTS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct InstagramResponse {
    #[serde(default, deserialize_with = "truthy")]
    succes: bool,
    #[serde(default, deserialize_with = "loose_u64")]
    status: Option<u64>,
    #[serde(default, deserialize_with = "body")]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstagramData {
    #[serde(default)]
    video_urls: Vec<InstagramVideo>,
    thumbnail_url: Option<String>,
    #[serde(default)]
    metadata: InstagramMetadata,
}

#[derive(Debug, Deserialize)]
struct InstagramVideo {
    url: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstagramMetadata {
    title: Option<String>,
    username: Option<String>,
    #[serde(default, deserialize_with = "loose_u64")]
    taken_at: Option<u64>,
    #[serde(default, deserialize_with = "loose_u64")]
    like_count: Option<u64>,
    #[serde(default, deserialize_with = "loose_u64")]
    comment_count: Option<u64>,
    #[serde(default)]
    comments: Vec<InstagramComment>,
}

#[derive(Debug, Deserialize)]
struct InstagramComment {
    text: Option<String>,
    username: Option<String>,
}

impl UpstreamPayload for InstagramResponse {
    fn into_media(self) -> Result<MediaResult, FetchError> {
        let data: InstagramData = match self.data {
            Some(data) if self.succes && self.status == Some(200) => decode_body(data)?,
            _ => return Err(FetchError::Unsuccessful(None)),
        };
        let metadata = data.metadata;

        let username = metadata.username.and_then(normalize_text);
        let title = metadata
            .title
            .and_then(normalize_text)
            .or_else(|| username.as_ref().map(|name| format!("@{name}")))
            .unwrap_or_else(|| "Instagram Post".to_string());

        let mut media = MediaResult::new(Platform::Instagram, title);
        media.author = username.map(|name| Author {
            profile_url: web_url(format!(
                "https://www.instagram.com/{}/",
                urlencoding::encode(&name)
            )),
            name: format!("@{name}"),
            avatar: None,
        });
        media.thumbnail = data.thumbnail_url.and_then(web_url);
        media.published_at = metadata
            .taken_at
            .and_then(|seconds| i64::try_from(seconds).ok())
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0));

        media.push_stat("Likes", metadata.like_count.map(format_count));
        media.push_stat("Comments", metadata.comment_count.map(format_count));

        for video in data.video_urls {
            let name = video
                .name
                .and_then(normalize_text)
                .unwrap_or_else(|| "Original".to_string());
            let kind = match video.kind.as_deref() {
                Some(kind) if kind.starts_with("audio") => LinkKind::Audio,
                _ => LinkKind::Video,
            };
            media.push_link(format!("Download {name} Video"), video.url, kind);
        }

        media.comments = metadata
            .comments
            .into_iter()
            .filter_map(|comment| {
                Some(Comment {
                    username: comment.username.and_then(normalize_text)?,
                    text: comment.text.and_then(normalize_text)?,
                })
            })
            .take(MAX_COMMENTS)
            .collect();

        media.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn one_link_per_video_url() {
        let response: InstagramResponse = serde_json::from_value(json!({
            "succes": true,
            "status": 200,
            "data": {
                "success": true,
                "type": "reel",
                "videoUrls": [
                    {"url": "https://cdn.example/hd.mp4", "type": "video/mp4", "name": "HD", "ext": "mp4"},
                    {"url": "https://cdn.example/sd.mp4", "type": "video/mp4", "name": "SD", "ext": "mp4"}
                ],
                "thumbnailUrl": "https://cdn.example/t.jpg",
                "metadata": {
                    "title": "",
                    "username": "natgeo",
                    "takenAt": 1700000000,
                    "likeCount": 12345,
                    "commentCount": 67,
                    "comments": [
                        {"text": "wow", "username": "a"},
                        {"text": "", "username": "b"},
                        {"text": "2", "username": "c"},
                        {"text": "3", "username": "d"},
                        {"text": "4", "username": "e"},
                        {"text": "5", "username": "f"},
                        {"text": "6", "username": "g"}
                    ]
                }
            }
        }))
        .unwrap();

        let media = response.into_media().unwrap();
        assert_eq!(media.title, "@natgeo");
        assert_eq!(media.links.len(), 2);
        assert_eq!(media.links[0].label, "Download HD Video");
        assert_eq!(media.links[1].url, "https://cdn.example/sd.mp4");
        assert_eq!(media.comments.len(), 5);
        assert_eq!(media.comments[1].username, "c");
        assert_eq!(media.stats[0].value, "12,345");
        assert_eq!(
            media.published_at.map(|at| at.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn rejects_empty_video_list() {
        let response: InstagramResponse = serde_json::from_value(json!({
            "succes": true,
            "status": 200,
            "data": {"videoUrls": [], "metadata": {"username": "x"}}
        }))
        .unwrap();
        assert!(matches!(
            response.into_media(),
            Err(FetchError::Unsuccessful(_))
        ));
    }

    #[test]
    fn failure_envelope_with_text_body_is_unsuccessful() {
        let response: InstagramResponse = serde_json::from_value(json!({
            "succes": false,
            "status": 400,
            "data": "Link tidak valid"
        }))
        .unwrap();
        assert!(matches!(
            response.into_media(),
            Err(FetchError::Unsuccessful(None))
        ));
    }
}
