use serde::Deserialize;
use serde_json::Value;

use super::{UpstreamPayload, body, decode_body, loose_string, loose_u64, truthy};
use crate::{
    error::FetchError,
    media::{Author, LinkKind, MediaResult, normalize_text, web_url},
    platform::Platform,
};

#[derive(Debug, Deserialize)]
pub struct TikTokResponse {
    #[serde(default, deserialize_with = "truthy")]
    succes: bool,
    #[serde(default, deserialize_with = "loose_u64")]
    status: Option<u64>,
    #[serde(default, deserialize_with = "body")]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TikTokData {
    nickname: Option<String>,
    username: Option<String>,
    description: Option<String>,
    #[serde(default)]
    dlink: TikTokLinks,
    #[serde(default)]
    stats: TikTokStats,
    song_title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TikTokLinks {
    nowm: Option<String>,
    wm: Option<String>,
    audio: Option<String>,
    profile_pic: Option<String>,
    cover: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TikTokStats {
    #[serde(default, deserialize_with = "loose_string")]
    plays: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    likes: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    comments: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    shares: Option<String>,
}

impl UpstreamPayload for TikTokResponse {
    fn into_media(self) -> Result<MediaResult, FetchError> {
        let data: TikTokData = match self.data {
            Some(data) if self.succes && self.status == Some(200) => decode_body(data)?,
            _ => return Err(FetchError::Unsuccessful(None)),
        };

        let creator = data
            .nickname
            .and_then(normalize_text)
            .or_else(|| data.username.and_then(normalize_text))
            .unwrap_or_else(|| "TikTok Creator".to_string());

        let mut media = MediaResult::new(Platform::TikTok, creator.clone());
        media.author = Some(Author {
            name: creator,
            avatar: data.dlink.profile_pic.and_then(web_url),
            profile_url: None,
        });
        media.description = data.description.and_then(normalize_text);
        media.thumbnail = data.dlink.cover.and_then(web_url);

        media.push_stat("Plays", data.stats.plays);
        media.push_stat("Likes", data.stats.likes);
        media.push_stat("Comments", data.stats.comments);
        media.push_stat("Shares", data.stats.shares);
        media.push_stat("Sound", data.song_title);

        media.push_link("Download Without Watermark", data.dlink.nowm, LinkKind::Video);
        media.push_link("Download With Watermark", data.dlink.wm, LinkKind::Video);
        media.push_link("Download Audio Only", data.dlink.audio, LinkKind::Audio);

        media.finish()
    }
}
