use serde::Deserialize;
use serde_json::Value;

use super::{UpstreamPayload, body, decode_body, loose_u64, truthy};
use crate::{
    error::FetchError,
    media::{LinkKind, MediaResult, format_bytes, normalize_text, web_url},
    platform::Platform,
};

#[derive(Debug, Deserialize)]
pub struct TeraboxResponse {
    #[serde(default, deserialize_with = "truthy")]
    succes: bool,
    #[serde(default, deserialize_with = "body")]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TeraboxFile {
    file_name: Option<String>,
    size: Option<String>,
    thumbnail: Option<String>,
    download: Option<String>,
    #[serde(default, deserialize_with = "loose_u64")]
    bytes: Option<u64>,
}

impl UpstreamPayload for TeraboxResponse {
    // This endpoint does not echo an HTTP-like status field.
    fn into_media(self) -> Result<MediaResult, FetchError> {
        let file: TeraboxFile = match self.data {
            Some(file) if self.succes => decode_body(file)?,
            _ => return Err(FetchError::Unsuccessful(None)),
        };

        let title = file
            .file_name
            .and_then(normalize_text)
            .unwrap_or_else(|| "TeraBox File".to_string());

        let mut media = MediaResult::new(Platform::Terabox, title);
        media.thumbnail = file.thumbnail.and_then(web_url);
        media.size = match (file.size.and_then(normalize_text), file.bytes) {
            (Some(size), Some(bytes)) => Some(format!("{size} ({})", format_bytes(bytes))),
            (Some(size), None) => Some(size),
            (None, bytes) => bytes.map(format_bytes),
        };

        media.push_link("Download File", file.download, LinkKind::File);

        media.finish()
    }
}
