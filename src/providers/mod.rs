//! Response shapes of the third-party downloader APIs and their conversion
//! into [`MediaResult`].
//!
//! The APIs are loose about types (counts arrive as strings or numbers, fields
//! go missing), so every field is optional on the way in and the success flag
//! is what decides whether a payload is usable. Envelopes keep their body as
//! raw JSON until the flag has been checked; only an accepted body is decoded
//! into the typed shape.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::{error::FetchError, media::MediaResult};

pub mod douyin;
pub mod facebook;
pub mod instagram;
pub mod terabox;
pub mod tiktok;
pub mod youtube;

pub trait UpstreamPayload: DeserializeOwned {
    fn into_media(self) -> Result<MediaResult, FetchError>;
}

/// JSON truthiness: `null`, `false`, `0` and `""` are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a success flag of any JSON type by its truthiness.
pub(crate) fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy))
}

/// Keeps an envelope body only when it is truthy.
pub(crate) fn body<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(is_truthy))
}

/// Decodes an accepted envelope body into its typed shape.
pub(crate) fn decode_body<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    serde_json::from_value(body).map_err(|err| FetchError::Malformed(err.to_string()))
}

/// Accepts a string, number or bool and keeps its textual form.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

/// Accepts a number or a numeric string.
pub(crate) fn loose_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64)),
        Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "loose_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "loose_u64")]
        count: Option<u64>,
    }

    #[test]
    fn loose_fields_accept_mixed_types() {
        let parsed: Loose = serde_json::from_str(r#"{"text": 42, "count": "17"}"#).unwrap();
        assert_eq!(parsed.text.as_deref(), Some("42"));
        assert_eq!(parsed.count, Some(17));

        let parsed: Loose = serde_json::from_str(r#"{"text": null, "count": 3.0}"#).unwrap();
        assert_eq!(parsed.text, None);
        assert_eq!(parsed.count, Some(3));

        let parsed: Loose = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text, None);
        assert_eq!(parsed.count, None);
    }

    #[derive(Deserialize)]
    struct Envelope {
        #[serde(default, deserialize_with = "truthy")]
        ok: bool,
        #[serde(default, deserialize_with = "body")]
        data: Option<Value>,
    }

    #[test]
    fn envelope_fields_follow_truthiness() {
        let parsed: Envelope = serde_json::from_str(r#"{"ok": 1, "data": {"a": 1}}"#).unwrap();
        assert!(parsed.ok);
        assert!(parsed.data.is_some());

        let parsed: Envelope = serde_json::from_str(r#"{"ok": "", "data": ""}"#).unwrap();
        assert!(!parsed.ok);
        assert!(parsed.data.is_none());

        let parsed: Envelope = serde_json::from_str(r#"{"data": "Link tidak valid"}"#).unwrap();
        assert!(!parsed.ok);
        assert_eq!(parsed.data, Some(Value::from("Link tidak valid")));
    }

    #[test]
    fn mistyped_body_is_malformed() {
        let result: Result<Vec<u8>, _> = decode_body(Value::from("not a list"));
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }
}
