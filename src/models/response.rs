//! Response models for the image endpoints.

use base64::{engine::general_purpose::STANDARD as base64_engine, Engine};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use super::Usage;

/// The result of a generation, edit or variation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Unix timestamp of creation.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub created: i64,
    /// The generated images, in the order the API returned them.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub data: Vec<ImageResponseDataInner>,
    /// Token usage, when reported.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub usage: Usage,
    #[serde(skip)]
    headers: HeaderMap,
}

impl ImageResponse {
    /// HTTP headers of the response this was decoded from.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = headers;
    }
}

/// One generated image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageResponseDataInner {
    /// URL of the image, for `url` responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base64 image data, for `b64_json` responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    /// The prompt the model actually used, if it rewrote it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl ImageResponseDataInner {
    /// Decodes the inline image, if this item carries one.
    pub fn decode_b64_json(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        self.b64_json
            .as_deref()
            .map(|data| base64_engine.decode(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InputTokensDetails;

    #[test]
    fn decodes_response_with_usage() {
        let response: ImageResponse = serde_json::from_str(
            r#"{
                "created": 1713833628,
                "data": [{"b64_json": "aGVsbG8=", "revised_prompt": "a red fox"}],
                "usage": {
                    "total_tokens": 100,
                    "input_tokens": 50,
                    "output_tokens": 50,
                    "input_tokens_details": {"text_tokens": 10, "image_tokens": 40}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(response.created, 1713833628);
        assert_eq!(response.usage.input_tokens_details.image_tokens, 40);
        assert_eq!(response.data[0].revised_prompt.as_deref(), Some("a red fox"));
        assert_eq!(response.data[0].decode_b64_json().unwrap().unwrap(), b"hello");
        assert!(response.headers().is_empty());
    }

    #[test]
    fn null_members_decode_as_empty() {
        let response: ImageResponse =
            serde_json::from_str(r#"{"created":1,"data":null,"usage":null}"#).unwrap();
        assert_eq!(response.created, 1);
        assert!(response.data.is_empty());
        assert_eq!(response.usage, Usage::default());

        let response: ImageResponse = serde_json::from_str(
            r#"{"created":null,"data":[{"url":"u"}],"usage":{"total_tokens":3,"input_tokens_details":null}}"#,
        )
        .unwrap();
        assert_eq!(response.created, 0);
        assert_eq!(response.data[0].url.as_deref(), Some("u"));
        assert_eq!(response.usage.total_tokens, 3);
        assert_eq!(response.usage.input_tokens_details, InputTokensDetails::default());
    }

    #[test]
    fn url_items_have_nothing_to_decode() {
        let item: ImageResponseDataInner =
            serde_json::from_str(r#"{"url": "https://example.com/a.png"}"#).unwrap();
        assert!(item.decode_b64_json().is_none());
    }
}
