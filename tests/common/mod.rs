//! Shared helpers for integration tests.

#![allow(dead_code)]

use bytes::Bytes;

/// One decoded part: field name, filename (for file parts) and content.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl DecodedPart {
    pub fn field(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            filename: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }
}

/// Parses a multipart body with `multer`, using the boundary from `content_type`.
pub async fn parse_multipart(content_type: &str, body: Vec<u8>) -> Vec<DecodedPart> {
    let boundary = multer::parse_boundary(content_type).expect("content type has a boundary");
    let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(Bytes::from(body)) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("well-formed part") {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = if filename.is_some() {
            field.content_type().map(|mime| mime.to_string())
        } else {
            None
        };
        let data = field.bytes().await.expect("part content").to_vec();
        parts.push(DecodedPart {
            name,
            filename,
            content_type,
            data,
        });
    }
    parts
}
