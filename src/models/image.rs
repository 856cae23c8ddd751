//! Request models for the image endpoints.

use serde::Serialize;
use typed_builder::TypedBuilder;

use crate::form::{FileHeader, NamedFile};

/// Image sizes accepted by the API.
pub mod size {
    /// 256x256 pixels.
    pub const S256X256: &str = "256x256";
    /// 512x512 pixels.
    pub const S512X512: &str = "512x512";
    /// 1024x1024 pixels.
    pub const S1024X1024: &str = "1024x1024";
    /// 1792x1024 pixels (dall-e-3 only).
    pub const S1792X1024: &str = "1792x1024";
    /// 1024x1792 pixels (dall-e-3 only).
    pub const S1024X1792: &str = "1024x1792";
}

/// Ways the generated images can be returned.
pub mod response_format {
    /// A URL pointing at the hosted image.
    pub const URL: &str = "url";
    /// The image inline, base64-encoded.
    pub const B64_JSON: &str = "b64_json";
}

/// Image models.
pub mod model {
    /// DALL·E 2.
    pub const DALL_E_2: &str = "dall-e-2";
    /// DALL·E 3.
    pub const DALL_E_3: &str = "dall-e-3";
}

/// Output qualities.
pub mod quality {
    /// High definition.
    pub const HD: &str = "hd";
    /// Standard quality.
    pub const STANDARD: &str = "standard";
}

/// Rendering styles.
pub mod style {
    /// Hyper-real and dramatic.
    pub const VIVID: &str = "vivid";
    /// More natural, less hyper-real.
    pub const NATURAL: &str = "natural";
}

fn is_unset_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn is_unset_count(value: &Option<u32>) -> bool {
    value.map_or(true, |n| n == 0)
}

/// A request to generate images from a prompt, sent as JSON.
///
/// Options that are unset, empty or zero are left out of the body.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[builder(doc)]
pub struct ImageRequest {
    /// Text description of the desired image(s).
    #[serde(skip_serializing_if = "String::is_empty")]
    #[builder(setter(into))]
    pub prompt: String,

    /// Background transparency, e.g. "transparent" or "opaque".
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub background: Option<String>,

    /// The model to use.
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub model: Option<String>,

    /// Content moderation level.
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub moderation: Option<String>,

    /// Number of images to generate.
    #[serde(skip_serializing_if = "is_unset_count")]
    #[builder(default, setter(strip_option))]
    pub n: Option<u32>,

    /// Compression level (0-100) for jpeg and webp output.
    #[serde(skip_serializing_if = "is_unset_count")]
    #[builder(default, setter(strip_option))]
    pub output_compression: Option<u32>,

    /// Output encoding, e.g. "png".
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub output_format: Option<String>,

    /// See [`quality`].
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub quality: Option<String>,

    /// See [`response_format`].
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub response_format: Option<String>,

    /// See [`size`].
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub size: Option<String>,

    /// See [`style`].
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub style: Option<String>,

    /// End-user identifier for abuse monitoring.
    #[serde(skip_serializing_if = "is_unset_text")]
    #[builder(default, setter(strip_option, into))]
    pub user: Option<String>,
}

/// A request to edit one or more images, sent as a multipart form.
///
/// Optional fields that are unset, empty or zero are left out of the form.
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct ImageEditRequest {
    /// Source images. One image goes out as `image`, several as repeated `image[]`.
    #[builder(default)]
    pub image: Vec<FileHeader>,

    /// Text description of the desired edit.
    #[builder(setter(into))]
    pub prompt: String,

    /// Background transparency.
    #[builder(default, setter(strip_option, into))]
    pub background: Option<String>,

    /// Mask whose fully transparent areas mark where to edit.
    #[builder(default, setter(strip_option))]
    pub mask: Option<FileHeader>,

    /// The model to use. Always written, even when empty.
    #[builder(default, setter(into))]
    pub model: String,

    /// Number of images to generate.
    #[builder(default, setter(strip_option))]
    pub n: Option<u32>,

    /// Output quality.
    #[builder(default, setter(strip_option, into))]
    pub quality: Option<String>,

    /// How images are returned.
    #[builder(default, setter(strip_option, into))]
    pub response_format: Option<String>,

    /// Output size.
    #[builder(default, setter(strip_option, into))]
    pub size: Option<String>,

    /// End-user identifier.
    #[builder(default, setter(strip_option, into))]
    pub user: Option<String>,
}

/// A request for variations of a single image, sent as a multipart form.
///
/// `n`, `size` and `response_format` are always written, zero or empty included.
#[derive(Debug, TypedBuilder)]
#[builder(doc)]
pub struct ImageVariRequest {
    /// The source image, named after the path it was opened with.
    pub image: NamedFile,

    /// The model the variation is meant for. Kept on the request only: it is
    /// neither written to the form nor sent with the request.
    #[builder(default, setter(into))]
    pub model: String,

    /// Number of variations.
    #[builder(default)]
    pub n: u32,

    /// Output size.
    #[builder(default, setter(into))]
    pub size: String,

    /// How images are returned.
    #[builder(default, setter(into))]
    pub response_format: String,
}
