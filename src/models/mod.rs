//! Data structures for the image API requests and responses.

use serde::{Deserialize, Deserializer};

mod image;
mod response;
mod usage;

pub use image::{
    model, quality, response_format, size, style, ImageEditRequest, ImageRequest,
    ImageVariRequest,
};
pub use response::{ImageResponse, ImageResponseDataInner};
pub use usage::{CompletionTokensDetails, InputTokensDetails, PromptTokensDetails, Usage};

/// Decodes an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
