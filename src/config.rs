//! Client configuration.

use typed_builder::TypedBuilder;

use crate::error::ImageApiError;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for [`crate::ImageClient`].
///
/// # Example
///
/// ```
/// use openai_images_rust::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .api_key("your-api-key-here")
///     .organization("org-123")
///     .build();
/// assert_eq!(config.base_url, "https://api.openai.com/v1");
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct ClientConfig {
    /// Bearer token sent with every request.
    #[builder(setter(into))]
    pub api_key: String,

    /// Base URL the endpoint paths are appended to.
    #[builder(setter(into), default = String::from(DEFAULT_BASE_URL))]
    pub base_url: String,

    /// Optional organization sent as `OpenAI-Organization`.
    #[builder(default, setter(strip_option, into))]
    pub organization: Option<String>,
}

impl ClientConfig {
    /// Reads the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// * `OPENAI_API_KEY` - The API key (required)
    /// * `OPENAI_BASE_URL` - Overrides the base URL
    /// * `OPENAI_ORG_ID` - Organization identifier
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ImageApiError> {
        let api_key = std::env::var("OPENAI_API_KEY")?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url,
            organization: std::env::var("OPENAI_ORG_ID").ok(),
        })
    }
}
