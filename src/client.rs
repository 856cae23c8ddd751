//! Client implementation for the image endpoints.

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ImageApiError;
use crate::form::{FormBuilder, FormError, MultipartFormBuilder};
use crate::images::{write_edit_form, write_variation_form};
use crate::models::{ImageEditRequest, ImageRequest, ImageResponse, ImageVariRequest};

const GENERATIONS_PATH: &str = "/images/generations";
const EDITS_PATH: &str = "/images/edits";
const VARIATIONS_PATH: &str = "/images/variations";

/// Error envelope returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// A client for the image generation, edit and variation endpoints.
#[derive(Debug, Clone)]
pub struct ImageClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ImageClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - API key, base URL and organization to use for every request
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a new client from environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the required environment variable is not set.
    pub fn from_env() -> Result<Self, ImageApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    fn full_url(&self, suffix: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), suffix)
    }

    fn post(&self, suffix: &str) -> reqwest::RequestBuilder {
        let url = self.full_url(suffix);
        debug!(%url, "sending image request");

        let request = self.client.post(url).bearer_auth(&self.config.api_key);
        match &self.config.organization {
            Some(organization) => request.header("OpenAI-Organization", organization),
            None => request,
        }
    }

    /// Sends the request and decodes the image response, keeping its headers.
    async fn send_request(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ImageResponse, ImageApiError> {
        let response = request.send().await?;

        let status = response.status();
        debug!(%status, "image response received");
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&error_body) {
                Ok(envelope) => envelope.error.message,
                Err(_) => error_body,
            };
            return Err(ImageApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let headers = response.headers().clone();
        let body = response.text().await?;
        let mut image_response: ImageResponse = serde_json::from_str(&body)?;
        image_response.set_headers(headers);
        Ok(image_response)
    }

    /// Assembles a multipart body on a blocking thread, since file sources are read synchronously.
    async fn assemble_form<F>(assemble: F) -> Result<(Vec<u8>, String), ImageApiError>
    where
        F: FnOnce(&mut dyn FormBuilder) -> Result<(), FormError> + Send + 'static,
    {
        let (body, content_type) = tokio::task::spawn_blocking(move || {
            let mut builder = MultipartFormBuilder::new(Vec::new());
            assemble(&mut builder)?;
            let content_type = builder.form_data_content_type();
            Ok::<_, FormError>((builder.into_inner(), content_type))
        })
        .await??;

        debug!(bytes = body.len(), "assembled multipart body");
        Ok((body, content_type))
    }

    /// Generates images from a prompt.
    ///
    /// # Arguments
    ///
    /// * `request` - The generation request, sent as a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or if the response cannot be parsed.
    pub async fn create_image(
        &self,
        request: ImageRequest,
    ) -> Result<ImageResponse, ImageApiError> {
        self.send_request(self.post(GENERATIONS_PATH).json(&request))
            .await
    }

    /// Edits one or more images.
    ///
    /// # Arguments
    ///
    /// * `request` - The edit request; its images and mask are read while the
    ///   multipart body is assembled
    ///
    /// # Errors
    ///
    /// Returns an error if a source image cannot be read, if the API request
    /// fails or if the response cannot be parsed.
    pub async fn create_edit_image(
        &self,
        request: ImageEditRequest,
    ) -> Result<ImageResponse, ImageApiError> {
        let (body, content_type) =
            Self::assemble_form(move |builder| write_edit_form(builder, &request)).await?;

        self.send_request(
            self.post(EDITS_PATH)
                .header(CONTENT_TYPE, content_type)
                .body(body),
        )
        .await
    }

    /// Creates variations of an image.
    ///
    /// # Arguments
    ///
    /// * `request` - The variation request; its file is read to the end and
    ///   closed once the body is assembled
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read, if the API request fails
    /// or if the response cannot be parsed.
    pub async fn create_variation_image(
        &self,
        mut request: ImageVariRequest,
    ) -> Result<ImageResponse, ImageApiError> {
        let (body, content_type) =
            Self::assemble_form(move |builder| write_variation_form(builder, &mut request))
                .await?;

        self.send_request(
            self.post(VARIATIONS_PATH)
                .header(CONTENT_TYPE, content_type)
                .body(body),
        )
        .await
    }
}
