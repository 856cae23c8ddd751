//! Token accounting returned alongside image results.

use serde::{Deserialize, Serialize};

/// Token usage for a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: u64,
    /// Tokens in the completion.
    pub completion_tokens: u64,
    /// Total tokens used.
    pub total_tokens: u64,
    /// Breakdown of prompt tokens.
    pub prompt_tokens_details: Option<PromptTokensDetails>,
    /// Breakdown of completion tokens.
    pub completion_tokens_details: Option<CompletionTokensDetails>,
    /// Input tokens (image endpoints).
    pub input_tokens: u64,
    /// Output tokens (image endpoints).
    pub output_tokens: u64,
    /// Breakdown of input tokens.
    #[serde(deserialize_with = "super::null_as_default")]
    pub input_tokens_details: InputTokensDetails,
}

/// Breakdown of tokens used in a completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionTokensDetails {
    /// Audio tokens.
    pub audio_tokens: u64,
    /// Reasoning tokens.
    pub reasoning_tokens: u64,
    /// Cached tokens.
    pub cached_tokens: u64,
    /// Internally cached tokens.
    pub cached_tokens_internal: u64,
    /// Text tokens.
    pub text_tokens: u64,
    /// Image tokens.
    pub image_tokens: u64,
}

/// Breakdown of tokens used in the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTokensDetails {
    /// Audio tokens.
    pub audio_tokens: u64,
    /// Cached tokens.
    pub cached_tokens: u64,
    /// Reasoning tokens.
    pub reasoning_tokens: u64,
    /// Text tokens.
    pub text_tokens: u64,
}

/// Breakdown of input tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputTokensDetails {
    /// Text tokens.
    pub text_tokens: u64,
    /// Image tokens.
    pub image_tokens: u64,
}
