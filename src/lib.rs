#![deny(missing_docs)]

//! A Rust client library for OpenAI-style image endpoints.
//!
//! Generation requests go out as JSON. Edits and variations are encoded as
//! `multipart/form-data` by a streaming form builder, with fields written in
//! the exact order the API expects.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod images;
pub mod models;

pub use client::ImageClient;
pub use config::ClientConfig;
pub use error::ImageApiError;
