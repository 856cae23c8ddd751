//! Streaming `multipart/form-data` encoding for image uploads.
//!
//! [`FormBuilder`] is the capability set the image endpoints write through;
//! [`MultipartFormBuilder`] is the implementation that encodes parts straight
//! into any [`std::io::Write`] sink.

mod source;
mod writer;

use std::io::{self, Read};

use thiserror::Error;

pub use source::{FileHeader, NamedFile, UploadedFile};
pub use writer::MultipartFormBuilder;

/// Errors raised while assembling a multipart body.
#[derive(Debug, Error)]
pub enum FormError {
    /// A file part had no usable filename. Raised before any byte of the part is written.
    #[error("Invalid form file: {0}")]
    Validation(String),
    /// Reading a file source or writing to the sink failed.
    #[error("Form I/O failed: {0}")]
    Io(#[from] io::Error),
    /// A write was attempted after the form was closed.
    #[error("Multipart form is already closed")]
    Closed,
    /// The caller-supplied boundary is not a valid multipart boundary.
    #[error("Invalid multipart boundary: {0}")]
    InvalidBoundary(String),
}

/// Operations for building a multipart form, part by part, in call order.
///
/// Parts land in the body in exactly the order these methods are called.
/// Once [`FormBuilder::close`] has succeeded or failed, every further write
/// returns [`FormError::Closed`].
pub trait FormBuilder {
    /// Writes a scalar field.
    fn write_field(&mut self, name: &str, value: &str) -> Result<(), FormError>;

    /// Streams the remaining content of an open file, named after the path it was opened with.
    ///
    /// The handle stays open; closing it is the caller's responsibility.
    fn create_form_file(&mut self, name: &str, file: &mut NamedFile) -> Result<(), FormError>;

    /// Streams an uploaded file, named by its own metadata.
    ///
    /// The descriptor's reader is opened for the duration of this call only.
    fn create_form_file_header(
        &mut self,
        name: &str,
        header: &dyn UploadedFile,
    ) -> Result<(), FormError>;

    /// Streams an arbitrary reader under `filename`, reduced to its last path component.
    fn create_form_file_reader(
        &mut self,
        name: &str,
        reader: &mut dyn Read,
        filename: &str,
    ) -> Result<(), FormError>;

    /// Writes the closing boundary.
    fn close(&mut self) -> Result<(), FormError>;

    /// The `Content-Type` header value, including the boundary.
    fn form_data_content_type(&self) -> String;
}
