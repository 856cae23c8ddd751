//! The streaming multipart encoder.

use std::io::{self, Read, Write};

use rand::Rng;
use tracing::trace;

use super::{FormBuilder, FormError, NamedFile, UploadedFile};

/// Maximum boundary length allowed by RFC 2046.
const MAX_BOUNDARY_LEN: usize = 70;
/// Random bytes behind a generated boundary (hex-encoded to twice this length).
const BOUNDARY_RANDOM_BYTES: usize = 30;
/// Content type used when a filename gives no hint.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Encodes form parts into a sink as they are added.
///
/// Nothing is buffered here beyond a single part header: scalar values and
/// file contents go straight to the sink.
#[derive(Debug)]
pub struct MultipartFormBuilder<W> {
    sink: W,
    boundary: String,
    has_parts: bool,
    closed: bool,
}

impl<W: Write> MultipartFormBuilder<W> {
    /// Creates a builder over `sink` with a random boundary.
    pub fn new(sink: W) -> Self {
        let mut random = [0u8; BOUNDARY_RANDOM_BYTES];
        rand::thread_rng().fill(&mut random[..]);

        Self {
            sink,
            boundary: hex::encode(random),
            has_parts: false,
            closed: false,
        }
    }

    /// Creates a builder over `sink` with a caller-chosen boundary.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidBoundary`] unless the boundary is 1 to 70
    /// characters from the RFC 2046 set and does not end with a space.
    pub fn with_boundary(sink: W, boundary: impl Into<String>) -> Result<Self, FormError> {
        let boundary = boundary.into();
        validate_boundary(&boundary)?;

        Ok(Self {
            sink,
            boundary,
            has_parts: false,
            closed: false,
        })
    }

    /// The boundary delimiting parts of this form.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns the sink, with whatever has been written to it so far.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.closed {
            return Err(FormError::Closed);
        }
        Ok(())
    }

    /// Writes the delimiter and headers that open a new part.
    fn create_part(&mut self, headers: &[(&str, String)]) -> Result<(), FormError> {
        self.ensure_open()?;

        let mut head = String::new();
        if self.has_parts {
            head.push_str("\r\n");
        }
        head.push_str("--");
        head.push_str(&self.boundary);
        head.push_str("\r\n");
        for (key, value) in headers {
            head.push_str(key);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        self.sink.write_all(head.as_bytes())?;
        self.has_parts = true;
        Ok(())
    }

    /// Single streaming path shared by every file source.
    fn stream_file(
        &mut self,
        name: &str,
        filename: &str,
        reader: &mut dyn Read,
    ) -> Result<(), FormError> {
        self.ensure_open()?;
        if filename.is_empty() {
            return Err(FormError::Validation(format!(
                "filename cannot be empty (field \"{}\")",
                name
            )));
        }

        let content_type = mime_guess::from_path(filename)
            .first()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        self.create_part(&[
            (
                "Content-Disposition",
                format!(
                    "form-data; name=\"{}\"; filename=\"{}\"",
                    escape_quotes(name),
                    escape_quotes(filename)
                ),
            ),
            ("Content-Type", content_type),
        ])?;

        let copied = io::copy(reader, &mut self.sink)?;
        trace!(field = name, filename, bytes = copied, "wrote file part");
        Ok(())
    }
}

impl<W: Write> FormBuilder for MultipartFormBuilder<W> {
    fn write_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.create_part(&[(
            "Content-Disposition",
            format!("form-data; name=\"{}\"", escape_quotes(name)),
        )])?;
        self.sink.write_all(value.as_bytes())?;
        trace!(field = name, "wrote field");
        Ok(())
    }

    fn create_form_file(&mut self, name: &str, file: &mut NamedFile) -> Result<(), FormError> {
        let filename = file.name();
        self.stream_file(name, &filename, file)
    }

    fn create_form_file_header(
        &mut self,
        name: &str,
        header: &dyn UploadedFile,
    ) -> Result<(), FormError> {
        self.ensure_open()?;
        let mut reader = header.open()?;
        self.stream_file(name, header.filename(), &mut *reader)
    }

    fn create_form_file_reader(
        &mut self,
        name: &str,
        reader: &mut dyn Read,
        filename: &str,
    ) -> Result<(), FormError> {
        self.stream_file(name, base_name(filename), reader)
    }

    fn close(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        self.closed = true;

        let trailer = if self.has_parts {
            format!("\r\n--{}--\r\n", self.boundary)
        } else {
            format!("--{}--\r\n", self.boundary)
        };
        self.sink.write_all(trailer.as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }

    fn form_data_content_type(&self) -> String {
        let boundary = if self.boundary.contains(|c: char| "()<>@,;:\\\"/[]?= ".contains(c)) {
            format!("\"{}\"", self.boundary)
        } else {
            self.boundary.clone()
        };
        format!("multipart/form-data; boundary={}", boundary)
    }
}

fn validate_boundary(boundary: &str) -> Result<(), FormError> {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(FormError::InvalidBoundary(format!(
            "length must be between 1 and {}, got {}",
            MAX_BOUNDARY_LEN,
            boundary.len()
        )));
    }

    let last = boundary.len() - 1;
    for (i, c) in boundary.char_indices() {
        let allowed = c.is_ascii_alphanumeric()
            || "'()+_,-./:=?".contains(c)
            || (c == ' ' && i != last);
        if !allowed {
            return Err(FormError::InvalidBoundary(format!(
                "character {:?} at position {} is not allowed",
                c, i
            )));
        }
    }
    Ok(())
}

/// Backslash-escapes the characters that would end a quoted header value.
fn escape_quotes(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Last `/`-separated component of `path`, ignoring trailing slashes.
fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
