//! Writes image requests into a multipart form in the order the API expects.
//!
//! Both functions stop at the first failing builder call and return its error
//! unchanged; the form is closed only when every field was written.

use crate::form::{FormBuilder, FormError};
use crate::models::{ImageEditRequest, ImageVariRequest};

/// Returns the value only when it is set and non-empty.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Writes an edit request and closes the form.
///
/// Field order: `model`, `image`/`image[]`, `prompt`, `background`, `mask`,
/// `n`, `quality`, `response_format`, `size`, `user`.
pub fn write_edit_form(
    builder: &mut dyn FormBuilder,
    request: &ImageEditRequest,
) -> Result<(), FormError> {
    builder.write_field("model", &request.model)?;

    match request.image.as_slice() {
        [] => {}
        [image] => builder.create_form_file_header("image", image)?,
        images => {
            for image in images {
                builder.create_form_file_header("image[]", image)?;
            }
        }
    }

    builder.write_field("prompt", &request.prompt)?;

    if let Some(background) = non_empty(&request.background) {
        builder.write_field("background", background)?;
    }
    if let Some(mask) = &request.mask {
        builder.create_form_file_header("mask", mask)?;
    }
    if let Some(n) = request.n.filter(|n| *n != 0) {
        builder.write_field("n", &n.to_string())?;
    }
    if let Some(quality) = non_empty(&request.quality) {
        builder.write_field("quality", quality)?;
    }
    if let Some(response_format) = non_empty(&request.response_format) {
        builder.write_field("response_format", response_format)?;
    }
    if let Some(size) = non_empty(&request.size) {
        builder.write_field("size", size)?;
    }
    if let Some(user) = non_empty(&request.user) {
        builder.write_field("user", user)?;
    }

    builder.close()
}

/// Writes a variation request and closes the form.
///
/// Every field is written unconditionally: `image`, `n`, `size`, `response_format`.
pub fn write_variation_form(
    builder: &mut dyn FormBuilder,
    request: &mut ImageVariRequest,
) -> Result<(), FormError> {
    builder.create_form_file("image", &mut request.image)?;
    builder.write_field("n", &request.n.to_string())?;
    builder.write_field("size", &request.size)?;
    builder.write_field("response_format", &request.response_format)?;
    builder.close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FileHeader, NamedFile, UploadedFile};
    use std::io::{self, Read, Write};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Field(String, String),
        File(String, String, Vec<u8>),
        Close,
    }

    /// Records builder calls instead of encoding them, optionally failing at one call.
    #[derive(Default)]
    struct RecordingBuilder {
        calls: Vec<Call>,
        fail_at: Option<usize>,
    }

    impl RecordingBuilder {
        fn failing_at(call: usize) -> Self {
            Self {
                calls: Vec::new(),
                fail_at: Some(call),
            }
        }

        fn record(&mut self, call: Call) -> Result<(), FormError> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(FormError::Io(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "sink closed",
                )));
            }
            self.calls.push(call);
            Ok(())
        }

        fn names(&self) -> Vec<&str> {
            self.calls
                .iter()
                .map(|call| match call {
                    Call::Field(name, _) | Call::File(name, _, _) => name.as_str(),
                    Call::Close => "<close>",
                })
                .collect()
        }
    }

    impl FormBuilder for RecordingBuilder {
        fn write_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
            self.record(Call::Field(name.into(), value.into()))
        }

        fn create_form_file(&mut self, name: &str, file: &mut NamedFile) -> Result<(), FormError> {
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            self.record(Call::File(name.into(), file.name(), content))
        }

        fn create_form_file_header(
            &mut self,
            name: &str,
            header: &dyn UploadedFile,
        ) -> Result<(), FormError> {
            let mut content = Vec::new();
            header.open()?.read_to_end(&mut content)?;
            self.record(Call::File(name.into(), header.filename().into(), content))
        }

        fn create_form_file_reader(
            &mut self,
            name: &str,
            reader: &mut dyn Read,
            filename: &str,
        ) -> Result<(), FormError> {
            let mut content = Vec::new();
            reader.read_to_end(&mut content)?;
            self.record(Call::File(name.into(), filename.into(), content))
        }

        fn close(&mut self) -> Result<(), FormError> {
            self.record(Call::Close)
        }

        fn form_data_content_type(&self) -> String {
            "multipart/form-data; boundary=recording".into()
        }
    }

    fn png(name: &str) -> FileHeader {
        FileHeader::from_bytes(name, name.as_bytes().to_vec())
    }

    #[test]
    fn two_images_use_the_array_field_in_order() {
        let request = ImageEditRequest::builder()
            .image(vec![png("first.png"), png("second.png")])
            .prompt("add a hat")
            .model("gpt-image-1")
            .build();

        let mut builder = RecordingBuilder::default();
        write_edit_form(&mut builder, &request).unwrap();

        assert_eq!(
            builder.names(),
            ["model", "image[]", "image[]", "prompt", "<close>"]
        );
        assert_eq!(
            builder.calls[1],
            Call::File("image[]".into(), "first.png".into(), b"first.png".to_vec())
        );
        assert_eq!(
            builder.calls[2],
            Call::File("image[]".into(), "second.png".into(), b"second.png".to_vec())
        );
    }

    #[test]
    fn single_image_uses_the_singular_field() {
        let request = ImageEditRequest::builder()
            .image(vec![png("only.png")])
            .prompt("p")
            .build();

        let mut builder = RecordingBuilder::default();
        write_edit_form(&mut builder, &request).unwrap();
        assert_eq!(builder.names(), ["model", "image", "prompt", "<close>"]);
        assert_eq!(builder.calls[0], Call::Field("model".into(), String::new()));
    }

    #[test]
    fn populated_edit_fields_follow_the_fixed_order() {
        let request = ImageEditRequest::builder()
            .image(vec![png("a.png")])
            .prompt("p")
            .background("transparent")
            .mask(png("mask.png"))
            .model("dall-e-2")
            .n(3)
            .quality("hd")
            .response_format("b64_json")
            .size("512x512")
            .user("user-1")
            .build();

        let mut builder = RecordingBuilder::default();
        write_edit_form(&mut builder, &request).unwrap();

        assert_eq!(
            builder.names(),
            [
                "model",
                "image",
                "prompt",
                "background",
                "mask",
                "n",
                "quality",
                "response_format",
                "size",
                "user",
                "<close>"
            ]
        );
        assert_eq!(builder.calls[5], Call::Field("n".into(), "3".into()));
    }

    #[test]
    fn zero_and_empty_edit_options_are_skipped() {
        let request = ImageEditRequest::builder()
            .prompt("p")
            .n(0)
            .quality("")
            .size("")
            .build();

        let mut builder = RecordingBuilder::default();
        write_edit_form(&mut builder, &request).unwrap();
        assert_eq!(builder.names(), ["model", "prompt", "<close>"]);
    }

    #[test]
    fn variation_writes_every_field_even_when_zero() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"pixels").unwrap();

        let mut request = ImageVariRequest::builder()
            .image(NamedFile::open(tmp.path()).unwrap())
            .build();

        let mut builder = RecordingBuilder::default();
        write_variation_form(&mut builder, &mut request).unwrap();

        assert_eq!(
            builder.calls,
            [
                Call::File(
                    "image".into(),
                    tmp.path().to_string_lossy().into_owned(),
                    b"pixels".to_vec()
                ),
                Call::Field("n".into(), "0".into()),
                Call::Field("size".into(), String::new()),
                Call::Field("response_format".into(), String::new()),
                Call::Close,
            ]
        );
    }

    #[test]
    fn failure_stops_the_form_without_closing() {
        let request = ImageEditRequest::builder()
            .image(vec![png("a.png")])
            .prompt("p")
            .background("opaque")
            .n(2)
            .build();

        let mut builder = RecordingBuilder::failing_at(2);
        let err = write_edit_form(&mut builder, &request).unwrap_err();

        assert!(matches!(err, FormError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
        assert_eq!(builder.names(), ["model", "image"]);
        assert!(!builder.calls.contains(&Call::Close));
    }

    #[test]
    fn variation_failure_is_returned_unchanged() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"pixels").unwrap();

        let mut request = ImageVariRequest::builder()
            .image(NamedFile::open(tmp.path()).unwrap())
            .n(1)
            .build();

        let mut builder = RecordingBuilder::failing_at(1);
        assert!(write_variation_form(&mut builder, &mut request).is_err());
        assert_eq!(builder.names(), ["image"]);
    }
}
