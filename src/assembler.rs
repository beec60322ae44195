use crate::attachment::{encode_binary, encode_text_excerpt, guess_mime, MediaKind};
use crate::error::Result;
use crate::models::ContentPart;
use std::path::PathBuf;

/// Raw input for one user turn. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub image: Option<PathBuf>,
    pub video: Option<PathBuf>,
}

impl UserInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }

    pub fn with_video(mut self, path: impl Into<PathBuf>) -> Self {
        self.video = Some(path.into());
        self
    }
}

/// Build the content parts of a user message.
///
/// Parts are ordered text, file excerpt, image, video. Empty input yields an
/// empty vector; whether to send it is up to the caller.
pub fn assemble_user_message(input: &UserInput, max_file_chars: usize) -> Result<Vec<ContentPart>> {
    let mut parts = Vec::new();

    if let Some(text) = input.text.as_deref().filter(|t| !t.is_empty()) {
        parts.push(ContentPart::text(text));
    }

    if let Some(path) = &input.file {
        parts.push(ContentPart::text(encode_text_excerpt(path, max_file_chars)?));
    }

    if let Some(path) = &input.image {
        let uri = encode_binary(path, guess_mime(path, MediaKind::Image))?;
        parts.push(ContentPart::image(uri));
    }

    if let Some(path) = &input.video {
        let uri = encode_binary(path, guess_mime(path, MediaKind::Video))?;
        parts.push(ContentPart::video(uri));
    }

    Ok(parts)
}
