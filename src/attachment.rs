//! Turns attachment paths into inline payloads for the completion request.

use crate::error::{ChatError, Result};
use crate::models::DataUri;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_FILE_CHARS: usize = 12_000;
pub const FILE_MARKER: &str = "[FILE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ChatError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file fully and embed it as a base64 data URI.
pub fn encode_binary(path: &Path, mime_type: &str) -> Result<DataUri> {
    let bytes = read_bytes(path)?;
    log::debug!(
        "encoding {} ({} bytes) as {}",
        path.display(),
        bytes.len(),
        mime_type
    );
    DataUri::new(format!(
        "data:{};base64,{}",
        mime_type,
        BASE64_STANDARD.encode(bytes)
    ))
}

/// Read a file as text and return at most `max_chars` characters behind a
/// `[FILE]` marker line. Bytes that are not valid UTF-8 are dropped rather
/// than rejected, and truncation is not reported.
pub fn encode_text_excerpt(path: &Path, max_chars: usize) -> Result<String> {
    let bytes = read_bytes(path)?;
    let text = decode_ignoring_invalid(&bytes);

    let excerpt: String = text.chars().take(max_chars).collect();
    if excerpt.len() < text.len() {
        log::debug!(
            "truncated {} to its first {} characters",
            path.display(),
            max_chars
        );
    }

    Ok(format!("{}\n{}", FILE_MARKER, excerpt))
}

/// Decode UTF-8, skipping any invalid byte sequences.
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Guess a mime type from the file extension, falling back to PNG for
/// images and MP4 for video.
pub fn guess_mime(path: &Path, kind: MediaKind) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match (kind, ext.as_str()) {
        (MediaKind::Image, "jpg" | "jpeg") => "image/jpeg",
        (MediaKind::Image, "gif") => "image/gif",
        (MediaKind::Image, "webp") => "image/webp",
        (MediaKind::Image, "bmp") => "image/bmp",
        (MediaKind::Image, _) => "image/png",
        (MediaKind::Video, "webm") => "video/webm",
        (MediaKind::Video, "mov") => "video/quicktime",
        (MediaKind::Video, "mkv") => "video/x-matroska",
        (MediaKind::Video, "avi") => "video/x-msvideo",
        (MediaKind::Video, _) => "video/mp4",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn binary_file_becomes_data_uri() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pixel.png");
        fs::write(&path, b"hello").unwrap();

        let uri = encode_binary(&path, "image/png").unwrap();
        assert_eq!(uri.as_str(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn missing_file_is_file_read_error() {
        let path = PathBuf::from("/definitely/not/here.png");
        let err = encode_binary(&path, "image/png").unwrap_err();
        assert!(matches!(err, ChatError::FileRead { .. }));
    }

    #[test]
    fn excerpt_truncates_by_characters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "héllo wörld").unwrap();

        let excerpt = encode_text_excerpt(&path, 5).unwrap();
        assert_eq!(excerpt, "[FILE]\nhéllo");
    }

    #[test]
    fn excerpt_tolerates_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [b'o', b'k', 0xff, 0xfe, b'!']).unwrap();

        let excerpt = encode_text_excerpt(&path, 3).unwrap();
        assert_eq!(excerpt, "[FILE]\nok!");
    }

    #[test]
    fn excerpt_keeps_genuine_replacement_characters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.txt");
        let mut bytes = "a\u{FFFD}".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xc3, b'b']);
        fs::write(&path, bytes).unwrap();

        let excerpt = encode_text_excerpt(&path, DEFAULT_MAX_FILE_CHARS).unwrap();
        assert_eq!(excerpt, "[FILE]\na\u{FFFD}b");
    }

    #[test]
    fn mime_guessing_uses_extension() {
        assert_eq!(guess_mime(Path::new("a.JPG"), MediaKind::Image), "image/jpeg");
        assert_eq!(guess_mime(Path::new("a"), MediaKind::Image), "image/png");
        assert_eq!(guess_mime(Path::new("clip.webm"), MediaKind::Video), "video/webm");
        assert_eq!(guess_mime(Path::new("clip.bin"), MediaKind::Video), "video/mp4");
    }
}
