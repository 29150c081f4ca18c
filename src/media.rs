//! Media resolution for question and explanation images.
//!
//! Dataset files reference images relative to their own folder, written with
//! whichever separator the producing machine used. The rendered document is
//! handed to a separate renderer process that may run from any working
//! directory (or a sandbox), so resolved media are inlined as base64 data URIs
//! rather than linked by path.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::debug;
use std::path::{Path, PathBuf};

/// The bytes of a resolved media file and its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Media {
    /// Encode as a `data:` URI suitable for an `<img src="...">` attribute.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }
}

/// Turn a relative reference using either `/` or `\` separators into a path for
/// the host platform. Empty and `.` components are dropped.
pub fn normalize_reference(reference: &str) -> PathBuf {
    reference
        .split(['/', '\\'])
        .filter(|component| !component.is_empty() && *component != ".")
        .collect()
}

/// Resolve `reference` against `base_path`.
///
/// Returns `None` when the reference is empty or the file doesn't exist or
/// can't be read; callers leave the media element out in that case.
pub fn resolve(base_path: &Path, reference: &str) -> Option<Media> {
    let relative = normalize_reference(reference);
    if relative.as_os_str().is_empty() {
        return None;
    }

    let path = base_path.join(relative);
    if !path.is_file() {
        debug!("Media file {} not found, skipping", path.display());
        return None;
    }

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Failed to read media file {}: {e}", path.display());
            return None;
        }
    };

    let mime_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    Some(Media { mime_type, bytes })
}

#[cfg(test)]
mod test {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn normalizes_either_separator() {
        let expected: PathBuf = ["images", "sub", "a.png"].iter().collect();
        assert_eq!(normalize_reference("images/sub/a.png"), expected);
        assert_eq!(normalize_reference("images\\sub\\a.png"), expected);
        assert_eq!(normalize_reference("./images\\sub//a.png"), expected);
        assert_eq!(normalize_reference(""), PathBuf::new());
    }

    #[test]
    fn resolves_windows_style_reference() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        std::fs::create_dir(dir.path().join("images")).expect("can create images dir");
        std::fs::write(dir.path().join("images").join("q1.png"), PNG_HEADER)
            .expect("can write image");

        let media = resolve(dir.path(), "images\\q1.png").expect("image resolves");
        assert_eq!(media.mime_type, "image/png");
        assert_eq!(media.bytes, PNG_HEADER);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        assert_eq!(resolve(dir.path(), "images/nope.png"), None);
        assert_eq!(resolve(dir.path(), ""), None);
    }

    #[test]
    fn directories_are_not_media() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        std::fs::create_dir(dir.path().join("images")).expect("can create images dir");
        assert_eq!(resolve(dir.path(), "images"), None);
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        std::fs::write(dir.path().join("blob.qbankunknown"), b"abc").expect("can write file");

        let media = resolve(dir.path(), "blob.qbankunknown").expect("file resolves");
        assert_eq!(media.mime_type, "application/octet-stream");
    }

    #[test]
    fn data_uri_is_base64_tagged_with_mime() {
        let media = Media {
            mime_type: "image/jpeg".to_string(),
            bytes: b"hello".to_vec(),
        };
        assert_eq!(media.data_uri(), "data:image/jpeg;base64,aGVsbG8=");
    }
}
