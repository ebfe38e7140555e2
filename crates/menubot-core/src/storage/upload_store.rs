//! Upload store trait and filename validation.
//!
//! Uploaded names come straight from multipart headers, so they are reduced
//! to a flat, conservative character set before they ever reach a filesystem
//! path or a URL.

use std::path::Path;

use menubot_types::error::UploadError;
use menubot_types::menu::{ALLOWED_UPLOAD_EXTENSIONS, StoredUpload};

/// Trait for storing uploaded menu images and models.
///
/// Implementations live in menubot-infra.
pub trait UploadStore: Send + Sync {
    /// Write `data` under `filename`, replacing any existing file.
    ///
    /// `filename` must already be sanitized; see [`accept_upload`].
    fn save(
        &self,
        filename: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<StoredUpload, UploadError>> + Send;

    /// Directory the stored files are served from.
    fn dir(&self) -> &Path;
}

/// Reduce a client-supplied filename to a safe, flat name.
///
/// Directory components are dropped, whitespace becomes `_`, any character
/// outside `[A-Za-z0-9._-]` is removed and leading dots are stripped. The
/// result may be empty.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Whether `filename` carries one of the allowed extensions (case-insensitive).
pub fn is_allowed_upload(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_UPLOAD_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Validate a client-supplied filename and return its sanitized form.
pub fn accept_upload(raw: &str) -> Result<String, UploadError> {
    if raw.trim().is_empty() {
        return Err(UploadError::EmptyFilename);
    }
    let name = sanitize_filename(raw);
    if !is_allowed_upload(&name) {
        return Err(UploadError::DisallowedType);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\dish.png"), "dish.png");
    }

    #[test]
    fn test_sanitize_character_set() {
        assert_eq!(sanitize_filename("my burger (1).glb"), "my_burger_1.glb");
        assert_eq!(sanitize_filename("..hidden.png"), "hidden.png");
        assert_eq!(sanitize_filename("naïve-dish.jpg"), "nave-dish.jpg");
    }

    #[test]
    fn test_sanitized_names_never_contain_separators() {
        for raw in ["a/b/c.png", "..\\..\\x.gif", "/", "a b/c d.glb"] {
            let name = sanitize_filename(raw);
            assert!(!name.contains('/') && !name.contains('\\'), "{raw} -> {name}");
        }
    }

    #[test]
    fn test_allowed_extensions_case_insensitive() {
        assert!(is_allowed_upload("dish.PNG"));
        assert!(is_allowed_upload("model.gltf"));
        assert!(!is_allowed_upload("script.exe"));
        assert!(!is_allowed_upload("png"));
        assert!(!is_allowed_upload(".png"));
    }

    #[test]
    fn test_accept_upload_errors() {
        assert!(matches!(accept_upload(""), Err(UploadError::EmptyFilename)));
        assert!(matches!(accept_upload("notes.txt"), Err(UploadError::DisallowedType)));
        assert!(matches!(accept_upload("dir/"), Err(UploadError::DisallowedType)));
        assert_eq!(accept_upload("Big Burger.glb").unwrap(), "Big_Burger.glb");
    }
}
