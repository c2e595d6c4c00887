//! Reading image files from disk for the composer.

use std::path::Path;

use iris_common::IrisError;

/// MIME type for the image formats Gemini accepts inline, keyed by extension.
pub(crate) fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Read an image file, refusing non-images and files over `max_bytes`.
pub(crate) async fn load_image(
    path: &Path,
    max_bytes: u64,
) -> Result<(Vec<u8>, &'static str), IrisError> {
    let mime = mime_for_path(path).ok_or_else(|| {
        IrisError::Attachment(format!("{} is not a supported image type", path.display()))
    })?;

    let size = tokio::fs::metadata(path).await?.len();
    if size > max_bytes {
        return Err(IrisError::Attachment(format!(
            "{} is {size} bytes, limit is {max_bytes}",
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    Ok((bytes, mime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_is_case_insensitive() {
        assert_eq!(mime_for_path(Path::new("cat.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("a/b/photo.JpEg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_for_path(Path::new("README")), None);
    }

    #[tokio::test]
    async fn loads_small_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let (bytes, mime) = load_image(&path, 1024).await.unwrap();
        assert_eq!(bytes, b"GIF89a");
        assert_eq!(mime, "image/gif");
    }

    #[tokio::test]
    async fn refuses_oversized_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        std::fs::write(&path, vec![0u8; 64]).unwrap();

        let err = load_image(&path, 16).await.unwrap_err();
        assert!(matches!(err, IrisError::Attachment(_)));
        assert!(err.to_string().contains("limit is 16"));
    }

    #[tokio::test]
    async fn refuses_non_image_before_reading() {
        let err = load_image(Path::new("/definitely/missing.txt"), 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, IrisError::Attachment(_)));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = load_image(Path::new("/definitely/missing.png"), 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, IrisError::Io(_)));
    }
}
