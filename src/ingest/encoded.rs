use crate::error::{Result, VisionLabError};
use crate::ingest::media_type::media_type_for;
use crate::ingest::preview::PreviewHandle;
use base64::Engine;
use std::path::Path;
use tracing::{debug, info};

/// A selected image, ready for transport and local preview.
///
/// `payload` is the bare standard-alphabet base64 encoding of the file bytes,
/// with no `data:` URL framing; the gateway adds whatever framing the wire
/// format needs. All three fields describe the same byte source: they are
/// produced from a single read of the file.
#[derive(Debug)]
pub struct EncodedImage {
    pub payload: String,
    pub media_type: String,
    pub preview: PreviewHandle,
}

impl EncodedImage {
    /// Decoded length of the payload, in bytes.
    pub fn byte_len(&self) -> usize {
        base64::engine::general_purpose::STANDARD
            .decode(&self.payload)
            .map(|b| b.len())
            .unwrap_or(0)
    }
}

/// Convert a selected file into an [`EncodedImage`].
///
/// Fails with [`VisionLabError::InvalidFileType`] before any file I/O when the
/// file's media type does not start with `image/`.
pub async fn ingest(path: impl AsRef<Path>) -> Result<EncodedImage> {
    let path = path.as_ref();
    let media_type = media_type_for(path);

    if !media_type.starts_with("image/") {
        return Err(VisionLabError::InvalidFileType(media_type.to_string()));
    }

    info!("Ingesting image {}", path.display());

    let bytes = tokio::fs::read(path).await?;
    let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let preview = PreviewHandle::materialize(&bytes, media_type).await?;

    debug!("Encoded {} bytes as {} ({} base64 chars)", bytes.len(), media_type, payload.len());

    Ok(EncodedImage {
        payload,
        media_type: media_type.to_string(),
        preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file_with(suffix: &str, bytes: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[tokio::test]
    async fn test_ingest_rejects_non_image() {
        let file = temp_file_with(".txt", b"plain text");

        let result = ingest(file.path()).await;

        match result {
            Err(VisionLabError::InvalidFileType(media_type)) => {
                assert_eq!(media_type, "text/plain");
            }
            other => panic!("Expected InvalidFileType, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_ingest_rejects_unknown_extension() {
        let file = temp_file_with(".dat", b"\x00\x01");

        let result = ingest(file.path()).await;

        assert!(matches!(result, Err(VisionLabError::InvalidFileType(_))));
    }

    #[tokio::test]
    async fn test_ingest_round_trips_bytes() {
        let original = b"fake_png_bytes_\x89PNG";
        let file = temp_file_with(".png", original);

        let image = ingest(file.path()).await.unwrap();

        assert_eq!(image.media_type, "image/png");
        let decoded =
            base64::engine::general_purpose::STANDARD.decode(&image.payload).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(image.byte_len(), original.len());
    }

    #[tokio::test]
    async fn test_ingest_payload_has_no_data_url_prefix() {
        let file = temp_file_with(".jpg", b"fake_jpeg");

        let image = ingest(file.path()).await.unwrap();

        assert!(!image.payload.starts_with("data:"));
        assert!(!image.payload.contains(','));
    }

    #[tokio::test]
    async fn test_ingest_materializes_preview_of_same_bytes() {
        let original = b"fake_webp_bytes";
        let file = temp_file_with(".webp", original);

        let image = ingest(file.path()).await.unwrap();

        let preview_path = image.preview.resolve().unwrap();
        assert_eq!(std::fs::read(preview_path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_ingest_missing_file_is_io_error() {
        let result = ingest("/nonexistent/visionlab/cat.png").await;

        assert!(matches!(result, Err(VisionLabError::IoError(_))));
    }
}
