use crate::error::Result;
use crate::ingest::encoded::{ingest, EncodedImage};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stateful image-selection component.
///
/// Stands in for a file-selection control: it holds at most one
/// [`EncodedImage`], releases the previous preview whenever the selection is
/// replaced or cleared, and mirrors the control's value so that re-selecting
/// the path already held is a no-op until [`ImagePicker::clear`] resets it.
#[derive(Debug, Default)]
pub struct ImagePicker {
    selected: Option<EncodedImage>,
    control_value: Option<PathBuf>,
}

impl ImagePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the file at `path`, ingesting it into an [`EncodedImage`].
    ///
    /// Returns `Ok(true)` when a new image was installed and `Ok(false)` when
    /// the path matches the control's current value (the control does not
    /// re-fire for an unchanged value). A failed selection leaves the current
    /// selection and control value untouched.
    pub async fn select(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();

        if self.control_value.as_deref() == Some(path) {
            debug!("Selection unchanged, ignoring {}", path.display());
            return Ok(false);
        }

        // Ingest before touching the current selection so a rejected file
        // cannot disturb it.
        let image = ingest(path).await?;

        if let Some(mut previous) = self.selected.take() {
            previous.preview.revoke();
        }

        info!("Selected image {} ({})", path.display(), image.media_type);
        self.selected = Some(image);
        self.control_value = Some(path.to_path_buf());

        Ok(true)
    }

    /// Discard the current selection, releasing its preview, and reset the
    /// control value so the same path can be selected again.
    pub fn clear(&mut self) {
        if let Some(mut previous) = self.selected.take() {
            previous.preview.revoke();
            debug!("Cleared image selection");
        }
        self.control_value = None;
    }

    pub fn current(&self) -> Option<&EncodedImage> {
        self.selected.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisionLabError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file_with(suffix: &str, bytes: &[u8]) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[tokio::test]
    async fn test_select_installs_image() {
        let file = temp_file_with(".png", b"png_bytes");
        let mut picker = ImagePicker::new();

        let installed = picker.select(file.path()).await.unwrap();

        assert!(installed);
        let image = picker.current().unwrap();
        assert_eq!(image.media_type, "image/png");
        assert!(!image.preview.is_revoked());
    }

    #[tokio::test]
    async fn test_reselecting_same_path_is_noop() {
        let file = temp_file_with(".png", b"png_bytes");
        let mut picker = ImagePicker::new();

        picker.select(file.path()).await.unwrap();
        let first_id = picker.current().unwrap().preview.id();

        let installed = picker.select(file.path()).await.unwrap();

        assert!(!installed);
        assert_eq!(picker.current().unwrap().preview.id(), first_id);
    }

    #[tokio::test]
    async fn test_replacement_releases_previous_preview() {
        let first = temp_file_with(".png", b"first");
        let second = temp_file_with(".jpg", b"second");
        let mut picker = ImagePicker::new();

        picker.select(first.path()).await.unwrap();
        let first_preview = picker.current().unwrap().preview.resolve().unwrap().to_path_buf();

        picker.select(second.path()).await.unwrap();

        assert!(!first_preview.exists());
        assert_eq!(picker.current().unwrap().media_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_rejected_selection_leaves_state_untouched() {
        let image_file = temp_file_with(".png", b"png_bytes");
        let text_file = temp_file_with(".txt", b"not an image");
        let mut picker = ImagePicker::new();

        picker.select(image_file.path()).await.unwrap();

        let result = picker.select(text_file.path()).await;

        assert!(matches!(result, Err(VisionLabError::InvalidFileType(_))));
        let image = picker.current().expect("prior selection should survive");
        assert_eq!(image.media_type, "image/png");
        assert!(!image.preview.is_revoked());
    }

    #[tokio::test]
    async fn test_clear_releases_preview_and_resets_control() {
        let file = temp_file_with(".png", b"png_bytes");
        let mut picker = ImagePicker::new();

        picker.select(file.path()).await.unwrap();
        let preview_path = picker.current().unwrap().preview.resolve().unwrap().to_path_buf();

        picker.clear();

        assert!(picker.is_empty());
        assert!(!preview_path.exists());

        // The control was reset, so the same path is accepted again.
        let installed = picker.select(file.path()).await.unwrap();
        assert!(installed);
    }

    #[tokio::test]
    async fn test_clear_on_empty_picker_is_noop() {
        let mut picker = ImagePicker::new();
        picker.clear();
        assert!(picker.is_empty());
    }
}
