//! Revocable local previews for selected images.
//!
//! A [`PreviewHandle`] lets a presentation layer render the selected image
//! without re-reading the source file or touching the network. The handle owns
//! a uniquely-named copy in the OS temp directory; revoking the handle removes
//! the copy. Dropping an unrevoked handle releases the copy as well, so a
//! replaced or discarded selection never leaves a dangling preview behind.

use crate::error::Result;
use crate::ingest::media_type::extension_for;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// A short-lived, locally-resolvable reference to a preview copy of an image.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    path: Option<PathBuf>,
}

impl PreviewHandle {
    /// Write a preview copy of `bytes` and return a handle to it.
    pub(crate) async fn materialize(bytes: &[u8], media_type: &str) -> Result<Self> {
        let id = Uuid::new_v4();
        let path = std::env::temp_dir()
            .join(format!("visionlab-preview-{}.{}", id, extension_for(media_type)));

        tokio::fs::write(&path, bytes).await?;
        debug!("Materialized preview copy at {}", path.display());

        Ok(Self {
            id,
            path: Some(path),
        })
    }

    /// Unique identity of this handle.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resolve the handle to the preview copy on disk.
    ///
    /// Returns `None` once the handle has been revoked.
    pub fn resolve(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_revoked(&self) -> bool {
        self.path.is_none()
    }

    /// Release the preview copy. Idempotent.
    pub fn revoke(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove preview copy {}: {}", path.display(), e);
            }
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let _ = std::fs::remove_file(&path);
        }
    }
}
