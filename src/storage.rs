//! Media storage for uploaded gallery images.
//!
//! Files live under the configured media root as
//! `houses/{house_id}/{uuid}.{ext}`; database rows reference them by that
//! relative path. Writes happen before the aggregate transaction commits,
//! so a failed save unlinks whatever it already wrote.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use uuid::Uuid;

/// File extensions accepted for gallery uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Returns the lowercase extension of `file_name` when it is an accepted
/// image type.
pub fn image_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Handle to the media root directory, shared through the application state.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a stored relative path.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Writes the bytes of one gallery upload and returns the relative path
    /// recorded in the database.
    pub async fn store_house_image(
        &self,
        house_id: i32,
        original_file_name: &str,
        bytes: &[u8],
    ) -> Result<String> {
        let ext = image_extension(original_file_name)
            .with_context(|| format!("unsupported image file name: {original_file_name}"))?;
        let relative = format!("houses/{}/{}.{}", house_id, Uuid::new_v4(), ext);

        let target = self.resolve(&relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating media directory {}", parent.display()))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .with_context(|| format!("writing media file {}", target.display()))?;

        Ok(relative)
    }

    /// Best-effort unlink of stored files; used to reconcile the filesystem
    /// after a rolled-back save or a gallery replacement.
    pub async fn remove_files(&self, relative_paths: &[String]) {
        for relative in relative_paths {
            let target = self.resolve(relative);
            if let Err(err) = tokio::fs::remove_file(&target).await {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %target.display(), %err, "failed to remove media file");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension_accepts_known_types() {
        assert_eq!(image_extension("facade.JPG").as_deref(), Some("jpg"));
        assert_eq!(image_extension("plan.webp").as_deref(), Some("webp"));
    }

    #[test]
    fn test_image_extension_rejects_unknown_types() {
        assert!(image_extension("notes.txt").is_none());
        assert!(image_extension("noextension").is_none());
    }

    #[tokio::test]
    async fn test_store_and_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let relative = storage
            .store_house_image(7, "facade.png", b"not-really-a-png")
            .await
            .unwrap();
        assert!(relative.starts_with("houses/7/"));
        assert!(relative.ends_with(".png"));

        let absolute = storage.resolve(&relative);
        assert_eq!(tokio::fs::read(&absolute).await.unwrap(), b"not-really-a-png");

        storage.remove_files(std::slice::from_ref(&relative)).await;
        assert!(!absolute.exists());
    }

    #[tokio::test]
    async fn test_store_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let result = storage.store_house_image(1, "report.pdf", b"%PDF").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());
        storage
            .remove_files(&["houses/1/missing.png".to_string()])
            .await;
    }
}
