use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::forms::UploadedFile;

pub const ART_FOLDER: &str = "art_images";
pub const PROFILE_FOLDER: &str = "profile_pics";

/// Blob store for uploaded images.
///
/// Files are content addressed: `<root>/<folder>/<sha256>.<ext>`. Records keep the
/// path relative to the root; the same path is served under `/media`.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save(&self, folder: &str, upload: &UploadedFile) -> Result<String> {
        let digest = Sha256::digest(&upload.bytes);
        let extension = upload.extension().unwrap_or_else(|| "bin".to_string());
        let relative = format!("{}/{:x}.{}", folder, digest, extension);

        tokio::fs::create_dir_all(self.root.join(folder)).await?;
        tokio::fs::write(self.root.join(&relative), &upload.bytes).await?;

        tracing::debug!(
            "Stored upload {} ({} bytes) as {}",
            upload.file_name,
            upload.bytes.len(),
            relative
        );

        Ok(relative)
    }

    /// Public URL for a stored media path
    pub fn url(path: &str) -> String {
        format!("/media/{}", path.trim_start_matches('/'))
    }
}
