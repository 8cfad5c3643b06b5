//! Local content store for uploaded cover images

use std::path::PathBuf;

use chrono::Utc;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct CoverStorage {
    dir: PathBuf,
}

impl CoverStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write an upload as `<dir>/<epoch-millis>-<name>` and return that path.
    ///
    /// Only the last component of `original_name` is kept, so a client
    /// cannot write outside the upload directory.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {}", e)))?;

        let file_name = format!("{}-{}", Utc::now().timestamp_millis(), sanitize_file_name(original_name));
        let path = self.dir.join(file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write upload {}: {}", path.display(), e)))?;

        tracing::debug!("Stored cover image at {}", path.display());
        Ok(path.to_string_lossy().into_owned())
    }
}

fn sanitize_file_name(name: &str) -> String {
    // Browsers on Windows may send backslash-separated paths
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    match last {
        "" | "." | ".." => "cover".to_string(),
        other => other.to_string(),
    }
}
