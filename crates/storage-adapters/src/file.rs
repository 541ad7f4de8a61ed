//! JSON-file implementation of `CredentialStore`.
//!
//! The slot lives in a single file (e.g. `~/.local/state/photo-feed/credential.json`).
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash never leaves half a credential behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domains::{ApiError, Credential, CredentialStore, Result};
use tokio::fs;
use tracing::debug;

pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_error(error: std::io::Error) -> ApiError {
    ApiError::Storage(error.to_string())
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credential>> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(storage_error(error)),
        };
        let credential = serde_json::from_slice(&data)
            .map_err(|error| ApiError::Malformed(format!("{}: {error}", self.path.display())))?;
        Ok(Some(credential))
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage_error)?;
        }
        let data = serde_json::to_vec_pretty(credential)
            .map_err(|error| ApiError::Internal(error.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, &data).await.map_err(storage_error)?;
        fs::rename(&temp, &self.path).await.map_err(storage_error)?;
        debug!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(storage_error(error)),
        }
    }
}
