//! File-based credential storage

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::errors::StorageError;
use crate::domain::entities::Credentials;
use crate::domain::traits::CredentialStore;

const CREDENTIALS_FILE: &str = "creds.json";

/// JSON credential file inside an auth directory
pub struct FileCredentialStore {
    base_path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn credentials_path(&self) -> PathBuf {
        self.base_path.join(CREDENTIALS_FILE)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Credentials, StorageError> {
        let path = self.credentials_path();
        if !tokio::fs::try_exists(&path).await? {
            tracing::info!("No stored credentials in {}", self.base_path.display());
            return Ok(Credentials::default());
        }

        let content = tokio::fs::read_to_string(&path).await?;
        serde_json::from_str(&content)
            .map_err(|e| StorageError::Serialization(format!("{}: {}", path.display(), e)))
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        self.init().await?;
        let content = serde_json::to_string_pretty(credentials)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        // write to a temp file, then rename over the old one
        let tmp = self.base_path.join(format!("{}.tmp", CREDENTIALS_FILE));
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, self.credentials_path()).await?;
        tracing::debug!("Credentials saved to {}", self.base_path.display());
        Ok(())
    }
}
