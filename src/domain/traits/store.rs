use async_trait::async_trait;

use crate::application::errors::StorageError;
use crate::domain::entities::Credentials;

/// Credential persistence
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load stored credentials, or empty ones on first run
    async fn load(&self) -> Result<Credentials, StorageError>;

    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError>;
}
