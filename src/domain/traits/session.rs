use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{
    Credentials, EventBatch, Jid, MediaAttachment, ProtocolVersion, Reply,
};

/// Materializes media attachments as bytes
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn download_media(&self, media: &MediaAttachment) -> Result<Vec<u8>, BotError>;
}

/// A live connection to the messaging network
#[async_trait]
pub trait Session: MediaSource {
    /// Wait for the next batch of events. `None` means the stream ended.
    async fn next_batch(&mut self) -> Option<EventBatch>;

    /// Send a reply to a chat, returns the sent message id
    async fn send(&self, to: &Jid, reply: Reply) -> Result<String, BotError>;

    /// Request a pairing code for linking this device to a phone number
    async fn request_pairing_code(
        &self,
        phone_number: &str,
        custom_code: Option<&str>,
    ) -> Result<String, BotError>;
}

/// Session provider - abstraction over the messaging protocol library
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Session: Session;

    /// Latest protocol version and whether it is the newest known one
    async fn latest_version(&self) -> Result<(ProtocolVersion, bool), BotError>;

    async fn connect(
        &self,
        version: ProtocolVersion,
        credentials: Credentials,
    ) -> Result<Self::Session, BotError>;
}
