//! In-memory session provider and stores for tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::application::errors::{BotError, StorageError};
use crate::domain::entities::{
    Credentials, EventBatch, Jid, MediaAttachment, ProtocolVersion, Reply,
};
use crate::domain::traits::{CredentialStore, MediaSource, Session, SessionProvider};

/// Pairing code handed out when no custom code is requested
pub const DEFAULT_PAIRING_CODE: &str = "WABOTPAI";

/// Everything sessions did, shared across reconnects
#[derive(Default)]
pub struct SessionLog {
    sent: Mutex<Vec<(Jid, Reply)>>,
    pairing: Mutex<Vec<(String, Option<String>)>>,
    failing_sends: Mutex<usize>,
}

impl SessionLog {
    pub fn sent(&self) -> Vec<(Jid, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn pairing_requests(&self) -> Vec<(String, Option<String>)> {
        self.pairing.lock().unwrap().clone()
    }
}

/// Scripted session: yields queued batches, records sends
#[derive(Default)]
pub struct MemorySession {
    batches: VecDeque<EventBatch>,
    log: Arc<SessionLog>,
}

impl MemorySession {
    pub fn new(batches: Vec<EventBatch>, log: Arc<SessionLog>) -> Self {
        Self {
            batches: batches.into(),
            log,
        }
    }

    pub fn sent(&self) -> Vec<(Jid, Reply)> {
        self.log.sent()
    }

    pub fn pairing_requests(&self) -> Vec<(String, Option<String>)> {
        self.log.pairing_requests()
    }

    /// Make the next `n` sends fail
    pub fn fail_next_sends(&self, n: usize) {
        *self.log.failing_sends.lock().unwrap() = n;
    }
}

#[async_trait]
impl MediaSource for MemorySession {
    async fn download_media(&self, media: &MediaAttachment) -> Result<Vec<u8>, BotError> {
        Err(BotError::Network(format!("no media at {}", media.location)))
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn next_batch(&mut self) -> Option<EventBatch> {
        self.batches.pop_front()
    }

    async fn send(&self, to: &Jid, reply: Reply) -> Result<String, BotError> {
        {
            let mut failing = self.log.failing_sends.lock().unwrap();
            if *failing > 0 {
                *failing -= 1;
                return Err(BotError::Network("send failed".to_string()));
            }
        }
        let mut sent = self.log.sent.lock().unwrap();
        sent.push((to.clone(), reply));
        Ok(format!("sent-{}", sent.len()))
    }

    async fn request_pairing_code(
        &self,
        phone_number: &str,
        custom_code: Option<&str>,
    ) -> Result<String, BotError> {
        self.log
            .pairing
            .lock()
            .unwrap()
            .push((phone_number.to_string(), custom_code.map(str::to_string)));
        Ok(custom_code.unwrap_or(DEFAULT_PAIRING_CODE).to_string())
    }
}

#[derive(Default)]
struct ProviderState {
    scripts: Mutex<VecDeque<Vec<EventBatch>>>,
    connected_with: Mutex<Vec<Credentials>>,
    log: Arc<SessionLog>,
}

/// Each `connect` returns a session playing the next script
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    state: Arc<ProviderState>,
}

impl ScriptedProvider {
    pub fn new(scripts: Vec<Vec<EventBatch>>) -> Self {
        let state = ProviderState {
            scripts: Mutex::new(scripts.into()),
            ..ProviderState::default()
        };
        Self {
            state: Arc::new(state),
        }
    }

    pub fn connects(&self) -> usize {
        self.state.connected_with.lock().unwrap().len()
    }

    pub fn connected_with(&self) -> Vec<Credentials> {
        self.state.connected_with.lock().unwrap().clone()
    }

    pub fn log(&self) -> Arc<SessionLog> {
        self.state.log.clone()
    }
}

#[async_trait]
impl SessionProvider for ScriptedProvider {
    type Session = MemorySession;

    async fn latest_version(&self) -> Result<(ProtocolVersion, bool), BotError> {
        Ok((ProtocolVersion([2, 3000, 1015901307]), true))
    }

    async fn connect(
        &self,
        _version: ProtocolVersion,
        credentials: Credentials,
    ) -> Result<MemorySession, BotError> {
        self.state.connected_with.lock().unwrap().push(credentials);
        let script = self
            .state
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BotError::Network("no scripted session left".to_string()))?;
        Ok(MemorySession::new(script, self.state.log.clone()))
    }
}

/// Media source with nothing to download
pub struct NoMedia;

#[async_trait]
impl MediaSource for NoMedia {
    async fn download_media(&self, media: &MediaAttachment) -> Result<Vec<u8>, BotError> {
        Err(BotError::Network(format!("no media at {}", media.location)))
    }
}

/// Returns the same bytes for every attachment
pub struct StaticMedia {
    bytes: Vec<u8>,
    requested: Mutex<Vec<String>>,
}

impl StaticMedia {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaSource for StaticMedia {
    async fn download_media(&self, media: &MediaAttachment) -> Result<Vec<u8>, BotError> {
        self.requested.lock().unwrap().push(media.location.clone());
        Ok(self.bytes.clone())
    }
}

/// Credential store kept in memory
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    credentials: Arc<Mutex<Credentials>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryCredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Arc::new(Mutex::new(credentials)),
            saves: Arc::default(),
        }
    }

    pub fn current(&self) -> Credentials {
        self.credentials.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Credentials, StorageError> {
        Ok(self.current())
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        *self.credentials.lock().unwrap() = credentials.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}
