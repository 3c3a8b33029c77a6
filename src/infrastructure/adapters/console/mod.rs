//! Console adapter for development/testing
//!
//! Each stdin line becomes an incoming message from [`CONSOLE_CHAT`]. A line
//! of the form `img:<path> <caption>` arrives as an image with a caption.

use async_trait::async_trait;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::domain::entities::event::status;
use crate::domain::entities::{
    ConnectionUpdate, Credentials, DisconnectReason, EventBatch, Jid, MediaAttachment, Message,
    MessageBody, Payload, ProtocolVersion, Reply,
};
use crate::domain::traits::{LineSource, MediaSource, Session, SessionProvider};

pub const CONSOLE_CHAT: &str = "console@s.whatsapp.net";

const CONSOLE_VERSION: ProtocolVersion = ProtocolVersion([2, 3000, 1015901307]);
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTVWXYZ0123456789";

/// Handle to the adapter's line reader. The pairing prompt and every session
/// read through the same buffer, so no line is lost between them.
#[derive(Clone)]
pub struct ConsoleInput {
    lines: Arc<tokio::sync::Mutex<Box<dyn LineSource>>>,
}

#[async_trait]
impl LineSource for ConsoleInput {
    async fn next_line(&mut self) -> Result<Option<String>, BotError> {
        self.lines.lock().await.next_line().await
    }
}

/// Console session provider for local development
pub struct ConsoleAdapter {
    input: ConsoleInput,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self::from_lines(BufReader::new(tokio::io::stdin()).lines())
    }

    pub fn from_lines(source: impl LineSource + 'static) -> Self {
        let source: Box<dyn LineSource> = Box::new(source);
        Self {
            input: ConsoleInput {
                lines: Arc::new(tokio::sync::Mutex::new(source)),
            },
        }
    }

    /// Operator input for prompts that run before a session is driven
    pub fn input(&self) -> ConsoleInput {
        self.input.clone()
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionProvider for ConsoleAdapter {
    type Session = ConsoleSession;

    async fn latest_version(&self) -> Result<(ProtocolVersion, bool), BotError> {
        Ok((CONSOLE_VERSION, true))
    }

    async fn connect(
        &self,
        version: ProtocolVersion,
        credentials: Credentials,
    ) -> Result<ConsoleSession, BotError> {
        tracing::info!("Starting console session (dev mode, protocol v{})", version);
        if let Some(me) = &credentials.me {
            tracing::info!("Logged in as {}", me);
        }
        Ok(ConsoleSession {
            input: self.input(),
            pending: Mutex::new(VecDeque::from([EventBatch::connection(ConnectionUpdate::open())])),
            chat: Jid::new(CONSOLE_CHAT),
        })
    }
}

/// One console connection
pub struct ConsoleSession {
    input: ConsoleInput,
    pending: Mutex<VecDeque<EventBatch>>,
    chat: Jid,
}

impl ConsoleSession {
    fn queue(&self, batch: EventBatch) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.push_back(batch);
        }
    }

    fn pop_pending(&self) -> Option<EventBatch> {
        self.pending.lock().ok().and_then(|mut p| p.pop_front())
    }
}

/// Turn one console line into a message
pub fn parse_line(chat: &Jid, line: &str) -> Message {
    let line = line.trim();
    let body = match line.strip_prefix("img:") {
        Some(rest) => {
            let (path, caption) = rest.split_once(' ').unwrap_or((rest, ""));
            let mut image = MediaAttachment::image(path);
            if !caption.is_empty() {
                image = image.with_caption(caption.trim());
            }
            MessageBody {
                image: Some(image),
                ..MessageBody::default()
            }
        }
        None => MessageBody::text(line),
    };
    Message::new(chat.clone(), body).with_push_name("console")
}

#[async_trait]
impl MediaSource for ConsoleSession {
    async fn download_media(&self, media: &MediaAttachment) -> Result<Vec<u8>, BotError> {
        Ok(tokio::fs::read(&media.location).await?)
    }
}

#[async_trait]
impl Session for ConsoleSession {
    async fn next_batch(&mut self) -> Option<EventBatch> {
        if let Some(batch) = self.pop_pending() {
            return Some(batch);
        }

        match self.input.next_line().await {
            Ok(Some(line)) => Some(EventBatch::notify(vec![parse_line(&self.chat, &line)])),
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                None
            }
        }
    }

    async fn send(&self, to: &Jid, reply: Reply) -> Result<String, BotError> {
        let forwarded = reply
            .forwarded
            .as_ref()
            .map(|f| format!("[forwarded x{}] ", f.score))
            .unwrap_or_default();
        match &reply.payload {
            Payload::Text(text) => println!("[BOT -> {}] {}{}", to.user(), forwarded, text),
            Payload::Sticker(bytes) => println!("[BOT -> {}] <sticker, {} bytes>", to.user(), bytes.len()),
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn request_pairing_code(
        &self,
        phone_number: &str,
        custom_code: Option<&str>,
    ) -> Result<String, BotError> {
        let code = match custom_code {
            Some(code) => code.to_uppercase(),
            None => {
                let mut rng = rand::rng();
                (0..8)
                    .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
                    .collect()
            }
        };

        // Linking completes immediately: new identity, then a restart like a real server
        self.queue(EventBatch::credentials(Credentials {
            me: Some(Jid::from_phone(phone_number)),
            keys: serde_json::json!({ "console": true }),
        }));
        self.queue(EventBatch::connection(ConnectionUpdate::closed(Some(
            DisconnectReason::new(status::RESTART_REQUIRED, "restart required after pairing"),
        ))));

        Ok(code)
    }
}
