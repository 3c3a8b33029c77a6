use super::{Jid, Message};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Disconnect status codes reported by the session provider
pub mod status {
    pub const LOGGED_OUT: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
    pub const CONNECTION_LOST: u16 = 408;
    pub const MULTIDEVICE_MISMATCH: u16 = 411;
    pub const CONNECTION_CLOSED: u16 = 428;
    pub const CONNECTION_REPLACED: u16 = 440;
    pub const BAD_SESSION: u16 = 500;
    pub const UNAVAILABLE_SERVICE: u16 = 503;
    pub const RESTART_REQUIRED: u16 = 515;

    /// Short name of a known status code
    pub fn describe(code: u16) -> Option<&'static str> {
        let name = match code {
            LOGGED_OUT => "logged out",
            FORBIDDEN => "forbidden",
            CONNECTION_LOST => "connection lost",
            MULTIDEVICE_MISMATCH => "multi-device mismatch",
            CONNECTION_CLOSED => "connection closed",
            CONNECTION_REPLACED => "connection replaced",
            BAD_SESSION => "bad session",
            UNAVAILABLE_SERVICE => "service unavailable",
            RESTART_REQUIRED => "restart required",
            _ => return None,
        };
        Some(name)
    }
}

/// Protocol version triple, e.g. `2.3000.1015901307`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolVersion(pub [u32; 3]);

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch] = self.0;
        write!(f, "{}.{}.{}", major, minor, patch)
    }
}

/// Persisted authentication state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Authenticated identity, absent until pairing completes
    pub me: Option<Jid>,
    /// Provider-owned key material, stored as-is
    #[serde(default)]
    pub keys: serde_json::Value,
}

impl Credentials {
    pub fn is_registered(&self) -> bool {
        self.me.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Close,
}

/// Cause attached to a closed connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectReason {
    pub status_code: Option<u16>,
    pub message: String,
}

impl DisconnectReason {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    pub fn is_logged_out(&self) -> bool {
        self.status_code == Some(status::LOGGED_OUT)
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => match status::describe(code) {
                Some(name) => write!(f, "{} (status {}, {})", self.message, code, name),
                None => write!(f, "{} (status {})", self.message, code),
            },
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUpdate {
    pub state: ConnectionState,
    pub last_disconnect: Option<DisconnectReason>,
}

impl ConnectionUpdate {
    pub fn open() -> Self {
        Self {
            state: ConnectionState::Open,
            last_disconnect: None,
        }
    }

    pub fn closed(reason: Option<DisconnectReason>) -> Self {
        Self {
            state: ConnectionState::Close,
            last_disconnect: reason,
        }
    }
}

/// `notify` is a live message, `append` is history sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertKind {
    Notify,
    Append,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessagesUpsert {
    pub kind: UpsertKind,
    pub messages: Vec<Message>,
}

/// One batch of named events delivered by the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    pub connection: Option<ConnectionUpdate>,
    pub credentials: Option<Credentials>,
    pub upsert: Option<MessagesUpsert>,
}

impl EventBatch {
    pub fn connection(update: ConnectionUpdate) -> Self {
        Self {
            connection: Some(update),
            ..Self::default()
        }
    }

    pub fn credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::default()
        }
    }

    pub fn notify(messages: Vec<Message>) -> Self {
        Self {
            upsert: Some(MessagesUpsert {
                kind: UpsertKind::Notify,
                messages,
            }),
            ..Self::default()
        }
    }
}
