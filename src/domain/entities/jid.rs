use serde::{Deserialize, Serialize};
use std::fmt;

/// Server part used for individual accounts
pub const USER_SERVER: &str = "s.whatsapp.net";
/// Server part used for group chats
pub const GROUP_SERVER: &str = "g.us";
/// Server part used for broadcast lists and status updates
pub const BROADCAST_SERVER: &str = "broadcast";

/// A WhatsApp address (`user@server`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jid(String);

impl Jid {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build a JID for an individual account from a phone number
    pub fn from_phone(phone: &str) -> Self {
        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        Self(format!("{}@{}", digits, USER_SERVER))
    }

    pub fn user(&self) -> &str {
        self.0.split_once('@').map(|(user, _)| user).unwrap_or(&self.0)
    }

    pub fn server(&self) -> &str {
        self.0.split_once('@').map(|(_, server)| server).unwrap_or("")
    }

    pub fn is_group(&self) -> bool {
        self.server() == GROUP_SERVER
    }

    /// Broadcast lists and `status@broadcast`
    pub fn is_broadcast(&self) -> bool {
        self.0.starts_with("broadcast") || self.server() == BROADCAST_SERVER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Jid {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
