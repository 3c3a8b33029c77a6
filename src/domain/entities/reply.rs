/// Forwarding score WhatsApp shows as "forwarded many times"
pub const FREQUENTLY_FORWARDED_SCORE: u32 = 999;

/// What a reply carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    /// Raw image bytes to be sent as a sticker
    Sticker(Vec<u8>),
}

/// Forwarded-message presentation metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forwarded {
    pub score: u32,
}

/// Outgoing reply built by a command handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub payload: Payload,
    /// Id of the message being quoted
    pub quoted: Option<String>,
    pub forwarded: Option<Forwarded>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            payload: Payload::Text(text.into()),
            quoted: None,
            forwarded: None,
        }
    }

    pub fn sticker(bytes: Vec<u8>) -> Self {
        Self {
            payload: Payload::Sticker(bytes),
            quoted: None,
            forwarded: None,
        }
    }

    pub fn quoting(mut self, message_id: impl Into<String>) -> Self {
        self.quoted = Some(message_id.into());
        self
    }

    pub fn forwarded(mut self) -> Self {
        self.forwarded = Some(Forwarded {
            score: FREQUENTLY_FORWARDED_SCORE,
        });
        self
    }

    #[cfg(test)]
    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(s) => Some(s),
            Payload::Sticker(_) => None,
        }
    }

    /// Short description for logs
    pub fn preview(&self) -> String {
        match &self.payload {
            Payload::Text(s) => s.chars().take(100).collect(),
            Payload::Sticker(bytes) => format!("<sticker {} bytes>", bytes.len()),
        }
    }
}
