use super::Jid;
use chrono::{DateTime, Utc};

/// Media attachment carried by an image or video message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub mimetype: String,
    /// Provider-specific locator (direct path, URL or local file)
    pub location: String,
    pub caption: Option<String>,
}

impl MediaAttachment {
    pub fn image(location: impl Into<String>) -> Self {
        Self {
            mimetype: "image/jpeg".to_string(),
            location: location.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// The message a reply refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedMessage {
    pub id: String,
    pub body: Box<MessageBody>,
}

/// Candidate content fields of a WhatsApp message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBody {
    pub conversation: Option<String>,
    pub extended_text: Option<String>,
    pub image: Option<MediaAttachment>,
    pub video: Option<MediaAttachment>,
    pub quoted: Option<QuotedMessage>,
}

impl MessageBody {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            conversation: Some(text.into()),
            ..Self::default()
        }
    }

    /// First non-empty of conversation, extended text, image caption, video caption
    pub fn resolved_text(&self) -> Option<&str> {
        [
            self.conversation.as_deref(),
            self.extended_text.as_deref(),
            self.image.as_ref().and_then(|m| m.caption.as_deref()),
            self.video.as_ref().and_then(|m| m.caption.as_deref()),
        ]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
    }
}

/// Parsed message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    Empty,
}

#[cfg(test)]
impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }
}

/// An incoming WhatsApp message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    /// Chat the message arrived in, also the reply target
    pub chat: Jid,
    pub body: MessageBody,
    pub from_me: bool,
    /// Set when the message was written by a group participant
    pub participant: Option<Jid>,
    pub push_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(chat: impl Into<Jid>, body: MessageBody) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat: chat.into(),
            body,
            from_me: false,
            participant: None,
            push_name: None,
            timestamp: Utc::now(),
        }
    }

    #[cfg(test)]
    pub fn from_text(chat: impl Into<Jid>, text: impl Into<String>) -> Self {
        Self::new(chat, MessageBody::text(text))
    }

    pub fn with_push_name(mut self, name: impl Into<String>) -> Self {
        self.push_name = Some(name.into());
        self
    }

    #[cfg(test)]
    pub fn with_participant(mut self, participant: impl Into<Jid>) -> Self {
        self.participant = Some(participant.into());
        self
    }

    #[cfg(test)]
    pub fn sent_by_me(mut self) -> Self {
        self.from_me = true;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.body.resolved_text()
    }

    /// Image on this message, falling back to the quoted message
    pub fn image(&self) -> Option<&MediaAttachment> {
        self.body
            .image
            .as_ref()
            .or_else(|| self.body.quoted.as_ref().and_then(|q| q.body.image.as_ref()))
    }
}
