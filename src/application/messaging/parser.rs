//! Message parser - Classifies resolved text as command or free text

use crate::domain::entities::{Content, Invocation, Message};

/// Parses incoming text into structured content
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse the resolved text of a message, `Content::Empty` when there is none
    pub fn parse_message(&self, message: &Message) -> Content {
        match message.text() {
            Some(text) => self.parse(text),
            None => Content::Empty,
        }
    }

    /// Parse a text message
    pub fn parse(&self, text: &str) -> Content {
        if text.is_empty() {
            return Content::Empty;
        }

        if let Some(invocation) = self.parse_command(text) {
            return Content::Command {
                name: invocation.name,
                args: invocation.args,
            };
        }

        Content::Text(text.to_string())
    }

    /// Parse a command: the first token minus the prefix, lower-cased, is the name
    pub fn parse_command(&self, text: &str) -> Option<Invocation> {
        if !text.starts_with(&self.command_prefix) {
            return None;
        }

        let mut parts = text.split_whitespace();
        let name = parts
            .next()
            .and_then(|first| first.strip_prefix(self.command_prefix.as_str()))
            .map(str::to_lowercase)
            .unwrap_or_default();
        let args = parts.map(|s| s.to_string()).collect();

        Some(Invocation { name, args })
    }
}
