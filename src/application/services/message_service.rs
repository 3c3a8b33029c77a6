use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{Message, MessagesUpsert, UpsertKind};
use crate::domain::traits::Session;

/// Service for processing incoming messages
pub struct MessageService {
    dispatcher: MessageDispatcher,
    ignore_broadcast: bool,
}

impl MessageService {
    pub fn new(dispatcher: MessageDispatcher, ignore_broadcast: bool) -> Self {
        Self {
            dispatcher,
            ignore_broadcast,
        }
    }

    /// Own messages, group participants and (optionally) broadcasts are skipped
    pub fn accepts(&self, message: &Message) -> bool {
        !message.from_me
            && message.participant.is_none()
            && !(self.ignore_broadcast && message.chat.is_broadcast())
    }

    /// Handle every live message of an upsert in order, returns the number of replies sent
    pub async fn process_upsert<S: Session>(&self, session: &S, upsert: &MessagesUpsert) -> usize {
        if upsert.kind != UpsertKind::Notify {
            return 0;
        }

        let mut sent = 0;
        for message in upsert.messages.iter().filter(|m| self.accepts(m)) {
            match self.process(session, message).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(e) => tracing::error!("Error handling message from {}: {}", message.chat, e),
            }
        }
        sent
    }

    /// Process one message and send its reply, `Ok(false)` when there was nothing to send
    pub async fn process<S: Session>(&self, session: &S, message: &Message) -> Result<bool, BotError> {
        let Some(text) = message.text() else {
            return Ok(false);
        };
        tracing::info!(
            "[{}] Received {} message from {} ({}): {}",
            message.timestamp.format("%H:%M:%S"),
            if message.chat.is_group() { "group" } else { "private" },
            message.chat,
            message.push_name.as_deref().unwrap_or("-"),
            text
        );

        let Some(reply) = self.dispatcher.dispatch(message, session).await? else {
            return Ok(false);
        };

        tracing::info!("Sending response to {}: {}", message.chat, reply.preview());
        session.send(&message.chat, reply).await?;
        Ok(true)
    }
}
