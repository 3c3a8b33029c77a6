//! Domain entities - Core business objects

pub mod jid;
pub mod message;
pub mod reply;
pub mod event;
pub mod command;

pub use jid::Jid;
pub use message::{Message, MessageBody, MediaAttachment, QuotedMessage, Content};
pub use reply::{Reply, Payload, Forwarded};
pub use event::{
    ConnectionState, ConnectionUpdate, Credentials, DisconnectReason, EventBatch,
    MessagesUpsert, ProtocolVersion, UpsertKind,
};
pub use command::{Command, CommandHandler, CommandRegistry, Invocation};
