//! Message handling - Parsing and routing of incoming messages

pub mod context;
pub mod dispatcher;
pub mod parser;

pub use context::Context;
pub use dispatcher::MessageDispatcher;
pub use parser::MessageParser;
