//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Commands: Built-in command handlers
//! - Services: Command registry, message processing, connection supervision
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and dispatching

pub mod commands;
pub mod errors;
pub mod services;
pub mod messaging;
