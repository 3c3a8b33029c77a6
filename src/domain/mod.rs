//! Domain layer - Core business logic
//!
//! This layer contains:
//! - Entities: Core business objects (Message, Reply, Command, events)
//! - Traits: Abstractions for infrastructure (Session, CredentialStore, Chooser)

pub mod entities;
pub mod traits;
