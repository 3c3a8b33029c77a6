//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Credential persistence
//! - Weather: Forecast HTTP client
//! - Adapters: Session providers (console, in-memory for tests)

pub mod config;
pub mod storage;
pub mod weather;
pub mod adapters;
