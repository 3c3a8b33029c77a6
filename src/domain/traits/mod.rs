//! Domain traits - Abstractions for infrastructure implementations

pub mod chooser;
pub mod input;
pub mod session;
pub mod store;

pub use chooser::{pick, Chooser, RandomChooser};
#[cfg(test)]
pub use chooser::FixedChooser;
pub use input::LineSource;
pub use session::{MediaSource, Session, SessionProvider};
pub use store::CredentialStore;
