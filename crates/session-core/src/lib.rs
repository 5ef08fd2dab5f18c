//! # Session Core
//!
//! Session store ports, error taxonomy, and an in-memory reference backend.

pub mod error;
pub mod memory;
pub mod store;

pub use error::SessionError;
pub use memory::MemorySessionStore;
pub use store::{Session, SessionStore};
