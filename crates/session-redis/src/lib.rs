//! # Session Redis
//!
//! Redis adapter for the session store ports: session records live in
//! Redis hashes under a prefixed key, with a store-managed TTL. The
//! existence-gated attribute write runs as a single Lua script so a
//! record cannot be partially written after it expires or is removed.

pub mod connection;
pub mod session;
pub mod store;

pub use session::RedisSession;
pub use store::RedisSessionStore;
