//! Session store traits (ports)

use async_trait::async_trait;

use crate::error::SessionError;

/// Handle bound to one live session record.
///
/// Attribute values are never cached locally; every `get` issues a read
/// against the backend, so a handle stays cheap and never goes stale.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Session: Send + Sync {
    /// The session identifier this handle is bound to.
    fn id(&self) -> &str;

    /// Read one named attribute. Fails with `FieldNotFound` when the
    /// attribute (or the whole record) is absent.
    async fn get(&self, field: &str) -> Result<String, SessionError>;

    /// Write one named attribute, but only if the session record still
    /// exists. The existence check and the write are a single atomic
    /// operation on the backend; a record that expired or was removed
    /// surfaces as `SessionNotFound`, never as a partial write.
    async fn set(&self, field: &str, value: &str) -> Result<(), SessionError>;
}

/// Factory and registry for session records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create the record for `id`, seed it so it is observable immediately,
    /// and start its expiration clock.
    async fn generate(&self, id: &str) -> Result<Box<dyn Session>, SessionError>;

    /// Look up the record for `id` and return a bound handle. This is an
    /// existence check only; no attribute data is prefetched, so callers
    /// fetch just the fields they need afterwards.
    async fn get(&self, id: &str) -> Result<Box<dyn Session>, SessionError>;

    /// Reset the record's time-to-live to the configured duration.
    /// Attribute reads and writes do not extend expiration; this is the
    /// only way to keep a session alive.
    async fn refresh(&self, id: &str) -> Result<(), SessionError>;

    /// Delete the record outright. Idempotent: removing an absent id
    /// is not an error.
    async fn remove(&self, id: &str) -> Result<(), SessionError>;
}
