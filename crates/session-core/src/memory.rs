//! In-memory session backend
//!
//! Single-process counterpart of the Redis store, with the same contract:
//! lazy expiry checked on access, refresh as the only way to extend a
//! record's life, and an existence-gated `set`. Used as the backend for
//! tests and for deployments that do not need shared session state.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use session_shared::constants::DEFAULT_SESSION_EXPIRY_SECS;

use crate::error::SessionError;
use crate::store::{Session, SessionStore};

#[derive(Debug, Clone)]
struct SessionRecord {
    fields: HashMap<String, String>,
    expires_at: Instant,
}

impl SessionRecord {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Thread-safe in-memory session store.
///
/// Expired records are removed lazily, when an operation touches them.
#[derive(Clone)]
pub struct MemorySessionStore {
    records: Arc<DashMap<String, SessionRecord>>,
    expiration: Duration,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::with_expiration(Duration::from_secs(DEFAULT_SESSION_EXPIRY_SECS))
    }

    pub fn with_expiration(expiration: Duration) -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            expiration,
        }
    }

    /// Remaining time-to-live for `id`, or `None` if the record is absent
    /// or already expired.
    pub fn ttl(&self, id: &str) -> Option<Duration> {
        let entry = self.records.get(id)?;
        entry.expires_at.checked_duration_since(Instant::now())
    }

    /// Number of records currently held, expired ones included until they
    /// are touched.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every expired record now instead of waiting for access.
    /// Returns the number removed.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_expired());
        let removed = before.saturating_sub(self.records.len());
        if removed > 0 {
            debug!("Cleaned up {} expired sessions", removed);
        }
        removed
    }

    /// True when a live record exists for `id`; removes it when it turns
    /// out to be expired.
    fn exists(&self, id: &str) -> bool {
        if let Some(entry) = self.records.get(id) {
            if !entry.is_expired() {
                return true;
            }
            drop(entry); // release the shard lock before removing
            self.records.remove(id);
            debug!("Session {} expired, removed from store", id);
        }
        false
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn generate(&self, id: &str) -> Result<Box<dyn Session>, SessionError> {
        let mut fields = HashMap::new();
        // Seed with the id so the record is observable immediately.
        fields.insert(id.to_string(), id.to_string());
        self.records.insert(
            id.to_string(),
            SessionRecord {
                fields,
                expires_at: Instant::now() + self.expiration,
            },
        );
        debug!("Generated session {}", id);
        Ok(Box::new(MemorySession {
            id: id.to_string(),
            records: Arc::clone(&self.records),
        }))
    }

    async fn get(&self, id: &str) -> Result<Box<dyn Session>, SessionError> {
        if !self.exists(id) {
            return Err(SessionError::SessionNotFound);
        }
        Ok(Box::new(MemorySession {
            id: id.to_string(),
            records: Arc::clone(&self.records),
        }))
    }

    async fn refresh(&self, id: &str) -> Result<(), SessionError> {
        match self.records.get_mut(id) {
            Some(mut entry) if !entry.is_expired() => {
                entry.expires_at = Instant::now() + self.expiration;
                Ok(())
            }
            Some(entry) => {
                drop(entry);
                self.records.remove(id);
                Err(SessionError::SessionNotFound)
            }
            None => Err(SessionError::SessionNotFound),
        }
    }

    async fn remove(&self, id: &str) -> Result<(), SessionError> {
        self.records.remove(id);
        Ok(())
    }
}

/// Handle bound to one record in a [`MemorySessionStore`].
pub struct MemorySession {
    id: String,
    records: Arc<DashMap<String, SessionRecord>>,
}

#[async_trait]
impl Session for MemorySession {
    fn id(&self) -> &str {
        &self.id
    }

    async fn get(&self, field: &str) -> Result<String, SessionError> {
        let entry = self
            .records
            .get(&self.id)
            .ok_or_else(|| SessionError::FieldNotFound(field.to_string()))?;
        if entry.is_expired() {
            // Reads on a vanished record surface like a missing field,
            // matching the Redis backend's HGET-on-absent-key behavior.
            return Err(SessionError::FieldNotFound(field.to_string()));
        }
        entry
            .fields
            .get(field)
            .cloned()
            .ok_or_else(|| SessionError::FieldNotFound(field.to_string()))
    }

    async fn set(&self, field: &str, value: &str) -> Result<(), SessionError> {
        // get_mut holds the entry lock, so the existence check and the
        // write are atomic with respect to a concurrent remove.
        match self.records.get_mut(&self.id) {
            Some(mut entry) if !entry.is_expired() => {
                entry.fields.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(SessionError::SessionNotFound),
        }
    }
}
