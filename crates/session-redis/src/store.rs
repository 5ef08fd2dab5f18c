//! Redis session store

use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, error};

use session_core::error::SessionError;
use session_core::store::{Session, SessionStore};
use session_shared::config::SessionSettings;
use session_shared::constants::{
    DEFAULT_SESSION_EXPIRY_SECS, DEFAULT_SESSION_PREFIX, KEY_SEPARATOR,
};

use crate::session::RedisSession;

/// Session factory/registry backed by Redis.
///
/// Each record is a hash at `"{prefix}-{id}"` with a key-level TTL.
/// The pool is shared and unowned: the store never closes or
/// reconfigures it.
pub struct RedisSessionStore {
    pool: Pool,
    prefix: String,
    expiration: Duration,
}

impl RedisSessionStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            prefix: DEFAULT_SESSION_PREFIX.to_string(),
            expiration: Duration::from_secs(DEFAULT_SESSION_EXPIRY_SECS),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn from_settings(pool: Pool, settings: &SessionSettings) -> Self {
        Self::new(pool)
            .with_prefix(settings.prefix.clone())
            .with_expiration(settings.expiration())
    }

    /// Storage key for `id`: `"{prefix}-{id}"`.
    ///
    /// Known limitation: the join is a literal hyphen, so an id that
    /// embeds the separator can collide with another prefix/id pair.
    fn storage_key(&self, id: &str) -> String {
        format!("{}{}{}", self.prefix, KEY_SEPARATOR, id)
    }

    fn expiration_secs(&self) -> i64 {
        self.expiration.as_secs() as i64
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn generate(&self, id: &str) -> Result<Box<dyn Session>, SessionError> {
        let key = self.storage_key(id);
        let mut conn = self.pool.get().await.map_err(|e| {
            error!("Redis pool error generating session: {}", e);
            SessionError::StoreError(e.to_string())
        })?;

        // Seed the hash with the id so the record is non-empty from the
        // start; a hash with zero fields is indistinguishable from an
        // absent key in Redis.
        let _: i64 = conn.hset(&key, id, id).await.map_err(|e| {
            error!("Redis error seeding session {}: {}", id, e);
            SessionError::StoreError(e.to_string())
        })?;
        let _: bool = conn.expire(&key, self.expiration_secs()).await.map_err(|e| {
            error!("Redis error setting expiry for session {}: {}", id, e);
            SessionError::StoreError(e.to_string())
        })?;

        debug!("Generated session {}", id);
        Ok(Box::new(RedisSession::new(id, key, self.pool.clone())))
    }

    async fn get(&self, id: &str) -> Result<Box<dyn Session>, SessionError> {
        let key = self.storage_key(id);
        let mut conn = self.pool.get().await.map_err(|e| {
            error!("Redis pool error looking up session: {}", e);
            SessionError::StoreError(e.to_string())
        })?;

        // Existence check only; callers fetch the attributes they need
        // afterwards instead of paying for a full prefetch here.
        let exists: bool = conn.exists(&key).await.map_err(|e| {
            error!("Redis error checking session {}: {}", id, e);
            SessionError::StoreError(e.to_string())
        })?;
        if !exists {
            return Err(SessionError::SessionNotFound);
        }
        Ok(Box::new(RedisSession::new(id, key, self.pool.clone())))
    }

    async fn refresh(&self, id: &str) -> Result<(), SessionError> {
        let key = self.storage_key(id);
        let mut conn = self.pool.get().await.map_err(|e| {
            error!("Redis pool error refreshing session: {}", e);
            SessionError::StoreError(e.to_string())
        })?;

        // EXPIRE reports false when the key does not exist, which is the
        // not-found signal here.
        let refreshed: bool = conn.expire(&key, self.expiration_secs()).await.map_err(|e| {
            error!("Redis error refreshing session {}: {}", id, e);
            SessionError::StoreError(e.to_string())
        })?;
        if !refreshed {
            return Err(SessionError::SessionNotFound);
        }
        debug!("Refreshed session {}", id);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), SessionError> {
        let key = self.storage_key(id);
        let mut conn = self.pool.get().await.map_err(|e| {
            error!("Redis pool error removing session: {}", e);
            SessionError::StoreError(e.to_string())
        })?;

        // DEL of an absent key deletes zero keys; not an error.
        let _: i64 = conn.del(&key).await.map_err(|e| {
            error!("Redis error removing session {}: {}", id, e);
            SessionError::StoreError(e.to_string())
        })?;
        debug!("Removed session {}", id);
        Ok(())
    }
}
