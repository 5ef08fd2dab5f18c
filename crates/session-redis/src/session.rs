//! Redis session handle

use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::{AsyncCommands, Script};
use tracing::error;

use session_core::error::SessionError;
use session_core::store::Session;

/// HSET gated on key existence, as one atomic script. Checking first and
/// writing second as two commands would leave a gap in which the record
/// can expire and the write would recreate it as an unexpiring stray.
const SET_IF_EXISTS: &str = r#"
if redis.call("EXISTS", KEYS[1]) == 1 then
    return redis.call("HSET", KEYS[1], ARGV[1], ARGV[2])
else
    return -1
end
"#;

/// Handle bound to one session record in Redis.
///
/// Holds no attribute data: every read goes to the hash, so the handle
/// never serves stale values and stays valid exactly as long as the
/// remote record does.
pub struct RedisSession {
    id: String,
    key: String,
    pool: Pool,
}

impl RedisSession {
    pub(crate) fn new(id: &str, key: String, pool: Pool) -> Self {
        Self {
            id: id.to_string(),
            key,
            pool,
        }
    }
}

#[async_trait]
impl Session for RedisSession {
    fn id(&self) -> &str {
        &self.id
    }

    async fn get(&self, field: &str) -> Result<String, SessionError> {
        let mut conn = self.pool.get().await.map_err(|e| {
            error!("Redis pool error reading session field: {}", e);
            SessionError::StoreError(e.to_string())
        })?;

        // HGET returns nil both for a missing field and for a missing
        // key, so a read on a vanished record also surfaces as
        // FieldNotFound.
        let value: Option<String> = conn.hget(&self.key, field).await.map_err(|e| {
            error!("Redis error reading field {} of session {}: {}", field, self.id, e);
            SessionError::StoreError(e.to_string())
        })?;
        value.ok_or_else(|| SessionError::FieldNotFound(field.to_string()))
    }

    async fn set(&self, field: &str, value: &str) -> Result<(), SessionError> {
        let mut conn = self.pool.get().await.map_err(|e| {
            error!("Redis pool error writing session field: {}", e);
            SessionError::StoreError(e.to_string())
        })?;

        let res: i64 = Script::new(SET_IF_EXISTS)
            .key(&self.key)
            .arg(field)
            .arg(value)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis error writing field {} of session {}: {}", field, self.id, e);
                SessionError::StoreError(e.to_string())
            })?;
        if res < 0 {
            return Err(SessionError::SessionNotFound);
        }
        Ok(())
    }
}
