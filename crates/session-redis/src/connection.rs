//! Redis connection pool

use deadpool_redis::{Config, CreatePoolError, Pool, PoolConfig, Runtime};

/// Build a lazily-connecting pool. The caller owns the pool's lifetime;
/// the session store only borrows connections from it.
pub fn create_pool(url: &str, max_connections: usize) -> Result<Pool, CreatePoolError> {
    let mut cfg = Config::from_url(url);
    cfg.pool = Some(PoolConfig::new(max_connections));
    cfg.create_pool(Some(Runtime::Tokio1))
}
