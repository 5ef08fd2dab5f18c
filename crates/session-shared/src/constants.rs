//! Application-wide constants

/// Default prefix joined onto session ids to form storage keys.
pub const DEFAULT_SESSION_PREFIX: &str = "sessid";

/// Default session time-to-live, in seconds (15 minutes).
pub const DEFAULT_SESSION_EXPIRY_SECS: u64 = 900;

/// Separator between prefix and session id in a storage key.
pub const KEY_SEPARATOR: &str = "-";

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_REDIS_MAX_CONNECTIONS: u32 = 16;
