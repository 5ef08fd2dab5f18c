//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_failures_convert_and_keep_their_message() {
        let err: AppError = config::ConfigError::Message("bad value".into()).into();
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }
}
