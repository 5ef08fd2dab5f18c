//! # Session Shared
//!
//! Shared configuration, constants, and telemetry for the session store crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use config::{AppConfig, RedisSettings, SessionSettings};
pub use error::AppError;
