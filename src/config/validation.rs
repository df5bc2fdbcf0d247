//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the log level against the levels tracing understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MatchaConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::MatchaConfig;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level {0:?} (expected one of trace, debug, info, warn, error, off)")]
    UnknownLogLevel(String),

    #[error("log level must not be empty")]
    EmptyLogLevel,
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &MatchaConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.trim();
    if level.is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    } else if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(level.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
