//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MatchaConfig (validated, immutable)
//!     → observability (log level/format) and CLI output
//! ```
//!
//! # Design Decisions
//! - Only the CLI reads configuration; the matcher itself takes none
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LogFormat, MatchaConfig, ObservabilityConfig, OutputConfig, OutputFormat};
pub use validation::ValidationError;
