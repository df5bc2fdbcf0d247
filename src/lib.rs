//! URL path pattern matching with named placeholders.

pub mod config;
pub mod matcher;
pub mod observability;

pub use matcher::{CaptureKey, Matcha, Pattern};
pub use url::Url;
