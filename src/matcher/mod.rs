//! URL pattern matching subsystem.
//!
//! # Data Flow
//! ```text
//! Target URL + pattern text
//!     → target.rs (ensure trailing slash, derive match path)
//!     → pattern.rs (split host/path, classify segments, compile regex)
//!     → pattern.rs (first match of the suffix-anchored regex)
//!     → Return: Matcha with captures by name and by position, or None
//!
//! Refinement:
//!     Matcha::matched(pattern)
//!     → same pipeline, target = the Matcha's stored (normalized) URL
//! ```
//!
//! # Design Decisions
//! - Failure to match is `None`, never an error; every failure cause
//!   collapses to the same outcome
//! - Matchers are immutable after construction (thread-safe without locks)
//! - Positional captures follow placeholder order in the pattern, not map
//!   iteration order

pub mod key;
pub mod matcha;
pub mod pattern;
mod target;

pub use key::CaptureKey;
pub use matcha::Matcha;
pub use pattern::Pattern;
