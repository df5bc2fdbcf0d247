//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! matcher (pattern rejections, host mismatches, misses)
//! config (load)
//!     → tracing events
//!     → logging.rs (subscriber: env filter + fmt layer)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - Log lines go to stderr so stdout carries only match results

pub mod logging;

pub use logging::init_logging;
