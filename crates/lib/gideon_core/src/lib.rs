//! # gideon_core
//!
//! Core domain logic for Gideon.

pub mod gemini;
pub mod models;
pub mod normalize;
pub mod prompt;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
