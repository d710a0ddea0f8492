//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod gemini;
pub mod persistence;
pub mod ports;
pub mod usage;
