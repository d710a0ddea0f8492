//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Character storage (SQLite on disk, or memory)
//! - Text generation (Gemini, or a mock)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Storage Ports
// =============================================================================
pub use repos::CharacterStore;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{FinishReason, TextGenPort, TextRequest, TextResponse};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockTextGenPort;
#[cfg(test)]
pub use repos::MockCharacterStore;
#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{RepoError, TextGenError};
