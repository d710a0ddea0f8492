//! Store port trait for character persistence.

use async_trait::async_trait;
use hearthsheet_domain::{CharacterId, CharacterRecord, SavedCharacter};

use super::error::RepoError;

// =============================================================================
// Character Storage
// =============================================================================

/// Durable keyed storage of character sheets.
///
/// Contract shared by every implementation:
/// - `upsert` of an `Unsaved` record generates a fresh id, writes, and returns it.
/// - `upsert` of a `Saved` record replaces that id's row in full (last write wins).
/// - A failed write leaves nothing visible to later reads.
/// - `delete` of an unknown id is a no-op, and returns only once the delete is visible.
/// - Reads issued after a write has returned observe it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn upsert(&self, record: &CharacterRecord) -> Result<CharacterId, RepoError>;
    async fn list_all(&self) -> Result<Vec<SavedCharacter>, RepoError>;
    async fn get(&self, id: CharacterId) -> Result<Option<SavedCharacter>, RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}
