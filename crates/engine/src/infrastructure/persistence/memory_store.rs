//! In-memory character store for testing and throwaway sessions
//!
//! Nothing survives the process. Otherwise behaves like the SQLite store.

use async_trait::async_trait;
use hearthsheet_domain::{CharacterId, CharacterRecord, SavedCharacter};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{CharacterStore, RandomPort, RepoError};

/// In-memory character store
pub struct InMemoryCharacterStore {
    records: RwLock<HashMap<CharacterId, SavedCharacter>>,
    random: Arc<dyn RandomPort>,
}

impl InMemoryCharacterStore {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            random,
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CharacterStore for InMemoryCharacterStore {
    async fn upsert(&self, record: &CharacterRecord) -> Result<CharacterId, RepoError> {
        let id = record
            .id()
            .unwrap_or_else(|| CharacterId::from_uuid(self.random.gen_uuid()));
        let saved = SavedCharacter::new(id, record.sheet().clone());
        self.records.write().await.insert(id, saved);
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<SavedCharacter>, RepoError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<SavedCharacter>, RepoError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.records.write().await.remove(&id);
        Ok(())
    }
}
