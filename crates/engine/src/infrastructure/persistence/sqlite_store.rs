//! SQLite-backed character storage.

use async_trait::async_trait;
use hearthsheet_domain::{CharacterId, CharacterRecord, CharacterSheet, SavedCharacter};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::sync::Arc;

use crate::infrastructure::ports::{CharacterStore, ClockPort, RandomPort, RepoError};

/// SQLite implementation for character sheet storage.
///
/// One row per character; the sheet is stored as JSON so that the schema does
/// not need to track every field the sheet grows.
pub struct SqliteCharacterStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SqliteCharacterStore {
    pub async fn new(
        db_path: &str,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Result<Self, RepoError> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RepoError::database("open", e))?;
            }
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("open", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                sheet_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("open", e))?;

        tracing::debug!(db_path, "Character store opened");

        Ok(Self {
            pool,
            clock,
            random,
        })
    }

    fn row_to_saved(row: &SqliteRow) -> Result<SavedCharacter, RepoError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| RepoError::database("read", e))?;
        let json: String = row
            .try_get("sheet_json")
            .map_err(|e| RepoError::database("read", e))?;

        let character_id = id
            .parse::<CharacterId>()
            .map_err(|e| RepoError::corrupt(&id, e))?;
        let sheet: CharacterSheet =
            serde_json::from_str(&json).map_err(|e| RepoError::corrupt(&id, e))?;

        Ok(SavedCharacter::new(character_id, sheet))
    }
}

#[async_trait]
impl CharacterStore for SqliteCharacterStore {
    async fn upsert(&self, record: &CharacterRecord) -> Result<CharacterId, RepoError> {
        let id = record
            .id()
            .unwrap_or_else(|| CharacterId::from_uuid(self.random.gen_uuid()));
        let sheet = record.sheet();
        let json = serde_json::to_string(sheet).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        // Single statement: either the whole row lands or nothing does.
        sqlx::query(
            r#"
            INSERT INTO characters (id, name, sheet_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                sheet_json = excluded.sheet_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id.to_string())
        .bind(&sheet.name)
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("upsert", e))?;

        tracing::debug!(character_id = %id, created = !record.is_saved(), "Character saved");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<SavedCharacter>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, sheet_json FROM characters ORDER BY updated_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_all", e))?;

        let mut characters = Vec::with_capacity(rows.len());
        for row in &rows {
            match Self::row_to_saved(row) {
                Ok(saved) => characters.push(saved),
                Err(e @ RepoError::Corrupt { .. }) => {
                    tracing::warn!(error = %e, "Skipping unreadable character row");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(characters)
    }

    async fn get(&self, id: CharacterId) -> Result<Option<SavedCharacter>, RepoError> {
        let row = sqlx::query("SELECT id, sheet_json FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get", e))?;

        row.as_ref().map(Self::row_to_saved).transpose()
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete", e))?;

        tracing::debug!(
            character_id = %id,
            removed = result.rows_affected(),
            "Character deleted"
        );
        Ok(())
    }
}
