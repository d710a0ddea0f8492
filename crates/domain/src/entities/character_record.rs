//! Character record - a sheet that may or may not have been stored yet

use serde::{Deserialize, Serialize};

use crate::entities::CharacterSheet;
use crate::ids::CharacterId;

/// A sheet as the session holds it.
///
/// A record starts `Unsaved`; the first successful store write hands back an
/// id and the session moves it to `Saved`, after which every write replaces
/// the same stored row instead of creating a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterRecord {
    Unsaved(CharacterSheet),
    Saved {
        id: CharacterId,
        sheet: CharacterSheet,
    },
}

impl CharacterRecord {
    pub fn id(&self) -> Option<CharacterId> {
        match self {
            Self::Unsaved(_) => None,
            Self::Saved { id, .. } => Some(*id),
        }
    }

    pub fn sheet(&self) -> &CharacterSheet {
        match self {
            Self::Unsaved(sheet) | Self::Saved { sheet, .. } => sheet,
        }
    }

    pub fn sheet_mut(&mut self) -> &mut CharacterSheet {
        match self {
            Self::Unsaved(sheet) | Self::Saved { sheet, .. } => sheet,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// Attach the id a store assigned. A saved record keeps its sheet but takes the new id.
    pub fn mark_saved(&mut self, id: CharacterId) {
        let sheet = std::mem::take(self.sheet_mut());
        *self = Self::Saved { id, sheet };
    }

    /// Drop the id so the next write creates a fresh stored copy
    pub fn mark_unsaved(&mut self) {
        let sheet = std::mem::take(self.sheet_mut());
        *self = Self::Unsaved(sheet);
    }
}

impl From<SavedCharacter> for CharacterRecord {
    fn from(saved: SavedCharacter) -> Self {
        Self::Saved {
            id: saved.id,
            sheet: saved.sheet,
        }
    }
}

/// The stored shape of a record: always has an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCharacter {
    pub id: CharacterId,
    pub sheet: CharacterSheet,
}

impl SavedCharacter {
    pub fn new(id: CharacterId, sheet: CharacterSheet) -> Self {
        Self { id, sheet }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_record_has_no_id() {
        let record = CharacterRecord::Unsaved(CharacterSheet::blank());
        assert_eq!(record.id(), None);
        assert!(!record.is_saved());
    }

    #[test]
    fn mark_saved_replaces_existing_id() {
        let first = CharacterId::new();
        let second = CharacterId::new();
        let mut record = CharacterRecord::Saved {
            id: first,
            sheet: CharacterSheet::sample(),
        };
        record.mark_saved(second);
        assert_eq!(record.id(), Some(second));
        assert_eq!(record.sheet().name, "Kaelen Thorne");
    }

    #[test]
    fn sheet_mut_edits_either_variant() {
        let mut record = CharacterRecord::Saved {
            id: CharacterId::new(),
            sheet: CharacterSheet::blank(),
        };
        record.sheet_mut().name = "Aria".to_string();
        assert_eq!(record.sheet().name, "Aria");

        record.mark_unsaved();
        assert_eq!(record.id(), None);
        assert_eq!(record.sheet().name, "Aria");
    }

    #[test]
    fn mark_saved_and_unsaved_in_place() {
        let id = CharacterId::new();
        let mut record = CharacterRecord::Unsaved(CharacterSheet::sample());
        record.mark_saved(id);
        assert_eq!(record.id(), Some(id));
        assert_eq!(record.sheet().name, "Kaelen Thorne");

        record.mark_unsaved();
        assert!(!record.is_saved());
        assert_eq!(record.sheet().gold, 15);
    }
}
