//! Domain entities - Core business objects with identity

mod character_record;
mod character_sheet;

pub use character_record::{CharacterRecord, SavedCharacter};
pub use character_sheet::{
    AbilityCard, CharacterSheet, DamageKind, Experience, Trait, TraitType, Weapon,
};
