//! Hearthsheet domain.
//!
//! Pure types and rules for a duality-dice character sheet: the sheet itself,
//! the Hope/Fear roll, and the four-tier gold ledger. Nothing here performs
//! I/O or owns a random source; randomness is passed in as a closure.

pub mod entities;
pub mod error;
pub mod ids;
pub mod rules_catalog;
pub mod rules_reference;
pub mod value_objects;

pub use entities::{
    AbilityCard, CharacterRecord, CharacterSheet, DamageKind, Experience, SavedCharacter, Trait,
    TraitType, Weapon,
};

pub use error::DomainError;

pub use ids::{AbilityId, CharacterId, ExperienceId, WeaponId};

pub use rules_catalog::{
    class_entry, domains_for_class, standard_weapon, ClassEntry, StandardWeapon,
};

pub use rules_reference::{rules_reference, trait_reference, RulesEntry};

pub use value_objects::{
    Denomination, DiceError, DieSide, DualityRoll, GoldBreakdown, NormalizedGold, RollVerdict,
};
