//! Character sheet entity - everything a player tracks for one hero
//!
//! The stores treat a sheet as opaque payload; only the session and the
//! presentation layer look inside.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::{AbilityId, ExperienceId, WeaponId};
use crate::rules_catalog;
use crate::value_objects::GoldBreakdown;

/// The six traits every check is rolled against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitType {
    Agility,
    Strength,
    Finesse,
    Instinct,
    Presence,
    Knowledge,
}

impl TraitType {
    pub const ALL: [TraitType; 6] = [
        TraitType::Agility,
        TraitType::Strength,
        TraitType::Finesse,
        TraitType::Instinct,
        TraitType::Presence,
        TraitType::Knowledge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Strength => "Strength",
            Self::Finesse => "Finesse",
            Self::Instinct => "Instinct",
            Self::Presence => "Presence",
            Self::Knowledge => "Knowledge",
        }
    }

    /// Short verbs printed under the trait on the sheet
    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Agility => "Sprint, Leap, Maneuver",
            Self::Strength => "Lift, Smash, Grapple",
            Self::Finesse => "Notice, Aim, Hide",
            Self::Instinct => "Sense, React, Navigate",
            Self::Presence => "Charm, Perform, Command",
            Self::Knowledge => "Recall, Analyze, Heal",
        }
    }
}

impl fmt::Display for TraitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown trait: {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    pub name: TraitType,
    pub value: i32,
    pub description: String,
}

impl Trait {
    fn zeroed(name: TraitType) -> Self {
        Self {
            name,
            value: 0,
            description: name.default_description().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageKind {
    Physical,
    Magic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: WeaponId,
    pub name: String,
    pub kind: DamageKind,
    /// Damage dice as printed, e.g. "d10+2"
    pub damage: String,
    pub range: String,
    pub trait_type: TraitType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityCard {
    pub id: AbilityId,
    pub name: String,
    pub domain: String,
    pub level: u32,
    /// e.g. "1 Hope" or "2 Stress"
    pub cost: Option<String>,
    pub description: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: ExperienceId,
    pub name: String,
    /// Usually +1 or +2
    pub value: i32,
    pub description: String,
}

/// One hero's sheet.
///
/// `hp` counts damage marked, not health remaining. `gold` is the settled
/// ledger total; use [`CharacterSheet::gold_breakdown`] for the tiered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub subclass: String,
    pub level: u32,
    pub ancestry: String,
    pub community: String,
    pub traits: Vec<Trait>,
    pub evasion: u32,
    pub armor: u32,
    pub max_armor: u32,
    pub hp: u32,
    pub minor_threshold: u32,
    pub major_threshold: u32,
    pub severe_threshold: u32,
    pub stress: u32,
    pub max_stress: u32,
    pub hope: u32,
    pub max_hope: u32,
    pub gold: u64,
    pub weapons: Vec<Weapon>,
    pub abilities: Vec<AbilityCard>,
    pub experiences: Vec<Experience>,
    pub inventory: Vec<String>,
}

impl CharacterSheet {
    /// A fresh level 1 sheet for "New Hero"
    pub fn blank() -> Self {
        Self {
            name: "New Hero".to_string(),
            class_name: "Warrior".to_string(),
            subclass: "Slayer".to_string(),
            level: 1,
            ancestry: "Human".to_string(),
            community: "Wildborne".to_string(),
            traits: TraitType::ALL.into_iter().map(Trait::zeroed).collect(),
            evasion: 10,
            armor: 0,
            max_armor: 3,
            hp: 0,
            minor_threshold: 5,
            major_threshold: 10,
            severe_threshold: 15,
            stress: 0,
            max_stress: 5,
            hope: 0,
            max_hope: 2,
            gold: 0,
            weapons: Vec::new(),
            abilities: Vec::new(),
            experiences: Vec::new(),
            inventory: Vec::new(),
        }
    }

    /// A pre-built level 2 Warrior, handy for demos and first launch
    pub fn sample() -> Self {
        let mut sheet = Self::blank();
        sheet.name = "Kaelen Thorne".to_string();
        sheet.level = 2;
        sheet.community = "Highborne".to_string();
        for (trait_type, value) in [
            (TraitType::Agility, 1),
            (TraitType::Strength, 2),
            (TraitType::Presence, -1),
            (TraitType::Knowledge, 1),
        ] {
            sheet.set_trait(trait_type, value);
        }
        sheet.evasion = 8;
        sheet.armor = 1;
        sheet.stress = 2;
        sheet.max_stress = 6;
        sheet.hope = 2;
        sheet.max_hope = 5;
        sheet.gold = 15;
        sheet.add_weapon(Weapon {
            id: WeaponId::new(),
            name: "Greatsword".to_string(),
            kind: DamageKind::Physical,
            damage: "d10+2".to_string(),
            range: "Melee".to_string(),
            trait_type: TraitType::Strength,
            description: "A massive blade of folded steel.".to_string(),
        });
        sheet.add_ability(AbilityCard {
            id: AbilityId::new(),
            name: "Battlefield Commander".to_string(),
            domain: "Blade".to_string(),
            level: 1,
            cost: Some("1 Hope".to_string()),
            description: "Mark an enemy. Allies gain advantage against it until your next turn."
                .to_string(),
            active: true,
        });
        sheet.add_experience(Experience {
            id: ExperienceId::new(),
            name: "Veteran of the Ashen War".to_string(),
            value: 2,
            description: "You served on the front lines against the shadow beasts.".to_string(),
        });
        for item in ["Healing Potion (Minor)", "Rope (50ft)", "Torch x3"] {
            sheet.add_inventory_item(item);
        }
        sheet
    }

    /// Modifier for a trait roll (0 if the sheet somehow lacks the trait)
    pub fn trait_modifier(&self, trait_type: TraitType) -> i32 {
        self.traits
            .iter()
            .find(|t| t.name == trait_type)
            .map(|t| t.value)
            .unwrap_or(0)
    }

    pub fn set_trait(&mut self, trait_type: TraitType, value: i32) {
        match self.traits.iter_mut().find(|t| t.name == trait_type) {
            Some(existing) => existing.value = value,
            None => self.traits.push(Trait {
                value,
                ..Trait::zeroed(trait_type)
            }),
        }
    }

    /// Switch class. The subclass resets to the new class's first subclass.
    pub fn set_class(&mut self, class_name: &str) -> Result<(), DomainError> {
        let entry = rules_catalog::class_entry(class_name)
            .ok_or_else(|| DomainError::validation(format!("Unknown class: {}", class_name)))?;
        self.class_name = entry.name.to_string();
        self.subclass = entry.default_subclass().to_string();
        Ok(())
    }

    /// Must be one of the current class's subclasses
    pub fn set_subclass(&mut self, subclass: &str) -> Result<(), DomainError> {
        let entry = rules_catalog::class_entry(&self.class_name).ok_or_else(|| {
            DomainError::validation(format!("Unknown class: {}", self.class_name))
        })?;
        let canonical = entry
            .subclasses
            .iter()
            .find(|s| s.eq_ignore_ascii_case(subclass.trim()))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "{} is not a {} subclass",
                    subclass, entry.name
                ))
            })?;
        self.subclass = canonical.to_string();
        Ok(())
    }

    /// Domains the sheet's class draws ability cards from; empty for a custom class
    pub fn class_domains(&self) -> &'static [&'static str] {
        rules_catalog::class_entry(&self.class_name)
            .map(|c| c.domains.as_slice())
            .unwrap_or(&[])
    }

    pub fn gold_breakdown(&self) -> GoldBreakdown {
        GoldBreakdown::from_total(self.gold)
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    /// Returns whether anything was removed
    pub fn remove_weapon(&mut self, id: WeaponId) -> bool {
        let before = self.weapons.len();
        self.weapons.retain(|w| w.id != id);
        self.weapons.len() != before
    }

    pub fn add_ability(&mut self, ability: AbilityCard) {
        self.abilities.push(ability);
    }

    pub fn remove_ability(&mut self, id: AbilityId) -> bool {
        let before = self.abilities.len();
        self.abilities.retain(|a| a.id != id);
        self.abilities.len() != before
    }

    pub fn add_experience(&mut self, experience: Experience) {
        self.experiences.push(experience);
    }

    /// Index-based, like the sheet's list. Out of range is a no-op.
    pub fn remove_experience(&mut self, index: usize) -> Option<Experience> {
        (index < self.experiences.len()).then(|| self.experiences.remove(index))
    }

    /// Blank entries are ignored; returns whether the item was added
    pub fn add_inventory_item(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if item.trim().is_empty() {
            return false;
        }
        self.inventory.push(item);
        true
    }

    pub fn remove_inventory_item(&mut self, index: usize) -> Option<String> {
        (index < self.inventory.len()).then(|| self.inventory.remove(index))
    }
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self::blank()
    }
}
