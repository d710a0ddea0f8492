//! Static rules catalog: classes, heritage options, weapons and pick lists.
//!
//! Lookups are case-insensitive and ignore surrounding whitespace.

use crate::entities::{DamageKind, TraitType, Weapon};
use crate::ids::WeaponId;

/// A class with its subclasses (first is the default) and its two domains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: &'static str,
    pub subclasses: &'static [&'static str],
    pub domains: [&'static str; 2],
}

impl ClassEntry {
    /// Subclass a sheet falls back to when its class changes
    pub fn default_subclass(&self) -> &'static str {
        self.subclasses[0]
    }

    pub fn has_subclass(&self, subclass: &str) -> bool {
        self.subclasses
            .iter()
            .any(|s| s.eq_ignore_ascii_case(subclass.trim()))
    }
}

pub const CLASSES: &[ClassEntry] = &[
    ClassEntry {
        name: "Bard",
        subclasses: &["Wordsmith", "Troubadour"],
        domains: ["Grace", "Codex"],
    },
    ClassEntry {
        name: "Druid",
        subclasses: &["Warden of the Elements", "Warden of the Wilds"],
        domains: ["Sage", "Arcana"],
    },
    ClassEntry {
        name: "Guardian",
        subclasses: &["Stalwart", "Vengeance"],
        domains: ["Valor", "Blade"],
    },
    ClassEntry {
        name: "Ranger",
        subclasses: &["Wayfinder", "Beastbound"],
        domains: ["Bone", "Sage"],
    },
    ClassEntry {
        name: "Rogue",
        subclasses: &["Syndicate", "Nightwalker"],
        domains: ["Midnight", "Grace"],
    },
    ClassEntry {
        name: "Seraph",
        subclasses: &["Divine Wielder", "Winged Sentinel"],
        domains: ["Splendor", "Valor"],
    },
    ClassEntry {
        name: "Sorcerer",
        subclasses: &["Elemental Origin", "Primal Origin"],
        domains: ["Arcana", "Midnight"],
    },
    ClassEntry {
        name: "Warrior",
        subclasses: &["Slayer", "Knight"],
        domains: ["Blade", "Bone"],
    },
    ClassEntry {
        name: "Wizard",
        subclasses: &["School of War", "School of Knowledge"],
        domains: ["Codex", "Splendor"],
    },
];

pub const ANCESTRIES: &[&str] = &[
    "Clank", "Dwarf", "Elf", "Faerie", "Fungril", "Galapa", "Giant", "Goblin", "Halfling",
    "Human", "Katari", "Orc", "Ribbet", "Simiah",
];

pub const COMMUNITIES: &[&str] = &[
    "Highborne",
    "Loreborne",
    "Orderborne",
    "Ridgeborne",
    "Seaborne",
    "Slyborne",
    "Underborne",
    "Wanderborne",
    "Wildborne",
];

pub const DOMAINS: &[&str] = &[
    "Arcana", "Blade", "Bone", "Codex", "Grace", "Midnight", "Sage", "Splendor", "Valor",
];

/// Nearest to farthest
pub const WEAPON_RANGES: &[&str] = &["Melee", "Very Close", "Close", "Far", "Very Far"];

/// A weapon from the standard armory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardWeapon {
    pub name: &'static str,
    pub damage: &'static str,
    pub trait_type: TraitType,
    pub kind: DamageKind,
    pub range: &'static str,
    pub description: &'static str,
}

impl StandardWeapon {
    /// A sheet entry for this weapon under a fresh id
    pub fn to_weapon(&self) -> Weapon {
        Weapon {
            id: WeaponId::new(),
            name: self.name.to_string(),
            kind: self.kind,
            damage: self.damage.to_string(),
            range: self.range.to_string(),
            trait_type: self.trait_type,
            description: self.description.to_string(),
        }
    }
}

const fn weapon(
    name: &'static str,
    damage: &'static str,
    trait_type: TraitType,
    kind: DamageKind,
    range: &'static str,
    description: &'static str,
) -> StandardWeapon {
    StandardWeapon {
        name,
        damage,
        trait_type,
        kind,
        range,
        description,
    }
}

pub const STANDARD_WEAPONS: &[StandardWeapon] = &[
    weapon("Greatsword", "d10+2", TraitType::Strength, DamageKind::Physical, "Melee", "Heavy two-handed blade."),
    weapon("Battleaxe", "d10+2", TraitType::Strength, DamageKind::Physical, "Melee", "Devastating swings."),
    weapon("Longsword", "d8", TraitType::Strength, DamageKind::Physical, "Melee", "Versatile and reliable."),
    weapon("Shortsword", "d8", TraitType::Agility, DamageKind::Physical, "Melee", "Quick strikes."),
    weapon("Dagger", "d6", TraitType::Finesse, DamageKind::Physical, "Close", "Precision work."),
    weapon("Rapier", "d8", TraitType::Finesse, DamageKind::Physical, "Melee", "Elegant thrusts."),
    weapon("Longbow", "d8", TraitType::Agility, DamageKind::Physical, "Far", "Ranged dominance."),
    weapon("Crossbow", "d10", TraitType::Agility, DamageKind::Physical, "Far", "Heavy projectile."),
    weapon("Staff", "d6", TraitType::Knowledge, DamageKind::Magic, "Melee", "Arcane focus."),
    weapon("Wand", "d8", TraitType::Presence, DamageKind::Magic, "Far", "Blast of magic."),
    weapon("Scepter", "d8", TraitType::Instinct, DamageKind::Magic, "Melee", "Channeling power."),
];

/// Inventory suggestions, grouped by category
pub const COMMON_ITEMS: &[(&str, &[&str])] = &[
    (
        "Consumables",
        &[
            "Healing Potion (Minor)",
            "Healing Potion (Major)",
            "Antidote",
            "Rations (1 day)",
            "Bandages",
            "Stress Potion",
        ],
    ),
    (
        "Light & Camping",
        &[
            "Torch",
            "Lantern",
            "Oil Flask",
            "Bedroll",
            "Flint and Steel",
            "Tent (Small)",
            "Waterskin",
        ],
    ),
    (
        "Tools",
        &[
            "Rope (50ft)",
            "Crowbar",
            "Grappling Hook",
            "Lockpicks",
            "Compass",
            "Shovel",
            "Whistle",
        ],
    ),
    (
        "Valuables",
        &["Bag of Gold", "Handful of Gold", "Gemstone", "Strange Relic"],
    ),
];

/// Experience name suggestions, grouped by category
pub const EXAMPLE_EXPERIENCES: &[(&str, &[&str])] = &[
    (
        "Background",
        &[
            "Street Urchin",
            "Noble Scion",
            "Hermit",
            "Soldier",
            "Scholar",
            "Criminal",
            "Entertainer",
            "Sailor",
        ],
    ),
    (
        "Training",
        &[
            "Master Swordsman",
            "Arcane Scholar",
            "Stealth Expert",
            "Survivalist",
            "Medic",
            "Diplomat",
        ],
    ),
    (
        "Quirks & History",
        &[
            "Raised by Wolves",
            "Cursed by a Witch",
            "Sole Survivor",
            "Dragon Slayer",
            "Wanted Fugitive",
            "Haunted",
        ],
    ),
];

pub fn class_entry(name: &str) -> Option<&'static ClassEntry> {
    let name = name.trim();
    CLASSES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// The two domains a class draws ability cards from
pub fn domains_for_class(name: &str) -> Option<[&'static str; 2]> {
    class_entry(name).map(|c| c.domains)
}

pub fn standard_weapon(name: &str) -> Option<&'static StandardWeapon> {
    let name = name.trim();
    STANDARD_WEAPONS
        .iter()
        .find(|w| w.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_two_subclasses_and_known_domains() {
        assert_eq!(CLASSES.len(), 9);
        for class in CLASSES {
            assert_eq!(class.subclasses.len(), 2, "{}", class.name);
            for domain in class.domains {
                assert!(DOMAINS.contains(&domain), "{} -> {}", class.name, domain);
            }
        }
    }

    #[test]
    fn domains_for_class_is_case_insensitive() {
        assert_eq!(domains_for_class("warrior"), Some(["Blade", "Bone"]));
        assert_eq!(domains_for_class(" Wizard "), Some(["Codex", "Splendor"]));
        assert_eq!(domains_for_class("Paladin"), None);
    }

    #[test]
    fn default_subclass_is_first_listed() {
        let druid = class_entry("Druid").unwrap();
        assert_eq!(druid.default_subclass(), "Warden of the Elements");
        assert!(druid.has_subclass("warden of the wilds"));
        assert!(!druid.has_subclass("Slayer"));
    }

    #[test]
    fn standard_weapons_use_listed_ranges() {
        assert_eq!(STANDARD_WEAPONS.len(), 11);
        for weapon in STANDARD_WEAPONS {
            assert!(WEAPON_RANGES.contains(&weapon.range), "{}", weapon.name);
        }
    }

    #[test]
    fn standard_weapon_becomes_sheet_entry() {
        let wand = standard_weapon("wand").unwrap();
        let weapon = wand.to_weapon();
        assert_eq!(weapon.name, "Wand");
        assert_eq!(weapon.kind, DamageKind::Magic);
        assert_eq!(weapon.trait_type, TraitType::Presence);
        assert_ne!(weapon.id, wand.to_weapon().id);
    }

    #[test]
    fn heritage_and_pick_lists_are_populated() {
        assert_eq!(ANCESTRIES.len(), 14);
        assert_eq!(COMMUNITIES.len(), 9);
        assert!(COMMON_ITEMS
            .iter()
            .any(|(_, items)| items.contains(&"Rope (50ft)")));
        assert_eq!(EXAMPLE_EXPERIENCES.len(), 3);
    }
}
