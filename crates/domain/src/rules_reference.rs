//! Built-in rules reference text shown before any generated explanation.

use crate::entities::TraitType;

/// A short titled explanation for one sheet element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesEntry {
    pub title: &'static str,
    pub body: &'static str,
}

const ENTRIES: &[(&str, RulesEntry)] = &[
    (
        "Agility",
        RulesEntry {
            title: "Agility",
            body: "Agility measures speed, balance, and coordination: sprinting, leaping, \
                   climbing, firing bows and crossbows, and dodging area attacks.",
        },
    ),
    (
        "Strength",
        RulesEntry {
            title: "Strength",
            body: "Strength measures raw physical power: lifting, smashing doors, grappling, \
                   and wielding heavy melee weapons.",
        },
    ),
    (
        "Finesse",
        RulesEntry {
            title: "Finesse",
            body: "Finesse measures dexterity and precision: picking locks, sleight of hand, \
                   moving silently, and wielding light, precise weapons.",
        },
    ),
    (
        "Instinct",
        RulesEntry {
            title: "Instinct",
            body: "Instinct measures intuition and awareness: sensing danger, tracking, \
                   reading intentions, and reacting to surprises.",
        },
    ),
    (
        "Presence",
        RulesEntry {
            title: "Presence",
            body: "Presence measures force of personality: persuading, intimidating, \
                   performing, and magic of the soul or emotion.",
        },
    ),
    (
        "Knowledge",
        RulesEntry {
            title: "Knowledge",
            body: "Knowledge measures intellect and education: recalling lore, analyzing \
                   magic, treating wounds, and deciphering codes.",
        },
    ),
    (
        "Evasion",
        RulesEntry {
            title: "Evasion Score",
            body: "Your passive defense. Attackers must roll equal to or higher than this \
                   number to hit you.",
        },
    ),
    (
        "Damage",
        RulesEntry {
            title: "Health & Damage Thresholds",
            body: "Damage is compared to your thresholds instead of subtracted from HP. \
                   Below Minor: mark Stress. Minor to Major: mark 1 HP. Major to Severe: \
                   mark 2 HP. Severe or more: mark 3 HP.",
        },
    ),
    (
        "Armor",
        RulesEntry {
            title: "Armor Slots",
            body: "When you take damage you may spend 1 Armor Slot to reduce the incoming \
                   damage by your Armor Score.",
        },
    ),
    (
        "Stress",
        RulesEntry {
            title: "Stress",
            body: "Stress pays for abilities and absorbs damage below your Minor threshold. \
                   If Stress is full and you must mark more, mark 1 HP instead.",
        },
    ),
    (
        "Hope",
        RulesEntry {
            title: "Hope",
            body: "Gain Hope when you roll with Hope (Hope die >= Fear die). Spend it on \
                   ability costs, helping an ally, or giving yourself advantage.",
        },
    ),
    (
        "Gold",
        RulesEntry {
            title: "Gold & Wealth",
            body: "10 coins make a handful, 10 handfuls a bag, and 10 bags a chest. A handful \
                   buys a meal, a bag a weapon, a chest a horse and cart.",
        },
    ),
    (
        "Experiences",
        RulesEntry {
            title: "Experiences",
            body: "Narrative tags from your background. Spend 1 Hope to add a relevant \
                   Experience's value to a roll.",
        },
    ),
];

/// Look up reference text by key (case-insensitive)
pub fn rules_reference(key: &str) -> Option<RulesEntry> {
    let key = key.trim();
    ENTRIES
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, entry)| *entry)
}

/// Reference text for a trait. Every trait has an entry.
pub fn trait_reference(trait_type: TraitType) -> Option<RulesEntry> {
    rules_reference(trait_type.name())
}
