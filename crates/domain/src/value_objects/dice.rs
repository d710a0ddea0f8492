//! Duality dice value objects
//!
//! Every check rolls two d12s: the Hope die and the Fear die. The pair is
//! summed with the trait modifier, doubles are a critical success, and
//! otherwise the higher die decides whether the roll is "with Hope" or
//! "with Fear" (ties lean to Hope).

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Lowest face on a duality die
pub const DIE_MIN: i32 = 1;
/// Highest face on a duality die
pub const DIE_MAX: i32 = 12;

/// Error when building a roll from supplied die faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiceError {
    /// A face outside 1..=12 was supplied or drawn
    #[error("Die face {face} is outside 1..=12")]
    FaceOutOfRange { face: i32 },
}

/// Which of the two dice a roll favors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DieSide {
    Hope,
    Fear,
}

/// Narrative classification of a roll.
///
/// `Critical` wins over the favored side: doubles are always reported as a
/// critical, never as "with Hope".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RollVerdict {
    Critical,
    WithHope,
    WithFear,
}

impl RollVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical Success",
            Self::WithHope => "Success with Hope",
            Self::WithFear => "Success with Fear",
        }
    }
}

impl fmt::Display for RollVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one duality roll. Computed once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualityRoll {
    hope_die: u8,
    fear_die: u8,
    modifier: i32,
    /// hope + fear + modifier, widened so extreme modifiers cannot overflow
    total: i64,
}

impl DualityRoll {
    /// Roll both dice using an injected inclusive-range source.
    ///
    /// `draw(min, max)` is called exactly twice with `(1, 12)`, Hope first.
    /// Only fails if the source hands back a value outside the range it was asked for.
    pub fn roll(
        modifier: i32,
        mut draw: impl FnMut(i32, i32) -> i32,
    ) -> Result<Self, DiceError> {
        let hope = draw(DIE_MIN, DIE_MAX);
        let fear = draw(DIE_MIN, DIE_MAX);
        Self::from_dice(hope, fear, modifier)
    }

    /// Build a roll from known faces (physical dice, replays, tests)
    pub fn from_dice(hope: i32, fear: i32, modifier: i32) -> Result<Self, DiceError> {
        let hope_die = checked_face(hope)?;
        let fear_die = checked_face(fear)?;
        Ok(Self {
            hope_die,
            fear_die,
            modifier,
            total: i64::from(hope_die) + i64::from(fear_die) + i64::from(modifier),
        })
    }

    pub fn hope_die(&self) -> u8 {
        self.hope_die
    }

    pub fn fear_die(&self) -> u8 {
        self.fear_die
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Doubles on the dice
    pub fn is_critical(&self) -> bool {
        self.hope_die == self.fear_die
    }

    /// Hope is favored when `hope >= fear`, so a tie also reports Hope here.
    /// Use [`Self::verdict`] for anything narrative.
    pub fn favored_side(&self) -> DieSide {
        if self.hope_die >= self.fear_die {
            DieSide::Hope
        } else {
            DieSide::Fear
        }
    }

    pub fn verdict(&self) -> RollVerdict {
        if self.is_critical() {
            RollVerdict::Critical
        } else {
            match self.favored_side() {
                DieSide::Hope => RollVerdict::WithHope,
                DieSide::Fear => RollVerdict::WithFear,
            }
        }
    }

    /// Format as a breakdown string (e.g., "Hope 9 + Fear 4 - 1 = 12")
    pub fn breakdown(&self) -> String {
        let dice = format!("Hope {} + Fear {}", self.hope_die, self.fear_die);
        match self.modifier {
            0 => format!("{} = {}", dice, self.total),
            m if m > 0 => format!("{} + {} = {}", dice, m, self.total),
            m => format!("{} - {} = {}", dice, i64::from(m).abs(), self.total),
        }
    }
}

fn checked_face(face: i32) -> Result<u8, DiceError> {
    if (DIE_MIN..=DIE_MAX).contains(&face) {
        u8::try_from(face).map_err(|_| DiceError::FaceOutOfRange { face })
    } else {
        Err(DiceError::FaceOutOfRange { face })
    }
}
