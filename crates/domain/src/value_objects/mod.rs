//! Value objects - Immutable objects defined by their attributes

mod dice;
mod gold;

pub use dice::{DiceError, DieSide, DualityRoll, RollVerdict, DIE_MAX, DIE_MIN};
pub use gold::{Denomination, GoldBreakdown, NormalizedGold};
