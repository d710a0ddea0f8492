//! Gold ledger value objects
//!
//! Wealth is a single total that players see as four tiers: 10 coins make a
//! handful, 10 handfuls a bag, 10 bags a chest. Chests never roll over.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// One tier of the gold ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Denomination {
    Coins,
    Handfuls,
    Bags,
    Chests,
}

impl Denomination {
    /// Smallest to largest
    pub const ALL: [Denomination; 4] = [
        Denomination::Coins,
        Denomination::Handfuls,
        Denomination::Bags,
        Denomination::Chests,
    ];

    /// Worth of one unit of this tier, in coins
    pub fn value(&self) -> u64 {
        match self {
            Self::Coins => 1,
            Self::Handfuls => 10,
            Self::Bags => 100,
            Self::Chests => 1000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Coins => "Coins",
            Self::Handfuls => "Handfuls",
            Self::Bags => "Bags",
            Self::Chests => "Chests",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}g)", self.label(), self.value())
    }
}

/// Gold split across the four tiers.
///
/// Tiers may transiently exceed 9 after an edit; [`GoldBreakdown::normalize`]
/// carries them upward. Negative tiers are unrepresentable here; see
/// [`GoldBreakdown::try_from_signed`] for the checked entry from signed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldBreakdown {
    pub coins: u64,
    pub handfuls: u64,
    pub bags: u64,
    pub chests: u64,
}

/// A settled amount: every tier below chests is in 0..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedGold {
    pub total: u64,
    pub breakdown: GoldBreakdown,
}

impl GoldBreakdown {
    pub fn new(coins: u64, handfuls: u64, bags: u64, chests: u64) -> Self {
        Self {
            coins,
            handfuls,
            bags,
            chests,
        }
    }

    /// Build from signed tiers, rejecting (never clamping) negatives.
    pub fn try_from_signed(
        coins: i64,
        handfuls: i64,
        bags: i64,
        chests: i64,
    ) -> Result<Self, DomainError> {
        let tier = |denomination: Denomination, value: i64| {
            u64::try_from(value).map_err(|_| {
                DomainError::precondition(format!(
                    "{} tier is negative ({})",
                    denomination.label().to_lowercase(),
                    value
                ))
            })
        };
        Ok(Self {
            coins: tier(Denomination::Coins, coins)?,
            handfuls: tier(Denomination::Handfuls, handfuls)?,
            bags: tier(Denomination::Bags, bags)?,
            chests: tier(Denomination::Chests, chests)?,
        })
    }

    /// Split a total into tiers. The result is already normalized.
    pub fn from_total(total: u64) -> Self {
        Self {
            chests: total / 1000,
            bags: (total % 1000) / 100,
            handfuls: (total % 100) / 10,
            coins: total % 10,
        }
    }

    pub fn get(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Coins => self.coins,
            Denomination::Handfuls => self.handfuls,
            Denomination::Bags => self.bags,
            Denomination::Chests => self.chests,
        }
    }

    /// Copy with one tier replaced
    pub fn with(mut self, denomination: Denomination, value: u64) -> Self {
        match denomination {
            Denomination::Coins => self.coins = value,
            Denomination::Handfuls => self.handfuls = value,
            Denomination::Bags => self.bags = value,
            Denomination::Chests => self.chests = value,
        }
        self
    }

    pub fn is_normalized(&self) -> bool {
        self.coins < 10 && self.handfuls < 10 && self.bags < 10
    }

    /// Carry every overflowing tier upward and flatten to a total.
    ///
    /// Each carry is applied before the next tier is inspected, so a coin
    /// overflow that pushes handfuls past 9 cascades into bags in the same
    /// call. Fails only when the amount does not fit in a `u64`.
    pub fn normalize(self) -> Result<NormalizedGold, DomainError> {
        let overflow = || DomainError::precondition("gold amount exceeds the ledger's range");

        let mut b = self;
        b.handfuls = b.handfuls.checked_add(b.coins / 10).ok_or_else(overflow)?;
        b.coins %= 10;
        b.bags = b.bags.checked_add(b.handfuls / 10).ok_or_else(overflow)?;
        b.handfuls %= 10;
        b.chests = b.chests.checked_add(b.bags / 10).ok_or_else(overflow)?;
        b.bags %= 10;

        let total = b
            .chests
            .checked_mul(Denomination::Chests.value())
            .and_then(|t| t.checked_add(b.bags * Denomination::Bags.value()))
            .and_then(|t| t.checked_add(b.handfuls * Denomination::Handfuls.value()))
            .and_then(|t| t.checked_add(b.coins))
            .ok_or_else(overflow)?;

        Ok(NormalizedGold {
            total,
            breakdown: b,
        })
    }
}

impl From<NormalizedGold> for GoldBreakdown {
    fn from(value: NormalizedGold) -> Self {
        value.breakdown
    }
}

impl fmt::Display for NormalizedGold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_digit_coins_cascade_into_handfuls() {
        let gold = GoldBreakdown::new(23, 0, 0, 0).normalize().unwrap();
        assert_eq!(gold.breakdown, GoldBreakdown::new(3, 2, 0, 0));
        assert_eq!(gold.total, 23);
    }

    #[test]
    fn test_editing_coins_to_fifteen() {
        let gold = GoldBreakdown::default()
            .with(Denomination::Coins, 15)
            .normalize()
            .unwrap();
        assert_eq!(gold.breakdown, GoldBreakdown::new(5, 1, 0, 0));
        assert_eq!(gold.total, 15);
    }

    #[test]
    fn test_second_order_carry_reaches_chests() {
        // 95 coins -> 9 more handfuls -> 18 handfuls -> bag 10 -> chest
        let gold = GoldBreakdown::new(95, 9, 9, 0).normalize().unwrap();
        assert_eq!(gold.breakdown, GoldBreakdown::new(5, 8, 0, 1));
        assert_eq!(gold.total, 1085);
    }

    #[test]
    fn test_chests_never_roll_over() {
        let gold = GoldBreakdown::new(0, 0, 0, 42).normalize().unwrap();
        assert_eq!(gold.breakdown.chests, 42);
        assert_eq!(gold.total, 42_000);
    }

    #[test]
    fn test_normalizing_settled_amount_is_identity() {
        let settled = GoldBreakdown::new(7, 3, 9, 12);
        assert!(settled.is_normalized());
        let gold = settled.normalize().unwrap();
        assert_eq!(gold.breakdown, settled);
        assert_eq!(gold.breakdown.normalize().unwrap(), gold);
    }

    #[test]
    fn test_from_total_round_trips_with_normalize() {
        let inputs = [
            (0, 0, 0, 0),
            (23, 0, 0, 0),
            (9, 9, 9, 9),
            (10, 10, 10, 10),
            (999, 0, 57, 3),
            (1, 250, 0, 0),
            (12_345, 678, 91, 2),
        ];
        for (c, h, b, k) in inputs {
            let gold = GoldBreakdown::new(c, h, b, k).normalize().unwrap();
            assert_eq!(GoldBreakdown::from_total(gold.total), gold.breakdown);
            assert_eq!(gold.total, c + h * 10 + b * 100 + k * 1000);
        }
    }

    #[test]
    fn test_from_total_splits_tiers() {
        assert_eq!(
            GoldBreakdown::from_total(4321),
            GoldBreakdown::new(1, 2, 3, 4)
        );
        assert_eq!(GoldBreakdown::from_total(15), GoldBreakdown::new(5, 1, 0, 0));
    }

    #[test]
    fn test_negative_tier_is_rejected_not_clamped() {
        let err = GoldBreakdown::try_from_signed(3, -1, 0, 0).unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
        assert!(err.to_string().contains("handfuls"));

        let ok = GoldBreakdown::try_from_signed(3, 1, 0, 0).unwrap();
        assert_eq!(ok, GoldBreakdown::new(3, 1, 0, 0));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = GoldBreakdown::new(0, 0, 0, u64::MAX).normalize().unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
    }

    #[test]
    fn test_denomination_values() {
        let values: Vec<u64> = Denomination::ALL.iter().map(|d| d.value()).collect();
        assert_eq!(values, vec![1, 10, 100, 1000]);
        assert_eq!(Denomination::Bags.to_string(), "Bags (100g)");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn tier() -> impl Strategy<Value = u64> {
            0u64..1_000_000
        }

        proptest! {
            /// Normalizing keeps the coin value and leaves lower tiers under 10
            #[test]
            fn prop_normalize_preserves_total(
                coins in tier(),
                handfuls in tier(),
                bags in tier(),
                chests in tier(),
            ) {
                let gold = GoldBreakdown::new(coins, handfuls, bags, chests).normalize().unwrap();
                prop_assert_eq!(gold.total, coins + handfuls * 10 + bags * 100 + chests * 1000);
                prop_assert!(gold.breakdown.is_normalized());
                prop_assert!(gold.breakdown.coins < 10);
                prop_assert!(gold.breakdown.handfuls < 10);
                prop_assert!(gold.breakdown.bags < 10);
            }

            #[test]
            fn prop_normalize_is_idempotent(
                coins in tier(),
                handfuls in tier(),
                bags in tier(),
                chests in tier(),
            ) {
                let once = GoldBreakdown::new(coins, handfuls, bags, chests).normalize().unwrap();
                let twice = once.breakdown.normalize().unwrap();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn prop_from_total_round_trips(total in 0u64..u64::MAX / 2) {
                let breakdown = GoldBreakdown::from_total(total);
                prop_assert!(breakdown.is_normalized());
                let gold = breakdown.normalize().unwrap();
                prop_assert_eq!(gold.total, total);
                prop_assert_eq!(gold.breakdown, breakdown);
            }
        }
    }
}
