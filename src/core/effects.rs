//! Card effect descriptors and their resolution
//!
//! Effects are a closed tagged union matched exhaustively by the resolver,
//! so an unhandled effect kind is a compile-time error. The resolver is an
//! injected collaborator of the engine (not a module-level table) and its
//! side effects are confined to the target player's resource pools.

use crate::core::player::ResourcePool;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction for the adjacent-sector arrow reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjacentDirection {
    Left,
    Right,
}

/// Everything a card can do to a player when its sector is activated.
///
/// `AdjacentSectorReward` and `ClaimCardsAtLevel` are carried as inert
/// placeholders: their selection semantics await the authoritative rules,
/// and the resolver reports them as skipped rather than guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Add credits to the player's pool
    AddCredits { amount: i32 },

    /// Add income to the player's pool
    AddIncome { amount: i32 },

    /// Add victory points to the player's pool
    AddVictoryPoints { amount: i32 },

    /// Add credits and income together
    AddCreditsAndIncome { credits: i32, income: i32 },

    /// Add credits and victory points together
    AddCreditsAndVictoryPoints { credits: i32, points: i32 },

    /// Reward copied from an adjacent sector (unresolved placeholder)
    AdjacentSectorReward { direction: AdjacentDirection },

    /// Claim visible cards at a given level (unresolved placeholder)
    ClaimCardsAtLevel { level: u8 },

    /// Add charge cubes; lands on the activated card for charge cards,
    /// otherwise on the player's cube reserve
    AddChargeCube { amount: u8 },

    /// Boost the player's next dice roll
    AddToRoll { amount: u8 },
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::AddCredits { amount } => write!(f, "+{amount} credits"),
            EffectKind::AddIncome { amount } => write!(f, "+{amount} income"),
            EffectKind::AddVictoryPoints { amount } => write!(f, "+{amount} VP"),
            EffectKind::AddCreditsAndIncome { credits, income } => {
                write!(f, "+{credits} credits, +{income} income")
            }
            EffectKind::AddCreditsAndVictoryPoints { credits, points } => {
                write!(f, "+{credits} credits, +{points} VP")
            }
            EffectKind::AdjacentSectorReward { direction } => {
                write!(f, "adjacent sector reward ({direction:?})")
            }
            EffectKind::ClaimCardsAtLevel { level } => write!(f, "claim level {level} cards"),
            EffectKind::AddChargeCube { amount } => write!(f, "+{amount} charge cube(s)"),
            EffectKind::AddToRoll { amount } => write!(f, "+{amount} to next roll"),
        }
    }
}

/// What the resolver did with an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The mutation was applied to the player's pools
    Applied,
    /// Placeholder effect, state untouched
    Skipped,
}

/// Maps an effect descriptor to a resource mutation on the target player.
///
/// Stateless; constructed once and passed to the engine so tests can
/// exercise it in isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectResolver;

impl EffectResolver {
    pub fn new() -> Self {
        EffectResolver
    }

    /// Apply exactly the mutation implied by the effect tag.
    ///
    /// The Add* variants reject negative amounts at this boundary even
    /// though callers are expected to only ever add; a rejected call leaves
    /// the pool unchanged.
    pub fn apply(&self, pool: &mut ResourcePool, effect: &EffectKind) -> Result<Resolution> {
        match *effect {
            EffectKind::AddCredits { amount } => {
                pool.add_credits(amount)?;
            }
            EffectKind::AddIncome { amount } => {
                pool.add_income(amount)?;
            }
            EffectKind::AddVictoryPoints { amount } => {
                pool.add_victory_points(amount)?;
            }
            EffectKind::AddCreditsAndIncome { credits, income } => {
                // Validate both amounts up front so a rejected call observes
                // no partial mutation.
                ResourcePool::check_amount(credits)?;
                ResourcePool::check_amount(income)?;
                pool.add_credits(credits)?;
                pool.add_income(income)?;
            }
            EffectKind::AddCreditsAndVictoryPoints { credits, points } => {
                ResourcePool::check_amount(credits)?;
                ResourcePool::check_amount(points)?;
                pool.add_credits(credits)?;
                pool.add_victory_points(points)?;
            }
            EffectKind::AdjacentSectorReward { .. } | EffectKind::ClaimCardsAtLevel { .. } => {
                return Ok(Resolution::Skipped);
            }
            EffectKind::AddChargeCube { amount } => {
                pool.add_charge_cubes(amount as i32)?;
            }
            EffectKind::AddToRoll { amount } => {
                pool.add_roll_boost(amount);
            }
        }
        Ok(Resolution::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_credits() {
        let resolver = EffectResolver::new();
        let mut pool = ResourcePool::new();

        let r = resolver
            .apply(&mut pool, &EffectKind::AddCredits { amount: 3 })
            .unwrap();
        assert_eq!(r, Resolution::Applied);
        assert_eq!(pool.credits(), 3);
    }

    #[test]
    fn test_compound_effects() {
        let resolver = EffectResolver::new();
        let mut pool = ResourcePool::new();

        resolver
            .apply(
                &mut pool,
                &EffectKind::AddCreditsAndIncome {
                    credits: 2,
                    income: 1,
                },
            )
            .unwrap();
        resolver
            .apply(
                &mut pool,
                &EffectKind::AddCreditsAndVictoryPoints {
                    credits: 1,
                    points: 4,
                },
            )
            .unwrap();

        assert_eq!(pool.credits(), 3);
        assert_eq!(pool.income(), 1);
        assert_eq!(pool.victory_points(), 4);
    }

    #[test]
    fn test_negative_amount_rejected_without_partial_mutation() {
        let resolver = EffectResolver::new();
        let mut pool = ResourcePool::new();

        assert!(resolver
            .apply(&mut pool, &EffectKind::AddCredits { amount: -1 })
            .is_err());
        assert_eq!(pool.credits(), 0);

        // Compound effect with one bad half must not apply the good half.
        assert!(resolver
            .apply(
                &mut pool,
                &EffectKind::AddCreditsAndIncome {
                    credits: 5,
                    income: -2,
                },
            )
            .is_err());
        assert_eq!(pool.credits(), 0);
        assert_eq!(pool.income(), 0);
    }

    #[test]
    fn test_placeholders_skip() {
        let resolver = EffectResolver::new();
        let mut pool = ResourcePool::new();

        let r = resolver
            .apply(
                &mut pool,
                &EffectKind::AdjacentSectorReward {
                    direction: AdjacentDirection::Left,
                },
            )
            .unwrap();
        assert_eq!(r, Resolution::Skipped);

        let r = resolver
            .apply(&mut pool, &EffectKind::ClaimCardsAtLevel { level: 2 })
            .unwrap();
        assert_eq!(r, Resolution::Skipped);

        assert_eq!(pool.credits(), 0);
        assert_eq!(pool.victory_points(), 0);
    }

    #[test]
    fn test_roll_boost_accumulates() {
        let resolver = EffectResolver::new();
        let mut pool = ResourcePool::new();

        resolver
            .apply(&mut pool, &EffectKind::AddToRoll { amount: 1 })
            .unwrap();
        resolver
            .apply(&mut pool, &EffectKind::AddToRoll { amount: 1 })
            .unwrap();
        assert_eq!(pool.take_roll_boost(), 2);
        assert_eq!(pool.take_roll_boost(), 0);
    }
}
