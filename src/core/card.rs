//! Card variants and construction rules
//!
//! A card is a closed variant set over {Standard, Charge, Colony} with the
//! shared fields hoisted into [`CardInfo`]. Cards are immutable value objects
//! after construction except for the charge-cube counter, which mutates in
//! place as cubes accumulate and charge effects fire.

use crate::core::{EffectKind, SectorId};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Supply level of a card. Level 0 is reserved for starting/free cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardLevel {
    Starting,
    Level1,
    Level2,
    Level3,
}

impl CardLevel {
    pub fn from_number(n: u8) -> Result<Self> {
        match n {
            0 => Ok(CardLevel::Starting),
            1 => Ok(CardLevel::Level1),
            2 => Ok(CardLevel::Level2),
            3 => Ok(CardLevel::Level3),
            _ => Err(GameError::InvalidCard(format!("invalid card level {n}"))),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            CardLevel::Starting => 0,
            CardLevel::Level1 => 1,
            CardLevel::Level2 => 2,
            CardLevel::Level3 => 3,
        }
    }

    /// Legal cost range for cards of this level.
    pub fn cost_range(self) -> RangeInclusive<u32> {
        match self {
            CardLevel::Starting => 0..=0,
            CardLevel::Level1 => 2..=5,
            CardLevel::Level2 => 7..=9,
            CardLevel::Level3 => 12..=14,
        }
    }
}

impl fmt::Display for CardLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.number())
    }
}

/// When a charge effect is allowed to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeKind {
    /// Only during the owner's own turn
    Turn,
    /// Only during other players' turns
    OpponentTurn,
    /// Either
    Anytime,
}

impl ChargeKind {
    pub fn permits(self, owners_turn: bool) -> bool {
        match self {
            ChargeKind::Turn => owners_turn,
            ChargeKind::OpponentTurn => !owners_turn,
            ChargeKind::Anytime => true,
        }
    }
}

/// Charge behavior for one position (stationed or deployed) of a charge card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSide {
    pub effect: EffectKind,
    pub required_cubes: u8,
    pub cube_limit: u8,
    pub kind: ChargeKind,
}

impl ChargeSide {
    pub fn new(effect: EffectKind, required_cubes: u8, cube_limit: u8, kind: ChargeKind) -> Result<Self> {
        if required_cubes > cube_limit {
            return Err(GameError::InvalidCard(format!(
                "charge side requires {required_cubes} cubes but is limited to {cube_limit}"
            )));
        }
        Ok(ChargeSide {
            effect,
            required_cubes,
            cube_limit,
            kind,
        })
    }
}

/// Which face of a card is being activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPosition {
    Stationed,
    Deployed,
}

/// Fields shared by every card variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInfo {
    pub name: String,
    pub sector: SectorId,
    pub level: CardLevel,
    pub cost: u32,
}

/// Variant-specific card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Standard {
        stationed: EffectKind,
        deployed: EffectKind,
    },
    Charge {
        stationed: EffectKind,
        deployed: EffectKind,
        stationed_charge: ChargeSide,
        deployed_charge: ChargeSide,
        /// Cubes currently on the card, shared by both positions
        cubes: u8,
    },
    /// Colony cards carry no effects at all
    Colony,
}

/// A card in play or for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    info: CardInfo,
    kind: CardKind,
}

impl Card {
    fn validate_cost(name: &str, level: CardLevel, cost: u32) -> Result<()> {
        if level.cost_range().contains(&cost) {
            Ok(())
        } else {
            Err(GameError::InvalidCard(format!(
                "{name}: cost {cost} outside {level} range {:?}",
                level.cost_range()
            )))
        }
    }

    pub fn standard(
        name: impl Into<String>,
        sector: SectorId,
        level: CardLevel,
        cost: u32,
        stationed: EffectKind,
        deployed: EffectKind,
    ) -> Result<Self> {
        let name = name.into();
        Self::validate_cost(&name, level, cost)?;
        Ok(Card {
            info: CardInfo {
                name,
                sector,
                level,
                cost,
            },
            kind: CardKind::Standard { stationed, deployed },
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn charge(
        name: impl Into<String>,
        sector: SectorId,
        level: CardLevel,
        cost: u32,
        stationed: EffectKind,
        deployed: EffectKind,
        stationed_charge: ChargeSide,
        deployed_charge: ChargeSide,
    ) -> Result<Self> {
        let name = name.into();
        Self::validate_cost(&name, level, cost)?;
        Ok(Card {
            info: CardInfo {
                name,
                sector,
                level,
                cost,
            },
            kind: CardKind::Charge {
                stationed,
                deployed,
                stationed_charge,
                deployed_charge,
                cubes: 0,
            },
        })
    }

    pub fn colony(
        name: impl Into<String>,
        sector: SectorId,
        level: CardLevel,
        cost: u32,
    ) -> Result<Self> {
        let name = name.into();
        Self::validate_cost(&name, level, cost)?;
        Ok(Card {
            info: CardInfo {
                name,
                sector,
                level,
                cost,
            },
            kind: CardKind::Colony,
        })
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn sector(&self) -> SectorId {
        self.info.sector
    }

    pub fn level(&self) -> CardLevel {
        self.info.level
    }

    pub fn cost(&self) -> u32 {
        self.info.cost
    }

    pub fn is_charge(&self) -> bool {
        matches!(self.kind, CardKind::Charge { .. })
    }

    pub fn is_colony(&self) -> bool {
        matches!(self.kind, CardKind::Colony)
    }

    /// The effect for the given position, if this card has one.
    pub fn effect(&self, position: CardPosition) -> Option<&EffectKind> {
        match (&self.kind, position) {
            (CardKind::Standard { stationed, .. }, CardPosition::Stationed)
            | (CardKind::Charge { stationed, .. }, CardPosition::Stationed) => Some(stationed),
            (CardKind::Standard { deployed, .. }, CardPosition::Deployed)
            | (CardKind::Charge { deployed, .. }, CardPosition::Deployed) => Some(deployed),
            (CardKind::Colony, _) => None,
        }
    }

    /// The charge behavior for the given position, for charge cards.
    pub fn charge_side(&self, position: CardPosition) -> Option<&ChargeSide> {
        match (&self.kind, position) {
            (
                CardKind::Charge {
                    stationed_charge, ..
                },
                CardPosition::Stationed,
            ) => Some(stationed_charge),
            (CardKind::Charge { deployed_charge, .. }, CardPosition::Deployed) => {
                Some(deployed_charge)
            }
            _ => None,
        }
    }

    /// Cubes currently on this card (always 0 for non-charge cards).
    pub fn cubes(&self) -> u8 {
        match self.kind {
            CardKind::Charge { cubes, .. } => cubes,
            _ => 0,
        }
    }

    /// Add cubes to a charge card, clamped to the active position's limit.
    /// Returns how many cubes were actually added.
    pub fn add_cubes(&mut self, amount: u8, position: CardPosition) -> u8 {
        let limit = match self.charge_side(position) {
            Some(side) => side.cube_limit,
            None => return 0,
        };
        if let CardKind::Charge { cubes, .. } = &mut self.kind {
            let before = *cubes;
            *cubes = (*cubes + amount).min(limit);
            *cubes - before
        } else {
            0
        }
    }

    /// Fire the charge effect for the given position if the card has
    /// accumulated enough cubes and the charge kind permits the current
    /// context. Spends exactly `required_cubes`; at most one firing per call.
    pub fn try_spend_charge(&mut self, position: CardPosition, owners_turn: bool) -> Option<EffectKind> {
        let side = self.charge_side(position)?.clone();
        if !side.kind.permits(owners_turn) {
            return None;
        }
        if let CardKind::Charge { cubes, .. } = &mut self.kind {
            if *cubes >= side.required_cubes {
                *cubes -= side.required_cubes;
                return Some(side.effect);
            }
        }
        None
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, sector {}, cost {})",
            self.info.name,
            self.info.level,
            self.info.sector.as_u8(),
            self.info.cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(n: u8) -> SectorId {
        SectorId::new(n).unwrap()
    }

    fn credits(n: i32) -> EffectKind {
        EffectKind::AddCredits { amount: n }
    }

    #[test]
    fn test_cost_range_per_level() {
        // Level 2: 6 fails, 7-9 succeed, 10 fails.
        assert!(Card::standard("X", sector(1), CardLevel::Level2, 6, credits(1), credits(1)).is_err());
        for cost in 7..=9 {
            assert!(
                Card::standard("X", sector(1), CardLevel::Level2, cost, credits(1), credits(1))
                    .is_ok()
            );
        }
        assert!(
            Card::standard("X", sector(1), CardLevel::Level2, 10, credits(1), credits(1)).is_err()
        );

        assert!(Card::standard("X", sector(1), CardLevel::Level1, 2, credits(1), credits(1)).is_ok());
        assert!(Card::standard("X", sector(1), CardLevel::Level3, 14, credits(1), credits(1)).is_ok());
        assert!(Card::standard("X", sector(1), CardLevel::Level3, 15, credits(1), credits(1)).is_err());
        assert!(Card::colony("C", sector(1), CardLevel::Starting, 0).is_ok());
        assert!(Card::colony("C", sector(1), CardLevel::Starting, 1).is_err());
    }

    #[test]
    fn test_charge_side_invariant() {
        assert!(ChargeSide::new(credits(1), 3, 2, ChargeKind::Turn).is_err());
        assert!(ChargeSide::new(credits(1), 2, 2, ChargeKind::Turn).is_ok());
    }

    fn charge_card(required: u8, limit: u8, kind: ChargeKind) -> Card {
        let side = ChargeSide::new(credits(5), required, limit, kind).unwrap();
        Card::charge(
            "Reactor",
            sector(3),
            CardLevel::Level1,
            4,
            EffectKind::AddChargeCube { amount: 1 },
            EffectKind::AddChargeCube { amount: 1 },
            side.clone(),
            side,
        )
        .unwrap()
    }

    #[test]
    fn test_cubes_clamped_to_limit() {
        let mut card = charge_card(2, 3, ChargeKind::Anytime);
        assert_eq!(card.add_cubes(2, CardPosition::Stationed), 2);
        assert_eq!(card.add_cubes(5, CardPosition::Stationed), 1);
        assert_eq!(card.cubes(), 3);

        // Non-charge cards never hold cubes.
        let mut plain =
            Card::standard("P", sector(1), CardLevel::Level1, 2, credits(1), credits(1)).unwrap();
        assert_eq!(plain.add_cubes(2, CardPosition::Stationed), 0);
        assert_eq!(plain.cubes(), 0);
    }

    #[test]
    fn test_charge_fires_only_at_required() {
        let mut card = charge_card(2, 4, ChargeKind::Anytime);

        card.add_cubes(1, CardPosition::Stationed);
        assert_eq!(card.try_spend_charge(CardPosition::Stationed, true), None);
        assert_eq!(card.cubes(), 1);

        card.add_cubes(1, CardPosition::Stationed);
        let fired = card.try_spend_charge(CardPosition::Stationed, true);
        assert_eq!(fired, Some(credits(5)));
        // Decrements by exactly required_cubes.
        assert_eq!(card.cubes(), 0);
    }

    #[test]
    fn test_charge_kind_gating() {
        let mut card = charge_card(1, 2, ChargeKind::OpponentTurn);
        card.add_cubes(1, CardPosition::Deployed);

        // OpponentTurn card never fires on the owner's own turn.
        assert_eq!(card.try_spend_charge(CardPosition::Deployed, true), None);
        assert_eq!(card.cubes(), 1);
        assert!(card.try_spend_charge(CardPosition::Deployed, false).is_some());
    }

    #[test]
    fn test_colony_has_no_effects() {
        let card = Card::colony("Colony Ship", sector(12), CardLevel::Level3, 12).unwrap();
        assert!(card.effect(CardPosition::Stationed).is_none());
        assert!(card.effect(CardPosition::Deployed).is_none());
        assert!(card.charge_side(CardPosition::Stationed).is_none());
    }
}
