//! Level decks and visible purchase rows
//!
//! Each level has a shuffled backing deck (pop-only) and a visible row
//! capped at six cards. A purchased card is replaced immediately by popping
//! the deck; once the deck runs dry the vacated slot becomes the explicit
//! vacant sentinel, whose fixed placeholder cost makes it unaffordable to
//! every purchase scan by construction.

use crate::core::{Card, CardLevel};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

pub const VISIBLE_ROW_CAP: usize = 6;

/// Placeholder cost of a vacant slot. Real card costs top out at 14, so no
/// credit pool that passed its guards can ever afford this.
pub const VACANT_SLOT_COST: u32 = 99;

/// One position in a visible row: a card for sale, or the vacant sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleSlot {
    Card(Card),
    Vacant,
}

impl VisibleSlot {
    /// Cost used by purchase scans. Vacant slots price themselves out.
    pub fn cost(&self) -> u32 {
        match self {
            VisibleSlot::Card(card) => card.cost(),
            VisibleSlot::Vacant => VACANT_SLOT_COST,
        }
    }

    pub fn card(&self) -> Option<&Card> {
        match self {
            VisibleSlot::Card(card) => Some(card),
            VisibleSlot::Vacant => None,
        }
    }

    pub fn is_vacant(&self) -> bool {
        matches!(self, VisibleSlot::Vacant)
    }
}

/// One level's deck/row pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSupply {
    level: CardLevel,
    /// Top of the deck is the end of the vec.
    deck: Vec<Card>,
    row: Vec<VisibleSlot>,
}

impl LevelSupply {
    pub fn new(level: CardLevel, deck: Vec<Card>) -> Result<Self> {
        if let Some(card) = deck.iter().find(|c| c.level() != level) {
            return Err(GameError::InvalidCard(format!(
                "{} is {} but was dealt into the {} deck",
                card.name(),
                card.level(),
                level
            )));
        }
        Ok(LevelSupply {
            level,
            deck,
            row: Vec::new(),
        })
    }

    pub fn level(&self) -> CardLevel {
        self.level
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.deck.shuffle(rng);
    }

    /// Deal from the deck until the row holds six slots, vacant-filling once
    /// the deck is exhausted.
    pub fn fill_row(&mut self) {
        while self.row.len() < VISIBLE_ROW_CAP {
            let slot = match self.deck.pop() {
                Some(card) => VisibleSlot::Card(card),
                None => VisibleSlot::Vacant,
            };
            self.row.push(slot);
        }
    }

    pub fn row(&self) -> &[VisibleSlot] {
        &self.row
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Take the card at `slot` and replenish one-for-one from the deck.
    pub fn buy(&mut self, slot: usize) -> Result<Card> {
        let current = self.row.get(slot).ok_or_else(|| {
            GameError::InvalidAction(format!("visible row has no slot {slot}"))
        })?;
        if current.is_vacant() {
            return Err(GameError::InvalidAction(format!(
                "slot {slot} of the {} row is vacant",
                self.level
            )));
        }
        let replacement = match self.deck.pop() {
            Some(card) => VisibleSlot::Card(card),
            None => VisibleSlot::Vacant,
        };
        let VisibleSlot::Card(card) = std::mem::replace(&mut self.row[slot], replacement) else {
            unreachable!("vacant slot rejected above");
        };
        Ok(card)
    }
}

/// The three purchasable levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardMarket {
    supplies: [LevelSupply; 3],
}

impl CardMarket {
    pub fn new(level1: Vec<Card>, level2: Vec<Card>, level3: Vec<Card>) -> Result<Self> {
        Ok(CardMarket {
            supplies: [
                LevelSupply::new(CardLevel::Level1, level1)?,
                LevelSupply::new(CardLevel::Level2, level2)?,
                LevelSupply::new(CardLevel::Level3, level3)?,
            ],
        })
    }

    fn index(level: CardLevel) -> Result<usize> {
        match level {
            CardLevel::Level1 => Ok(0),
            CardLevel::Level2 => Ok(1),
            CardLevel::Level3 => Ok(2),
            CardLevel::Starting => Err(GameError::InvalidAction(
                "starting cards are never for sale".to_string(),
            )),
        }
    }

    pub fn supply(&self, level: CardLevel) -> Result<&LevelSupply> {
        Ok(&self.supplies[Self::index(level)?])
    }

    /// Supplies in ascending level order.
    pub fn supplies(&self) -> impl Iterator<Item = &LevelSupply> {
        self.supplies.iter()
    }

    /// Shuffle every backing deck with the injected generator.
    pub fn shuffle_decks(&mut self, rng: &mut impl rand::Rng) {
        for supply in self.supplies.iter_mut() {
            supply.shuffle(rng);
        }
    }

    /// Deal all three visible rows to the cap.
    pub fn fill_rows(&mut self) {
        for supply in self.supplies.iter_mut() {
            supply.fill_row();
        }
    }

    pub fn buy(&mut self, level: CardLevel, slot: usize) -> Result<Card> {
        self.supplies[Self::index(level)?].buy(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EffectKind, SectorId};

    fn cards(level: CardLevel, cost: u32, n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                Card::standard(
                    format!("Card {i}"),
                    SectorId::new(1 + (i as u8 % 12)).unwrap(),
                    level,
                    cost,
                    EffectKind::AddCredits { amount: 1 },
                    EffectKind::AddCredits { amount: 1 },
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_row_caps_at_six() {
        let mut supply = LevelSupply::new(CardLevel::Level1, cards(CardLevel::Level1, 3, 10)).unwrap();
        supply.fill_row();
        assert_eq!(supply.row().len(), VISIBLE_ROW_CAP);
        assert_eq!(supply.deck_len(), 4);
        assert!(supply.row().iter().all(|s| !s.is_vacant()));
    }

    #[test]
    fn test_buy_replenishes_one_for_one() {
        let mut supply = LevelSupply::new(CardLevel::Level2, cards(CardLevel::Level2, 8, 8)).unwrap();
        supply.fill_row();

        supply.buy(2).unwrap();
        assert_eq!(supply.row().len(), VISIBLE_ROW_CAP);
        assert_eq!(supply.deck_len(), 1);
        assert!(!supply.row()[2].is_vacant());
    }

    #[test]
    fn test_deck_underflow_degrades_to_vacant() {
        let mut supply = LevelSupply::new(CardLevel::Level3, cards(CardLevel::Level3, 12, 6)).unwrap();
        supply.fill_row();
        assert_eq!(supply.deck_len(), 0);

        supply.buy(0).unwrap();
        assert!(supply.row()[0].is_vacant());
        assert!(supply.row()[0].cost() > CardLevel::Level3.cost_range().end().to_owned());

        // Vacant slots can never be bought back.
        assert!(supply.buy(0).is_err());
    }

    #[test]
    fn test_wrong_level_deck_rejected() {
        assert!(LevelSupply::new(CardLevel::Level1, cards(CardLevel::Level2, 8, 2)).is_err());
    }

    #[test]
    fn test_market_rejects_starting_level() {
        let market = CardMarket::new(
            cards(CardLevel::Level1, 3, 2),
            cards(CardLevel::Level2, 8, 2),
            cards(CardLevel::Level3, 12, 2),
        )
        .unwrap();
        assert!(market.supply(CardLevel::Starting).is_err());
        assert!(market.supply(CardLevel::Level2).is_ok());
    }
}
