//! Sectors and the per-player board
//!
//! Each board has twelve fixed sectors. A sector holds at most one stationed
//! card plus an ordered stack of deployed cards; placing a new card into an
//! occupied sector pushes the previous stationed card onto the end of the
//! deployed stack. Activation resolves card effects against the owning
//! player's resource pools through the injected resolver.

use crate::core::card::{Card, CardPosition};
use crate::core::effects::{EffectKind, EffectResolver};
use crate::core::player::ResourcePool;
use crate::core::SectorId;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Whether the activation happens on the board owner's own turn.
///
/// Stationed effects only ever resolve on the owner's turn; deployed effects
/// resolve for everyone, and charge kinds gate on this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationContext {
    pub owners_turn: bool,
}

impl ActivationContext {
    pub fn own_turn() -> Self {
        ActivationContext { owners_turn: true }
    }

    pub fn other_turn() -> Self {
        ActivationContext { owners_turn: false }
    }
}

/// Resolve one card face: route cube gains onto charge cards, everything
/// else through the resolver, then fire a ready charge effect.
fn activate_card(
    card: &mut Card,
    position: CardPosition,
    pool: &mut ResourcePool,
    resolver: &EffectResolver,
    ctx: ActivationContext,
) -> Result<()> {
    if let Some(effect) = card.effect(position).cloned() {
        match effect {
            EffectKind::AddChargeCube { amount } if card.is_charge() => {
                card.add_cubes(amount, position);
            }
            other => {
                resolver.apply(pool, &other)?;
            }
        }
    }
    if let Some(charge_effect) = card.try_spend_charge(position, ctx.owners_turn) {
        resolver.apply(pool, &charge_effect)?;
    }
    Ok(())
}

/// One numbered slot on a player's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    id: SectorId,
    stationed: Option<Card>,
    /// Insertion order is chronological deployment order.
    deployed: SmallVec<[Card; 2]>,
}

impl Sector {
    pub fn new(id: SectorId) -> Self {
        Sector {
            id,
            stationed: None,
            deployed: SmallVec::new(),
        }
    }

    pub fn id(&self) -> SectorId {
        self.id
    }

    pub fn stationed(&self) -> Option<&Card> {
        self.stationed.as_ref()
    }

    pub fn deployed(&self) -> &[Card] {
        &self.deployed
    }

    /// Place a card, displacing any stationed card onto the deployed stack.
    /// The card's sector number must match this sector.
    pub fn place_card(&mut self, card: Card) -> Result<()> {
        if card.sector() != self.id {
            return Err(GameError::SectorMismatch {
                card_sector: card.sector().as_u8(),
                sector: self.id.as_u8(),
            });
        }
        if let Some(previous) = self.stationed.take() {
            self.deployed.push(previous);
        }
        self.stationed = Some(card);
        Ok(())
    }

    /// Resolve the stationed card's primary effect, if a card is present.
    pub fn activate_stationed(
        &mut self,
        pool: &mut ResourcePool,
        resolver: &EffectResolver,
        ctx: ActivationContext,
    ) -> Result<()> {
        if let Some(card) = self.stationed.as_mut() {
            activate_card(card, CardPosition::Stationed, pool, resolver, ctx)?;
        }
        Ok(())
    }

    /// Resolve every deployed card's deployed effect, in deployment order.
    /// This is the stacking payout other players rely on.
    pub fn activate_deployed(
        &mut self,
        pool: &mut ResourcePool,
        resolver: &EffectResolver,
        ctx: ActivationContext,
    ) -> Result<()> {
        for card in self.deployed.iter_mut() {
            activate_card(card, CardPosition::Deployed, pool, resolver, ctx)?;
        }
        Ok(())
    }
}

/// Fixed mapping of the twelve sector ids to sectors, one board per player.
/// Created once at player creation and never resized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    sectors: [Sector; SectorId::COUNT],
}

impl Board {
    pub fn new() -> Self {
        Board {
            // from_fn indexes 0..COUNT, so id = index + 1 is always in range
            sectors: std::array::from_fn(|i| Sector::new(SectorId::new_unchecked(i as u8 + 1))),
        }
    }

    pub fn sector(&self, id: SectorId) -> &Sector {
        &self.sectors[id.index()]
    }

    pub fn sector_mut(&mut self, id: SectorId) -> &mut Sector {
        &mut self.sectors[id.index()]
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.iter()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
