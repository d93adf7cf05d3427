//! Players and their resource pools

use crate::core::board::{ActivationContext, Board};
use crate::core::effects::EffectResolver;
use crate::core::{Card, PlayerId, SectorId};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

/// How a player's decisions are supplied. Human and computer players differ
/// only in their controller; all game rules treat them identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// A player's resource pools.
///
/// Credits, income and victory points are only ever added through the public
/// API; the additive mutators reject negative amounts outright since these
/// pools must never be reduced through the general interface. Purchases go
/// through [`ResourcePool::spend_credits`], which has its own guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    credits: u32,
    income: u32,
    victory_points: u32,
    charge_cubes: u32,
    roll_boost: u8,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard shared by the additive mutators: amounts must be non-negative.
    pub fn check_amount(amount: i32) -> Result<()> {
        if amount < 0 {
            Err(GameError::InvalidAmount(amount))
        } else {
            Ok(())
        }
    }

    pub fn add_credits(&mut self, amount: i32) -> Result<()> {
        Self::check_amount(amount)?;
        self.credits += amount as u32;
        Ok(())
    }

    pub fn add_income(&mut self, amount: i32) -> Result<()> {
        Self::check_amount(amount)?;
        self.income += amount as u32;
        Ok(())
    }

    pub fn add_victory_points(&mut self, amount: i32) -> Result<()> {
        Self::check_amount(amount)?;
        self.victory_points += amount as u32;
        Ok(())
    }

    pub fn add_charge_cubes(&mut self, amount: i32) -> Result<()> {
        Self::check_amount(amount)?;
        self.charge_cubes += amount as u32;
        Ok(())
    }

    /// Queue a boost for this player's next dice roll.
    pub fn add_roll_boost(&mut self, amount: u8) {
        self.roll_boost += amount;
    }

    /// Consume the queued roll boost.
    pub fn take_roll_boost(&mut self) -> u8 {
        std::mem::take(&mut self.roll_boost)
    }

    /// Pay for a purchase. Fails without mutation if the pool can't cover it.
    pub fn spend_credits(&mut self, cost: u32) -> Result<()> {
        if cost > self.credits {
            return Err(GameError::InsufficientCredits {
                cost,
                credits: self.credits,
            });
        }
        self.credits -= cost;
        Ok(())
    }

    /// End-of-turn reset: credits never drop below the income floor.
    pub fn reset_credits(&mut self) {
        self.credits = self.credits.max(self.income);
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn income(&self) -> u32 {
        self.income
    }

    pub fn victory_points(&self) -> u32 {
        self.victory_points
    }

    pub fn charge_cubes(&self) -> u32 {
        self.charge_cubes
    }
}

/// A player: stable identity, resource pools, and a twelve-sector board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    kind: PlayerKind,
    resources: ResourcePool,
    board: Board,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Player {
            id,
            name: name.into(),
            kind,
            resources: ResourcePool::new(),
            board: Board::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn resources(&self) -> &ResourcePool {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourcePool {
        &mut self.resources
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Place a card on this player's board in the card's own sector.
    /// Returns the sector it landed in, for card-added notifications.
    pub fn add_card(&mut self, card: Card) -> Result<SectorId> {
        let sector = card.sector();
        self.board.sector_mut(sector).place_card(card)?;
        Ok(sector)
    }

    /// Resolve the stationed effect of one of this player's sectors.
    pub fn activate_stationed(
        &mut self,
        sector: SectorId,
        resolver: &EffectResolver,
        ctx: ActivationContext,
    ) -> Result<()> {
        let Player {
            board, resources, ..
        } = self;
        board.sector_mut(sector).activate_stationed(resources, resolver, ctx)
    }

    /// Resolve the deployed effects of one of this player's sectors.
    pub fn activate_deployed(
        &mut self,
        sector: SectorId,
        resolver: &EffectResolver,
        ctx: ActivationContext,
    ) -> Result<()> {
        let Player {
            board, resources, ..
        } = self;
        board.sector_mut(sector).activate_deployed(resources, resolver, ctx)
    }

    pub fn reset_credits(&mut self) {
        self.resources.reset_credits();
    }
}
