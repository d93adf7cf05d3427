//! Player controller trait and game state view
//!
//! The interface between the engine and the decision surfaces (human input
//! or AI). The engine calls the controller at each suspend point and does
//! not proceed until the call returns; controllers inspect a read-only view
//! of the game state to make their choices.

use crate::core::{Card, CardLevel, DiceRoll, Player, PlayerId, SectorId};
use crate::game::market::VisibleSlot;
use crate::game::state::GameState;
use crate::Result;

/// The active player's answer to the buy phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyDecision {
    /// Buy the card at `slot` of the given level's visible row
    Purchase { level: CardLevel, slot: usize },
    /// Keep the credits
    Decline,
}

/// Read-only view of game state from one player's perspective.
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn me(&self) -> Option<&'a Player> {
        self.game.player(self.player_id).ok()
    }

    pub fn credits(&self) -> u32 {
        self.me().map(|p| p.resources().credits()).unwrap_or(0)
    }

    pub fn income(&self) -> u32 {
        self.me().map(|p| p.resources().income()).unwrap_or(0)
    }

    pub fn victory_points(&self) -> u32 {
        self.me()
            .map(|p| p.resources().victory_points())
            .unwrap_or(0)
    }

    /// The viewing player's stationed card at a sector, if any.
    pub fn stationed_card(&self, sector: SectorId) -> Option<&'a Card> {
        self.me().and_then(|p| p.board().sector(sector).stationed())
    }

    /// The viewing player's deployed stack at a sector.
    pub fn deployed_cards(&self, sector: SectorId) -> &'a [Card] {
        self.me()
            .map(|p| p.board().sector(sector).deployed())
            .unwrap_or(&[])
    }

    /// A level's visible row (empty slice for the unreachable Starting level).
    pub fn visible_row(&self, level: CardLevel) -> &'a [VisibleSlot] {
        self.game
            .market
            .supply(level)
            .map(|s| s.row())
            .unwrap_or(&[])
    }

    pub fn deck_len(&self, level: CardLevel) -> usize {
        self.game
            .market
            .supply(level)
            .map(|s| s.deck_len())
            .unwrap_or(0)
    }

    pub fn active_player_id(&self) -> PlayerId {
        self.game.active_player_id()
    }

    pub fn round_number(&self) -> u32 {
        self.game.round_number()
    }

    pub fn victory_threshold(&self) -> u32 {
        self.game.config.victory_threshold
    }

    /// Victory points per player, in seat order (for scoreboards).
    pub fn scoreboard(&self) -> Vec<(PlayerId, u32)> {
        self.game
            .players()
            .iter()
            .map(|p| (p.id(), p.resources().victory_points()))
            .collect()
    }
}

/// Player controller trait
///
/// Implement this to create AI players or connect a UI. The engine calls
/// these methods at the suspend points; a blocking implementation suspends
/// the game until its decision is ready.
pub trait PlayerController {
    /// The player this controller decides for
    fn player_id(&self) -> PlayerId;

    /// Called before the dice are rolled (optional reaction point)
    fn pre_roll(&mut self, _view: &GameStateView<'_>) -> Result<()> {
        Ok(())
    }

    /// Choose a sector number for the rolled dice. The engine validates the
    /// answer against {die1, die2, die1+die2} and asks again on a mismatch.
    fn choose_sector(&mut self, view: &GameStateView<'_>, roll: DiceRoll) -> Result<u8>;

    /// Buy a visible card or decline. Asked again if the purchase is
    /// unaffordable, vacant, or out of range.
    fn choose_purchase(&mut self, view: &GameStateView<'_>) -> Result<BuyDecision>;

    /// Called once when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView<'_>, _winners: &[PlayerId]) {}
}
