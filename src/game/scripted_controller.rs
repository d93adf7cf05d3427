//! Scripted player controller for testing
//!
//! Replays queued decisions in order; once a queue runs dry it falls back to
//! safe defaults (the dice sum, decline) so a short script can still drive a
//! full game.

use crate::core::{DiceRoll, PlayerId};
use crate::game::controller::{BuyDecision, GameStateView, PlayerController};
use crate::Result;
use std::collections::VecDeque;

pub struct ScriptedController {
    player_id: PlayerId,
    sector_choices: VecDeque<u8>,
    buy_decisions: VecDeque<BuyDecision>,
}

impl ScriptedController {
    pub fn new(player_id: PlayerId) -> Self {
        ScriptedController {
            player_id,
            sector_choices: VecDeque::new(),
            buy_decisions: VecDeque::new(),
        }
    }

    pub fn queue_sector(&mut self, sector: u8) -> &mut Self {
        self.sector_choices.push_back(sector);
        self
    }

    pub fn queue_buy(&mut self, decision: BuyDecision) -> &mut Self {
        self.buy_decisions.push_back(decision);
        self
    }
}

impl PlayerController for ScriptedController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_sector(&mut self, _view: &GameStateView<'_>, roll: DiceRoll) -> Result<u8> {
        Ok(self.sector_choices.pop_front().unwrap_or_else(|| roll.sum()))
    }

    fn choose_purchase(&mut self, _view: &GameStateView<'_>) -> Result<BuyDecision> {
        Ok(self
            .buy_decisions
            .pop_front()
            .unwrap_or(BuyDecision::Decline))
    }
}
