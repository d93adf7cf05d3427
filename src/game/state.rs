//! Aggregate game state
//!
//! Central structure owning the players, the card market, and the
//! round/turn cursor. It is mutated only by the single game-control flow;
//! everything observable leaves through events and point-in-time views.

use crate::core::{Player, PlayerId};
use crate::game::logger::GameLogger;
use crate::game::market::CardMarket;
use crate::{GameError, Result};
use smallvec::SmallVec;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

/// Pre-game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Victory points that end the game at the close of the round
    pub victory_threshold: u32,
    /// Hard cap on rounds played
    pub max_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            victory_threshold: 40,
            max_rounds: 50,
        }
    }
}

/// Complete game state.
#[derive(Debug)]
pub struct GameState {
    players: Vec<Player>,
    pub market: CardMarket,
    round_number: u32,
    /// 1-based, cycles through the players each round
    turn_number: u32,
    active_idx: usize,
    pub config: GameConfig,
    game_over: bool,
    pub logger: GameLogger,
}

impl GameState {
    /// Build a game over a fixed roster. Players must carry ids 1..=N in
    /// order; the roster size is checked against the 2-5 seat rule.
    pub fn new(players: Vec<Player>, market: CardMarket, config: GameConfig) -> Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::InvalidPlayerCount(players.len()));
        }
        for (idx, player) in players.iter().enumerate() {
            if player.id().index() != idx {
                return Err(GameError::InvalidAction(format!(
                    "player ids must be 1..={} in seat order, found {} in seat {}",
                    players.len(),
                    player.id(),
                    idx + 1
                )));
            }
        }
        Ok(GameState {
            players,
            market,
            round_number: 1,
            turn_number: 1,
            active_idx: 0,
            config,
            game_over: false,
            logger: GameLogger::new(),
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id() == id)
            .ok_or(GameError::PlayerNotFound(id.as_u8()))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(GameError::PlayerNotFound(id.as_u8()))
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active_idx]
    }

    pub fn active_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.active_idx]
    }

    pub fn active_player_id(&self) -> PlayerId {
        self.players[self.active_idx].id()
    }

    pub fn active_index(&self) -> usize {
        self.active_idx
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Monotone: once set, the game stays over.
    pub fn mark_game_over(&mut self) {
        self.game_over = true;
    }

    /// Advance the active-player cursor by fixed rotation. Returns true when
    /// the rotation wrapped, i.e. a round just ended and `round_number` was
    /// incremented.
    pub fn advance_cursor(&mut self) -> bool {
        self.active_idx = (self.active_idx + 1) % self.players.len();
        self.turn_number += 1;
        if self.turn_number > self.players.len() as u32 {
            self.turn_number = 1;
            self.round_number += 1;
            true
        } else {
            false
        }
    }

    pub fn max_victory_points(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.resources().victory_points())
            .max()
            .unwrap_or(0)
    }

    /// All players tied for the maximum victory-point value.
    pub fn winners(&self) -> SmallVec<[PlayerId; 2]> {
        let max = self.max_victory_points();
        self.players
            .iter()
            .filter(|p| p.resources().victory_points() == max)
            .map(|p| p.id())
            .collect()
    }

    pub fn any_at_threshold(&self) -> bool {
        self.players
            .iter()
            .any(|p| p.resources().victory_points() >= self.config.victory_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerKind;

    fn roster(n: usize) -> Vec<Player> {
        PlayerId::all(n)
            .map(|id| Player::new(id, format!("P{}", id.as_u8()), PlayerKind::Computer))
            .collect()
    }

    fn empty_market() -> CardMarket {
        CardMarket::new(Vec::new(), Vec::new(), Vec::new()).unwrap()
    }

    #[test]
    fn test_valid_player_counts() {
        for n in 2..=5 {
            let game = GameState::new(roster(n), empty_market(), GameConfig::default()).unwrap();
            assert_eq!(game.player_count(), n);
            for player in game.players() {
                assert_eq!(player.resources().credits(), 0);
                assert_eq!(player.resources().income(), 0);
                assert_eq!(player.resources().victory_points(), 0);
                assert_eq!(player.board().sectors().count(), 12);
            }
        }
    }

    #[test]
    fn test_invalid_player_counts() {
        for n in [0, 1, 6, 9] {
            assert!(matches!(
                GameState::new(roster(n), empty_market(), GameConfig::default()),
                Err(GameError::InvalidPlayerCount(_))
            ));
        }
    }

    #[test]
    fn test_out_of_order_ids_rejected() {
        let mut players = roster(3);
        players.swap(0, 2);
        assert!(GameState::new(players, empty_market(), GameConfig::default()).is_err());
    }

    #[test]
    fn test_cursor_rotation_and_round_wrap() {
        let mut game = GameState::new(roster(3), empty_market(), GameConfig::default()).unwrap();
        assert_eq!(game.active_player_id(), PlayerId::new(1));
        assert_eq!(game.round_number(), 1);

        assert!(!game.advance_cursor());
        assert_eq!(game.active_player_id(), PlayerId::new(2));
        assert!(!game.advance_cursor());
        assert_eq!(game.active_player_id(), PlayerId::new(3));

        // Third advance wraps back to player 1 and ends the round.
        assert!(game.advance_cursor());
        assert_eq!(game.active_player_id(), PlayerId::new(1));
        assert_eq!(game.round_number(), 2);
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn test_winner_set_includes_ties() {
        let mut game = GameState::new(roster(4), empty_market(), GameConfig::default()).unwrap();

        // Untouched game: everyone tied at zero.
        assert_eq!(game.winners().len(), 4);

        game.player_mut(PlayerId::new(2))
            .unwrap()
            .resources_mut()
            .add_victory_points(10)
            .unwrap();
        game.player_mut(PlayerId::new(4))
            .unwrap()
            .resources_mut()
            .add_victory_points(10)
            .unwrap();

        let winners = game.winners();
        assert_eq!(winners.as_slice(), &[PlayerId::new(2), PlayerId::new(4)]);
    }
}
