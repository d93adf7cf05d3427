//! Game initialization
//!
//! Assembles a ready-to-run [`GameState`] from a roster and a validated card
//! source: players get their starting boards, decks are shuffled with the
//! seeded generator, and the visible rows are dealt.

use crate::core::{DiceRoller, Player, PlayerId, PlayerKind};
use crate::game::market::CardMarket;
use crate::game::state::{GameConfig, GameState, MAX_PLAYERS, MIN_PLAYERS};
use crate::loader::source::CardSource;
use crate::{GameError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Builder for a fully initialized game.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameInitializer {
    seed: u64,
    config: GameConfig,
}

impl GameInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for deck shuffling (and the matching dice roller).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// A dice roller sharing this initializer's seed, for reproducible games.
    pub fn dice_roller(&self) -> DiceRoller {
        DiceRoller::from_seed(self.seed)
    }

    /// Build the game: stationed starting cards, shuffled decks, dealt rows.
    pub fn initialize(
        &self,
        roster: &[(String, PlayerKind)],
        source: CardSource,
    ) -> Result<GameState> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&roster.len()) {
            return Err(GameError::InvalidPlayerCount(roster.len()));
        }

        let (starting, level1, level2, level3) = source.into_parts();

        let mut players = Vec::with_capacity(roster.len());
        for (idx, (name, kind)) in roster.iter().enumerate() {
            let mut player = Player::new(PlayerId::new(idx as u8 + 1), name.clone(), *kind);
            for card in starting.iter().cloned() {
                player.add_card(card)?;
            }
            players.push(player);
        }

        let mut market = CardMarket::new(level1, level2, level3)?;
        let mut rng = ChaCha12Rng::seed_from_u64(self.seed);
        market.shuffle_decks(&mut rng);
        market.fill_rows();

        GameState::new(players, market, self.config)
    }
}
