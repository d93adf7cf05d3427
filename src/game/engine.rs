//! The round/turn state machine
//!
//! Drives turns through their phases, suspends on controller decisions, and
//! runs the termination checks at round boundaries. There is exactly one
//! engine per game and it never runs two turns concurrently; all suspension
//! happens inside blocking controller calls, so no phase advances until the
//! pending decision is fully applied.

use crate::core::{ActivationContext, DiceRoll, DiceRoller, EffectResolver, PlayerId, SectorId};
use crate::game::controller::{BuyDecision, GameStateView, PlayerController};
use crate::game::events::{EventBus, GameEvent};
use crate::game::phase::TurnPhase;
use crate::game::state::GameState;
use crate::{GameError, Result};
use smallvec::SmallVec;
use std::sync::mpsc::Receiver;

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// A player reached the victory threshold
    VictoryThreshold,
    /// The round cap was hit with nobody at the threshold
    RoundLimit,
}

/// Result of running a game to completion.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    /// Every player tied at the maximum victory-point value
    pub winners: SmallVec<[PlayerId; 2]>,
    /// Full rounds played before termination
    pub rounds_played: u32,
    pub end_reason: GameEndReason,
}

/// Turn/round state machine over a borrowed game state.
pub struct GameEngine<'a> {
    game: &'a mut GameState,
    dice: DiceRoller,
    resolver: EffectResolver,
    events: EventBus,
    phase: TurnPhase,
    /// Cap on consecutive rejected choices from one controller. Interactive
    /// controllers re-prompt internally and never get near this; it exists
    /// so a buggy scripted controller fails loudly instead of looping.
    max_choice_retries: u32,
}

impl<'a> GameEngine<'a> {
    /// Create an engine over the game state with an injected dice roller.
    pub fn new(game: &'a mut GameState, dice: DiceRoller) -> Self {
        GameEngine {
            game,
            dice,
            resolver: EffectResolver::new(),
            events: EventBus::new(),
            phase: TurnPhase::AwaitingRoundStart,
            max_choice_retries: 100,
        }
    }

    /// Swap in a different effect resolver.
    pub fn with_resolver(mut self, resolver: EffectResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_max_choice_retries(mut self, retries: u32) -> Self {
        self.max_choice_retries = retries;
        self
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn game(&self) -> &GameState {
        self.game
    }

    /// Register an event subscriber. Subscribe before running the game to
    /// see the complete stream.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.events.subscribe()
    }

    fn set_phase(&mut self, next: TurnPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(GameError::InvalidAction(format!(
                "illegal phase transition {:?} -> {next:?}",
                self.phase
            )));
        }
        self.phase = next;
        Ok(())
    }

    /// Controllers must cover the seats in order, one per player.
    fn verify_controllers(&self, controllers: &[Box<dyn PlayerController>]) -> Result<()> {
        if controllers.len() != self.game.player_count() {
            return Err(GameError::InvalidAction(format!(
                "{} controllers for {} players",
                controllers.len(),
                self.game.player_count()
            )));
        }
        for (player, controller) in self.game.players().iter().zip(controllers) {
            if player.id() != controller.player_id() {
                return Err(GameError::InvalidAction(format!(
                    "controller for {} seated at {}",
                    controller.player_id(),
                    player.id()
                )));
            }
        }
        Ok(())
    }

    /// Run the game to completion.
    pub fn run_game(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<GameOutcome> {
        self.verify_controllers(controllers)?;
        loop {
            if let Some(outcome) = self.run_turn_once(controllers)? {
                return Ok(outcome);
            }
        }
    }

    /// Run a bounded number of turns, stopping early if the game ends.
    /// Convenience for tests; returns the outcome if the game finished.
    pub fn run_turns(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
        turns_to_run: u32,
    ) -> Result<Option<GameOutcome>> {
        self.verify_controllers(controllers)?;
        for _ in 0..turns_to_run {
            if let Some(outcome) = self.run_turn_once(controllers)? {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    /// Run one complete turn for the active player. Returns the outcome if
    /// the turn closed the game.
    pub fn run_turn_once(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<Option<GameOutcome>> {
        if self.game.is_game_over() {
            return Err(GameError::InvalidAction("game is already over".to_string()));
        }

        let active_id = self.game.active_player_id();
        let seat = self.game.active_index();
        let controller = controllers[seat].as_mut();

        // Pre-roll reaction point, before randomness is introduced.
        self.set_phase(TurnPhase::PreRoll)?;
        self.events.emit(&GameEvent::PreRoll { player: active_id });
        controller.pre_roll(&GameStateView::new(self.game, active_id))?;

        // Roll, applying any boost the player accumulated.
        let boost = self.game.active_player_mut().resources_mut().take_roll_boost();
        let roll = self.dice.roll().boosted(boost);
        self.set_phase(TurnPhase::DiceRolled)?;
        self.events.emit(&GameEvent::DiceRolled {
            roll,
            player: active_id,
        });
        self.game.logger.log_normal(&format!(
            "Round {} turn {}: {active_id} rolled {roll}",
            self.game.round_number(),
            self.game.turn_number()
        ));

        // Mandatory suspend: wait for a legal sector choice.
        self.set_phase(TurnPhase::AwaitingSectorChoice)?;
        let sector = self.request_sector_choice(controller, active_id, roll)?;
        self.resolve_sector(sector)?;

        // Buy phase: humans suspend here, computer players answer inline.
        self.set_phase(TurnPhase::AwaitingBuyDecision)?;
        self.events.emit(&GameEvent::BuyPhase { player: active_id });
        self.run_buy_phase(controller, active_id)?;

        // End of turn bookkeeping.
        self.game.active_player_mut().reset_credits();
        self.set_phase(TurnPhase::TurnComplete)?;
        self.events.emit(&GameEvent::TurnComplete {
            player: active_id,
            turn: self.game.turn_number(),
        });

        let ending_round = self.game.round_number();
        if self.game.advance_cursor() {
            self.set_phase(TurnPhase::RoundComplete)?;
            self.events.emit(&GameEvent::RoundOver {
                round: ending_round,
            });
            if let Some(reason) = self.check_termination() {
                return Ok(Some(self.finish_game(controllers, reason)?));
            }
        }
        Ok(None)
    }

    /// Ask the controller for a sector until the answer matches the roll.
    /// A mismatch is a rejected request, not an error; it is simply asked
    /// again (up to the retry cap for non-interactive controllers).
    fn request_sector_choice(
        &mut self,
        controller: &mut dyn PlayerController,
        active_id: PlayerId,
        roll: DiceRoll,
    ) -> Result<SectorId> {
        for _ in 0..self.max_choice_retries {
            let choice = controller.choose_sector(&GameStateView::new(self.game, active_id), roll)?;
            if roll.permits(choice) {
                if let Ok(sector) = SectorId::new(choice) {
                    self.game
                        .logger
                        .log_normal(&format!("{active_id} activates sector {choice}"));
                    return Ok(sector);
                }
            }
            self.game.logger.log_normal(&format!(
                "{active_id} chose sector {choice}, not one of {roll} options; asking again"
            ));
        }
        Err(GameError::InvalidAction(format!(
            "{active_id} exhausted sector-choice retries"
        )))
    }

    /// The acting player resolves the chosen sector's stationed and deployed
    /// effects on their own board; every other player independently resolves
    /// only the deployed effects on their board's matching sector.
    fn resolve_sector(&mut self, sector: SectorId) -> Result<()> {
        let active_idx = self.game.active_index();
        let resolver = self.resolver;
        for (idx, player) in self.game.players_mut().iter_mut().enumerate() {
            if idx == active_idx {
                player.activate_stationed(sector, &resolver, ActivationContext::own_turn())?;
                player.activate_deployed(sector, &resolver, ActivationContext::own_turn())?;
            } else {
                player.activate_deployed(sector, &resolver, ActivationContext::other_turn())?;
            }
        }
        if self.game.logger.verbosity() >= crate::game::logger::VerbosityLevel::Verbose {
            for player in self.game.players() {
                let r = player.resources();
                self.game.logger.log_verbose(&format!(
                    "  {}: {} credits, {} income, {} VP",
                    player.id(),
                    r.credits(),
                    r.income(),
                    r.victory_points()
                ));
            }
        }
        Ok(())
    }

    /// Ask for a buy decision until it is a decline or a valid purchase.
    fn run_buy_phase(
        &mut self,
        controller: &mut dyn PlayerController,
        active_id: PlayerId,
    ) -> Result<()> {
        for _ in 0..self.max_choice_retries {
            let decision =
                controller.choose_purchase(&GameStateView::new(self.game, active_id))?;
            let (level, slot) = match decision {
                BuyDecision::Decline => {
                    self.game
                        .logger
                        .log_normal(&format!("{active_id} declines to buy"));
                    return Ok(());
                }
                BuyDecision::Purchase { level, slot } => (level, slot),
            };

            let credits = self.game.active_player().resources().credits();
            let affordable = self
                .game
                .market
                .supply(level)
                .ok()
                .and_then(|s| s.row().get(slot))
                .is_some_and(|visible| !visible.is_vacant() && visible.cost() <= credits);
            if !affordable {
                self.game.logger.log_normal(&format!(
                    "{active_id} cannot buy {level} slot {slot}; asking again"
                ));
                continue;
            }

            let card = self.game.market.buy(level, slot)?;
            let name = card.name().to_string();
            let cost = card.cost();
            self.game
                .active_player_mut()
                .resources_mut()
                .spend_credits(cost)?;
            let sector = self.game.active_player_mut().add_card(card)?;
            self.events.emit(&GameEvent::CardAdded {
                player: active_id,
                sector,
                card_name: name.clone(),
            });
            self.game.logger.log_normal(&format!(
                "{active_id} buys {name} for {cost} credits into sector {}",
                sector.as_u8()
            ));
            return Ok(());
        }
        Err(GameError::InvalidAction(format!(
            "{active_id} exhausted buy-decision retries"
        )))
    }

    /// Termination runs at round boundaries only: threshold first, then the
    /// round cap, whichever occurs first ends the game.
    fn check_termination(&self) -> Option<GameEndReason> {
        if self.game.any_at_threshold() {
            Some(GameEndReason::VictoryThreshold)
        } else if self.game.round_number() > self.game.config.max_rounds {
            Some(GameEndReason::RoundLimit)
        } else {
            None
        }
    }

    fn finish_game(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
        end_reason: GameEndReason,
    ) -> Result<GameOutcome> {
        self.set_phase(TurnPhase::GameOver)?;
        self.game.mark_game_over();

        let winners = self.game.winners();
        self.events.emit(&GameEvent::GameOver {
            winners: winners.clone(),
        });
        let rounds_played = self.game.round_number() - 1;
        self.game.logger.log_minimal(&format!(
            "Game over after {rounds_played} rounds ({end_reason:?}); winners: {winners:?}"
        ));

        for controller in controllers.iter_mut() {
            let view = GameStateView::new(self.game, controller.player_id());
            controller.on_game_end(&view, &winners);
        }

        Ok(GameOutcome {
            winners,
            rounds_played,
            end_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardLevel, EffectKind, Player, PlayerKind};
    use crate::game::controller::BuyDecision;
    use crate::game::market::CardMarket;
    use crate::game::scripted_controller::ScriptedController;
    use crate::game::state::GameConfig;

    fn roster(n: usize) -> Vec<Player> {
        PlayerId::all(n)
            .map(|id| Player::new(id, format!("P{}", id.as_u8()), PlayerKind::Computer))
            .collect()
    }

    fn empty_market() -> CardMarket {
        CardMarket::new(Vec::new(), Vec::new(), Vec::new()).unwrap()
    }

    fn quiet(mut game: GameState) -> GameState {
        game.logger
            .set_verbosity(crate::game::logger::VerbosityLevel::Silent);
        game
    }

    fn scripted_seats(n: usize) -> Vec<Box<dyn PlayerController>> {
        PlayerId::all(n)
            .map(|id| Box::new(ScriptedController::new(id)) as Box<dyn PlayerController>)
            .collect()
    }

    #[test]
    fn test_rejected_sector_choice_is_rerequested() {
        let mut game = quiet(
            GameState::new(roster(2), empty_market(), GameConfig::default()).unwrap(),
        );
        let mut engine = GameEngine::new(&mut game, DiceRoller::from_seed(1));

        let mut bad_then_good = ScriptedController::new(PlayerId::new(1));
        // Impossible choices first; the fallback (dice sum) is always legal.
        bad_then_good.queue_sector(0).queue_sector(13);
        let mut controllers: Vec<Box<dyn PlayerController>> = vec![
            Box::new(bad_then_good),
            Box::new(ScriptedController::new(PlayerId::new(2))),
        ];

        // The turn completes despite the two rejections.
        assert!(engine.run_turn_once(&mut controllers).unwrap().is_none());
    }

    #[test]
    fn test_retry_cap_fails_loudly() {
        let mut game = quiet(
            GameState::new(roster(2), empty_market(), GameConfig::default()).unwrap(),
        );
        let mut engine =
            GameEngine::new(&mut game, DiceRoller::from_seed(1)).with_max_choice_retries(3);

        struct AlwaysWrong(PlayerId);
        impl PlayerController for AlwaysWrong {
            fn player_id(&self) -> PlayerId {
                self.0
            }
            fn choose_sector(&mut self, _: &GameStateView<'_>, _: crate::core::DiceRoll) -> Result<u8> {
                Ok(0)
            }
            fn choose_purchase(&mut self, _: &GameStateView<'_>) -> Result<BuyDecision> {
                Ok(BuyDecision::Decline)
            }
        }

        let mut controllers: Vec<Box<dyn PlayerController>> = vec![
            Box::new(AlwaysWrong(PlayerId::new(1))),
            Box::new(ScriptedController::new(PlayerId::new(2))),
        ];
        assert!(engine.run_turn_once(&mut controllers).is_err());
    }

    #[test]
    fn test_round_limit_termination_with_tied_winners() {
        let config = GameConfig {
            victory_threshold: 40,
            max_rounds: 4,
        };
        let mut game = quiet(GameState::new(roster(3), empty_market(), config).unwrap());
        let mut engine = GameEngine::new(&mut game, DiceRoller::from_seed(9));
        let mut controllers = scripted_seats(3);

        let outcome = engine.run_game(&mut controllers).unwrap();
        assert_eq!(outcome.end_reason, GameEndReason::RoundLimit);
        assert_eq!(outcome.rounds_played, 4);
        // Nobody scored, so the whole roster is tied at zero.
        assert_eq!(outcome.winners.len(), 3);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_threshold_ends_game_at_round_close() {
        let config = GameConfig {
            victory_threshold: 5,
            max_rounds: 50,
        };
        let mut players = roster(2);
        // Station a VP card on every sector player 2 can roll, so their
        // first activation crosses the threshold.
        for sector in SectorId::all() {
            players[1]
                .add_card(
                    Card::standard(
                        format!("Monument {}", sector.as_u8()),
                        sector,
                        CardLevel::Level1,
                        2,
                        EffectKind::AddVictoryPoints { amount: 5 },
                        EffectKind::AddVictoryPoints { amount: 1 },
                    )
                    .unwrap(),
                )
                .unwrap();
        }
        let mut game = quiet(GameState::new(players, empty_market(), config).unwrap());
        let mut engine = GameEngine::new(&mut game, DiceRoller::from_seed(3));
        let mut controllers = scripted_seats(2);

        let outcome = engine.run_game(&mut controllers).unwrap();
        assert_eq!(outcome.end_reason, GameEndReason::VictoryThreshold);
        // The game ends at the close of round 1: both players took a turn.
        assert_eq!(outcome.rounds_played, 1);
        assert_eq!(outcome.winners.as_slice(), &[PlayerId::new(2)]);
    }

    #[test]
    fn test_event_stream_order_for_one_turn() {
        let mut game = quiet(
            GameState::new(roster(2), empty_market(), GameConfig::default()).unwrap(),
        );
        let mut engine = GameEngine::new(&mut game, DiceRoller::from_seed(5));
        let rx = engine.subscribe();
        let mut controllers = scripted_seats(2);

        engine.run_turn_once(&mut controllers).unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert!(matches!(events[0], GameEvent::PreRoll { .. }));
        assert!(matches!(events[1], GameEvent::DiceRolled { .. }));
        assert!(matches!(events[2], GameEvent::BuyPhase { .. }));
        assert!(matches!(events[3], GameEvent::TurnComplete { .. }));
    }

    #[test]
    fn test_purchase_places_card_and_replenishes() {
        let sector = SectorId::new(1).unwrap();
        let deck: Vec<Card> = (0..7)
            .map(|i| {
                Card::standard(
                    format!("Freighter {i}"),
                    sector,
                    CardLevel::Level1,
                    2,
                    EffectKind::AddCredits { amount: 1 },
                    EffectKind::AddCredits { amount: 1 },
                )
                .unwrap()
            })
            .collect();
        let mut market = CardMarket::new(deck, Vec::new(), Vec::new()).unwrap();
        market.fill_rows();

        let mut players = roster(2);
        players[0].resources_mut().add_credits(3).unwrap();
        let mut game = quiet(GameState::new(players, market, GameConfig::default()).unwrap());
        let mut engine = GameEngine::new(&mut game, DiceRoller::from_seed(2));

        let mut buyer = ScriptedController::new(PlayerId::new(1));
        buyer.queue_buy(BuyDecision::Purchase {
            level: CardLevel::Level1,
            slot: 0,
        });
        let mut controllers: Vec<Box<dyn PlayerController>> = vec![
            Box::new(buyer),
            Box::new(ScriptedController::new(PlayerId::new(2))),
        ];

        engine.run_turn_once(&mut controllers).unwrap();

        let board_sector = game.player(PlayerId::new(1)).unwrap().board().sector(sector);
        assert!(board_sector.stationed().is_some());
        // Row refilled one-for-one from the six remaining deck cards.
        let supply = game.market.supply(CardLevel::Level1).unwrap();
        assert!(supply.row().iter().all(|s| !s.is_vacant()));
    }
}
