//! Game state, the turn/round engine, and player controllers

pub mod channel_controller;
pub mod controller;
pub mod engine;
pub mod events;
pub mod heuristic_controller;
pub mod interactive_controller;
pub mod logger;
pub mod market;
pub mod phase;
pub mod scripted_controller;
pub mod state;

pub use channel_controller::{ChannelController, Decision, DecisionPolicy, DecisionSender};
pub use controller::{BuyDecision, GameStateView, PlayerController};
pub use engine::{GameEndReason, GameEngine, GameOutcome};
pub use events::{EventBus, GameEvent};
pub use heuristic_controller::HeuristicController;
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use market::{CardMarket, LevelSupply, VisibleSlot, VACANT_SLOT_COST, VISIBLE_ROW_CAP};
pub use phase::TurnPhase;
pub use scripted_controller::ScriptedController;
pub use state::{GameConfig, GameState, MAX_PLAYERS, MIN_PLAYERS};
