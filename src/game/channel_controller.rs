//! Channel-backed controller for out-of-thread deciders
//!
//! The engine's suspend points become a blocking receive on a single-slot
//! channel: the engine thread genuinely parks until a presentation or AI
//! thread pushes a decision through the paired sender, and no turn phase
//! advances until the decision is applied. There is deliberately no polling
//! loop anywhere in this handoff.

use crate::core::{DiceRoll, PlayerId};
use crate::game::controller::{BuyDecision, GameStateView, PlayerController};
use crate::{GameError, Result};
use std::sync::mpsc::{sync_channel, Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;

/// A decision pushed from the deciding thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Sector(u8),
    Buy(BuyDecision),
}

/// How long the engine waits at a suspend point.
///
/// The reference behavior waits indefinitely for a human; the deadline
/// variant exists for embedders that want sessions to die rather than hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecisionPolicy {
    #[default]
    WaitForever,
    Deadline(Duration),
}

/// Sending half handed to the presentation/AI thread.
#[derive(Debug, Clone)]
pub struct DecisionSender {
    tx: SyncSender<Decision>,
}

impl DecisionSender {
    pub fn send_sector(&self, sector: u8) -> Result<()> {
        self.tx
            .send(Decision::Sector(sector))
            .map_err(|_| GameError::DecisionSourceClosed)
    }

    pub fn send_buy(&self, decision: BuyDecision) -> Result<()> {
        self.tx
            .send(Decision::Buy(decision))
            .map_err(|_| GameError::DecisionSourceClosed)
    }
}

/// Controller whose decisions arrive over a channel.
pub struct ChannelController {
    player_id: PlayerId,
    rx: Receiver<Decision>,
    policy: DecisionPolicy,
}

impl ChannelController {
    pub fn new(player_id: PlayerId) -> (Self, DecisionSender) {
        Self::with_policy(player_id, DecisionPolicy::WaitForever)
    }

    pub fn with_policy(player_id: PlayerId, policy: DecisionPolicy) -> (Self, DecisionSender) {
        // Capacity 1: the decider can stage one answer without blocking,
        // the engine consumes it at the matching suspend point.
        let (tx, rx) = sync_channel(1);
        (
            ChannelController {
                player_id,
                rx,
                policy,
            },
            DecisionSender { tx },
        )
    }

    fn next_decision(&self) -> Result<Decision> {
        match self.policy {
            DecisionPolicy::WaitForever => {
                self.rx.recv().map_err(|_| GameError::DecisionSourceClosed)
            }
            DecisionPolicy::Deadline(timeout) => {
                self.rx.recv_timeout(timeout).map_err(|e| match e {
                    RecvTimeoutError::Timeout => GameError::DecisionTimeout,
                    RecvTimeoutError::Disconnected => GameError::DecisionSourceClosed,
                })
            }
        }
    }
}

impl PlayerController for ChannelController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_sector(&mut self, _view: &GameStateView<'_>, _roll: DiceRoll) -> Result<u8> {
        match self.next_decision()? {
            Decision::Sector(sector) => Ok(sector),
            Decision::Buy(_) => Err(GameError::InvalidAction(
                "expected a sector choice, got a buy decision".to_string(),
            )),
        }
    }

    fn choose_purchase(&mut self, _view: &GameStateView<'_>) -> Result<BuyDecision> {
        match self.next_decision()? {
            Decision::Buy(decision) => Ok(decision),
            Decision::Sector(_) => Err(GameError::InvalidAction(
                "expected a buy decision, got a sector choice".to_string(),
            )),
        }
    }
}
