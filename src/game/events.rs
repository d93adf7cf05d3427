//! Engine notifications and their delivery
//!
//! Notifications are one-way and ordered per subscriber. The bus owns an
//! explicit list of channel senders, so who is subscribed (and for how long)
//! is visible and testable; a dropped receiver simply falls off the list.
//! Sends never block the engine.

use crate::core::{DiceRoll, PlayerId, SectorId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Everything the engine announces to presentation/AI layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A turn is about to roll dice
    PreRoll { player: PlayerId },

    /// The dice have been rolled for the active player
    DiceRolled { roll: DiceRoll, player: PlayerId },

    /// The active player may now buy a card
    BuyPhase { player: PlayerId },

    /// A card landed on a player's board
    CardAdded {
        player: PlayerId,
        sector: SectorId,
        card_name: String,
    },

    /// The active player's turn finished
    TurnComplete { player: PlayerId, turn: u32 },

    /// A full rotation through all players finished
    RoundOver { round: u32 },

    /// The game is over; every player tied at the maximum victory points wins
    GameOver { winners: SmallVec<[PlayerId; 2]> },
}

/// Owned list of event subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and hand back its receiving end.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, dropping dead ones.
    pub fn emit(&mut self, event: &GameEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_in_order() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();

        let p = PlayerId::new(1);
        bus.emit(&GameEvent::PreRoll { player: p });
        bus.emit(&GameEvent::DiceRolled {
            roll: DiceRoll::new(2, 3),
            player: p,
        });

        assert_eq!(rx.recv().unwrap(), GameEvent::PreRoll { player: p });
        assert!(matches!(rx.recv().unwrap(), GameEvent::DiceRolled { .. }));
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx);
        bus.emit(&GameEvent::RoundOver { round: 1 });
        assert_eq!(bus.subscriber_count(), 1);
    }
}
