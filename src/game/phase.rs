//! Turn/round state machine phases

use serde::{Deserialize, Serialize};

/// States of the round/turn state machine.
///
/// The two `Awaiting*` states are the mandatory suspend points: the engine
/// blocks on a controller decision there and advances only once the decision
/// is fully applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Before the first turn of a round
    AwaitingRoundStart,
    /// Pre-roll notification point for the active player
    PreRoll,
    /// Dice values are known and broadcast
    DiceRolled,
    /// Suspended until the active player supplies a sector choice
    AwaitingSectorChoice,
    /// Suspended until the active player buys or declines
    AwaitingBuyDecision,
    /// Turn bookkeeping done, cursor about to advance
    TurnComplete,
    /// Full rotation finished, termination checks run here
    RoundComplete,
    /// Terminal
    GameOver,
}

impl TurnPhase {
    /// Legal successor states. The branch out of `TurnComplete` goes to the
    /// next player's `PreRoll` or to `RoundComplete`; out of `RoundComplete`
    /// to the next round's `PreRoll` or to `GameOver`.
    pub fn can_transition_to(self, next: TurnPhase) -> bool {
        use TurnPhase::*;
        matches!(
            (self, next),
            (AwaitingRoundStart, PreRoll)
                | (PreRoll, DiceRolled)
                | (DiceRolled, AwaitingSectorChoice)
                | (AwaitingSectorChoice, AwaitingBuyDecision)
                | (AwaitingBuyDecision, TurnComplete)
                | (TurnComplete, PreRoll)
                | (TurnComplete, RoundComplete)
                | (RoundComplete, PreRoll)
                | (RoundComplete, GameOver)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == TurnPhase::GameOver
    }
}
