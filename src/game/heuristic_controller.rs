//! Heuristic computer controller
//!
//! Makes every decision deterministically from the current view, never from
//! randomness, so games with fixed seeds replay identically. Sector choices
//! score the candidate sectors by their immediate payout to the roller; the
//! buy phase is affordability-first across level 3, then 2, then 1.

use crate::core::{CardLevel, CardPosition, DiceRoll, EffectKind, PlayerId, SectorId};
use crate::game::controller::{BuyDecision, GameStateView, PlayerController};
use crate::Result;

pub struct HeuristicController {
    player_id: PlayerId,
}

impl HeuristicController {
    pub fn new(player_id: PlayerId) -> Self {
        HeuristicController { player_id }
    }

    /// Rough worth of one effect to the roller. Income outweighs one-shot
    /// credits, victory points outweigh both.
    fn score_effect(effect: &EffectKind) -> i32 {
        match *effect {
            EffectKind::AddCredits { amount } => amount * 10,
            EffectKind::AddIncome { amount } => amount * 15,
            EffectKind::AddVictoryPoints { amount } => amount * 20,
            EffectKind::AddCreditsAndIncome { credits, income } => credits * 10 + income * 15,
            EffectKind::AddCreditsAndVictoryPoints { credits, points } => {
                credits * 10 + points * 20
            }
            EffectKind::AddChargeCube { amount } => amount as i32 * 5,
            EffectKind::AddToRoll { amount } => amount as i32 * 5,
            // Placeholders resolve to nothing today.
            EffectKind::AdjacentSectorReward { .. } | EffectKind::ClaimCardsAtLevel { .. } => 0,
        }
    }

    /// Payout of activating `sector` on the controller's own board:
    /// stationed effect plus the whole deployed stack.
    fn score_sector(&self, view: &GameStateView<'_>, sector: SectorId) -> i32 {
        let stationed = view
            .stationed_card(sector)
            .and_then(|c| c.effect(CardPosition::Stationed))
            .map(Self::score_effect)
            .unwrap_or(0);
        let deployed: i32 = view
            .deployed_cards(sector)
            .iter()
            .filter_map(|c| c.effect(CardPosition::Deployed))
            .map(Self::score_effect)
            .sum();
        stationed + deployed
    }
}

impl PlayerController for HeuristicController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_sector(&mut self, view: &GameStateView<'_>, roll: DiceRoll) -> Result<u8> {
        // Candidates in fixed order; strict improvement wins, so ties go to
        // the earliest candidate and the choice stays deterministic.
        let candidates = [roll.sum(), roll.d1, roll.d2];
        let mut best = candidates[0];
        let mut best_score = i32::MIN;
        for candidate in candidates {
            let Ok(sector) = SectorId::new(candidate) else {
                continue;
            };
            let score = self.score_sector(view, sector);
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }
        Ok(best)
    }

    fn choose_purchase(&mut self, view: &GameStateView<'_>) -> Result<BuyDecision> {
        let credits = view.credits();
        for level in [CardLevel::Level3, CardLevel::Level2, CardLevel::Level1] {
            for (slot, visible) in view.visible_row(level).iter().enumerate() {
                // Vacant slots price themselves out, no special case needed.
                if visible.cost() <= credits {
                    return Ok(BuyDecision::Purchase { level, slot });
                }
            }
        }
        Ok(BuyDecision::Decline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_scores_rank_income_over_credits() {
        let credits = HeuristicController::score_effect(&EffectKind::AddCredits { amount: 2 });
        let income = HeuristicController::score_effect(&EffectKind::AddIncome { amount: 2 });
        let points = HeuristicController::score_effect(&EffectKind::AddVictoryPoints { amount: 2 });
        assert!(income > credits);
        assert!(points > income);
    }

    #[test]
    fn test_placeholders_score_nothing() {
        assert_eq!(
            HeuristicController::score_effect(&EffectKind::ClaimCardsAtLevel { level: 3 }),
            0
        );
    }
}
