//! Core game types: ids, dice, cards, effects, boards, players

pub mod board;
pub mod card;
pub mod dice;
pub mod effects;
pub mod ids;
pub mod player;

pub use board::{ActivationContext, Board, Sector};
pub use card::{Card, CardInfo, CardKind, CardLevel, CardPosition, ChargeKind, ChargeSide};
pub use dice::{DiceRoll, DiceRoller};
pub use effects::{AdjacentDirection, EffectKind, EffectResolver, Resolution};
pub use ids::{PlayerId, SectorId};
pub use player::{Player, PlayerKind, ResourcePool};
