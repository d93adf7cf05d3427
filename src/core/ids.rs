//! Strongly-typed identifiers for players and board sectors
//!
//! Bare integers invite mix-ups between player numbers, sector numbers and
//! die faces, so both concepts get their own newtype. Player ids are 1-based
//! and stable for the lifetime of a game; sector ids are validated to the
//! fixed 1-12 board range at construction.

use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based player identifier, stable for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(id: u8) -> Self {
        PlayerId(id)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// 0-based index into the game's player vector.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Iterate over all player ids for a game with `player_count` seats.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A sector number on a player's board, always within 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorId(u8);

impl SectorId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;
    pub const COUNT: usize = 12;

    pub fn new(id: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&id) {
            Ok(SectorId(id))
        } else {
            Err(GameError::InvalidSector(id))
        }
    }

    /// For callers that produce ids from a `0..COUNT` index.
    pub(crate) const fn new_unchecked(id: u8) -> Self {
        SectorId(id)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// 0-based index into a board's sector array.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Iterate over all twelve sector ids in order.
    pub fn all() -> impl Iterator<Item = SectorId> {
        (Self::MIN..=Self::MAX).map(SectorId)
    }
}

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sector {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_indexing() {
        let id = PlayerId::new(1);
        assert_eq!(id.index(), 0);
        assert_eq!(id.to_string(), "Player 1");

        let ids: Vec<_> = PlayerId::all(4).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[3], PlayerId::new(4));
    }

    #[test]
    fn test_sector_id_range() {
        assert!(SectorId::new(0).is_err());
        assert!(SectorId::new(13).is_err());

        let s = SectorId::new(12).unwrap();
        assert_eq!(s.as_u8(), 12);
        assert_eq!(s.index(), 11);

        assert_eq!(SectorId::all().count(), SectorId::COUNT);
    }
}
