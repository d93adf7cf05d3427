//! Card source: validation and partitioning of the loaded card list
//!
//! The data source supplies an ordered list of records once at game start.
//! The first twelve level-0 records are the per-player starting set (one
//! card per sector, every player gets a copy of each); the remainder
//! partitions into the three level deck/row pairs. Underpopulated or
//! malformed sources are fatal before any board is built.

use crate::core::{Card, CardLevel, SectorId};
use crate::loader::card::CardRecord;
use crate::{GameError, Result};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Validated, partitioned card supply for one game.
#[derive(Debug, Clone)]
pub struct CardSource {
    starting: Vec<Card>,
    level1: Vec<Card>,
    level2: Vec<Card>,
    level3: Vec<Card>,
}

impl CardSource {
    /// Validate records and partition them into starting set and decks.
    pub fn from_records(records: &[CardRecord]) -> Result<Self> {
        let mut names: FxHashSet<&str> = FxHashSet::default();
        for record in records {
            if !names.insert(record.name.as_str()) {
                return Err(GameError::DataSource(format!(
                    "duplicate card name {:?}",
                    record.name
                )));
            }
        }

        let mut starting = Vec::new();
        let mut level1 = Vec::new();
        let mut level2 = Vec::new();
        let mut level3 = Vec::new();

        for record in records {
            let card = record.to_card()?;
            match card.level() {
                CardLevel::Starting => {
                    if starting.len() == SectorId::COUNT {
                        return Err(GameError::DataSource(format!(
                            "more than {} level-0 records ({:?} is extra)",
                            SectorId::COUNT,
                            record.name
                        )));
                    }
                    starting.push(card);
                }
                CardLevel::Level1 => level1.push(card),
                CardLevel::Level2 => level2.push(card),
                CardLevel::Level3 => level3.push(card),
            }
        }

        if starting.len() < SectorId::COUNT {
            return Err(GameError::DataSource(format!(
                "only {} level-0 records for {} sectors",
                starting.len(),
                SectorId::COUNT
            )));
        }
        let mut covered: FxHashSet<SectorId> = FxHashSet::default();
        for card in &starting {
            if !covered.insert(card.sector()) {
                return Err(GameError::DataSource(format!(
                    "two starting cards for sector {}",
                    card.sector().as_u8()
                )));
            }
        }

        Ok(CardSource {
            starting,
            level1,
            level2,
            level3,
        })
    }

    /// Load and validate a JSON card file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let records: Vec<CardRecord> = serde_json::from_str(&text)?;
        Self::from_records(&records)
    }

    pub fn starting_cards(&self) -> &[Card] {
        &self.starting
    }

    /// A fresh copy of the twelve starting cards for one player's board.
    pub fn starting_set(&self) -> Vec<Card> {
        self.starting.clone()
    }

    pub fn deck_sizes(&self) -> (usize, usize, usize) {
        (self.level1.len(), self.level2.len(), self.level3.len())
    }

    /// Consume the source into starting set plus per-level decks.
    pub fn into_parts(self) -> (Vec<Card>, Vec<Card>, Vec<Card>, Vec<Card>) {
        (self.starting, self.level1, self.level2, self.level3)
    }
}
