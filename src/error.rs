//! Error types for the starbase engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid player count: {0} (expected 2-5)")]
    InvalidPlayerCount(usize),

    #[error("Invalid card data: {0}")]
    InvalidCard(String),

    #[error("Card for sector {card_sector} placed in sector {sector}")]
    SectorMismatch { card_sector: u8, sector: u8 },

    #[error("Invalid sector id: {0} (expected 1-12)")]
    InvalidSector(u8),

    #[error("Invalid resource amount: {0}")]
    InvalidAmount(i32),

    #[error("Insufficient credits: cost {cost}, available {credits}")]
    InsufficientCredits { cost: u32, credits: u32 },

    #[error("Player not found: {0}")]
    PlayerNotFound(u8),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Card data source error: {0}")]
    DataSource(String),

    #[error("Decision timed out")]
    DecisionTimeout,

    #[error("Decision source disconnected")]
    DecisionSourceClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
