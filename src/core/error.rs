//! Error types.
//!
//! - `MoveError`: a token move broke an occupancy or cave rule. Always rolled
//!   back before it is returned; the turn engine treats it as a mismatch.
//! - `SaveError`: a save payload could not be encoded, decoded or applied.
//! - `ConfigError`: setup data that must not be turned into a board.
//!
//! An exhausted cave search is not an error; see `board::CaveSearch`.

use thiserror::Error;

use super::animal::{Animal, Colour};

/// Why a step-by-step move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidMoveReason {
    /// The final step would land on an occupied position.
    Occupied,
    /// The move would carry the token past the mouth of its own cave.
    PassedOwnCave,
    /// The token tried to back out of its own cave.
    LeftOwnCave,
}

impl std::fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMoveReason::Occupied => f.write_str("destination is occupied"),
            InvalidMoveReason::PassedOwnCave => f.write_str("cannot move beyond own cave"),
            InvalidMoveReason::LeftOwnCave => f.write_str("cannot move back out of own cave"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid move for {colour} token: {reason}")]
    InvalidMove {
        colour: Colour,
        reason: InvalidMoveReason,
    },
}

impl MoveError {
    #[must_use]
    pub fn reason(&self) -> InvalidMoveReason {
        match self {
            MoveError::InvalidMove { reason, .. } => *reason,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and 4, got {0}")]
    PlayerCount(usize),

    #[error("{humans} human seats requested for {players} players")]
    TooManyHumans { humans: usize, players: usize },

    #[error("no seat configured for player {0}")]
    MissingSeat(u8),

    #[error("seat colour {0} has no cave")]
    MissingCave(Colour),

    #[error("colour {0} is assigned to more than one seat or cave")]
    DuplicateColour(Colour),

    #[error("{needed} caves needed but only {available} volcano cards with caves")]
    NotEnoughCaveCards { needed: usize, available: usize },

    #[error("volcano cards with caves ({with}) and without caves ({without}) must pair up")]
    UnpairedVolcanoCards { with: usize, without: usize },

    #[error("volcano card {0} has no tiles")]
    EmptyVolcanoCard(usize),

    #[error("{0} cannot be printed on a board position")]
    NotACreature(Animal),

    #[error("chit deck is empty")]
    EmptyDeck,

    #[error("invalid chit entry {index}: {detail}")]
    InvalidChit { index: usize, detail: String },

    #[error("{count} chits exceed the deck limit of {limit}")]
    TooManyChits { count: usize, limit: usize },

    #[error("{count} board positions exceed the limit of {limit}")]
    TooManyPositions { count: usize, limit: usize },

    #[error("chit table must have at least one column")]
    NoChitColumns,

    #[error("board has no tiles")]
    EmptyRing,

    #[error("tile {0} already has a cave attached")]
    CaveAlreadyAttached(usize),

    #[error("attachment tile {0} is not on the ring")]
    UnknownAttachmentTile(usize),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("malformed save: {0}")]
    Malformed(String),

    #[error("cannot save while a chit flip is awaiting resolution")]
    ResolutionPending,

    #[error("cannot save a game that has already been won")]
    GameFinished,

    #[error("save file json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save file binary error: {0}")]
    Binary(#[from] bincode::Error),

    #[error("save file io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save targets an invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl SaveError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        SaveError::Malformed(detail.into())
    }
}
