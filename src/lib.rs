//! # fiery-dragons
//!
//! Board topology and turn resolution for a Fiery Dragons style chase game.
//! Players race tokens around a ring of animal tiles, flipping face-down chits
//! that reveal a move or a reversal, and try to land exactly in their own
//! cave after a full lap.
//!
//! ## Design Principles
//!
//! 1. **Arena Topology**: The ring and its caves live in one `PositionGraph`
//!    and refer to each other by `PositionId`. No shared ownership, no cycles.
//!
//! 2. **Atomic Moves**: A token move is checked step by step and rolled back
//!    completely when any step breaks a rule.
//!
//! 3. **Host-Driven Time**: The engine never sleeps. The host reports elapsed
//!    time through `TurnEngine::tick`, and a flipped chit resolves once its
//!    delay has passed.
//!
//! 4. **Deterministic**: One seed reproduces the board, the deck and every
//!    automated pick.
//!
//! ## Modules
//!
//! - `core`: Symbols, players, RNG, configuration, errors, game state
//! - `board`: Position graph, board assembly, cave search, tokens
//! - `cards`: Chit cards and the deck on the table
//! - `rules`: Turn engine and automated chit pickers
//! - `save`: Save payload and save files

pub mod board;
pub mod cards;
pub mod core;
pub mod rules;
pub mod save;

// Re-export commonly used types
pub use crate::core::{
    Animal, BestStreak, Colour, ConfigError, GameConfig, GameRng, GameState, InvalidMoveReason,
    MoveError, Player, PlayerId, PlayerMap, SaveError, TurnState,
};

pub use crate::board::{
    nearest_cave, BoardLayout, CaveSearch, Direction, MoveOutcome, PositionGraph, PositionId, Token,
};

pub use crate::cards::{ChitCard, ChitDeck, ChitId, ChitSpec, Destination, Point};

pub use crate::rules::{
    ChitPicker, FlipOutcome, FlipRequest, IgnoreReason, PassReason, Resolution, TurnEngine,
    UniformPicker,
};

pub use crate::save::{SaveFormat, SavePayload, SaveStore};
