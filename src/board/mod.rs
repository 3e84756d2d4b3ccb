//! The board: a closed ring of animal tiles with caves branching off it.
//!
//! ## Topology
//!
//! `PositionGraph` is an arena of positions linked by `PositionId`. Tiles
//! form a doubly linked ring; each cave is attached to one tile. The links are
//! fixed once `connect` returns, only occupancy and cave highlighting change.
//!
//! ## Assembly
//!
//! `BoardLayout` draws volcano cards from the configured templates and
//! decides which of them carry caves.
//!
//! ## Movement
//!
//! `Token` moves one unit step at a time and rolls back atomically on an
//! illegal move. `nearest_cave` is the bounded search used by reversal chits.

pub mod graph;
pub mod layout;
pub mod position;
pub mod search;
pub mod token;

pub use graph::{CaveSpec, PositionGraph};
pub use layout::{BoardLayout, VolcanoCard};
pub use position::{Direction, Position, PositionId, PositionKind};
pub use search::{nearest_cave, nearest_cave_within, CaveSearch, MAX_SEARCH_DEPTH};
pub use token::{MoveOutcome, Token};
