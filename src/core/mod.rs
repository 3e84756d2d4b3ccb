//! Core types: symbols, players, state, RNG, configuration, errors, timing.
//!
//! Everything here is independent of how turns are resolved; the rules
//! module drives these types.

pub mod animal;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;
pub mod timer;

pub use animal::{Animal, Colour};
pub use config::{CaveConfig, ChitTableConfig, GameConfig, SeatConfig};
pub use error::{ConfigError, InvalidMoveReason, MoveError, SaveError};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{BestStreak, GameState, TurnState};
pub use timer::{FlipTimer, DEFAULT_FLIP_DELAY};
