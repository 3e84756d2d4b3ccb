//! Turn resolution.
//!
//! `TurnEngine` owns the game state and turns flip requests and clock ticks
//! into token moves, turn changes and the win. Automated seats choose chits
//! through a `ChitPicker`.

pub mod engine;
pub mod policy;

pub use engine::{FlipOutcome, FlipRequest, IgnoreReason, PassReason, Resolution, TurnEngine};
pub use policy::{ChitPicker, UniformPicker};
