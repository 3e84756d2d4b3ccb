//! Saving and loading games.
//!
//! ## Key Types
//!
//! - `SavePayload`: the logical content of a save, JSON or binary
//! - `SaveStore`: a directory holding the save files
//!
//! A save can only be taken between resolutions and before the game is won.
//! Loading rebuilds a fresh game from the same config and applies the payload
//! on top; a payload that does not fit is rejected as a whole.

pub mod payload;
pub mod store;

pub use payload::{
    SaveFormat, SavePayload, SavedCave, SavedChit, SavedChitType, SavedMemoryScore, SavedPlayer,
    SavedVolcanoCard,
};
pub use store::SaveStore;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::{ConfigError, GameConfig, SaveError};
use crate::rules::{ChitPicker, TurnEngine, UniformPicker};

impl<P: ChitPicker> TurnEngine<P> {
    /// Snapshot the game for saving.
    pub fn to_save(&self) -> Result<SavePayload, SaveError> {
        if self.is_resolution_pending() {
            return Err(SaveError::ResolutionPending);
        }
        if self.is_game_won().is_some() {
            return Err(SaveError::GameFinished);
        }
        Ok(SavePayload::capture(self.state()))
    }

    /// Write the game to `store`.
    pub fn save(&self, store: &SaveStore, format: SaveFormat) -> Result<PathBuf, SaveError> {
        store.save(&self.to_save()?, format)
    }
}

impl TurnEngine<UniformPicker> {
    /// Start a game from `config` and restore `payload` into it.
    pub fn from_save(config: GameConfig, payload: &SavePayload) -> Result<Self, SaveError> {
        let mut engine = Self::new(config)?;
        let restored = payload.restore(engine.state())?;
        engine.replace_state(restored);
        info!(player = %engine.current_player_id(), "game loaded");
        Ok(engine)
    }

    /// Load the save in `store`, or start a fresh game when there is none or
    /// it cannot be used.
    pub fn load_or_new(
        config: GameConfig,
        store: &SaveStore,
        format: SaveFormat,
    ) -> Result<Self, ConfigError> {
        let loaded = store
            .load(format)
            .and_then(|payload| payload.map(|p| Self::from_save(config.clone(), &p)).transpose());

        match loaded {
            Ok(Some(engine)) => Ok(engine),
            Ok(None) => Self::new(config),
            Err(err) => {
                warn!(path = %store.path(format).display(), %err, "ignoring unusable save");
                Self::new(config)
            }
        }
    }
}
