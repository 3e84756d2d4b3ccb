//! Save payload: what a saved game records and how it is put back.
//!
//! The payload keeps the logical game, not the live graph:
//! - every volcano card's tiles and its cave
//! - every chit face, in table order
//! - each player's net distance travelled and whether it is their turn
//! - the best streak
//!
//! Tokens are restored by walking `total_moves` from the home cave. A token
//! standing in another player's cave when the game was saved comes back on
//! the ring tile that walk reaches.

use serde::{Deserialize, Serialize};

use crate::cards::ChitSpec;
use crate::core::{Animal, BestStreak, Colour, GameState, PlayerId, SaveError};

/// Encoding of a save on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveFormat {
    #[default]
    Json,
    Binary,
}

impl SaveFormat {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            SaveFormat::Json => "save.json",
            SaveFormat::Binary => "save.bin",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCave {
    pub colour: Colour,
    pub animal: Animal,
    /// Offset within the card of the tile the cave branches off.
    pub position: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedVolcanoCard {
    pub tiles: Vec<Animal>,
    #[serde(default)]
    pub cave: Option<SavedCave>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedChitType {
    Standard,
    #[serde(alias = "reversal")]
    Reverse,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedChit {
    pub animal: Animal,
    #[serde(rename = "type")]
    pub kind: SavedChitType,
    /// Zero for reversal chits.
    #[serde(default)]
    pub distance: i32,
}

impl SavedChit {
    fn from_spec(spec: ChitSpec) -> Self {
        match spec {
            ChitSpec::Standard { animal, distance } => Self {
                animal,
                kind: SavedChitType::Standard,
                distance,
            },
            ChitSpec::Reverse { animal } => Self {
                animal,
                kind: SavedChitType::Reverse,
                distance: 0,
            },
        }
    }

    fn to_spec(&self) -> ChitSpec {
        match self.kind {
            SavedChitType::Standard => ChitSpec::Standard {
                animal: self.animal,
                distance: self.distance,
            },
            SavedChitType::Reverse => ChitSpec::Reverse { animal: self.animal },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub player_num: u8,
    pub total_moves: i32,
    pub current_player: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMemoryScore {
    pub score: u32,
    pub player: u8,
}

/// A saved game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePayload {
    #[serde(rename = "VolcanoCards")]
    pub volcano_cards: Vec<SavedVolcanoCard>,
    #[serde(rename = "ChitCards")]
    pub chit_cards: Vec<SavedChit>,
    #[serde(rename = "Players")]
    pub players: Vec<SavedPlayer>,
    #[serde(rename = "MemoryScore")]
    pub memory_score: SavedMemoryScore,
}

impl SavePayload {
    /// Record a game.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let volcano_cards = state
            .layout
            .cards()
            .iter()
            .map(|card| SavedVolcanoCard {
                tiles: card.tiles().to_vec(),
                cave: card.cave().map(|cave| SavedCave {
                    colour: cave.colour,
                    animal: cave.animal,
                    position: card.cave_tile_offset(),
                }),
            })
            .collect();

        let chit_cards = state.deck.iter().map(|c| SavedChit::from_spec(c.spec)).collect();

        let players = state
            .players
            .values()
            .map(|p| SavedPlayer {
                player_num: p.number(),
                total_moves: p.token.total_moves(),
                current_player: p.id == state.turn.current_player,
            })
            .collect();

        Self {
            volcano_cards,
            chit_cards,
            players,
            memory_score: SavedMemoryScore {
                score: state.turn.best.score,
                player: state.turn.best.player.number(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(source: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn encode(&self, format: SaveFormat) -> Result<Vec<u8>, SaveError> {
        match format {
            SaveFormat::Json => Ok(serde_json::to_vec_pretty(self)?),
            SaveFormat::Binary => Ok(bincode::serialize(self)?),
        }
    }

    pub fn decode(bytes: &[u8], format: SaveFormat) -> Result<Self, SaveError> {
        match format {
            SaveFormat::Json => Ok(serde_json::from_slice(bytes)?),
            SaveFormat::Binary => Ok(bincode::deserialize(bytes)?),
        }
    }

    /// Check the payload fits `state`'s board, deck and seats, and return the
    /// player whose turn it is.
    pub fn validate(&self, state: &GameState) -> Result<PlayerId, SaveError> {
        self.validate_board(state)?;
        self.validate_chits(state)?;
        let current = self.validate_players(state)?;

        PlayerId::from_number(self.memory_score.player)
            .filter(|p| p.index() < state.player_count())
            .ok_or_else(|| {
                SaveError::malformed(format!(
                    "memory score names unknown player {}",
                    self.memory_score.player
                ))
            })?;

        Ok(current)
    }

    fn validate_board(&self, state: &GameState) -> Result<(), SaveError> {
        let cards = state.layout.cards();
        if self.volcano_cards.len() != cards.len() {
            return Err(SaveError::malformed(format!(
                "expected {} volcano cards, found {}",
                cards.len(),
                self.volcano_cards.len()
            )));
        }

        for (index, (saved, card)) in self.volcano_cards.iter().zip(cards).enumerate() {
            if saved.tiles.len() != card.tiles().len() {
                return Err(SaveError::malformed(format!(
                    "volcano card {index} has {} tiles, expected {}",
                    saved.tiles.len(),
                    card.tiles().len()
                )));
            }
            if let Some(animal) = saved.tiles.iter().find(|a| !a.is_creature()) {
                return Err(SaveError::malformed(format!("volcano card {index} shows {animal}")));
            }

            match (&saved.cave, card.cave()) {
                (None, None) => {}
                (Some(saved), Some(cave)) => {
                    if saved.colour != cave.colour {
                        return Err(SaveError::malformed(format!(
                            "volcano card {index} holds the {} cave, not {}",
                            cave.colour, saved.colour
                        )));
                    }
                    if !saved.animal.is_creature() {
                        return Err(SaveError::malformed(format!(
                            "cave on card {index} shows {}",
                            saved.animal
                        )));
                    }
                }
                (Some(_), None) => {
                    return Err(SaveError::malformed(format!("volcano card {index} has no cave")));
                }
                (None, Some(_)) => {
                    return Err(SaveError::malformed(format!(
                        "volcano card {index} is missing its cave"
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_chits(&self, state: &GameState) -> Result<(), SaveError> {
        if self.chit_cards.len() != state.deck.len() {
            return Err(SaveError::malformed(format!(
                "expected {} chit cards, found {}",
                state.deck.len(),
                self.chit_cards.len()
            )));
        }
        for (index, chit) in self.chit_cards.iter().enumerate() {
            chit.to_spec()
                .validate()
                .map_err(|detail| SaveError::malformed(format!("chit card {index}: {detail}")))?;
        }
        Ok(())
    }

    fn validate_players(&self, state: &GameState) -> Result<PlayerId, SaveError> {
        let count = state.player_count();
        if self.players.len() != count {
            return Err(SaveError::malformed(format!(
                "expected {count} players, found {}",
                self.players.len()
            )));
        }

        let mut seen = vec![false; count];
        for saved in &self.players {
            let id = PlayerId::from_number(saved.player_num)
                .filter(|p| p.index() < count)
                .ok_or_else(|| {
                    SaveError::malformed(format!("unknown player number {}", saved.player_num))
                })?;
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(SaveError::malformed(format!(
                    "player {} saved twice",
                    saved.player_num
                )));
            }
        }

        let mut current = self.players.iter().filter(|p| p.current_player);
        match (current.next(), current.next()) {
            (Some(player), None) => PlayerId::from_number(player.player_num)
                .ok_or_else(|| SaveError::malformed("current player has no number")),
            (None, _) => Err(SaveError::malformed("no current player")),
            (Some(_), Some(_)) => Err(SaveError::malformed("more than one current player")),
        }
    }

    /// Build the saved game on top of a fresh `state` from the same config.
    ///
    /// The whole payload is checked first; `state` itself is left untouched,
    /// so a failed restore has no effect.
    pub fn restore(&self, state: &GameState) -> Result<GameState, SaveError> {
        let current = self.validate(state)?;
        let mut restored = state.clone();

        for (index, saved) in self.volcano_cards.iter().enumerate() {
            let Some(card) = restored.layout.card_mut(index) else {
                continue;
            };
            card.set_tiles(&saved.tiles);
            let first = card.first_tile();
            if let Some(cave) = &saved.cave {
                card.set_cave_animal(cave.animal);
                if let Some(id) = restored.graph.cave_of(cave.colour) {
                    restored.graph.set_animal(id, cave.animal);
                }
            }
            for (offset, &animal) in saved.tiles.iter().enumerate() {
                let tile = restored.graph.ring()[first + offset];
                restored.graph.set_animal(tile, animal);
            }
        }

        let specs: Vec<ChitSpec> = self.chit_cards.iter().map(SavedChit::to_spec).collect();
        restored.deck.replace_all(&specs);

        for saved in &self.players {
            let Some(id) = PlayerId::from_number(saved.player_num) else {
                continue;
            };
            let GameState { graph, players, .. } = &mut restored;
            let token = &mut players[id].token;
            let destination = graph.walk(token.home_cave(), saved.total_moves);
            token.place(graph, saved.total_moves, destination).map_err(|err| {
                SaveError::malformed(format!("player {} cannot be placed: {err}", saved.player_num))
            })?;
        }

        restored.set_current_player(current);
        restored.turn.streak = 0;
        if let Some(player) = PlayerId::from_number(self.memory_score.player) {
            restored.turn.best = BestStreak {
                score: self.memory_score.score,
                player,
            };
        }

        Ok(restored)
    }
}
