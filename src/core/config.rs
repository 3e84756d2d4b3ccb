//! Game configuration.
//!
//! Everything the board is assembled from is static data supplied before
//! construction:
//! - seats: player numbers, colours, and how many are human
//! - volcano card templates, with and without caves, and the cave list
//! - the chit pools and the table grid they are laid out on
//! - timing, search bound, and the RNG seed
//!
//! `GameConfig::default()` is the standard four-player game. Configs can be
//! loaded from TOML; unknown keys are rejected. `validate` must pass before a
//! board is built, so a bad config never yields a partial board.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::animal::{Animal, Colour};
use super::error::ConfigError;
use super::player::PlayerId;
use crate::board::{PositionId, MAX_SEARCH_DEPTH};
use crate::cards::{ChitId, ChitSpec};

/// A seat at the table: turn-order number and token colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeatConfig {
    /// 1-based player number.
    pub number: u8,
    pub colour: Colour,
}

/// A cave: owner colour and the animal painted on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaveConfig {
    pub colour: Colour,
    pub animal: Animal,
}

/// Grid the chit cards are laid out on, in table units.
///
/// Card `i` sits in column `i % columns`, row `i / columns`, centred at
/// `((column + offset) * card_size, (row + offset) * card_size)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChitTableConfig {
    pub columns: usize,
    pub card_size: f32,
    pub offset: f32,
}

impl Default for ChitTableConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            card_size: 65.0,
            offset: 4.1,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of players (2-4).
    pub player_count: usize,

    /// The first `human_players` seats are human, the rest automated.
    pub human_players: usize,

    pub seats: Vec<SeatConfig>,

    /// Volcano card templates whose middle tile carries a cave.
    pub volcano_cards_with_caves: Vec<Vec<Animal>>,

    /// Volcano card templates without a cave.
    pub volcano_cards_without_caves: Vec<Vec<Animal>>,

    /// Caves in seating order; the first `player_count` are placed.
    pub caves: Vec<CaveConfig>,

    pub standard_chits: Vec<ChitSpec>,

    pub special_chits: Vec<ChitSpec>,

    pub chit_table: ChitTableConfig,

    /// Delay between a chit flip and its resolution, in milliseconds.
    pub flip_delay_ms: u64,

    /// Ring steps the reversal search may take before giving up.
    pub search_depth: u32,

    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        use Animal::*;

        let standard_chits = [Lizard, Dragon, Spider, Bat]
            .into_iter()
            .flat_map(|animal| (1..=3).map(move |distance| ChitSpec::Standard { animal, distance }))
            .chain([-1, -1, -2, -2].into_iter().map(|distance| ChitSpec::Standard {
                animal: Pirate,
                distance,
            }))
            .collect();

        Self {
            player_count: 4,
            human_players: 0,
            seats: vec![
                SeatConfig { number: 1, colour: Colour::Red },
                SeatConfig { number: 2, colour: Colour::Blue },
                SeatConfig { number: 3, colour: Colour::Purple },
                SeatConfig { number: 4, colour: Colour::Green },
            ],
            volcano_cards_with_caves: vec![
                vec![Lizard, Spider, Bat],
                vec![Spider, Bat, Lizard],
                vec![Bat, Dragon, Lizard],
                vec![Bat, Spider, Dragon],
            ],
            volcano_cards_without_caves: vec![
                vec![Lizard, Dragon, Spider],
                vec![Dragon, Lizard, Bat],
                vec![Dragon, Bat, Spider],
                vec![Spider, Lizard, Dragon],
            ],
            caves: vec![
                CaveConfig { colour: Colour::Red, animal: Bat },
                CaveConfig { colour: Colour::Blue, animal: Dragon },
                CaveConfig { colour: Colour::Purple, animal: Spider },
                CaveConfig { colour: Colour::Green, animal: Lizard },
            ],
            standard_chits,
            special_chits: vec![ChitSpec::Reverse { animal: Reverse }; 4],
            chit_table: ChitTableConfig::default(),
            flip_delay_ms: 1500,
            search_depth: MAX_SEARCH_DEPTH,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    #[must_use]
    pub fn with_humans(mut self, human_players: usize) -> Self {
        self.human_players = human_players;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_flip_delay(mut self, delay: Duration) -> Self {
        self.flip_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    #[must_use]
    pub fn flip_delay(&self) -> Duration {
        Duration::from_millis(self.flip_delay_ms)
    }

    /// Seat for a player, if configured.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Option<&SeatConfig> {
        self.seats.iter().find(|s| s.number == player.number())
    }

    /// Whether a player's seat is human.
    #[must_use]
    pub fn is_human(&self, player: PlayerId) -> bool {
        player.index() < self.human_players
    }

    /// Caves placed on the board for this player count.
    #[must_use]
    pub fn active_caves(&self) -> &[CaveConfig] {
        let n = self.player_count.min(self.caves.len());
        &self.caves[..n]
    }

    /// Check the config describes a buildable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=4).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.human_players > self.player_count {
            return Err(ConfigError::TooManyHumans {
                humans: self.human_players,
                players: self.player_count,
            });
        }

        self.validate_board()?;
        self.validate_seats()?;
        self.validate_deck()?;

        if self.chit_table.columns == 0 {
            return Err(ConfigError::NoChitColumns);
        }
        Ok(())
    }

    fn validate_board(&self) -> Result<(), ConfigError> {
        let with = self.volcano_cards_with_caves.len();
        let without = self.volcano_cards_without_caves.len();
        if with != without {
            return Err(ConfigError::UnpairedVolcanoCards { with, without });
        }
        if with < self.player_count || self.caves.len() < self.player_count {
            return Err(ConfigError::NotEnoughCaveCards {
                needed: self.player_count,
                available: with.min(self.caves.len()),
            });
        }

        let templates = self
            .volcano_cards_with_caves
            .iter()
            .chain(self.volcano_cards_without_caves.iter());
        for (index, tiles) in templates.enumerate() {
            if tiles.is_empty() {
                return Err(ConfigError::EmptyVolcanoCard(index));
            }
            if let Some(&animal) = tiles.iter().find(|a| !a.is_creature()) {
                return Err(ConfigError::NotACreature(animal));
            }
        }

        let tiles: usize = self
            .volcano_cards_with_caves
            .iter()
            .chain(&self.volcano_cards_without_caves)
            .map(Vec::len)
            .sum();
        let count = tiles + self.active_caves().len();
        if count > PositionId::LIMIT {
            return Err(ConfigError::TooManyPositions {
                count,
                limit: PositionId::LIMIT,
            });
        }

        let mut colours = Vec::new();
        for cave in self.active_caves() {
            if !cave.animal.is_creature() {
                return Err(ConfigError::NotACreature(cave.animal));
            }
            if colours.contains(&cave.colour) {
                return Err(ConfigError::DuplicateColour(cave.colour));
            }
            colours.push(cave.colour);
        }
        Ok(())
    }

    fn validate_seats(&self) -> Result<(), ConfigError> {
        let mut colours = Vec::new();
        for player in PlayerId::all(self.player_count) {
            let seat = self
                .seat(player)
                .ok_or(ConfigError::MissingSeat(player.number()))?;
            if colours.contains(&seat.colour) {
                return Err(ConfigError::DuplicateColour(seat.colour));
            }
            if !self.active_caves().iter().any(|c| c.colour == seat.colour) {
                return Err(ConfigError::MissingCave(seat.colour));
            }
            colours.push(seat.colour);
        }
        Ok(())
    }

    fn validate_deck(&self) -> Result<(), ConfigError> {
        if self.standard_chits.is_empty() && self.special_chits.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }
        let count = self.standard_chits.len() + self.special_chits.len();
        if count > ChitId::LIMIT {
            return Err(ConfigError::TooManyChits {
                count,
                limit: ChitId::LIMIT,
            });
        }
        for (index, chit) in self.standard_chits.iter().chain(&self.special_chits).enumerate() {
            chit.validate()
                .map_err(|detail| ConfigError::InvalidChit { index, detail })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.standard_chits.len(), 16);
        assert_eq!(config.special_chits.len(), 4);
        assert_eq!(config.flip_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_players(2)
            .with_humans(1)
            .with_seed(9)
            .with_flip_delay(Duration::from_millis(10))
            .with_search_depth(5);

        assert!(config.validate().is_ok());
        assert_eq!(config.active_caves().len(), 2);
        assert!(config.is_human(PlayerId::new(0)));
        assert!(!config.is_human(PlayerId::new(1)));
        assert_eq!(config.flip_delay_ms, 10);
        assert_eq!(config.search_depth, 5);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_player_count_bounds() {
        for count in [0, 1, 5] {
            let err = GameConfig::default().with_players(count).validate().unwrap_err();
            assert!(matches!(err, ConfigError::PlayerCount(c) if c == count));
        }
    }

    #[test]
    fn test_too_many_humans() {
        let err = GameConfig::default().with_players(2).with_humans(3).validate().unwrap_err();
        assert!(matches!(err, ConfigError::TooManyHumans { humans: 3, players: 2 }));
    }

    #[test]
    fn test_missing_seat() {
        let mut config = GameConfig::default();
        config.seats.retain(|s| s.number != 3);
        assert!(matches!(config.validate(), Err(ConfigError::MissingSeat(3))));
    }

    #[test]
    fn test_seat_without_cave() {
        let mut config = GameConfig::default().with_players(2);
        config.seats[1].colour = Colour::Green;
        assert!(matches!(config.validate(), Err(ConfigError::MissingCave(Colour::Green))));
    }

    #[test]
    fn test_unpaired_volcano_cards() {
        let mut config = GameConfig::default();
        config.volcano_cards_without_caves.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnpairedVolcanoCards { with: 4, without: 3 })
        ));
    }

    #[test]
    fn test_pirate_tile_rejected() {
        let mut config = GameConfig::default();
        config.volcano_cards_without_caves[0][1] = Animal::Pirate;
        assert!(matches!(config.validate(), Err(ConfigError::NotACreature(Animal::Pirate))));
    }

    #[test]
    fn test_empty_deck_rejected() {
        let mut config = GameConfig::default();
        config.standard_chits.clear();
        config.special_chits.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyDeck)));
    }

    #[test]
    fn test_oversized_deck_rejected() {
        let mut config = GameConfig::default().with_players(2);
        config.special_chits.clear();
        config.standard_chits = vec![
            ChitSpec::Standard {
                animal: Animal::Bat,
                distance: 1,
            };
            300
        ];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyChits { count: 300, limit: 256 })
        ));

        config.standard_chits.truncate(ChitId::LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_board_rejected() {
        let mut config = GameConfig::default().with_players(2);
        config.volcano_cards_without_caves[0] = vec![Animal::Spider; PositionId::LIMIT];
        assert!(matches!(config.validate(), Err(ConfigError::TooManyPositions { .. })));
    }

    #[test]
    fn test_zero_distance_chit_rejected() {
        let mut config = GameConfig::default();
        config.standard_chits[0] = ChitSpec::Standard {
            animal: Animal::Bat,
            distance: 0,
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidChit { index: 0, .. })));
    }

    #[test]
    fn test_toml_partial_override() {
        let config = GameConfig::from_toml_str(
            r#"
            player_count = 3
            human_players = 1
            flip_delay_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.player_count, 3);
        assert_eq!(config.flip_delay_ms, 250);
        assert_eq!(config.seats.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_chits_and_caves() {
        let config = GameConfig::from_toml_str(
            r#"
            player_count = 2
            caves = [
                { colour = "GREEN", animal = "LIZARD" },
                { colour = "RED", animal = "BAT" },
            ]
            seats = [
                { number = 1, colour = "GREEN" },
                { number = 2, colour = "RED" },
            ]
            standard_chits = [{ type = "standard", animal = "BAT", distance = 2 }]
            special_chits = [{ type = "reverse", animal = "REVERSE" }]
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.caves[0].colour, Colour::Green);
        assert_eq!(
            config.standard_chits,
            vec![ChitSpec::Standard { animal: Animal::Bat, distance: 2 }]
        );
    }

    #[test]
    fn test_toml_unknown_key_rejected() {
        let err = GameConfig::from_toml_str("players = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_toml_unknown_animal_rejected() {
        let err = GameConfig::from_toml_str(
            r#"volcano_cards_with_caves = [["LIZARD", "UNICORN", "BAT"]]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
