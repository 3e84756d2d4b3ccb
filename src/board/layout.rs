//! Board assembly from volcano cards.
//!
//! The ring is built from volcano cards, each a short run of tiles. Cards
//! that can carry a cave alternate with cards that cannot, each drawn at
//! random from its template pool. Caves go on cave-capable cards spread
//! evenly around the ring: with `W` such cards and `n` players, cave `i`
//! sits on cave-capable card `i * W / n`. A cave branches off the middle
//! tile of its card.

use smallvec::SmallVec;
use tracing::debug;

use super::graph::{CaveSpec, PositionGraph};
use crate::core::{Animal, CaveConfig, ConfigError, GameConfig, GameRng};

/// A run of consecutive ring tiles, optionally carrying a cave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolcanoCard {
    tiles: SmallVec<[Animal; 3]>,
    cave: Option<CaveConfig>,
    /// Ring index of this card's first tile.
    first_tile: usize,
}

impl VolcanoCard {
    #[must_use]
    pub fn tiles(&self) -> &[Animal] {
        &self.tiles
    }

    #[must_use]
    pub fn cave(&self) -> Option<&CaveConfig> {
        self.cave.as_ref()
    }

    #[must_use]
    pub fn first_tile(&self) -> usize {
        self.first_tile
    }

    /// Offset within the card of the tile a cave branches off.
    #[must_use]
    pub fn cave_tile_offset(&self) -> usize {
        self.tiles.len() / 2
    }

    /// Ring index of the tile carrying this card's cave.
    #[must_use]
    pub fn cave_tile(&self) -> Option<usize> {
        self.cave.map(|_| self.first_tile + self.cave_tile_offset())
    }

    pub(crate) fn set_tiles(&mut self, tiles: &[Animal]) {
        self.tiles = SmallVec::from_slice(tiles);
    }

    pub(crate) fn set_cave_animal(&mut self, animal: Animal) {
        if let Some(cave) = &mut self.cave {
            cave.animal = animal;
        }
    }
}

/// The volcano cards of one board, in ring order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    cards: Vec<VolcanoCard>,
}

impl BoardLayout {
    /// Draw a layout for `config` from the given RNG stream.
    pub fn generate(config: &GameConfig, rng: &mut GameRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut with_caves = config.volcano_cards_with_caves.clone();
        let mut without_caves = config.volcano_cards_without_caves.clone();
        let pairs = with_caves.len();
        let caves = config.active_caves();

        let mut cards = Vec::with_capacity(pairs * 2);
        let mut first_tile = 0;
        let mut next_cave = 0;
        for slot in 0..pairs {
            let cave = if next_cave < caves.len() && slot == next_cave * pairs / caves.len() {
                next_cave += 1;
                Some(caves[next_cave - 1])
            } else {
                None
            };

            let (Some(with), Some(without)) =
                (rng.take_random(&mut with_caves), rng.take_random(&mut without_caves))
            else {
                return Err(ConfigError::UnpairedVolcanoCards {
                    with: pairs,
                    without: config.volcano_cards_without_caves.len(),
                });
            };

            for (tiles, cave) in [(with, cave), (without, None)] {
                let len = tiles.len();
                cards.push(VolcanoCard {
                    tiles: tiles.into_iter().collect(),
                    cave,
                    first_tile,
                });
                first_tile += len;
            }
        }

        debug!(
            cards = cards.len(),
            tiles = first_tile,
            caves = next_cave,
            "generated board layout"
        );
        Ok(Self { cards })
    }

    #[must_use]
    pub fn cards(&self) -> &[VolcanoCard] {
        &self.cards
    }

    pub(crate) fn card_mut(&mut self, index: usize) -> Option<&mut VolcanoCard> {
        self.cards.get_mut(index)
    }

    /// Every tile animal in ring order.
    #[must_use]
    pub fn tiles(&self) -> Vec<Animal> {
        self.cards.iter().flat_map(|c| c.tiles.iter().copied()).collect()
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cards.iter().map(|c| c.tiles.len()).sum()
    }

    /// Caves with the ring index of the tile each attaches to.
    #[must_use]
    pub fn cave_specs(&self) -> Vec<CaveSpec> {
        self.cards
            .iter()
            .filter_map(|card| {
                let cave = card.cave?;
                Some(CaveSpec {
                    colour: cave.colour,
                    animal: cave.animal,
                    tile: card.first_tile + card.cave_tile_offset(),
                })
            })
            .collect()
    }

    /// Connect the position graph for this layout.
    pub fn connect(&self) -> Result<PositionGraph, ConfigError> {
        PositionGraph::connect(&self.tiles(), &self.cave_specs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Colour;

    fn layout(players: usize, seed: u64) -> BoardLayout {
        let config = GameConfig::default().with_players(players);
        BoardLayout::generate(&config, &mut GameRng::new(seed).for_context("layout")).unwrap()
    }

    #[test]
    fn test_default_board_has_24_tiles() {
        let layout = layout(4, 1);
        assert_eq!(layout.cards().len(), 8);
        assert_eq!(layout.tile_count(), 24);
        assert_eq!(layout.tiles().len(), 24);
    }

    #[test]
    fn test_cards_alternate_and_tile_offsets_accumulate() {
        let config = GameConfig::default();
        let layout = layout(4, 7);

        let mut expected_first = 0;
        for (i, card) in layout.cards().iter().enumerate() {
            let pool = if i % 2 == 0 {
                &config.volcano_cards_with_caves
            } else {
                &config.volcano_cards_without_caves
            };
            assert!(pool.iter().any(|t| t.as_slice() == card.tiles()));
            assert_eq!(card.first_tile(), expected_first);
            expected_first += card.tiles().len();
        }
    }

    #[test]
    fn test_cave_placement_by_player_count() {
        let expected: [(usize, &[usize]); 3] = [(2, &[0, 4]), (3, &[0, 2, 4]), (4, &[0, 2, 4, 6])];
        for (players, cards) in expected {
            let layout = layout(players, 3);
            let with_cave: Vec<usize> = layout
                .cards()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.cave().is_some())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(with_cave, cards, "{players} players");
        }
    }

    #[test]
    fn test_caves_in_seating_order_on_middle_tile() {
        let layout = layout(4, 11);
        let specs = layout.cave_specs();
        let colours: Vec<_> = specs.iter().map(|s| s.colour).collect();
        assert_eq!(colours, vec![Colour::Red, Colour::Blue, Colour::Purple, Colour::Green]);
        for (spec, card) in specs.iter().zip(layout.cards().iter().step_by(2)) {
            assert_eq!(spec.tile, card.first_tile() + 1);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        assert_eq!(layout(4, 5), layout(4, 5));
    }

    #[test]
    fn test_connects_into_graph() {
        let graph = layout(3, 2).connect().unwrap();
        assert_eq!(graph.ring_len(), 24);
        assert_eq!(graph.caves().len(), 3);
        assert_eq!(graph.cave_of(Colour::Green), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::default().with_players(5);
        let result = BoardLayout::generate(&config, &mut GameRng::new(0));
        assert!(matches!(result, Err(ConfigError::PlayerCount(5))));
    }
}
