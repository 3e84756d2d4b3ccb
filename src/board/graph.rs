//! Circular position graph.
//!
//! An arena of positions addressed by `PositionId`. Tiles form one closed
//! ring over `previous`/`next`; each cave hangs off exactly one tile and links
//! back to it through `entry_tile`. The ring has no boundary, so stepping
//! never fails. Movement legality lives in `Token`, not here.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::position::{Direction, Position, PositionId, PositionKind};
use crate::core::{Animal, Colour, ConfigError};

/// A cave to attach while connecting the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaveSpec {
    pub colour: Colour,
    pub animal: Animal,
    /// Ring index (0-based, in tile order) of the tile the cave branches off.
    pub tile: usize,
}

/// The board: ring tiles plus attached caves.
#[derive(Clone, Debug)]
pub struct PositionGraph {
    positions: Vec<Position>,
    /// Tile ids in ring order.
    ring: Vec<PositionId>,
    caves: FxHashMap<Colour, PositionId>,
}

impl PositionGraph {
    /// Build the ring from tiles in order and attach the caves.
    ///
    /// Each tile's `next` is the following tile and the last tile closes the
    /// cycle back to the first. Fails without producing a graph when the ring
    /// is empty, there are more positions than ids, a colour has two caves,
    /// or a tile would carry two caves.
    pub fn connect(tiles: &[Animal], caves: &[CaveSpec]) -> Result<Self, ConfigError> {
        if tiles.is_empty() {
            return Err(ConfigError::EmptyRing);
        }
        let count = tiles.len() + caves.len();
        let id = |index: usize| {
            PositionId::try_from(index).map_err(|_| ConfigError::TooManyPositions {
                count,
                limit: PositionId::LIMIT,
            })
        };

        let tile_count = tiles.len();
        let ring = (0..tile_count).map(id).collect::<Result<Vec<_>, _>>()?;
        let mut positions: Vec<Position> = tiles
            .iter()
            .zip(&ring)
            .map(|(&animal, &tile)| Position::tile(animal, tile))
            .collect();

        for (i, position) in positions.iter_mut().enumerate() {
            position.kind = PositionKind::Tile {
                previous: ring[(i + tile_count - 1) % tile_count],
                next: ring[(i + 1) % tile_count],
                attached_cave: None,
            };
        }

        let mut cave_ids = FxHashMap::default();
        for spec in caves {
            if cave_ids.contains_key(&spec.colour) {
                return Err(ConfigError::DuplicateColour(spec.colour));
            }
            let entry_tile = *ring
                .get(spec.tile)
                .ok_or(ConfigError::UnknownAttachmentTile(spec.tile))?;

            let cave_id = id(positions.len())?;
            match &mut positions[entry_tile.index()].kind {
                PositionKind::Tile { attached_cave, .. } => {
                    if attached_cave.is_some() {
                        return Err(ConfigError::CaveAlreadyAttached(spec.tile));
                    }
                    *attached_cave = Some(cave_id);
                }
                PositionKind::Cave { .. } => {
                    return Err(ConfigError::UnknownAttachmentTile(spec.tile));
                }
            }
            positions.push(Position::cave(spec.animal, spec.colour, entry_tile));
            cave_ids.insert(spec.colour, cave_id);
        }

        debug!(tiles = tile_count, caves = cave_ids.len(), "connected position graph");

        Ok(Self {
            positions,
            ring,
            caves: cave_ids,
        })
    }

    /// Get a position.
    ///
    /// Ids are only ever handed out by this graph, so indexing is infallible
    /// for ids obtained from it.
    #[must_use]
    pub fn position(&self, id: PositionId) -> &Position {
        &self.positions[id.index()]
    }

    /// Get a position, or `None` for an id from another graph.
    #[must_use]
    pub fn get(&self, id: PositionId) -> Option<&Position> {
        self.positions.get(id.index())
    }

    #[must_use]
    pub fn animal(&self, id: PositionId) -> Animal {
        self.position(id).animal
    }

    #[must_use]
    pub fn is_occupied(&self, id: PositionId) -> bool {
        self.position(id).occupied
    }

    pub fn set_occupied(&mut self, id: PositionId, occupied: bool) {
        self.positions[id.index()].occupied = occupied;
    }

    pub fn set_highlighted(&mut self, id: PositionId, highlighted: bool) {
        self.positions[id.index()].highlighted = highlighted;
    }

    /// Replace the animal printed on a position. Used when loading a save.
    pub(crate) fn set_animal(&mut self, id: PositionId, animal: Animal) {
        self.positions[id.index()].animal = animal;
    }

    /// One step in `direction`.
    ///
    /// From a cave both directions lead to its entry tile.
    #[must_use]
    pub fn step(&self, from: PositionId, direction: Direction) -> PositionId {
        match (self.position(from).kind, direction) {
            (PositionKind::Tile { next, .. }, Direction::Forward) => next,
            (PositionKind::Tile { previous, .. }, Direction::Backward) => previous,
            (PositionKind::Cave { entry_tile, .. }, _) => entry_tile,
        }
    }

    #[must_use]
    pub fn next(&self, from: PositionId) -> PositionId {
        self.step(from, Direction::Forward)
    }

    #[must_use]
    pub fn previous(&self, from: PositionId) -> PositionId {
        self.step(from, Direction::Backward)
    }

    /// Follow `|distance|` steps in the direction of its sign.
    #[must_use]
    pub fn walk(&self, from: PositionId, distance: i32) -> PositionId {
        let direction = Direction::of(distance);
        (0..distance.unsigned_abs()).fold(from, |at, _| self.step(at, direction))
    }

    /// Tile ids in ring order.
    #[must_use]
    pub fn ring(&self) -> &[PositionId] {
        &self.ring
    }

    #[must_use]
    pub fn ring_len(&self) -> usize {
        self.ring.len()
    }

    /// Total positions, tiles and caves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Cave owned by `colour`.
    #[must_use]
    pub fn cave_of(&self, colour: Colour) -> Option<PositionId> {
        self.caves.get(&colour).copied()
    }

    /// All caves, ordered by colour.
    #[must_use]
    pub fn caves(&self) -> Vec<(Colour, PositionId)> {
        let mut caves: Vec<_> = self.caves.iter().map(|(&c, &id)| (c, id)).collect();
        caves.sort();
        caves
    }

    /// Iterate over (id, position) for every position.
    pub fn iter(&self) -> impl Iterator<Item = (PositionId, &Position)> {
        (0..=u16::MAX).map(PositionId::new).zip(&self.positions)
    }
}
