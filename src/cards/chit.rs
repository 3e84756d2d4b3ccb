//! Chit cards.
//!
//! A chit is face down until flipped. Its face shows either an animal with a
//! signed distance (`Standard`) or the reversal symbol (`Reverse`), whose
//! distance comes from the nearest-cave search at resolution time.

use serde::{Deserialize, Serialize};

use crate::board::{nearest_cave_within, CaveSearch, PositionGraph, PositionId, MAX_SEARCH_DEPTH};
use crate::core::{Animal, ChitTableConfig};

/// Index of a chit in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChitId(pub u8);

impl ChitId {
    /// Number of distinct chit ids, and so the largest deck.
    pub const LIMIT: usize = u8::MAX as usize + 1;

    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for ChitId {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u8::try_from(index).map(Self)
    }
}

impl std::fmt::Display for ChitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chit({})", self.0)
    }
}

/// What is printed on a chit's face.
///
/// Serialized with a `type` tag, as in config files and saves:
/// `{ type = "standard", animal = "BAT", distance = 2 }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChitSpec {
    /// Move `distance` steps if `animal` matches the token's tile (pirates
    /// always match). Negative distances move backwards.
    Standard { animal: Animal, distance: i32 },
    /// Send the token back to the nearest free cave.
    Reverse { animal: Animal },
}

impl ChitSpec {
    #[must_use]
    pub fn animal(&self) -> Animal {
        match self {
            ChitSpec::Standard { animal, .. } | ChitSpec::Reverse { animal } => *animal,
        }
    }

    /// Reject faces the rules cannot resolve.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            ChitSpec::Standard { animal: Animal::Reverse, .. } => {
                Err("standard chit cannot show the reversal symbol".to_string())
            }
            ChitSpec::Standard { distance: 0, .. } => {
                Err("standard chit distance must be non-zero".to_string())
            }
            ChitSpec::Reverse { animal } if animal != Animal::Reverse => {
                Err(format!("reverse chit must show REVERSE, not {animal}"))
            }
            _ => Ok(()),
        }
    }
}

/// A point on the table, in table units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. Contains its left and top edges only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn centred(centre: Point, size: f32) -> Self {
        Self {
            left: centre.x - size / 2.0,
            top: centre.y - size / 2.0,
            width: size,
            height: size,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

/// How far a flipped chit wants the token to go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// A fixed signed step count from a standard chit.
    Fixed(i32),
    /// The result of a reversal chit's cave search.
    Cave(CaveSearch),
}

impl Destination {
    #[must_use]
    pub fn distance(&self) -> i32 {
        match self {
            Destination::Fixed(distance) => *distance,
            Destination::Cave(search) => search.distance,
        }
    }
}

/// A chit on the table.
#[derive(Clone, Debug, PartialEq)]
pub struct ChitCard {
    pub id: ChitId,
    pub spec: ChitSpec,
    flipped: bool,
    /// Grid slot the card occupies on the table.
    slot: usize,
}

impl ChitCard {
    #[must_use]
    pub fn new(id: ChitId, spec: ChitSpec, slot: usize) -> Self {
        Self {
            id,
            spec,
            flipped: false,
            slot,
        }
    }

    #[must_use]
    pub fn animal(&self) -> Animal {
        self.spec.animal()
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Turn face down.
    pub fn reset(&mut self) {
        self.flipped = false;
    }

    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Destination for a token at `position`, searching the default depth.
    #[must_use]
    pub fn destination(&self, graph: &PositionGraph, position: Option<PositionId>) -> Destination {
        self.destination_within(graph, position, MAX_SEARCH_DEPTH)
    }

    /// Destination for a token at `position`.
    ///
    /// A reversal chit without a position resolves to the neutral search
    /// result, so the token stays put.
    #[must_use]
    pub fn destination_within(
        &self,
        graph: &PositionGraph,
        position: Option<PositionId>,
        max_depth: u32,
    ) -> Destination {
        match self.spec {
            ChitSpec::Standard { distance, .. } => Destination::Fixed(distance),
            ChitSpec::Reverse { .. } => {
                let search = position.map_or(CaveSearch::NONE, |start| {
                    nearest_cave_within(graph, start, max_depth)
                });
                Destination::Cave(search)
            }
        }
    }

    /// Centre of the card on the table grid.
    #[must_use]
    pub fn centre(&self, layout: &ChitTableConfig) -> Point {
        let columns = layout.columns.max(1);
        let column = (self.slot % columns) as f32;
        let row = (self.slot / columns) as f32;
        Point::new(
            (column + layout.offset) * layout.card_size,
            (row + layout.offset) * layout.card_size,
        )
    }

    #[must_use]
    pub fn bounds(&self, layout: &ChitTableConfig) -> Rect {
        Rect::centred(self.centre(layout), layout.card_size)
    }

    /// Whether `point` falls on this card.
    #[must_use]
    pub fn hit_test(&self, point: Point, layout: &ChitTableConfig) -> bool {
        self.bounds(layout).contains(point)
    }
}
