//! Board positions: ring tiles and the caves that branch off them.
//!
//! Positions live in an arena owned by `PositionGraph` and refer to each
//! other by `PositionId`. Only `occupied` and a cave's `highlighted` flag
//! change during play; the links are fixed once the graph is connected.

use serde::{Deserialize, Serialize};

use crate::core::{Animal, Colour};

/// Stable index of a position in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionId(pub u16);

impl PositionId {
    /// Number of distinct position ids, tiles and caves together.
    pub const LIMIT: usize = u16::MAX as usize + 1;

    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for PositionId {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u16::try_from(index).map(Self)
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.0)
    }
}

/// Direction of travel around the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Along `next` links.
    Forward,
    /// Along `previous` links.
    Backward,
}

impl Direction {
    /// Direction of travel for a signed distance. Zero counts as forward.
    #[must_use]
    pub const fn of(distance: i32) -> Self {
        if distance < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

/// Topology of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionKind {
    /// A cell of the ring.
    Tile {
        previous: PositionId,
        next: PositionId,
        attached_cave: Option<PositionId>,
    },
    /// A player's cave, entered from and exited to `entry_tile`.
    Cave { colour: Colour, entry_tile: PositionId },
}

/// A tile or cave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub animal: Animal,
    pub occupied: bool,
    /// Caves are highlighted while their owner is taking a turn.
    pub highlighted: bool,
    pub kind: PositionKind,
}

impl Position {
    pub(crate) fn tile(animal: Animal, id: PositionId) -> Self {
        Self {
            animal,
            occupied: false,
            highlighted: false,
            kind: PositionKind::Tile {
                previous: id,
                next: id,
                attached_cave: None,
            },
        }
    }

    pub(crate) fn cave(animal: Animal, colour: Colour, entry_tile: PositionId) -> Self {
        Self {
            animal,
            occupied: false,
            highlighted: false,
            kind: PositionKind::Cave { colour, entry_tile },
        }
    }

    #[must_use]
    pub fn is_cave(&self) -> bool {
        matches!(self.kind, PositionKind::Cave { .. })
    }

    /// Owner colour when this is a cave.
    #[must_use]
    pub fn cave_colour(&self) -> Option<Colour> {
        match self.kind {
            PositionKind::Cave { colour, .. } => Some(colour),
            PositionKind::Tile { .. } => None,
        }
    }

    /// Cave branching off this position, if it is a tile that has one.
    #[must_use]
    pub fn attached_cave(&self) -> Option<PositionId> {
        match self.kind {
            PositionKind::Tile { attached_cave, .. } => attached_cave,
            PositionKind::Cave { .. } => None,
        }
    }
}
