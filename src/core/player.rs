//! Player identification, per-player storage, and the player record.
//!
//! ## PlayerId
//!
//! 0-based index into the seat list. Players are *numbered* from 1 in
//! configuration, save files and turn order; `PlayerId::number` converts.
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! A seated player: colour, human/automated flag, turn flag, and the token
//! they race around the board.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::animal::Colour;
use crate::board::{PositionGraph, Token};

/// Player identifier for 2-4 seated players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID from a 0-based index.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Create a player ID from a 1-based player number.
    ///
    /// Returns `None` for number 0.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => None,
            n => Some(Self(n - 1)),
        }
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the 1-based player number used for turn order.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// Next player in round-robin order, wrapping from the last seat to the first.
    ///
    /// ```
    /// use fiery_dragons::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(4), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        if self.index() + 1 >= player_count {
            Self(0)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..=u8::MAX).take(player_count).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use fiery_dragons::core::{PlayerId, PlayerMap};
///
/// let mut moves = PlayerMap::from_vec(vec![0, 0]);
/// moves[PlayerId::new(1)] = 3;
/// assert_eq!(moves[PlayerId::new(1)], 3);
/// assert_eq!(moves.get(PlayerId::new(2)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map from one value per seat, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, or `None` for an unseated id.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        (0..=u8::MAX).map(PlayerId).zip(&self.data)
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A seated player and their token.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub colour: Colour,
    /// Human seats flip by pointing at a chit; automated seats pick at random.
    pub human: bool,
    /// Set while it is this player's turn.
    pub is_active: bool,
    pub token: Token,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, colour: Colour, human: bool, token: Token) -> Self {
        Self {
            id,
            colour,
            human,
            is_active: false,
            token,
        }
    }

    /// 1-based player number.
    #[must_use]
    pub fn number(&self) -> u8 {
        self.id.number()
    }

    /// Start this player's turn and highlight their cave.
    pub fn player_turn(&mut self, graph: &mut PositionGraph) {
        self.is_active = true;
        graph.set_highlighted(self.token.home_cave(), true);
    }

    /// Finish this player's turn and clear their cave highlight.
    pub fn player_finish(&mut self, graph: &mut PositionGraph) {
        self.is_active = false;
        graph.set_highlighted(self.token.home_cave(), false);
    }
}
