//! Game state: the board, seated players, chit deck, and turn bookkeeping.
//!
//! ## GameState
//!
//! Everything a running game mutates, owned by the turn engine and readable by
//! a presentation layer:
//! - the position graph and the volcano card layout it was built from
//! - players and their tokens
//! - the chit deck
//! - `TurnState`: whose turn it is and the consecutive-flip streaks
//!
//! ## Streaks
//!
//! A streak counts successful moves by the same player since their turn
//! began. It resets whenever the turn passes. The best streak of the game and
//! the player who set it are kept for the memory score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::GameConfig;
use super::error::ConfigError;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{BoardLayout, PositionGraph, Token};
use crate::cards::ChitDeck;

/// Best consecutive-flip streak of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestStreak {
    pub score: u32,
    pub player: PlayerId,
}

/// Whose turn it is and how the current streak stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnState {
    pub current_player: PlayerId,
    /// Player active at the previous resolution, or at the start of the turn.
    pub streak_reference: PlayerId,
    pub streak: u32,
    pub best: BestStreak,
}

impl TurnState {
    #[must_use]
    pub fn new(first: PlayerId) -> Self {
        Self {
            current_player: first,
            streak_reference: first,
            streak: 0,
            best: BestStreak {
                score: 0,
                player: first,
            },
        }
    }

    /// Count a successful move and update the best streak.
    pub fn record_success(&mut self) {
        if self.current_player == self.streak_reference {
            self.streak += 1;
        }
        if self.streak > self.best.score {
            self.best = BestStreak {
                score: self.streak,
                player: self.current_player,
            };
        }
    }

    /// Hand the turn to `next` and restart the streak.
    pub fn pass_to(&mut self, next: PlayerId) {
        self.current_player = next;
        self.streak_reference = next;
        self.streak = 0;
    }
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub graph: PositionGraph,
    pub layout: BoardLayout,
    pub players: PlayerMap<Player>,
    pub deck: ChitDeck,
    pub turn: TurnState,
}

impl GameState {
    /// Build a fresh game: assemble the board, deal the chits, seat the
    /// players in their home caves and start player 1's turn.
    pub fn new(config: &GameConfig, rng: &GameRng) -> Result<Self, ConfigError> {
        let layout = BoardLayout::generate(config, &mut rng.for_context("layout"))?;
        let mut graph = layout.connect()?;
        let deck = ChitDeck::build(config, &mut rng.for_context("chits"))?;

        let mut players = Vec::with_capacity(config.player_count);
        for id in PlayerId::all(config.player_count) {
            let seat = config.seat(id).ok_or(ConfigError::MissingSeat(id.number()))?;
            let cave = graph.cave_of(seat.colour).ok_or(ConfigError::MissingCave(seat.colour))?;
            let token = Token::new(seat.colour, cave, &mut graph);
            players.push(Player::new(id, seat.colour, config.is_human(id), token));
        }
        let mut players = PlayerMap::from_vec(players);

        let first = PlayerId::new(0);
        players[first].player_turn(&mut graph);

        debug!(players = config.player_count, seed = rng.seed(), "game state created");

        Ok(Self {
            graph,
            layout,
            players,
            deck,
            turn: TurnState::new(first),
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn.current_player]
    }

    /// The player whose token reached home, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.players.values().find(|p| p.token.has_won())
    }

    /// End the current player's turn and start the next one in seat order.
    pub(crate) fn advance_turn(&mut self) -> PlayerId {
        let current = self.turn.current_player;
        let next = current.next(self.player_count());

        self.deck.reset_all();
        self.players[current].player_finish(&mut self.graph);
        self.players[next].player_turn(&mut self.graph);
        self.turn.pass_to(next);
        next
    }

    /// Make `player` the current player without touching the deck or streaks.
    pub(crate) fn set_current_player(&mut self, player: PlayerId) {
        let current = self.turn.current_player;
        self.players[current].player_finish(&mut self.graph);
        self.players[player].player_turn(&mut self.graph);
        self.turn.current_player = player;
        self.turn.streak_reference = player;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Colour;

    fn state(players: usize) -> GameState {
        let config = GameConfig::default().with_players(players);
        GameState::new(&config, &GameRng::new(1)).unwrap()
    }

    #[test]
    fn test_new_game_seats_players_in_home_caves() {
        let state = state(4);
        assert_eq!(state.player_count(), 4);
        for player in state.players.values() {
            assert!(player.token.is_in_home_cave());
            assert!(state.graph.is_occupied(player.token.home_cave()));
            assert_eq!(state.graph.cave_of(player.colour), Some(player.token.home_cave()));
        }
        assert_eq!(state.deck.len(), 20);
        assert!(state.winner().is_none());
    }

    #[test]
    fn test_player_one_starts_highlighted() {
        let state = state(3);
        let first = state.current_player();
        assert_eq!(first.number(), 1);
        assert_eq!(first.colour, Colour::Red);
        assert!(first.is_active);
        assert!(state.graph.position(first.token.home_cave()).highlighted);
        assert_eq!(state.turn.best, BestStreak { score: 0, player: PlayerId::new(0) });
    }

    #[test]
    fn test_advance_turn_wraps_and_moves_highlight() {
        let mut state = state(2);
        let red_cave = state.players[PlayerId::new(0)].token.home_cave();
        let blue_cave = state.players[PlayerId::new(1)].token.home_cave();

        assert_eq!(state.advance_turn(), PlayerId::new(1));
        assert!(!state.graph.position(red_cave).highlighted);
        assert!(state.graph.position(blue_cave).highlighted);
        assert!(!state.players[PlayerId::new(0)].is_active);

        assert_eq!(state.advance_turn(), PlayerId::new(0));
        assert_eq!(state.turn.streak_reference, PlayerId::new(0));
    }

    #[test]
    fn test_streak_accounting() {
        let mut turn = TurnState::new(PlayerId::new(0));
        turn.record_success();
        turn.record_success();
        assert_eq!(turn.streak, 2);
        assert_eq!(turn.best.score, 2);

        turn.pass_to(PlayerId::new(1));
        assert_eq!(turn.streak, 0);
        turn.record_success();
        assert_eq!(turn.best, BestStreak { score: 2, player: PlayerId::new(0) });

        turn.record_success();
        turn.record_success();
        assert_eq!(turn.best, BestStreak { score: 3, player: PlayerId::new(1) });
    }

    #[test]
    fn test_humans_take_first_seats() {
        let config = GameConfig::default().with_humans(1);
        let state = GameState::new(&config, &GameRng::new(0)).unwrap();
        assert!(state.players[PlayerId::new(0)].human);
        assert!(!state.players[PlayerId::new(1)].human);
    }
}
