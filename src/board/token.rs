//! Player tokens and step-by-step movement.
//!
//! A move of distance `d` is applied as `|d|` unit steps so that every
//! intermediate position is checked:
//! - a token may pass over occupied tiles but not land on one;
//! - a token may pass the mouth of another player's cave freely;
//! - once a token has left home, reaching the tile in front of its own cave
//!   is only legal on the final step, which takes it into the cave.
//!
//! A rejected move is rolled back completely before the error is returned.

use tracing::debug;

use super::graph::PositionGraph;
use super::position::{Direction, PositionId};
use crate::core::{Colour, InvalidMoveReason, MoveError};

/// Result of a successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub destination: PositionId,
    /// The move ended inside the token's own cave after leaving home.
    pub won: bool,
}

/// What a single unit step did.
enum Step {
    Advanced,
    /// Entered a cave; the move ends here.
    EnteredCave { won: bool },
}

/// A player's marker on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    colour: Colour,
    position: PositionId,
    home_cave: PositionId,
    position_before_move: PositionId,
    total_moves: i32,
    has_won: bool,
}

impl Token {
    /// Create a token in its home cave and mark the cave occupied.
    pub fn new(colour: Colour, home_cave: PositionId, graph: &mut PositionGraph) -> Self {
        graph.set_occupied(home_cave, true);
        Self {
            colour,
            position: home_cave,
            home_cave,
            position_before_move: home_cave,
            total_moves: 0,
            has_won: false,
        }
    }

    #[must_use]
    pub fn colour(&self) -> Colour {
        self.colour
    }

    #[must_use]
    pub fn position(&self) -> PositionId {
        self.position
    }

    #[must_use]
    pub fn home_cave(&self) -> PositionId {
        self.home_cave
    }

    /// Net distance travelled since the game started.
    #[must_use]
    pub fn total_moves(&self) -> i32 {
        self.total_moves
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    #[must_use]
    pub fn is_in_home_cave(&self) -> bool {
        self.position == self.home_cave
    }

    /// Move `|distance|` steps forward (positive) or backward (negative).
    ///
    /// On failure nothing changes: the token is back where it started, that
    /// position is occupied again and `total_moves` is untouched.
    pub fn move_by(
        &mut self,
        graph: &mut PositionGraph,
        distance: i32,
    ) -> Result<MoveOutcome, MoveError> {
        if self.has_won && distance != 0 {
            return Err(self.invalid(InvalidMoveReason::LeftOwnCave));
        }

        graph.set_occupied(self.position, false);
        self.position_before_move = self.position;

        let direction = Direction::of(distance);
        let mut won = false;
        let mut moves_left = distance.unsigned_abs();
        while moves_left > 0 {
            moves_left -= 1;
            let step = match direction {
                Direction::Forward => self.step_forward(graph, moves_left),
                Direction::Backward => self.step_backward(graph, moves_left),
            };
            match step {
                Ok(Step::Advanced) => {}
                Ok(Step::EnteredCave { won: entered_home }) => {
                    won = entered_home;
                    break;
                }
                Err(reason) => {
                    debug!(colour = %self.colour, distance, %reason, "move rejected");
                    self.undo_move(graph);
                    return Err(self.invalid(reason));
                }
            }
        }

        self.total_moves += distance;
        graph.set_occupied(self.position, true);
        if won {
            self.has_won = true;
        }

        Ok(MoveOutcome {
            destination: self.position,
            won,
        })
    }

    fn step_forward(
        &mut self,
        graph: &PositionGraph,
        moves_left: u32,
    ) -> Result<Step, InvalidMoveReason> {
        if let Some(cave) = graph.position(self.position).attached_cave() {
            if self.is_own_cave(graph, cave) && self.total_moves > 1 {
                if moves_left == 0 {
                    self.position = cave;
                    return Ok(Step::EnteredCave { won: true });
                }
                return Err(InvalidMoveReason::PassedOwnCave);
            }
        }

        let next = graph.next(self.position);
        if moves_left == 0 && graph.is_occupied(next) {
            return Err(InvalidMoveReason::Occupied);
        }
        self.position = next;
        Ok(Step::Advanced)
    }

    fn step_backward(
        &mut self,
        graph: &PositionGraph,
        moves_left: u32,
    ) -> Result<Step, InvalidMoveReason> {
        if self.is_own_cave(graph, self.position) {
            return Err(InvalidMoveReason::LeftOwnCave);
        }

        if let Some(cave) = graph.position(self.position).attached_cave() {
            if self.is_own_cave(graph, cave) {
                if moves_left == 0 {
                    self.position = cave;
                    return Ok(Step::EnteredCave { won: false });
                }
                return Err(InvalidMoveReason::PassedOwnCave);
            }
        }

        let previous = graph.previous(self.position);
        if moves_left == 0 && graph.is_occupied(previous) {
            return Err(InvalidMoveReason::Occupied);
        }
        self.position = previous;
        Ok(Step::Advanced)
    }

    /// Whether a pre-computed destination may be taken: the distance must be
    /// non-zero and the destination must exist and be free.
    #[must_use]
    pub fn verify_move(
        &self,
        graph: &PositionGraph,
        distance: i32,
        destination: Option<PositionId>,
    ) -> bool {
        match destination {
            Some(destination) if distance != 0 => !graph.is_occupied(destination),
            _ => false,
        }
    }

    /// Put the token straight onto `destination`, crediting `distance` moves.
    ///
    /// Used for reversal chits and save replay, where the destination was
    /// already computed. Rolls back and fails if the destination is occupied.
    pub fn place(
        &mut self,
        graph: &mut PositionGraph,
        distance: i32,
        destination: PositionId,
    ) -> Result<(), MoveError> {
        graph.set_occupied(self.position, false);
        self.position_before_move = self.position;

        if graph.is_occupied(destination) {
            self.undo_move(graph);
            return Err(self.invalid(InvalidMoveReason::Occupied));
        }

        self.position = destination;
        self.total_moves += distance;
        graph.set_occupied(self.position, true);
        Ok(())
    }

    fn undo_move(&mut self, graph: &mut PositionGraph) {
        self.position = self.position_before_move;
        graph.set_occupied(self.position, true);
    }

    fn is_own_cave(&self, graph: &PositionGraph, id: PositionId) -> bool {
        graph.position(id).cave_colour() == Some(self.colour)
    }

    fn invalid(&self, reason: InvalidMoveReason) -> MoveError {
        MoveError::InvalidMove {
            colour: self.colour,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CaveSpec;
    use crate::core::Animal;

    /// Ten tiles; red cave off tile 0, blue cave off tile 5.
    fn graph() -> PositionGraph {
        PositionGraph::connect(
            &[Animal::Bat; 10],
            &[
                CaveSpec { colour: Colour::Red, animal: Animal::Bat, tile: 0 },
                CaveSpec { colour: Colour::Blue, animal: Animal::Dragon, tile: 5 },
            ],
        )
        .unwrap()
    }

    fn red_token(graph: &mut PositionGraph) -> Token {
        let cave = graph.cave_of(Colour::Red).unwrap();
        Token::new(Colour::Red, cave, graph)
    }

    fn occupied(graph: &PositionGraph) -> Vec<bool> {
        graph.iter().map(|(_, p)| p.occupied).collect()
    }

    #[test]
    fn test_new_token_occupies_home_cave() {
        let mut graph = graph();
        let token = red_token(&mut graph);
        assert!(graph.is_occupied(token.home_cave()));
        assert!(token.is_in_home_cave());
        assert_eq!(token.total_moves(), 0);
    }

    #[test]
    fn test_leave_home_cave() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);

        let outcome = token.move_by(&mut graph, 2).unwrap();

        assert_eq!(outcome.destination, graph.ring()[1]);
        assert!(!outcome.won);
        assert_eq!(token.total_moves(), 2);
        assert!(!graph.is_occupied(token.home_cave()));
        assert!(graph.is_occupied(graph.ring()[1]));
    }

    #[test]
    fn test_pass_over_occupied_tile() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        graph.set_occupied(graph.ring()[1], true);

        token.move_by(&mut graph, 3).unwrap();
        assert_eq!(token.position(), graph.ring()[2]);
    }

    #[test]
    fn test_cannot_land_on_occupied_tile() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        graph.set_occupied(graph.ring()[2], true);
        let before = occupied(&graph);

        let err = token.move_by(&mut graph, 3).unwrap_err();

        assert_eq!(err.reason(), InvalidMoveReason::Occupied);
        assert!(token.is_in_home_cave());
        assert_eq!(token.total_moves(), 0);
        assert_eq!(occupied(&graph), before);
    }

    #[test]
    fn test_pass_foreign_cave() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 5).unwrap();
        assert_eq!(token.position(), graph.ring()[4]);

        // tile 5 carries the blue cave; red passes straight over it
        token.move_by(&mut graph, 2).unwrap();
        assert_eq!(token.position(), graph.ring()[6]);
    }

    #[test]
    fn test_exact_entry_wins() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 10).unwrap();
        assert_eq!(token.position(), graph.ring()[9]);

        token.move_by(&mut graph, 1).unwrap();
        assert_eq!(token.position(), graph.ring()[0]);

        let outcome = token.move_by(&mut graph, 1).unwrap();
        assert!(outcome.won);
        assert!(token.has_won());
        assert_eq!(token.position(), token.home_cave());
        assert!(graph.is_occupied(token.home_cave()));
        assert_eq!(token.total_moves(), 12);
    }

    #[test]
    fn test_overshoot_fails_and_rolls_back() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 10).unwrap();
        let start = token.position();
        let before = occupied(&graph);

        // two steps from the cave: tile 9 -> tile 0 -> cave; three overshoots
        let err = token.move_by(&mut graph, 3).unwrap_err();

        assert_eq!(err.reason(), InvalidMoveReason::PassedOwnCave);
        assert_eq!(token.position(), start);
        assert_eq!(token.total_moves(), 10);
        assert!(!token.has_won());
        assert_eq!(occupied(&graph), before);
    }

    #[test]
    fn test_no_instant_win_from_first_tile() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 1).unwrap();
        assert_eq!(token.position(), graph.ring()[0]);

        token.move_by(&mut graph, 1).unwrap();
        assert_eq!(token.position(), graph.ring()[1]);
        assert!(!token.has_won());
    }

    #[test]
    fn test_cannot_back_out_of_home_cave() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);

        let err = token.move_by(&mut graph, -1).unwrap_err();
        assert_eq!(err.reason(), InvalidMoveReason::LeftOwnCave);
        assert!(token.is_in_home_cave());
        assert!(graph.is_occupied(token.home_cave()));
    }

    #[test]
    fn test_backward_into_own_cave_on_final_step() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 2).unwrap();

        token.move_by(&mut graph, -2).unwrap();
        assert!(token.is_in_home_cave());
        assert!(!token.has_won());
        assert_eq!(token.total_moves(), 0);
    }

    #[test]
    fn test_backward_past_own_cave_fails() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 2).unwrap();

        let err = token.move_by(&mut graph, -3).unwrap_err();
        assert_eq!(err.reason(), InvalidMoveReason::PassedOwnCave);
        assert_eq!(token.position(), graph.ring()[1]);
    }

    #[test]
    fn test_backward_onto_occupied_fails() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 4).unwrap();
        graph.set_occupied(graph.ring()[1], true);

        let err = token.move_by(&mut graph, -2).unwrap_err();
        assert_eq!(err.reason(), InvalidMoveReason::Occupied);
        assert_eq!(token.position(), graph.ring()[3]);
        assert!(graph.is_occupied(graph.ring()[3]));
    }

    #[test]
    fn test_zero_distance_is_noop() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        let outcome = token.move_by(&mut graph, 0).unwrap();
        assert_eq!(outcome.destination, token.home_cave());
        assert!(graph.is_occupied(token.home_cave()));
    }

    #[test]
    fn test_won_token_cannot_move() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 10).unwrap();
        token.move_by(&mut graph, 2).unwrap();
        assert!(token.has_won());

        assert!(token.move_by(&mut graph, 1).is_err());
        assert_eq!(token.position(), token.home_cave());
    }

    #[test]
    fn test_verify_move() {
        let mut graph = graph();
        let token = red_token(&mut graph);
        let blue = graph.cave_of(Colour::Blue).unwrap();

        assert!(token.verify_move(&graph, -3, Some(blue)));
        assert!(!token.verify_move(&graph, 0, Some(blue)));
        assert!(!token.verify_move(&graph, -3, None));

        graph.set_occupied(blue, true);
        assert!(!token.verify_move(&graph, -3, Some(blue)));
    }

    #[test]
    fn test_place_and_leave_foreign_cave() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 8).unwrap();
        let blue = graph.cave_of(Colour::Blue).unwrap();

        token.place(&mut graph, -3, blue).unwrap();
        assert_eq!(token.position(), blue);
        assert_eq!(token.total_moves(), 5);
        assert!(graph.is_occupied(blue));
        assert!(!graph.is_occupied(graph.ring()[7]));

        // leaving a foreign cave goes through its entry tile
        token.move_by(&mut graph, 2).unwrap();
        assert_eq!(token.position(), graph.ring()[6]);
    }

    #[test]
    fn test_place_onto_occupied_rolls_back() {
        let mut graph = graph();
        let mut token = red_token(&mut graph);
        token.move_by(&mut graph, 3).unwrap();
        let blue = graph.cave_of(Colour::Blue).unwrap();
        graph.set_occupied(blue, true);

        let err = token.place(&mut graph, -4, blue).unwrap_err();
        assert_eq!(err.reason(), InvalidMoveReason::Occupied);
        assert_eq!(token.position(), graph.ring()[2]);
        assert_eq!(token.total_moves(), 3);
        assert!(graph.is_occupied(graph.ring()[2]));
    }
}
