//! Nearest unoccupied cave search for reversal chits.
//!
//! The search walks backwards along the ring from the token's position. The
//! starting tile is never inspected, so a cave right under the token does not
//! count. The first tile with an unoccupied cave ends the search; the
//! distance includes the final step from that tile into the cave.

use tracing::debug;

use super::graph::PositionGraph;
use super::position::PositionId;

/// Ring steps the search may take before giving up.
pub const MAX_SEARCH_DEPTH: u32 = 50;

/// Result of a cave search.
///
/// `cave == None` with `distance == 0` is the neutral outcome: no eligible
/// cave within reach, so the token stays put.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaveSearch {
    /// Signed move distance to the cave. Always negative when a cave was found.
    pub distance: i32,
    pub cave: Option<PositionId>,
}

impl CaveSearch {
    /// The neutral outcome.
    pub const NONE: CaveSearch = CaveSearch {
        distance: 0,
        cave: None,
    };

    #[must_use]
    pub fn is_found(&self) -> bool {
        self.cave.is_some()
    }
}

/// Find the nearest unoccupied cave behind `start`, within the default depth.
#[must_use]
pub fn nearest_cave(graph: &PositionGraph, start: PositionId) -> CaveSearch {
    nearest_cave_within(graph, start, MAX_SEARCH_DEPTH)
}

/// Find the nearest unoccupied cave behind `start`, taking at most
/// `max_depth` ring steps.
#[must_use]
pub fn nearest_cave_within(graph: &PositionGraph, start: PositionId, max_depth: u32) -> CaveSearch {
    if graph.position(start).is_cave() {
        return CaveSearch::NONE;
    }

    let mut at = start;
    let mut distance = 0i32;
    for _ in 0..max_depth {
        at = graph.previous(at);
        distance -= 1;

        if let Some(cave) = graph.position(at).attached_cave() {
            if !graph.is_occupied(cave) {
                return CaveSearch {
                    distance: distance - 1,
                    cave: Some(cave),
                };
            }
        }
    }

    debug!(%start, max_depth, "cave search exhausted");
    CaveSearch::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CaveSpec;
    use crate::core::{Animal, Colour};

    /// Ring of eight tiles, red cave off tile 1, blue cave off tile 5.
    fn graph() -> PositionGraph {
        PositionGraph::connect(
            &[Animal::Bat; 8],
            &[
                CaveSpec { colour: Colour::Red, animal: Animal::Bat, tile: 1 },
                CaveSpec { colour: Colour::Blue, animal: Animal::Bat, tile: 5 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_finds_cave_behind() {
        let graph = graph();
        let start = graph.ring()[3];

        let result = nearest_cave(&graph, start);
        // two ring steps back to tile 1, one more into the cave
        assert_eq!(result.distance, -3);
        assert_eq!(result.cave, graph.cave_of(Colour::Red));
    }

    #[test]
    fn test_skips_starting_tile() {
        let graph = graph();
        let start = graph.ring()[5];

        let result = nearest_cave(&graph, start);
        assert_eq!(result.cave, graph.cave_of(Colour::Red));
        assert_eq!(result.distance, -5);
    }

    #[test]
    fn test_skips_occupied_cave() {
        let mut graph = graph();
        let red = graph.cave_of(Colour::Red).unwrap();
        graph.set_occupied(red, true);

        let result = nearest_cave(&graph, graph.ring()[3]);
        // back past tile 1 and around to tile 5
        assert_eq!(result.cave, graph.cave_of(Colour::Blue));
        assert_eq!(result.distance, -7);
    }

    #[test]
    fn test_starting_tile_found_after_full_lap() {
        let mut graph = graph();
        let blue = graph.cave_of(Colour::Blue).unwrap();
        graph.set_occupied(blue, true);

        let start = graph.ring()[1];
        let result = nearest_cave(&graph, start);
        assert_eq!(result.cave, graph.cave_of(Colour::Red));
        assert_eq!(result.distance, -9);
    }

    #[test]
    fn test_all_caves_occupied_is_neutral() {
        let mut graph = graph();
        for (_, cave) in graph.caves() {
            graph.set_occupied(cave, true);
        }

        let result = nearest_cave(&graph, graph.ring()[0]);
        assert_eq!(result, CaveSearch::NONE);
        assert!(!result.is_found());
    }

    #[test]
    fn test_depth_bound() {
        let graph = graph();
        let start = graph.ring()[3];

        assert_eq!(nearest_cave_within(&graph, start, 1), CaveSearch::NONE);
        assert!(nearest_cave_within(&graph, start, 2).is_found());
    }

    #[test]
    fn test_from_cave_is_neutral() {
        let graph = graph();
        let red = graph.cave_of(Colour::Red).unwrap();
        assert_eq!(nearest_cave(&graph, red), CaveSearch::NONE);
    }

    #[test]
    fn test_board_without_caves_terminates() {
        let graph = PositionGraph::connect(&[Animal::Lizard; 3], &[]).unwrap();
        assert_eq!(nearest_cave(&graph, graph.ring()[0]), CaveSearch::NONE);
    }
}
