//! Chit selection for automated seats.
//!
//! Pickers are trait-based so a host can swap in its own selection. The only
//! built-in picker chooses uniformly among face-down chits.

use crate::cards::ChitId;
use crate::core::{GameRng, GameState};

/// Chooses which face-down chit an automated seat flips.
pub trait ChitPicker: Send + Sync {
    /// Pick one of `face_down`.
    ///
    /// Returns `None` if `face_down` is empty.
    fn pick(&self, state: &GameState, face_down: &[ChitId], rng: &mut GameRng) -> Option<ChitId>;
}

/// Uniform random picker.
#[derive(Clone, Debug, Default)]
pub struct UniformPicker;

impl ChitPicker for UniformPicker {
    fn pick(&self, _state: &GameState, face_down: &[ChitId], rng: &mut GameRng) -> Option<ChitId> {
        rng.choose_index(face_down.len()).map(|i| face_down[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    #[test]
    fn test_uniform_picker_stays_in_candidates() {
        let state = GameState::new(&GameConfig::default(), &GameRng::new(0)).unwrap();
        let mut rng = GameRng::new(1);
        let candidates = [ChitId::new(3), ChitId::new(9), ChitId::new(12)];

        for _ in 0..50 {
            let pick = UniformPicker.pick(&state, &candidates, &mut rng).unwrap();
            assert!(candidates.contains(&pick));
        }
    }

    #[test]
    fn test_uniform_picker_covers_all_candidates() {
        let state = GameState::new(&GameConfig::default(), &GameRng::new(0)).unwrap();
        let mut rng = GameRng::new(2);
        let candidates = [ChitId::new(0), ChitId::new(1), ChitId::new(2)];

        let mut seen = [false; 3];
        for _ in 0..100 {
            let pick = UniformPicker.pick(&state, &candidates, &mut rng).unwrap();
            seen[pick.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_picker_empty() {
        let state = GameState::new(&GameConfig::default(), &GameRng::new(0)).unwrap();
        assert_eq!(UniformPicker.pick(&state, &[], &mut GameRng::new(0)), None);
    }
}
