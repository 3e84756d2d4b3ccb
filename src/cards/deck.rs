//! The chit deck laid out on the table.
//!
//! Chits are dealt into grid slots in a random order. While both the standard
//! and the special pool still hold chits, each draw first picks one of the two
//! pools with equal odds and then a random chit from it, so special chits are
//! spread through the grid rather than uniformly shuffled in.

use smallvec::SmallVec;
use tracing::debug;

use super::chit::{ChitCard, ChitId, ChitSpec, Point};
use crate::core::{ChitTableConfig, ConfigError, GameConfig, GameRng};

/// All chits on the table, indexed by `ChitId`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChitDeck {
    cards: Vec<ChitCard>,
    layout: ChitTableConfig,
}

impl ChitDeck {
    /// Deal the configured pools onto the table.
    pub fn build(config: &GameConfig, rng: &mut GameRng) -> Result<Self, ConfigError> {
        let mut standard = config.standard_chits.clone();
        let mut special = config.special_chits.clone();
        let mut specs = Vec::with_capacity(standard.len() + special.len());

        loop {
            let pool = match (standard.is_empty(), special.is_empty()) {
                (true, true) => break,
                (false, false) => {
                    if rng.gen_bool(0.5) {
                        &mut standard
                    } else {
                        &mut special
                    }
                }
                (false, true) => &mut standard,
                (true, false) => &mut special,
            };
            if let Some(spec) = rng.take_random(pool) {
                specs.push(spec);
            }
        }

        debug!(chits = specs.len(), "dealt chit deck");
        Self::from_specs(specs, config.chit_table)
    }

    /// Lay out chits in the given order, all face down.
    ///
    /// Fails when there are more chits than `ChitId` can address.
    pub fn from_specs(
        specs: Vec<ChitSpec>,
        layout: ChitTableConfig,
    ) -> Result<Self, ConfigError> {
        let count = specs.len();
        let cards = specs
            .into_iter()
            .enumerate()
            .map(|(slot, spec)| -> Result<ChitCard, ConfigError> {
                let id = ChitId::try_from(slot).map_err(|_| ConfigError::TooManyChits {
                    count,
                    limit: ChitId::LIMIT,
                })?;
                Ok(ChitCard::new(id, spec, slot))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { cards, layout })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn layout(&self) -> &ChitTableConfig {
        &self.layout
    }

    #[must_use]
    pub fn get(&self, id: ChitId) -> Option<&ChitCard> {
        self.cards.get(id.index())
    }

    pub fn get_mut(&mut self, id: ChitId) -> Option<&mut ChitCard> {
        self.cards.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChitCard> {
        self.cards.iter()
    }

    /// Turn every chit face down.
    pub fn reset_all(&mut self) {
        for card in &mut self.cards {
            card.reset();
        }
    }

    /// Ids of the chits still face down, in table order.
    #[must_use]
    pub fn face_down(&self) -> SmallVec<[ChitId; 20]> {
        self.cards.iter().filter(|c| !c.is_flipped()).map(|c| c.id).collect()
    }

    /// The chit under `point`, if any.
    #[must_use]
    pub fn card_at(&self, point: Point) -> Option<ChitId> {
        self.cards.iter().find(|c| c.hit_test(point, &self.layout)).map(|c| c.id)
    }

    /// Faces of all chits in table order.
    #[must_use]
    pub fn specs(&self) -> Vec<ChitSpec> {
        self.cards.iter().map(|c| c.spec).collect()
    }

    /// Replace every chit face in table order, leaving all face down.
    ///
    /// The caller checks that `specs` has one entry per chit.
    pub(crate) fn replace_all(&mut self, specs: &[ChitSpec]) {
        for (card, spec) in self.cards.iter_mut().zip(specs) {
            card.spec = *spec;
            card.reset();
        }
    }
}
