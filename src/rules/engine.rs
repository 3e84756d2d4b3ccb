//! Turn engine: flip a chit, wait, resolve, repeat.
//!
//! A turn is a run of chit flips by one player. Each accepted flip turns a
//! chit face up and arms the flip timer; the host keeps calling `tick` and
//! the flip is resolved once the delay has passed. Only one flip can be
//! pending at a time.
//!
//! ## Resolution
//!
//! - The chit's animal matches the token's position, or is a pirate: the
//!   token moves. A legal move keeps the turn and extends the streak; an
//!   illegal one passes the turn.
//! - Reversal: the token is sent to the nearest free cave behind it, when
//!   there is one. The turn is kept either way.
//! - Anything else passes the turn to the next player by number.
//!
//! The game ends when a token enters its own cave. Further flips are ignored.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::policy::{ChitPicker, UniformPicker};
use crate::board::{CaveSearch, PositionId};
use crate::cards::{ChitId, ChitSpec, Destination, Point};
use crate::core::{
    Animal, Colour, ConfigError, FlipTimer, GameConfig, GameRng, GameState, MoveError, Player,
    PlayerId,
};

/// A request to flip a chit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlipRequest {
    /// Flip a specific chit.
    Card(ChitId),
    /// Flip whatever chit lies under a table point (a human click).
    At(Point),
    /// Let the engine's picker choose among face-down chits.
    Random,
}

/// Why a flip request had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    GameWon,
    ResolutionPending,
    UnknownCard,
    AlreadyFlipped,
    NoCardAtPoint,
}

/// Immediate result of a flip request.
#[derive(Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    /// The chit is face up and will resolve when the timer fires.
    Flipped(ChitId),
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// Every chit was already face up, so the turn passed straight away.
    TurnPassed(Resolution),
}

/// Why a turn ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PassReason {
    /// The chit showed an animal that did not match the token's position.
    Mismatch(Animal),
    /// The matching move was illegal and was rolled back.
    InvalidMove(MoveError),
    /// No face-down chit was left to flip.
    NoChitsLeft,
    /// The pending chit is not in the deck.
    UnknownChit(ChitId),
}

/// Effect of one resolved flip.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The token moved; the turn continues.
    Moved {
        player: PlayerId,
        distance: i32,
        destination: PositionId,
        streak: u32,
    },
    /// The token entered its own cave and won the game.
    Won { player: PlayerId, colour: Colour },
    /// A reversal chit. `moved` is false when no free cave was in reach.
    Reversed {
        player: PlayerId,
        search: CaveSearch,
        moved: bool,
    },
    /// The turn passed to the next player.
    TurnPassed {
        from: PlayerId,
        to: PlayerId,
        reason: PassReason,
    },
}

/// Drives a game from flip requests and clock ticks.
#[derive(Debug)]
pub struct TurnEngine<P: ChitPicker = UniformPicker> {
    config: GameConfig,
    state: GameState,
    timer: FlipTimer,
    /// Stream for automated picks, separate from layout and deck.
    rng: GameRng,
    picker: P,
    pending: Option<ChitId>,
}

impl TurnEngine<UniformPicker> {
    /// Start a new game with uniform random picks for automated seats.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed);
        let state = GameState::new(&config, &rng)?;

        info!(players = config.player_count, seed = config.seed, "new game");

        Ok(Self {
            timer: FlipTimer::new(config.flip_delay()),
            rng: rng.for_context("picks"),
            config,
            state,
            picker: UniformPicker,
            pending: None,
        })
    }
}

impl<P: ChitPicker> TurnEngine<P> {
    /// Replace the picker used for `FlipRequest::Random`.
    #[must_use]
    pub fn with_picker<Q: ChitPicker>(self, picker: Q) -> TurnEngine<Q> {
        TurnEngine {
            config: self.config,
            state: self.state,
            timer: self.timer,
            rng: self.rng,
            picker,
            pending: self.pending,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read access for presentation.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub(crate) fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }

    /// Colour and human flag of the player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> (Colour, bool) {
        let player = self.state.current_player();
        (player.colour, player.human)
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.state.turn.current_player
    }

    /// Animal of the position the current player's token stands on.
    #[must_use]
    pub fn current_position_animal(&self) -> Animal {
        self.state.graph.animal(self.state.current_player().token.position())
    }

    /// Colour of the winner, once the game is over.
    #[must_use]
    pub fn is_game_won(&self) -> Option<Colour> {
        self.winner().map(|p| p.colour)
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.state.winner()
    }

    /// Best streak of the game and the colour of the player who set it.
    #[must_use]
    pub fn best_streak(&self) -> (u32, Colour) {
        let best = self.state.turn.best;
        (best.score, self.state.players[best.player].colour)
    }

    /// Consecutive successful flips in the current turn.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.state.turn.streak
    }

    #[must_use]
    pub fn is_resolution_pending(&self) -> bool {
        self.timer.is_active()
    }

    /// The chit waiting to be resolved.
    #[must_use]
    pub fn pending_chit(&self) -> Option<ChitId> {
        self.pending
    }

    /// Flip a chit and arm the resolution timer.
    pub fn handle_flip_request(&mut self, request: FlipRequest) -> FlipOutcome {
        if self.is_game_won().is_some() {
            return FlipOutcome::Ignored(IgnoreReason::GameWon);
        }
        if self.is_resolution_pending() {
            return FlipOutcome::Ignored(IgnoreReason::ResolutionPending);
        }

        let face_down = self.state.deck.face_down();
        if face_down.is_empty() {
            debug!(player = %self.current_player_id(), "no face-down chits left");
            return FlipOutcome::TurnPassed(self.pass_turn(PassReason::NoChitsLeft));
        }

        let id = match request {
            FlipRequest::Card(id) => id,
            FlipRequest::At(point) => match self.state.deck.card_at(point) {
                Some(id) => id,
                None => return FlipOutcome::Ignored(IgnoreReason::NoCardAtPoint),
            },
            FlipRequest::Random => match self.picker.pick(&self.state, &face_down, &mut self.rng) {
                Some(id) => id,
                None => return FlipOutcome::Ignored(IgnoreReason::UnknownCard),
            },
        };

        let player = self.current_player_id();
        let Some(card) = self.state.deck.get_mut(id) else {
            return FlipOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        if card.is_flipped() {
            return FlipOutcome::Ignored(IgnoreReason::AlreadyFlipped);
        }
        card.flip();

        debug!(%player, chit = %id, face = ?card.spec, "chit flipped");
        self.pending = Some(id);
        self.timer.activate();
        FlipOutcome::Flipped(id)
    }

    /// Flip for the current seat when it is automated and idle.
    ///
    /// Returns `None` when the seat is human, a flip is pending or the game
    /// is over.
    pub fn play_automated_turn(&mut self) -> Option<FlipOutcome> {
        let (_, human) = self.current_player();
        if human || self.is_resolution_pending() || self.is_game_won().is_some() {
            return None;
        }
        Some(self.handle_flip_request(FlipRequest::Random))
    }

    /// Advance the flip timer. Returns the resolution on the tick it fires.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Resolution> {
        if !self.timer.tick(elapsed) {
            return None;
        }
        let id = self.pending.take()?;
        Some(self.resolve(id))
    }

    /// Play random flips for every seat until someone wins or `max_flips`
    /// flips have been made. Returns the winner's colour.
    pub fn autoplay(&mut self, max_flips: usize) -> Option<Colour> {
        let mut flips = 0;
        while self.is_game_won().is_none() && flips < max_flips {
            match self.handle_flip_request(FlipRequest::Random) {
                FlipOutcome::Flipped(_) => {
                    flips += 1;
                    let delay = self.timer.delay();
                    self.tick(delay);
                }
                FlipOutcome::TurnPassed(_) => {}
                // the picker declined every face-down chit
                FlipOutcome::Ignored(_) => break,
            }
        }
        self.is_game_won()
    }

    fn resolve(&mut self, id: ChitId) -> Resolution {
        let Some(card) = self.state.deck.get(id) else {
            warn!(%id, "resolving a chit that is not in the deck");
            return self.pass_turn(PassReason::UnknownChit(id));
        };
        let spec = card.spec;
        let search_depth = self.config.search_depth;

        let player = self.state.turn.current_player;
        let GameState {
            graph,
            players,
            turn,
            deck,
            ..
        } = &mut self.state;
        let token = &mut players[player].token;
        let on = graph.animal(token.position());

        match spec {
            ChitSpec::Standard { animal, distance } if animal == on || animal == Animal::Pirate => {
                match token.move_by(graph, distance) {
                    Ok(outcome) => {
                        turn.record_success();
                        if outcome.won {
                            let colour = token.colour();
                            info!(%player, %colour, total_moves = token.total_moves(), "game won");
                            return Resolution::Won { player, colour };
                        }
                        debug!(
                            %player,
                            distance,
                            destination = %outcome.destination,
                            streak = turn.streak,
                            "token moved"
                        );
                        Resolution::Moved {
                            player,
                            distance,
                            destination: outcome.destination,
                            streak: turn.streak,
                        }
                    }
                    Err(err) => self.pass_turn(PassReason::InvalidMove(err)),
                }
            }
            ChitSpec::Reverse { .. } => {
                let search = match deck
                    .get(id)
                    .map(|c| c.destination_within(graph, Some(token.position()), search_depth))
                {
                    Some(Destination::Cave(search)) => search,
                    _ => CaveSearch::NONE,
                };
                let moved = match search.cave {
                    Some(cave) if token.verify_move(graph, search.distance, search.cave) => {
                        token.place(graph, search.distance, cave).is_ok()
                    }
                    _ => false,
                };
                debug!(%player, distance = search.distance, moved, "reversal resolved");
                Resolution::Reversed { player, search, moved }
            }
            ChitSpec::Standard { animal, .. } => self.pass_turn(PassReason::Mismatch(animal)),
        }
    }

    fn pass_turn(&mut self, reason: PassReason) -> Resolution {
        let from = self.state.turn.current_player;
        let to = self.state.advance_turn();
        info!(%from, %to, ?reason, "turn passed");
        Resolution::TurnPassed { from, to, reason }
    }
}
