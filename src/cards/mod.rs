//! Chit cards and the deck on the table.
//!
//! ## Key Types
//!
//! - `ChitSpec`: what a chit shows, standard or reversal
//! - `ChitCard`: a chit on the table with its flip state and grid slot
//! - `ChitDeck`: every chit, dealt at random into the table grid
//! - `Destination`: the distance a flipped chit asks for

pub mod chit;
pub mod deck;

pub use chit::{ChitCard, ChitId, ChitSpec, Destination, Point, Rect};
pub use deck::ChitDeck;
