//! Rules engine for a single-player blackjack round: deck management,
//! hand evaluation and hit/stand resolution against fixed house rules.
//! Rendering and input are left to the caller, which drives the engine
//! through its actions and re-renders from the read-only queries.

mod card;
mod deck;
mod error;
mod hand;
mod round;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use error::GameError;
pub use hand::{hand_value, is_busted, Hand};
pub use round::{GameEngine, Outcome, RoundPhase, RoundState, DEALER_STANDS_ON};
