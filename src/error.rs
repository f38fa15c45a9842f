use thiserror::Error;

use crate::round::RoundPhase;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A draw was attempted against a deck with no cards left. Fatal for
    /// the round; starting a new round always recovers.
    #[error("the deck has no cards left")]
    EmptyDeck,

    /// A player action or outcome query arrived in a phase where it is
    /// not allowed. Invalid actions error rather than silently no-op.
    #[error("{action} is not valid while the round is {phase:?}")]
    InvalidAction {
        action: &'static str,
        phase: RoundPhase,
    },

    /// An action arrived before the first round was started.
    #[error("no round has been started")]
    RoundNotStarted,
}
