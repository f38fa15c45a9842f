use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::GameError;
use crate::hand::Hand;

/// The dealer draws while below this total and stands at or above it.
pub const DEALER_STANDS_ON: u8 = 17;

/// Current phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    InProgress,
    PlayerBusted,
    DealerBusted,
    Resolved,
}

impl RoundPhase {
    /// Every phase except `InProgress` is terminal until a new round
    /// replaces the state wholesale.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundPhase::InProgress)
    }
}

/// Result of a finished round. Strictly numeric comparison; a two-card 21
/// gets no special treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    PlayerWin,
    DealerWin,
    Push,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::PlayerBust => "You busted! Dealer wins.",
            Outcome::DealerBust => "Dealer busted! You win.",
            Outcome::PlayerWin => "You win!",
            Outcome::DealerWin => "Dealer wins.",
            Outcome::Push => "It's a tie!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One round's deck, hands and phase. The deck is owned exclusively by
/// the round for its whole lifetime; the presentation layer only ever
/// sees the read-only queries.
#[derive(Debug, Clone)]
pub struct RoundState {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    phase: RoundPhase,
}

impl RoundState {
    /// Deal the opening hands from an already-shuffled deck: two cards to
    /// the player, then two to the dealer.
    fn deal(mut deck: Deck) -> Result<Self, GameError> {
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        player.add_card(deck.draw()?);
        player.add_card(deck.draw()?);
        dealer.add_card(deck.draw()?);
        dealer.add_card(deck.draw()?);
        Ok(RoundState {
            deck,
            player,
            dealer,
            phase: RoundPhase::InProgress,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn player_cards(&self) -> &[Card] {
        self.player.cards()
    }

    pub fn dealer_cards(&self) -> &[Card] {
        self.dealer.cards()
    }

    pub fn player_value(&self) -> u8 {
        self.player.value()
    }

    pub fn dealer_value(&self) -> u8 {
        self.dealer.value()
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }

    fn require_in_progress(&self, action: &'static str) -> Result<(), GameError> {
        if self.phase != RoundPhase::InProgress {
            return Err(GameError::InvalidAction {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn hit(&mut self) -> Result<(), GameError> {
        self.require_in_progress("hit")?;
        let card = self.deck.draw()?;
        self.player.add_card(card);
        // Bust is judged on the total including the card just drawn.
        if self.player.is_busted() {
            self.phase = RoundPhase::PlayerBusted;
            debug!("player busted at {}", self.player.value());
        }
        Ok(())
    }

    fn stand(&mut self) -> Result<(), GameError> {
        self.require_in_progress("stand")?;
        while self.dealer.value() < DEALER_STANDS_ON {
            // A failed draw here leaves the round in progress with the
            // cards the dealer had drawn; the error is the signal that
            // the round is dead and a new one must be started.
            let card = self.deck.draw()?;
            self.dealer.add_card(card);
        }
        self.phase = if self.dealer.is_busted() {
            RoundPhase::DealerBusted
        } else {
            RoundPhase::Resolved
        };
        debug!(
            "dealer finished at {}, phase {:?}",
            self.dealer.value(),
            self.phase
        );
        Ok(())
    }

    fn outcome(&self) -> Result<Outcome, GameError> {
        if !self.phase.is_terminal() {
            return Err(GameError::InvalidAction {
                action: "outcome",
                phase: self.phase,
            });
        }
        let player = self.player.value();
        let dealer = self.dealer.value();
        Ok(if player > 21 {
            Outcome::PlayerBust
        } else if dealer > 21 {
            Outcome::DealerBust
        } else if player > dealer {
            Outcome::PlayerWin
        } else if dealer > player {
            Outcome::DealerWin
        } else {
            Outcome::Push
        })
    }
}

/// Drives one round at a time against an owned random source. At most one
/// round is live; starting a new one discards the old state wholesale, so
/// no error ever leaks across rounds.
pub struct GameEngine {
    rng: ChaCha8Rng,
    round: Option<RoundState>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            round: None,
        }
    }

    /// Seeded engine for reproducible deals.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            round: None,
        }
    }

    /// Build and shuffle a fresh 52-card deck, deal two cards each to the
    /// player and the dealer, and set the phase to `InProgress`. Always
    /// succeeds, whatever state the prior round ended in.
    pub fn start_round(&mut self) -> &RoundState {
        let mut deck = Deck::standard();
        deck.shuffle(&mut self.rng);
        let round = RoundState::deal(deck).expect("a full deck covers the opening deal");
        debug!(
            "round started: player {} dealer {}",
            round.player_value(),
            round.dealer_value()
        );
        self.round.insert(round)
    }

    /// Start a round from a caller-supplied deck, already in the order it
    /// should be dealt. Fails with `EmptyDeck` if the deck cannot cover
    /// the opening four cards, in which case no round is live.
    pub fn start_round_with_deck(&mut self, deck: Deck) -> Result<&RoundState, GameError> {
        self.round = None;
        let round = RoundState::deal(deck)?;
        Ok(self.round.insert(round))
    }

    /// The live round, if one has been started.
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    fn current(&self) -> Result<&RoundState, GameError> {
        self.round.as_ref().ok_or(GameError::RoundNotStarted)
    }

    fn current_mut(&mut self) -> Result<&mut RoundState, GameError> {
        self.round.as_mut().ok_or(GameError::RoundNotStarted)
    }

    /// Draw one card into the player's hand. If the post-draw total
    /// exceeds 21 the phase becomes `PlayerBusted` and the round is over.
    pub fn player_hit(&mut self) -> Result<(), GameError> {
        self.current_mut()?.hit()
    }

    /// Stop drawing for the player and run the dealer policy to
    /// completion: the dealer draws while below 17. The phase then
    /// becomes `DealerBusted` or `Resolved`.
    pub fn player_stand(&mut self) -> Result<(), GameError> {
        self.current_mut()?.stand()
    }

    /// Final outcome of a terminal round.
    pub fn outcome(&self) -> Result<Outcome, GameError> {
        self.current()?.outcome()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
