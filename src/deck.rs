use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::{Card, Rank, Suit};
use crate::error::GameError;

/// A single pack of cards. The top of the deck is the back of the vector,
/// so drawing is a pop. A deck is never replenished mid-round; once it is
/// empty every draw fails until a new round builds a fresh one.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Every (rank, suit) pair exactly once, 52 cards in rank-major,
    /// suit-minor order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// A deck in a caller-chosen order. Cards are drawn from the back of
    /// the slice, so the last card is the first one dealt.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
