use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};

/// Calculate the value of a blackjack hand.
///
/// Pip cards count their face, courts count 10 and aces count 1; if the
/// hand holds at least one ace and promoting it to 11 keeps the total at
/// or below 21, exactly one ace is promoted. An empty hand is worth 0.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total = 0;
    let mut has_ace = false;

    for card in cards {
        if card.rank == Rank::Ace {
            has_ace = true;
        }
        total += card.rank.base_value();
    }

    if has_ace && total + 10 <= 21 {
        total += 10;
    }

    total
}

/// Check if a hand is busted.
pub fn is_busted(cards: &[Card]) -> bool {
    hand_value(cards) > 21
}

/// An ordered, append-only sequence of dealt cards. A hand never shrinks;
/// a new round replaces it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Spades)
    }

    #[test]
    fn test_hand_value_simple() {
        let cards = vec![card(Rank::Two), Card::new(Rank::Three, Suit::Hearts)];
        assert_eq!(hand_value(&cards), 5);
    }

    #[test]
    fn test_hand_value_face_cards() {
        let cards = vec![card(Rank::King), Card::new(Rank::Queen, Suit::Hearts)];
        assert_eq!(hand_value(&cards), 20);
    }

    #[test]
    fn test_hand_value_is_order_independent() {
        let ace_first = vec![card(Rank::Ace), Card::new(Rank::King, Suit::Hearts)];
        let king_first = vec![Card::new(Rank::King, Suit::Hearts), card(Rank::Ace)];
        assert_eq!(hand_value(&ace_first), 21);
        assert_eq!(hand_value(&king_first), 21);
    }

    #[test]
    fn test_hand_value_soft_ace() {
        let cards = vec![card(Rank::Ace), Card::new(Rank::Six, Suit::Hearts)];
        assert_eq!(hand_value(&cards), 17); // Ace as 11
    }

    #[test]
    fn test_hand_value_hard_ace() {
        let cards = vec![
            card(Rank::Ace),
            Card::new(Rank::Six, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Clubs),
        ];
        assert_eq!(hand_value(&cards), 16); // Ace as 1
    }

    #[test]
    fn test_only_one_ace_is_promoted() {
        let cards = vec![
            card(Rank::Ace),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Clubs),
        ];
        assert_eq!(hand_value(&cards), 21); // 11 + 1 + 9

        let cards = vec![
            card(Rank::Ace),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Diamonds),
            Card::new(Rank::Eight, Suit::Clubs),
        ];
        assert_eq!(hand_value(&cards), 21); // 11 + 1 + 1 + 8
    }

    #[test]
    fn test_empty_hand_is_zero() {
        assert_eq!(hand_value(&[]), 0);
    }

    #[test]
    fn test_is_busted() {
        let cards = vec![
            card(Rank::King),
            Card::new(Rank::Queen, Suit::Hearts),
            Card::new(Rank::Five, Suit::Clubs),
        ];
        assert!(is_busted(&cards));
    }

    #[test]
    fn test_not_busted_at_21() {
        let cards = vec![
            card(Rank::King),
            Card::new(Rank::Queen, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Clubs),
        ];
        assert_eq!(hand_value(&cards), 21);
        assert!(!is_busted(&cards));
    }

    #[test]
    fn test_hand_struct_grows_by_appending() {
        let mut hand = Hand::new();
        assert!(hand.is_empty());
        assert_eq!(hand.value(), 0);

        hand.add_card(card(Rank::King));
        hand.add_card(Card::new(Rank::Seven, Suit::Hearts));
        assert_eq!(hand.len(), 2);
        assert_eq!(hand.value(), 17);
        assert_eq!(hand.cards()[0], card(Rank::King));
    }
}
