use crate::card::{card_value, Card};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Value a hand may not exceed without busting.
pub const BLACKJACK: u8 = 21;

/// Computes the value of a hand. Every ace starts out as 11 and is downgraded to 1, one ace at a time,
/// while the total is over 21. If the total is still over 21 once every ace counts as 1 the hand is busted.
/// Totals too large for a `u8` are reported as `u8::MAX`.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total: u32 = 0;
    let mut aces = 0;
    for card in cards {
        total += u32::from(card_value(card));
        if card.is_ace() {
            aces += 1;
        }
    }

    while total > u32::from(BLACKJACK) && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    u8::try_from(total).unwrap_or(u8::MAX)
}

/// A natural: exactly two cards worth 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == BLACKJACK
}

/// Returns true if the hand is counting an ace as 11.
pub fn is_soft(cards: &[Card]) -> bool {
    let hard: u32 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { u32::from(card_value(c)) })
        .sum();
    cards.iter().any(Card::is_ace) && hard + 10 <= u32::from(BLACKJACK)
}

/// An ordered sequence of cards. Order only matters for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    /// Method for receiving a card, appends it to the end of the hand.
    pub fn receive_card(&mut self, card: Card) {
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

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        self.value() > BLACKJACK
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    /// Returns true if the hand is two cards of the same rank. A king and a queen are not a pair.
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Breaks a pair into its two cards, consuming the hand.
    pub(crate) fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "[{}]", cards)
    }
}
