use crate::card::{Card, Rank, Suit};
use crate::BlackjackGameError;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

pub const CARDS_PER_DECK: usize = 52;

/// Returns one standard 52 card deck, unshuffled.
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|suit| Rank::ALL.iter().map(move |rank| Card::new(*rank, *suit)))
        .collect()
}

/// The shoe the dealer draws from. Cards are drawn from the top, i.e. the end of `cards`.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Builds a shoe from `num_decks` standard decks shuffled with `rng`.
    pub fn new<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Shoe {
        let mut cards = Vec::with_capacity(num_decks * CARDS_PER_DECK);
        for _ in 0..num_decks {
            cards.extend(standard_deck());
        }
        cards.shuffle(rng);
        Shoe { cards }
    }

    /// Builds a shoe that deals `cards` in the order given, first card first. Useful for setting up a specific round.
    pub fn stacked(cards: Vec<Card>) -> Shoe {
        let mut cards = cards;
        cards.reverse();
        Shoe { cards }
    }

    /// Removes and returns the top card of the shoe.
    pub fn draw(&mut self) -> Result<Card, BlackjackGameError> {
        let card = self.cards.pop().ok_or(BlackjackGameError::EmptyShoe)?;
        trace!("drew {card}, {} cards left in shoe", self.cards.len());
        Ok(card)
    }

    /// Replaces the contents of the shoe with a freshly shuffled shoe of `num_decks` decks
    /// if fewer than `min_size` cards remain. Returns true if the shoe was rebuilt.
    /// Only call this between rounds.
    pub fn ensure_capacity<R: Rng + ?Sized>(
        &mut self,
        min_size: usize,
        num_decks: usize,
        rng: &mut R,
    ) -> bool {
        if self.cards.len() >= min_size {
            return false;
        }
        debug!(
            "{} cards left in shoe, reshuffling {} decks",
            self.cards.len(),
            num_decks
        );
        *self = Shoe::new(num_decks, rng);
        true
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
