use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_BANKROLL: f64 = 100.0;
pub const DEFAULT_NUM_DECKS: usize = 4;
pub const DEFAULT_MIN_SHOE_CARDS: usize = 15;
/// The shoe is never allowed to run lower than this before a round, smaller settings are raised to it.
pub const MIN_SHOE_CARDS_FLOOR: usize = 15;

/// Struct for configuring a `BlackjackTable`. Fields missing from a deserialized config take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub starting_bankroll: f64,
    pub num_decks: usize,
    /// The shoe is rebuilt before a round if fewer cards than this remain.
    pub min_shoe_cards: usize,
}

impl TableConfig {
    /// Associated method for returning a new `TableConfigBuilder` object, allows the caller to choose the
    /// starting bankroll, how many decks make up the shoe and when the shoe is reshuffled.
    pub fn new() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    /// Method for raising out of range settings to the smallest playable values:
    /// at least one deck, and a reshuffle threshold of at least `MIN_SHOE_CARDS_FLOOR`.
    pub fn normalized(self) -> TableConfig {
        TableConfig {
            num_decks: self.num_decks.max(1),
            min_shoe_cards: self.min_shoe_cards.max(MIN_SHOE_CARDS_FLOOR),
            ..self
        }
    }
}

impl Default for TableConfig {
    /// Returns the standard table: a $100 bankroll and a four deck shoe reshuffled below 15 cards.
    fn default() -> Self {
        TableConfig::new().build()
    }
}

/// Struct to implement builder pattern for `TableConfig`
#[derive(Debug, Default, Clone, Copy)]
pub struct TableConfigBuilder {
    starting_bankroll: Option<f64>,
    num_decks: Option<usize>,
    min_shoe_cards: Option<usize>,
}

impl TableConfigBuilder {
    /// Method for changing the starting bankroll of the player.
    pub fn starting_bankroll(&mut self, bankroll: f64) -> &mut Self {
        self.starting_bankroll = Some(bankroll);
        self
    }

    /// Method for choosing the number of decks the shoe is built from.
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the number of cards below which the shoe is rebuilt before a round.
    pub fn min_shoe_cards(&mut self, cards: usize) -> &mut Self {
        self.min_shoe_cards = Some(cards);
        self
    }

    /// Method for building a `TableConfig` object from the given `TableConfigBuilder` object.
    pub fn build(&mut self) -> TableConfig {
        TableConfig {
            starting_bankroll: self.starting_bankroll.unwrap_or(DEFAULT_STARTING_BANKROLL),
            num_decks: self.num_decks.unwrap_or(DEFAULT_NUM_DECKS),
            min_shoe_cards: self.min_shoe_cards.unwrap_or(DEFAULT_MIN_SHOE_CARDS),
        }
        .normalized()
    }
}
