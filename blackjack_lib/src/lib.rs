//! Round resolution engine for a single player blackjack game against a house dealer.
//!
//! The engine never reads input or prints output itself. Decisions come in through a
//! [`DecisionSource`] and everything that happens during a round goes out as [`RoundEvent`]s
//! to a [`PresentationSink`].

pub mod bankroll;
pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod event;
pub mod hand;
pub mod stats;
pub mod strategy;
pub mod table;
pub mod turn;

#[cfg(test)]
mod testing;

pub use bankroll::Bankroll;
pub use card::{Card, Rank, Suit};
pub use config::{TableConfig, TableConfigBuilder};
pub use deck::Shoe;
pub use error::BlackjackGameError;
pub use event::{DecisionSource, PresentationSink, RoundEvent, SilentSink};
pub use hand::Hand;
pub use stats::SessionSummary;
pub use strategy::BasicStrategy;
pub use table::{BlackjackTable, HandOutcome, HandResult, RoundReport, SessionStatus};
pub use turn::{Action, HandState, TurnContext};

pub mod prelude {
    pub use super::{
        Action, BasicStrategy, BlackjackGameError, BlackjackTable, Card, DecisionSource, Hand,
        HandOutcome, HandState, PresentationSink, Rank, RoundEvent, RoundReport, SessionStatus,
        SessionSummary, SilentSink, Suit, TableConfig, TurnContext,
    };
}
