use crate::turn::Action;
use thiserror::Error;

/// Errors produced while playing a session of blackjack.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlackjackGameError {
    /// A bet that is not positive or exceeds the bankroll.
    #[error("invalid bet of ${amount:.2}: {reason}")]
    InvalidBet { amount: f64, reason: &'static str },

    #[error("unrecognized input `{0}`")]
    MalformedInput(String),

    /// A recognized action that is not legal for the current hand.
    #[error("{0} is not available for this hand")]
    UnavailableAction(Action),

    /// The shoe ran out of cards mid-round. The capacity check before each round makes this unreachable,
    /// so seeing it means an invariant was broken.
    #[error("attempted to draw from an empty shoe")]
    EmptyShoe,

    #[error("session aborted by the player")]
    SessionAbort,

    #[error("decision source failed: {0}")]
    Io(String),
}

impl BlackjackGameError {
    /// Returns true if the error should be reported back to the decision source and the request repeated.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BlackjackGameError::InvalidBet { .. }
                | BlackjackGameError::MalformedInput(_)
                | BlackjackGameError::UnavailableAction(_)
        )
    }
}

impl From<std::io::Error> for BlackjackGameError {
    fn from(value: std::io::Error) -> Self {
        BlackjackGameError::Io(value.to_string())
    }
}
