//! Structured events emitted while a round is played, and the traits that connect the engine to the outside world.

use crate::card::Card;
use crate::hand::Hand;
use crate::table::HandOutcome;
use crate::turn::{Action, HandState, TurnContext};
use crate::BlackjackGameError;
use serde::Serialize;

/// Everything a presentation layer needs to render a round. Events are emitted in the order things happen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    /// The shoe fell below its minimum size and was rebuilt before the deal.
    Reshuffled { cards: usize },
    BetPlaced { amount: f64, bankroll: f64 },
    PlayerHand {
        hand_index: usize,
        cards: Vec<Card>,
        value: u8,
    },
    /// The dealers hand. While `concealed` the hole card is left out of `cards` and no value is given.
    DealerHand {
        cards: Vec<Card>,
        concealed: bool,
        value: Option<u8>,
    },
    Split { bet: f64, bankroll: f64 },
    DoubledDown {
        hand_index: usize,
        additional_bet: f64,
        bankroll: f64,
    },
    HandFinished { hand_index: usize, state: HandState },
    /// Every player hand busted so the dealer does not draw.
    DealerSkipped,
    HandSettled {
        hand_index: usize,
        outcome: HandOutcome,
        bet: f64,
        payout: f64,
    },
    RoundFinished { bankroll: f64, delta: f64 },
}

impl RoundEvent {
    /// Builds the event describing the dealers hand, hiding the first card if `concealed`.
    pub fn dealer_hand(hand: &Hand, concealed: bool) -> RoundEvent {
        if concealed {
            RoundEvent::DealerHand {
                cards: hand.cards().iter().skip(1).copied().collect(),
                concealed,
                value: None,
            }
        } else {
            RoundEvent::DealerHand {
                cards: hand.cards().to_vec(),
                concealed,
                value: Some(hand.value()),
            }
        }
    }

    pub fn player_hand(hand_index: usize, hand: &Hand) -> RoundEvent {
        RoundEvent::PlayerHand {
            hand_index,
            cards: hand.cards().to_vec(),
            value: hand.value(),
        }
    }
}

/// Supplies the players decisions. Implemented by the console, by scripted strategies and by tests.
///
/// Quitting from a bet or yes/no prompt is signalled with `Err(BlackjackGameError::SessionAbort)`.
/// Returning a recoverable error (see [`BlackjackGameError::is_recoverable`]) makes the engine call
/// [`DecisionSource::reject`] and ask again.
pub trait DecisionSource {
    /// Required method, asks for the bet of the next round given the current bankroll.
    fn place_bet(&mut self, bankroll: f64) -> Result<f64, BlackjackGameError>;

    /// Required method, asks how to play the current hand.
    fn decide_action(&mut self, context: &TurnContext<'_>) -> Result<Action, BlackjackGameError>;

    /// Required method, asked when the initial hand is a pair the bankroll can afford to split.
    fn confirm_split(&mut self, hand: &Hand, dealer_up_card: &Card)
        -> Result<bool, BlackjackGameError>;

    /// Required method, asked after each round that did not deplete the bankroll.
    fn play_again(&mut self) -> Result<bool, BlackjackGameError>;

    /// Called with the reason the previous answer was refused, right before the request is repeated.
    fn reject(&mut self, _error: &BlackjackGameError) {}
}

/// Receives round events for rendering. Purely observational.
pub trait PresentationSink {
    fn notify(&mut self, event: &RoundEvent);
}

/// A sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl PresentationSink for SilentSink {
    fn notify(&mut self, _event: &RoundEvent) {}
}

impl<P: PresentationSink + ?Sized> PresentationSink for &mut P {
    fn notify(&mut self, event: &RoundEvent) {
        (**self).notify(event);
    }
}

impl<D: DecisionSource + ?Sized> DecisionSource for &mut D {
    fn place_bet(&mut self, bankroll: f64) -> Result<f64, BlackjackGameError> {
        (**self).place_bet(bankroll)
    }

    fn decide_action(&mut self, context: &TurnContext<'_>) -> Result<Action, BlackjackGameError> {
        (**self).decide_action(context)
    }

    fn confirm_split(
        &mut self,
        hand: &Hand,
        dealer_up_card: &Card,
    ) -> Result<bool, BlackjackGameError> {
        (**self).confirm_split(hand, dealer_up_card)
    }

    fn play_again(&mut self) -> Result<bool, BlackjackGameError> {
        (**self).play_again()
    }

    fn reject(&mut self, error: &BlackjackGameError) {
        (**self).reject(error)
    }
}

/// Repeats `request` until it yields something other than a recoverable error, reporting each refusal to `source`.
pub(crate) fn ask<D, T, F>(source: &mut D, mut request: F) -> Result<T, BlackjackGameError>
where
    D: DecisionSource + ?Sized,
    F: FnMut(&mut D) -> Result<T, BlackjackGameError>,
{
    loop {
        match request(source) {
            Err(e) if e.is_recoverable() => source.reject(&e),
            res => return res,
        }
    }
}
