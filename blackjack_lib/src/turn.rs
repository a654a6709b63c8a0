//! Plays a single player hand to completion, and the dealers fixed drawing policy.

use crate::card::Card;
use crate::deck::Shoe;
use crate::event::{ask, DecisionSource, PresentationSink, RoundEvent};
use crate::hand::{Hand, BLACKJACK};
use crate::BlackjackGameError;
use log::debug;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

/// The dealer stands on any total at or above this, soft 17 included.
pub const DEALER_STANDS_ON: u8 = 17;

/// A decision the player can make on their current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Hit,
    Stand,
    Double,
    Quit,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Double => "double",
            Action::Quit => "quit",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Action {
    type Err = BlackjackGameError;

    /// Parses `h`/`hit`, `s`/`stand`, `d`/`double` and `q`/`quit`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "h" | "hit" => Ok(Action::Hit),
            "s" | "stand" => Ok(Action::Stand),
            "d" | "double" => Ok(Action::Double),
            "q" | "quit" => Ok(Action::Quit),
            _ => Err(BlackjackGameError::MalformedInput(s.trim().to_string())),
        }
    }
}

/// Where a hand is in its turn. Every state other than `AwaitingAction` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandState {
    AwaitingAction,
    Stand,
    Bust,
    /// Two cards worth 21 at the start of the turn, no action is offered.
    Natural,
    /// Reached exactly 21 by hitting.
    TwentyOne,
    /// Doubled down, the hand took one card and is frozen whatever its value.
    Doubled,
}

impl HandState {
    pub fn is_terminal(&self) -> bool {
        *self != HandState::AwaitingAction
    }

    fn after_draw(hand: &Hand) -> HandState {
        match hand.value() {
            v if v > BLACKJACK => HandState::Bust,
            BLACKJACK => HandState::TwentyOne,
            _ => HandState::AwaitingAction,
        }
    }
}

/// What the decision source sees when asked to play a hand.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub hand: &'a Hand,
    pub hand_index: usize,
    pub num_hands: usize,
    /// The dealers face up card, the hole card stays hidden until every player hand is finished.
    pub dealer_up_card: &'a Card,
    pub bet: f64,
    pub can_double: bool,
}

impl<'a> TurnContext<'a> {
    /// Returns the actions that may be chosen right now.
    pub fn options(&self) -> Vec<Action> {
        let mut options = vec![Action::Hit, Action::Stand];
        if self.can_double {
            options.push(Action::Double);
        }
        options.push(Action::Quit);
        options
    }
}

/// Result of playing one hand. `additional_bet` is non zero only after a double and must be deducted by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnOutcome {
    pub state: HandState,
    pub additional_bet: f64,
}

/// Doubling is only allowed on the first two cards and if the bankroll can match the bet.
pub fn can_double(hand: &Hand, bet: f64, available: f64) -> bool {
    hand.len() == 2 && bet > 0.0 && available >= bet
}

/// Plays `hand` until it reaches a terminal state.
///
/// `available` is what is left in the bankroll after every bet placed so far this round.
/// A quit request is returned as `Err(SessionAbort)`, which callers should propagate untouched.
#[allow(clippy::too_many_arguments)]
pub fn play_hand<D, P>(
    hand: &mut Hand,
    hand_index: usize,
    num_hands: usize,
    bet: f64,
    available: f64,
    dealer_up_card: &Card,
    shoe: &mut Shoe,
    source: &mut D,
    sink: &mut P,
) -> Result<TurnOutcome, BlackjackGameError>
where
    D: DecisionSource + ?Sized,
    P: PresentationSink + ?Sized,
{
    let mut state = if hand.is_blackjack() {
        HandState::Natural
    } else {
        HandState::after_draw(hand)
    };
    let mut additional_bet = 0.0;

    while !state.is_terminal() {
        let doubling_allowed = can_double(hand, bet, available);
        let current: &Hand = hand;
        let action = ask(source, |s| {
            let context = TurnContext {
                hand: current,
                hand_index,
                num_hands,
                dealer_up_card,
                bet,
                can_double: doubling_allowed,
            };
            match s.decide_action(&context)? {
                Action::Double if !doubling_allowed => {
                    Err(BlackjackGameError::UnavailableAction(Action::Double))
                }
                action => Ok(action),
            }
        })?;

        state = match action {
            Action::Hit => {
                hand.receive_card(shoe.draw()?);
                sink.notify(&RoundEvent::player_hand(hand_index, hand));
                HandState::after_draw(hand)
            }
            Action::Stand => HandState::Stand,
            Action::Double => {
                additional_bet = bet;
                hand.receive_card(shoe.draw()?);
                debug!("hand #{} doubled down to {}", hand_index + 1, hand.value());
                sink.notify(&RoundEvent::DoubledDown {
                    hand_index,
                    additional_bet,
                    bankroll: available - additional_bet,
                });
                sink.notify(&RoundEvent::player_hand(hand_index, hand));
                HandState::Doubled
            }
            Action::Quit => return Err(BlackjackGameError::SessionAbort),
        };
    }

    sink.notify(&RoundEvent::HandFinished { hand_index, state });
    Ok(TurnOutcome {
        state,
        additional_bet,
    })
}

/// Draws for the dealer until the hand is worth 17 or more. The dealer stands on soft 17.
pub fn play_dealer(dealer: &mut Hand, shoe: &mut Shoe) -> Result<(), BlackjackGameError> {
    while dealer.value() < DEALER_STANDS_ON {
        dealer.receive_card(shoe.draw()?);
    }
    debug!("dealer stands with {} on {}", dealer, dealer.value());
    Ok(())
}
