//! Deterministic decision sources and sinks shared by the unit tests.

use crate::card::{Card, Rank, Suit};
use crate::event::{DecisionSource, PresentationSink, RoundEvent};
use crate::hand::Hand;
use crate::turn::{Action, TurnContext};
use crate::BlackjackGameError;
use std::collections::VecDeque;

pub fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Spades)
}

pub fn cards(ranks: &[Rank]) -> Vec<Card> {
    ranks.iter().map(|r| card(*r)).collect()
}

pub fn hand(ranks: &[Rank]) -> Hand {
    Hand::from_cards(cards(ranks))
}

/// Answers every request from a queue. Running out of bets or actions quits the session,
/// running out of yes/no answers says no.
#[derive(Default)]
pub struct ScriptedSource {
    bets: VecDeque<Result<f64, BlackjackGameError>>,
    actions: VecDeque<Result<Action, BlackjackGameError>>,
    splits: VecDeque<bool>,
    again: VecDeque<bool>,
    pub actions_asked: usize,
    pub split_offers: usize,
    pub rejected: Vec<BlackjackGameError>,
    pub last_options: Vec<Action>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        ScriptedSource::default()
    }

    pub fn bets(mut self, bets: &[f64]) -> Self {
        self.bets.extend(bets.iter().map(|b| Ok(*b)));
        self
    }

    pub fn malformed_bet(mut self, input: &str) -> Self {
        self.bets
            .push_back(Err(BlackjackGameError::MalformedInput(input.to_string())));
        self
    }

    pub fn actions(mut self, actions: &[Action]) -> Self {
        self.actions.extend(actions.iter().map(|a| Ok(*a)));
        self
    }

    pub fn malformed_action(mut self, input: &str) -> Self {
        self.actions
            .push_back(Err(BlackjackGameError::MalformedInput(input.to_string())));
        self
    }

    pub fn splits(mut self, answers: &[bool]) -> Self {
        self.splits.extend(answers);
        self
    }

    pub fn again(mut self, answers: &[bool]) -> Self {
        self.again.extend(answers);
        self
    }
}

impl DecisionSource for ScriptedSource {
    fn place_bet(&mut self, _bankroll: f64) -> Result<f64, BlackjackGameError> {
        self.bets
            .pop_front()
            .unwrap_or(Err(BlackjackGameError::SessionAbort))
    }

    fn decide_action(&mut self, context: &TurnContext<'_>) -> Result<Action, BlackjackGameError> {
        self.actions_asked += 1;
        self.last_options = context.options();
        self.actions
            .pop_front()
            .unwrap_or(Err(BlackjackGameError::SessionAbort))
    }

    fn confirm_split(
        &mut self,
        _hand: &Hand,
        _dealer_up_card: &Card,
    ) -> Result<bool, BlackjackGameError> {
        self.split_offers += 1;
        Ok(self.splits.pop_front().unwrap_or(false))
    }

    fn play_again(&mut self) -> Result<bool, BlackjackGameError> {
        Ok(self.again.pop_front().unwrap_or(false))
    }

    fn reject(&mut self, error: &BlackjackGameError) {
        self.rejected.push(error.clone());
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<RoundEvent>,
}

impl PresentationSink for RecordingSink {
    fn notify(&mut self, event: &RoundEvent) {
        self.events.push(event.clone());
    }
}
