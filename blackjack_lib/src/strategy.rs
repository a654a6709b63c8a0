use crate::card::Card;
use crate::event::DecisionSource;
use crate::hand::Hand;
use crate::turn::{Action, TurnContext};
use crate::BlackjackGameError;
use std::collections::HashMap;

/// What the lookup tables recommend. `Double` falls back to `Hit` when doubling is not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Play {
    Hit,
    Stand,
    Double,
    /// Double if allowed, stand otherwise.
    DoubleOrStand,
}

/// A decision source that plays every hand by basic strategy, bets a flat amount and stops after a fixed number of rounds.
/// The decision strategy only needs the dealers face up card and the players current cards.
pub struct BasicStrategy {
    hard_totals: HashMap<(u8, u8), Play>,
    soft_totals: HashMap<(u8, u8), Play>,
    pair_splits: HashMap<(u8, u8), bool>,
    bet: f64,
    rounds_left: u32,
}

impl BasicStrategy {
    /// Associated method for populating the lookup tables used in basic strategy, intended to be a helper method.
    /// Tables are keyed by (player total or pair card value, dealer up card value) with an ace worth 11.
    fn build_lookup_tables() -> (
        HashMap<(u8, u8), Play>,
        HashMap<(u8, u8), Play>,
        HashMap<(u8, u8), bool>,
    ) {
        // Populate hard totals lookup table
        let mut hard_totals = HashMap::new();
        for i in 4..=21 {
            for j in 2..=11 {
                let play = match i {
                    9 => match j {
                        3..=6 => Play::Double,
                        _ => Play::Hit,
                    },
                    10 => match j {
                        2..=9 => Play::Double,
                        _ => Play::Hit,
                    },
                    11 => Play::Double,
                    12 => match j {
                        4..=6 => Play::Stand,
                        _ => Play::Hit,
                    },
                    13..=16 => match j {
                        2..=6 => Play::Stand,
                        _ => Play::Hit,
                    },
                    17..=21 => Play::Stand,
                    _ => Play::Hit,
                };
                hard_totals.insert((i, j), play);
            }
        }

        // Populate soft totals i.e. hands counting an ace as 11
        let mut soft_totals = HashMap::new();
        for i in 12..=21 {
            for j in 2..=11 {
                let play = match i {
                    13 | 14 => match j {
                        5 | 6 => Play::Double,
                        _ => Play::Hit,
                    },
                    15 | 16 => match j {
                        4..=6 => Play::Double,
                        _ => Play::Hit,
                    },
                    17 => match j {
                        3..=6 => Play::Double,
                        _ => Play::Hit,
                    },
                    18 => match j {
                        2..=6 => Play::DoubleOrStand,
                        7 | 8 => Play::Stand,
                        _ => Play::Hit,
                    },
                    19 => match j {
                        6 => Play::DoubleOrStand,
                        _ => Play::Stand,
                    },
                    20 | 21 => Play::Stand,
                    _ => Play::Hit,
                };
                soft_totals.insert((i, j), play);
            }
        }

        // Populate pair splits, keyed by the value of one card of the pair
        let mut pair_splits = HashMap::new();
        for i in 2..=11 {
            for j in 2..=11 {
                let split = match i {
                    11 | 8 => true,
                    2 | 3 | 7 => (2..=7).contains(&j),
                    4 => j == 5 || j == 6,
                    6 => (2..=6).contains(&j),
                    9 => matches!(j, 2..=6 | 8 | 9),
                    _ => false,
                };
                pair_splits.insert((i, j), split);
            }
        }

        (hard_totals, soft_totals, pair_splits)
    }

    /// Associated method for creating a new `BasicStrategy` that bets `bet` each round for `rounds` rounds.
    pub fn new(bet: f64, rounds: u32) -> BasicStrategy {
        let (hard_totals, soft_totals, pair_splits) = BasicStrategy::build_lookup_tables();
        BasicStrategy {
            hard_totals,
            soft_totals,
            pair_splits,
            bet,
            rounds_left: rounds,
        }
    }

    fn lookup(&self, hand: &Hand, dealer_up_card: &Card) -> Play {
        let key = (hand.value(), dealer_up_card.value());
        let table = if hand.is_soft() {
            &self.soft_totals
        } else {
            &self.hard_totals
        };
        table.get(&key).copied().unwrap_or(Play::Stand)
    }
}

impl DecisionSource for BasicStrategy {
    /// Bets the flat amount, or whatever is left if the bankroll has fallen below it.
    /// A bet unit that is not a positive amount could never be accepted, so the session is abandoned instead.
    fn place_bet(&mut self, bankroll: f64) -> Result<f64, BlackjackGameError> {
        if self.rounds_left == 0 || !self.bet.is_finite() || self.bet <= 0.0 {
            return Err(BlackjackGameError::SessionAbort);
        }
        Ok(f64::min(self.bet, bankroll))
    }

    fn decide_action(&mut self, context: &TurnContext<'_>) -> Result<Action, BlackjackGameError> {
        let action = match self.lookup(context.hand, context.dealer_up_card) {
            Play::Hit => Action::Hit,
            Play::Stand => Action::Stand,
            Play::Double if context.can_double => Action::Double,
            Play::Double => Action::Hit,
            Play::DoubleOrStand if context.can_double => Action::Double,
            Play::DoubleOrStand => Action::Stand,
        };
        Ok(action)
    }

    fn confirm_split(
        &mut self,
        hand: &Hand,
        dealer_up_card: &Card,
    ) -> Result<bool, BlackjackGameError> {
        let key = match hand.cards().first() {
            Some(card) => (card.value(), dealer_up_card.value()),
            None => return Ok(false),
        };
        Ok(self.pair_splits.get(&key).copied().unwrap_or(false))
    }

    /// Only asked once a round has been played, so this is where a round is counted.
    fn play_again(&mut self) -> Result<bool, BlackjackGameError> {
        self.rounds_left = self.rounds_left.saturating_sub(1);
        Ok(self.rounds_left > 0)
    }
}
