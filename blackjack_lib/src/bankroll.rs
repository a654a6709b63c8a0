use crate::BlackjackGameError;
use log::debug;

/// The players funds for the whole session. Bets are deducted when they are placed and payouts credited
/// after a round is settled, nothing else moves money.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bankroll {
    balance: f64,
}

impl Bankroll {
    pub fn new(starting_balance: f64) -> Self {
        Bankroll {
            balance: starting_balance,
        }
    }

    /// Getter method for the current balance.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Checks that `amount` is a positive bet the bankroll can cover.
    pub fn validate_bet(&self, amount: f64) -> Result<(), BlackjackGameError> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(BlackjackGameError::InvalidBet {
                amount,
                reason: "bet must be positive",
            });
        }
        if amount > self.balance {
            return Err(BlackjackGameError::InvalidBet {
                amount,
                reason: "insufficient funds",
            });
        }
        Ok(())
    }

    /// Returns true if the bankroll can cover another bet of `amount`.
    pub fn can_cover(&self, amount: f64) -> bool {
        self.validate_bet(amount).is_ok()
    }

    /// Validates and deducts a bet, returning the new balance.
    pub fn place_bet(&mut self, amount: f64) -> Result<f64, BlackjackGameError> {
        self.validate_bet(amount)?;
        self.balance -= amount;
        debug!("placed bet of {amount:.2}, balance {:.2}", self.balance);
        Ok(self.balance)
    }

    /// Credits a payout and returns the new balance. Losing hands pay nothing rather than a negative amount.
    pub fn apply_payout(&mut self, amount: f64) -> f64 {
        debug_assert!(amount >= 0.0);
        self.balance += amount;
        self.balance
    }

    /// A bankroll at or below zero ends the session. So does one that is not a number at all.
    pub fn is_depleted(&self) -> bool {
        self.balance.is_nan() || self.balance <= 0.0
    }
}
