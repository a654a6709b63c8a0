use crate::table::{HandOutcome, RoundReport};
use serde::Serialize;
use std::fmt::Display;

/// Simple struct for recording the interesting data points of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub rounds: u32,
    pub hands_won: u32,
    pub hands_pushed: u32,
    pub hands_lost: u32,
    pub hands_busted: u32,
    pub blackjacks: u32,
    pub winnings: f64,
    pub starting_bankroll: f64,
    pub final_bankroll: f64,
    pub depleted: bool,
}

impl SessionSummary {
    pub fn new(starting_bankroll: f64) -> Self {
        SessionSummary {
            rounds: 0,
            hands_won: 0,
            hands_pushed: 0,
            hands_lost: 0,
            hands_busted: 0,
            blackjacks: 0,
            winnings: 0.0,
            starting_bankroll,
            final_bankroll: starting_bankroll,
            depleted: false,
        }
    }

    /// Method for adding the results of a finished round to the summary.
    pub fn record(&mut self, report: &RoundReport) {
        self.rounds += 1;
        for result in &report.hands {
            match result.outcome {
                HandOutcome::Blackjack => {
                    self.blackjacks += 1;
                    self.hands_won += 1;
                }
                HandOutcome::Win => self.hands_won += 1,
                HandOutcome::Push => self.hands_pushed += 1,
                HandOutcome::Lose => self.hands_lost += 1,
                HandOutcome::Bust => self.hands_busted += 1,
            }
        }
        self.winnings += report.delta;
        self.final_bankroll = report.bankroll;
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_won + self.hands_pushed + self.hands_lost + self.hands_busted
    }
}

impl Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let hands = self.hands_played().max(1) as f64;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "{:-^WIDTH$}", "session summary")?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played", self.rounds)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands won", self.hands_won)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands pushed", self.hands_pushed)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands lost", self.hands_lost)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands busted", self.hands_busted)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks", self.blackjacks
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "win percentage",
            self.hands_won as f64 / hands
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}", "winnings", self.winnings)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "final bankroll", self.final_bankroll
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "out of money", self.depleted)?;
        write!(f, "{}", "-".repeat(WIDTH))
    }
}
