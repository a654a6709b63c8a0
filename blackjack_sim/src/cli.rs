use blackjack_lib::{BlackjackTable, TableConfig};
use clap::{Args, Parser};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning command line arguments into a table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Table options shared by every binary. Explicit flags override values read from `--config`.
#[derive(Debug, Clone, Default, Args)]
pub struct TableArgs {
    /// Starting bankroll in dollars
    #[arg(long, value_parser = positive_amount)]
    pub bankroll: Option<f64>,

    /// Number of 52 card decks in the shoe
    #[arg(long)]
    pub decks: Option<usize>,

    /// Rebuild the shoe before a round when fewer cards than this remain
    #[arg(long)]
    pub min_shoe_cards: Option<usize>,

    /// Seed for the shuffles, makes a session reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file holding a table config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl TableArgs {
    /// Method for resolving the table config, starting from the config file if one was given.
    pub fn table_config(&self) -> Result<TableConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str::<TableConfig>(&text).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            None => TableConfig::default(),
        };
        Ok(TableConfig::new()
            .starting_bankroll(self.bankroll.unwrap_or(base.starting_bankroll))
            .num_decks(self.decks.unwrap_or(base.num_decks))
            .min_shoe_cards(self.min_shoe_cards.unwrap_or(base.min_shoe_cards))
            .build())
    }

    /// Method for creating the table, seeded if `--seed` was given and from entropy otherwise.
    pub fn table(&self) -> Result<BlackjackTable<StdRng>, ConfigError> {
        let config = self.table_config()?;
        Ok(match self.seed {
            Some(seed) => BlackjackTable::seeded(config, seed),
            None => BlackjackTable::new(config, StdRng::from_entropy()),
        })
    }
}

fn positive_amount(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(amount) if amount > 0.0 && amount.is_finite() => Ok(amount),
        Ok(_) => Err(format!("`{s}` is not a positive amount")),
        Err(e) => Err(e.to_string()),
    }
}

/// Play blackjack against the house at the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct PlayCli {
    #[command(flatten)]
    pub table: TableArgs,
}

/// Play a number of rounds unattended using basic strategy and print the session summary.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct AutoplayCli {
    /// Number of rounds to play
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: u32,

    /// Flat bet placed every round
    #[arg(long, default_value_t = 5.0, value_parser = positive_amount)]
    pub bet: f64,

    #[command(flatten)]
    pub table: TableArgs,
}
