//! Text prompts and messages for playing at a terminal.

use blackjack_lib::prelude::*;
use log::warn;
use std::fmt::Arguments;
use std::io::{BufRead, Write};

/// The kind of question that was last asked, so a refusal can be explained in the right terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompt {
    Bet,
    Action,
    YesNo,
}

/// Reads the players decisions line by line from `input`, writing prompts to `output`.
pub struct ConsoleSource<R: BufRead, W: Write> {
    input: R,
    output: W,
    last_prompt: Prompt,
}

impl<R: BufRead, W: Write> ConsoleSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleSource {
            input,
            output,
            last_prompt: Prompt::Bet,
        }
    }

    /// Writes `prompt` and returns the next line of input trimmed and lower cased.
    /// A closed input is an error, there is nobody left to answer.
    fn read_answer(&mut self, prompt: Prompt, text: Arguments) -> Result<String, BlackjackGameError> {
        self.last_prompt = prompt;
        self.output.write_fmt(text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BlackjackGameError::Io("input closed".to_string()));
        }
        Ok(line.trim().to_lowercase())
    }

    fn yes_or_no(answer: &str) -> Result<bool, BlackjackGameError> {
        match answer {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            "q" | "quit" => Err(BlackjackGameError::SessionAbort),
            other => Err(BlackjackGameError::MalformedInput(other.to_string())),
        }
    }
}

impl<R: BufRead, W: Write> DecisionSource for ConsoleSource<R, W> {
    fn place_bet(&mut self, bankroll: f64) -> Result<f64, BlackjackGameError> {
        let answer = self.read_answer(
            Prompt::Bet,
            format_args!("Bankroll: ${bankroll:.2} - place your bet: "),
        )?;
        if answer == "q" || answer == "quit" {
            return Err(BlackjackGameError::SessionAbort);
        }
        answer
            .parse::<f64>()
            .map_err(|_| BlackjackGameError::MalformedInput(answer))
    }

    fn decide_action(&mut self, context: &TurnContext<'_>) -> Result<Action, BlackjackGameError> {
        let hand_label = if context.num_hands > 1 {
            format!("Hand #{} - ", context.hand_index + 1)
        } else {
            String::new()
        };
        let (question, keys) = if context.can_double {
            ("Hit, stand, double?", "(h/s/d/q)")
        } else {
            ("Hit, stand?", "(h/s/q)")
        };
        let answer =
            self.read_answer(Prompt::Action, format_args!("{hand_label}{question} {keys}: "))?;
        answer.parse()
    }

    fn confirm_split(
        &mut self,
        hand: &Hand,
        _dealer_up_card: &Card,
    ) -> Result<bool, BlackjackGameError> {
        let cards = hand
            .cards()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(" and ");
        let value = hand.value();
        let answer = self.read_answer(
            Prompt::YesNo,
            format_args!("You have a pair ({cards}, value {value}) - split? (y/n): "),
        )?;
        Self::yes_or_no(&answer)
    }

    fn play_again(&mut self) -> Result<bool, BlackjackGameError> {
        let answer = self.read_answer(Prompt::YesNo, format_args!("Play another hand? (y/n): "))?;
        Self::yes_or_no(&answer)
    }

    fn reject(&mut self, error: &BlackjackGameError) {
        let message = match (error, self.last_prompt) {
            (BlackjackGameError::InvalidBet { amount, .. }, _) if *amount > 0.0 => {
                "You don't have enough funds for that bet."
            }
            (BlackjackGameError::InvalidBet { .. }, _) => "Bet must be positive.",
            (BlackjackGameError::UnavailableAction(_), _) => {
                "Double down is only available on your first two cards with enough funds."
            }
            (_, Prompt::Bet) => "Please enter a valid number.",
            (_, Prompt::Action) => {
                "Invalid input. Type 'h' to hit, 's' to stand, 'd' to double (if available), or 'q' to quit."
            }
            (_, Prompt::YesNo) => "Please answer 'y' or 'n'.",
        };
        if let Err(e) = writeln!(self.output, "{message}") {
            warn!("failed to write to console: {e}");
        }
    }
}

fn format_cards(cards: &[Card]) -> String {
    let cards = cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!("[{cards}]")
}

/// Renders round events as the plain text messages of the console game.
pub struct ConsoleSink<W: Write> {
    output: W,
    split: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(output: W) -> Self {
        ConsoleSink {
            output,
            split: false,
        }
    }

    fn line(&mut self, text: Arguments) {
        if let Err(e) = self
            .output
            .write_fmt(text)
            .and_then(|_| self.output.write_all(b"\n"))
        {
            warn!("failed to write to console: {e}");
        }
    }
}

impl<W: Write> PresentationSink for ConsoleSink<W> {
    fn notify(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::Reshuffled { .. } => self.line(format_args!("Reshuffling deck...")),
            RoundEvent::BetPlaced { amount, .. } => {
                self.split = false;
                self.line(format_args!("You bet ${amount:.2}"));
            }
            RoundEvent::PlayerHand {
                hand_index,
                cards,
                value,
            } => {
                let cards = format_cards(cards);
                if self.split {
                    let n = hand_index + 1;
                    self.line(format_args!("Hand #{n}: {cards}  (value: {value})"));
                } else {
                    self.line(format_args!("Your hand: {cards}  (value: {value})"));
                }
            }
            RoundEvent::DealerHand {
                cards,
                concealed: true,
                ..
            } => {
                let shown = cards
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                self.line(format_args!("Dealer: [?, {shown}]"));
            }
            RoundEvent::DealerHand { cards, value, .. } => {
                let cards = format_cards(cards);
                match value {
                    Some(v) => self.line(format_args!("Dealer: {cards}  (value: {v})")),
                    None => self.line(format_args!("Dealer: {cards}")),
                }
            }
            RoundEvent::Split { .. } => {
                self.split = true;
                self.line(format_args!("Hand split into two hands."));
            }
            RoundEvent::DoubledDown { .. } => self.line(format_args!("You doubled down.")),
            RoundEvent::HandFinished { state, .. } => match state {
                HandState::Natural => self.line(format_args!("Blackjack!")),
                HandState::Bust => self.line(format_args!("You busted!")),
                _ => {}
            },
            RoundEvent::DealerSkipped => {
                self.line(format_args!("Every hand busted, the dealer does not draw."))
            }
            RoundEvent::HandSettled {
                hand_index,
                outcome,
                bet,
                payout,
            } => {
                let n = hand_index + 1;
                match outcome {
                    HandOutcome::Blackjack => self.line(format_args!(
                        "Blackjack! You receive ${payout:.2} (includes original bet) on hand #{n}"
                    )),
                    HandOutcome::Win => self.line(format_args!(
                        "You win ${bet:.2} (profit), receiving ${payout:.2} total on hand #{n}!"
                    )),
                    HandOutcome::Push => {
                        self.line(format_args!("Push on hand #{n}. Bet returned."))
                    }
                    HandOutcome::Lose => {
                        self.line(format_args!("You lose ${bet:.2} on hand #{n}."))
                    }
                    HandOutcome::Bust => self.line(format_args!(
                        "Hand #{n} busted, you lose the bet of ${bet:.2}."
                    )),
                }
            }
            RoundEvent::RoundFinished { bankroll, delta } => {
                self.line(format_args!(
                    "Bankroll now: ${bankroll:.2} (change: {delta:+.2})"
                ));
                if *bankroll <= 0.0 {
                    self.line(format_args!("You are out of money. Game over."));
                }
            }
        }
    }
}
