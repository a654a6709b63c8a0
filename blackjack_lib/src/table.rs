use crate::bankroll::Bankroll;
use crate::config::TableConfig;
use crate::deck::Shoe;
use crate::event::{ask, DecisionSource, PresentationSink, RoundEvent};
use crate::hand::{Hand, BLACKJACK};
use crate::stats::SessionSummary;
use crate::turn::{play_dealer, play_hand};
use crate::BlackjackGameError;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// How a single player hand ended against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandOutcome {
    Blackjack,
    Win,
    Lose,
    Push,
    Bust,
}

impl HandOutcome {
    /// Multiple of the bet returned to the player, the original stake included.
    pub fn payout_multiplier(&self) -> f64 {
        match self {
            HandOutcome::Blackjack => 2.5,
            HandOutcome::Win => 2.0,
            HandOutcome::Push => 1.0,
            HandOutcome::Lose | HandOutcome::Bust => 0.0,
        }
    }

    pub fn payout(&self, bet: f64) -> f64 {
        bet * self.payout_multiplier()
    }
}

/// Decides the outcome of a finished player hand against the dealers final hand.
/// Any two card 21 counts as a natural, including hands formed by a split.
pub fn settle(hand: &Hand, dealer: &Hand) -> HandOutcome {
    let (player, house) = (hand.value(), dealer.value());
    if hand.is_blackjack() {
        return if dealer.is_blackjack() {
            HandOutcome::Push
        } else {
            HandOutcome::Blackjack
        };
    }
    if player > BLACKJACK {
        HandOutcome::Bust
    } else if house > BLACKJACK || player > house {
        HandOutcome::Win
    } else if player < house {
        HandOutcome::Lose
    } else {
        HandOutcome::Push
    }
}

/// Whether the session can go on after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    BankrollDepleted,
}

/// A player hand after settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandResult {
    pub hand: Hand,
    pub bet: f64,
    pub outcome: HandOutcome,
    pub payout: f64,
}

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    pub hands: Vec<HandResult>,
    pub dealer: Hand,
    pub total_bet: f64,
    pub total_payout: f64,
    /// Payouts minus every bet placed this round.
    pub delta: f64,
    pub bankroll: f64,
    pub status: SessionStatus,
}

/// Owns the shoe, the bankroll and the random source for a whole session and plays rounds against them.
pub struct BlackjackTable<R: Rng = StdRng> {
    config: TableConfig,
    shoe: Shoe,
    bankroll: Bankroll,
    rng: R,
}

impl BlackjackTable<StdRng> {
    /// Associated function to create a table with a shoe shuffled from `seed`, so that sessions can be replayed.
    pub fn seeded(config: TableConfig, seed: u64) -> Self {
        BlackjackTable::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BlackjackTable<R> {
    /// Associated function to create a new table, the shoe is built and shuffled with `rng`.
    pub fn new(config: TableConfig, mut rng: R) -> Self {
        let config = config.normalized();
        let shoe = Shoe::new(config.num_decks, &mut rng);
        BlackjackTable::with_shoe(config, shoe, rng)
    }

    /// Associated function to create a table that deals from a prepared `shoe`. `rng` is only used once the shoe runs low.
    pub fn with_shoe(config: TableConfig, shoe: Shoe, rng: R) -> Self {
        let config = config.normalized();
        BlackjackTable {
            bankroll: Bankroll::new(config.starting_bankroll),
            config,
            shoe,
            rng,
        }
    }

    /// Getter method for the current bankroll.
    pub fn bankroll(&self) -> f64 {
        self.bankroll.balance()
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Plays one full round: bet, deal, optional split, player turns, dealer turn and settlement.
    ///
    /// A quit request aborts the round where it stands. Bets already deducted are not refunded.
    pub fn play_round<D, P>(
        &mut self,
        source: &mut D,
        sink: &mut P,
    ) -> Result<RoundReport, BlackjackGameError>
    where
        D: DecisionSource + ?Sized,
        P: PresentationSink + ?Sized,
    {
        if self.shoe.ensure_capacity(
            self.config.min_shoe_cards,
            self.config.num_decks,
            &mut self.rng,
        ) {
            sink.notify(&RoundEvent::Reshuffled {
                cards: self.shoe.len(),
            });
        }

        // Get a valid bet
        let bankroll = &self.bankroll;
        let bet = ask(source, |s| {
            let bet = s.place_bet(bankroll.balance())?;
            bankroll.validate_bet(bet)?;
            Ok(bet)
        })?;
        self.bankroll.place_bet(bet)?;
        let mut total_bet = bet;
        sink.notify(&RoundEvent::BetPlaced {
            amount: bet,
            bankroll: self.bankroll.balance(),
        });

        // Deal alternating between player and dealer
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        for _ in 0..2 {
            player.receive_card(self.shoe.draw()?);
            dealer.receive_card(self.shoe.draw()?);
        }
        let dealer_up_card = dealer.cards()[1];
        sink.notify(&RoundEvent::player_hand(0, &player));
        sink.notify(&RoundEvent::dealer_hand(&dealer, true));

        let mut hands = vec![player];
        let mut bets = vec![bet];
        if hands[0].is_pair() && self.bankroll.can_cover(bet) {
            let split = ask(source, |s| s.confirm_split(&hands[0], &dealer_up_card))?;
            if split {
                let pair = hands.remove(0);
                for card in pair.into_cards() {
                    let mut new_hand = Hand::new();
                    new_hand.receive_card(card);
                    new_hand.receive_card(self.shoe.draw()?);
                    hands.push(new_hand);
                }
                self.bankroll.place_bet(bet)?;
                total_bet += bet;
                bets = vec![bet, bet];
                debug!("split into {} and {}", hands[0], hands[1]);
                sink.notify(&RoundEvent::Split {
                    bet,
                    bankroll: self.bankroll.balance(),
                });
                for (i, hand) in hands.iter().enumerate() {
                    sink.notify(&RoundEvent::player_hand(i, hand));
                }
            }
        }

        // Play each hand in order
        let num_hands = hands.len();
        for (i, hand) in hands.iter_mut().enumerate() {
            let outcome = play_hand(
                hand,
                i,
                num_hands,
                bets[i],
                self.bankroll.balance(),
                &dealer_up_card,
                &mut self.shoe,
                source,
                sink,
            )?;
            if outcome.additional_bet > 0.0 {
                self.bankroll.place_bet(outcome.additional_bet)?;
                bets[i] += outcome.additional_bet;
                total_bet += outcome.additional_bet;
            }
        }

        // Dealer only plays if some hand is still alive
        if hands.iter().any(|h| !h.is_busted()) {
            play_dealer(&mut dealer, &mut self.shoe)?;
        } else {
            sink.notify(&RoundEvent::DealerSkipped);
        }
        sink.notify(&RoundEvent::dealer_hand(&dealer, false));

        let mut results = Vec::with_capacity(hands.len());
        let mut total_payout = 0.0;
        for (i, (hand, bet)) in hands.into_iter().zip(bets).enumerate() {
            let outcome = settle(&hand, &dealer);
            let payout = outcome.payout(bet);
            total_payout += payout;
            sink.notify(&RoundEvent::HandSettled {
                hand_index: i,
                outcome,
                bet,
                payout,
            });
            results.push(HandResult {
                hand,
                bet,
                outcome,
                payout,
            });
        }

        let bankroll = self.bankroll.apply_payout(total_payout);
        let delta = total_payout - total_bet;
        info!("round finished, bankroll {bankroll:.2} ({delta:+.2})");
        sink.notify(&RoundEvent::RoundFinished { bankroll, delta });

        Ok(RoundReport {
            hands: results,
            dealer,
            total_bet,
            total_payout,
            delta,
            bankroll,
            status: if self.bankroll.is_depleted() {
                SessionStatus::BankrollDepleted
            } else {
                SessionStatus::Active
            },
        })
    }

    /// Plays rounds until the bankroll is depleted or the player declines another round.
    /// A bankroll that starts out depleted plays no rounds at all.
    /// A quit request is returned as `Err(SessionAbort)`.
    pub fn run<D, P>(
        &mut self,
        source: &mut D,
        sink: &mut P,
    ) -> Result<SessionSummary, BlackjackGameError>
    where
        D: DecisionSource + ?Sized,
        P: PresentationSink + ?Sized,
    {
        let mut summary = SessionSummary::new(self.bankroll.balance());
        if self.bankroll.is_depleted() {
            info!("bankroll of {:.2} cannot cover any bet", self.bankroll.balance());
            summary.depleted = true;
            return Ok(summary);
        }
        loop {
            let report = self.play_round(source, sink)?;
            summary.record(&report);
            if report.status == SessionStatus::BankrollDepleted {
                info!("bankroll depleted after {} rounds", summary.rounds);
                summary.depleted = true;
                break;
            }
            if !ask(source, |s| s.play_again())? {
                break;
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;
    use crate::event::SilentSink;
    use crate::strategy::BasicStrategy;
    use crate::testing::{card, cards, hand, RecordingSink, ScriptedSource};
    use crate::turn::{Action, HandState};

    /// Builds a table dealing `ranks` first, padded with twos so the shoe stays above the reshuffle threshold.
    fn table_with(bankroll: f64, ranks: &[Rank]) -> BlackjackTable {
        let mut stack = cards(ranks);
        stack.extend(std::iter::repeat(card(Rank::Two)).take(20));
        let config = TableConfig::new().starting_bankroll(bankroll).build();
        BlackjackTable::with_shoe(config, Shoe::stacked(stack), StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_settle_outcomes() {
        let dealer_20 = hand(&[Rank::King, Rank::Queen]);
        let dealer_bust = hand(&[Rank::King, Rank::Six, Rank::Nine]);
        let dealer_bj = hand(&[Rank::Ace, Rank::Jack]);
        assert_eq!(
            settle(&hand(&[Rank::Ace, Rank::King]), &dealer_20),
            HandOutcome::Blackjack
        );
        assert_eq!(
            settle(&hand(&[Rank::Ace, Rank::King]), &dealer_bj),
            HandOutcome::Push
        );
        assert_eq!(
            settle(&hand(&[Rank::Ten, Rank::Nine]), &dealer_bust),
            HandOutcome::Win
        );
        assert_eq!(
            settle(&hand(&[Rank::Ten, Rank::Eight]), &dealer_20),
            HandOutcome::Lose
        );
        assert_eq!(
            settle(&hand(&[Rank::Ten, Rank::Eight, Rank::Two]), &dealer_20),
            HandOutcome::Push
        );
        assert_eq!(
            settle(&hand(&[Rank::Ten, Rank::Eight, Rank::Five]), &dealer_bust),
            HandOutcome::Bust
        );
        // a three card 21 against a dealer natural is compared by value
        assert_eq!(
            settle(&hand(&[Rank::Seven, Rank::Seven, Rank::Seven]), &dealer_bj),
            HandOutcome::Push
        );
    }

    #[test]
    fn test_payouts() {
        assert_eq!(HandOutcome::Blackjack.payout(10.0), 25.0);
        assert_eq!(HandOutcome::Win.payout(10.0), 20.0);
        assert_eq!(HandOutcome::Push.payout(10.0), 10.0);
        assert_eq!(HandOutcome::Lose.payout(10.0), 0.0);
        assert_eq!(HandOutcome::Bust.payout(10.0), 0.0);
    }

    #[test]
    fn test_player_blackjack_against_dealer_20() {
        // player A, K ; dealer K, Q
        let mut table = table_with(100.0, &[Rank::Ace, Rank::King, Rank::King, Rank::Queen]);
        let mut source = ScriptedSource::new().bets(&[10.0]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].outcome, HandOutcome::Blackjack);
        assert_eq!(report.total_payout, 25.0);
        assert_eq!(report.delta, 15.0);
        assert_eq!(report.bankroll, 115.0);
        assert_eq!(source.actions_asked, 0);
    }

    #[test]
    fn test_both_blackjack_pushes() {
        let mut table = table_with(100.0, &[Rank::Ace, Rank::Ace, Rank::King, Rank::Queen]);
        let mut source = ScriptedSource::new().bets(&[10.0]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].outcome, HandOutcome::Push);
        assert_eq!(report.total_payout, 10.0);
        assert_eq!(report.delta, 0.0);
        assert_eq!(report.bankroll, 100.0);
    }

    #[test]
    fn test_player_19_against_dealer_bust() {
        // player 10, 9 ; dealer 10, 6 draws K
        let mut table = table_with(
            100.0,
            &[Rank::Ten, Rank::Ten, Rank::Nine, Rank::Six, Rank::King],
        );
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.dealer.value(), 26);
        assert_eq!(report.hands[0].outcome, HandOutcome::Win);
        assert_eq!(report.total_payout, 20.0);
        assert_eq!(report.delta, 10.0);
    }

    #[test]
    fn test_player_18_against_dealer_20() {
        let mut table = table_with(100.0, &[Rank::Ten, Rank::King, Rank::Eight, Rank::Queen]);
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].outcome, HandOutcome::Lose);
        assert_eq!(report.total_payout, 0.0);
        assert_eq!(report.delta, -10.0);
        assert_eq!(report.bankroll, 90.0);
    }

    #[test]
    fn test_invalid_bets_are_reprompted() {
        let mut table = table_with(50.0, &[Rank::Ten, Rank::King, Rank::Eight, Rank::Queen]);
        let mut source = ScriptedSource::new()
            .bets(&[60.0, 0.0])
            .malformed_bet("ten")
            .bets(&[50.0])
            .actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(source.rejected.len(), 3);
        assert_eq!(report.total_bet, 50.0);
        assert_eq!(report.status, SessionStatus::BankrollDepleted);
    }

    #[test]
    fn test_quit_at_bet_keeps_bankroll() {
        let mut table = table_with(100.0, &[]);
        let mut source = ScriptedSource::new();
        let mut sink = RecordingSink::default();
        assert_eq!(
            table.play_round(&mut source, &mut sink),
            Err(BlackjackGameError::SessionAbort)
        );
        assert_eq!(table.bankroll(), 100.0);
    }

    #[test]
    fn test_quit_mid_round_forfeits_bet() {
        let mut table = table_with(100.0, &[Rank::Ten, Rank::King, Rank::Six, Rank::Queen]);
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Quit]);
        let mut sink = RecordingSink::default();
        assert_eq!(
            table.play_round(&mut source, &mut sink),
            Err(BlackjackGameError::SessionAbort)
        );
        assert_eq!(table.bankroll(), 90.0);
    }

    #[test]
    fn test_split_offered_for_pair() {
        // player 8, 8 ; dealer 10, 7 ; split hands draw 3 and K
        let mut table = table_with(
            100.0,
            &[Rank::Eight, Rank::Ten, Rank::Eight, Rank::Seven, Rank::Three, Rank::King],
        );
        let mut source = ScriptedSource::new()
            .bets(&[10.0])
            .splits(&[true])
            .actions(&[Action::Stand, Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(source.split_offers, 1);
        assert_eq!(report.hands.len(), 2);
        assert_eq!(report.hands[0].hand.value(), 11);
        assert_eq!(report.hands[1].hand.value(), 18);
        assert_eq!(report.total_bet, 20.0);
        assert_eq!(report.hands[0].outcome, HandOutcome::Lose);
        assert_eq!(report.hands[1].outcome, HandOutcome::Win);
        assert_eq!(report.total_payout, 20.0);
        assert_eq!(report.delta, 0.0);
        assert_eq!(report.bankroll, 100.0);
    }

    #[test]
    fn test_split_never_offered_without_pair() {
        let mut table = table_with(1000.0, &[Rank::Eight, Rank::Ten, Rank::King, Rank::Seven]);
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(source.split_offers, 0);
    }

    #[test]
    fn test_split_not_offered_without_funds() {
        let mut table = table_with(15.0, &[Rank::Eight, Rank::Ten, Rank::Eight, Rank::Seven]);
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(source.split_offers, 0);
    }

    #[test]
    fn test_split_declined_plays_one_hand() {
        let mut table = table_with(100.0, &[Rank::Eight, Rank::Ten, Rank::Eight, Rank::Seven]);
        let mut source = ScriptedSource::new()
            .bets(&[10.0])
            .splits(&[false])
            .actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands.len(), 1);
        assert_eq!(report.hands[0].outcome, HandOutcome::Lose);
    }

    #[test]
    fn test_split_aces_to_21_pays_as_blackjack() {
        // player A, A ; dealer 10, 9 ; split hands draw K and 5
        let mut table = table_with(
            100.0,
            &[Rank::Ace, Rank::Ten, Rank::Ace, Rank::Nine, Rank::King, Rank::Five],
        );
        let mut source = ScriptedSource::new()
            .bets(&[10.0])
            .splits(&[true])
            .actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].outcome, HandOutcome::Blackjack);
        assert_eq!(report.hands[1].outcome, HandOutcome::Lose);
        assert_eq!(report.total_payout, 25.0);
        assert_eq!(source.actions_asked, 1);
    }

    #[test]
    fn test_double_down_doubles_bet() {
        // player 5, 6 ; dealer 10, 7 ; double draws 9
        let mut table = table_with(
            100.0,
            &[Rank::Five, Rank::Ten, Rank::Six, Rank::Seven, Rank::Nine],
        );
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Double]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].bet, 20.0);
        assert_eq!(report.hands[0].hand.value(), 20);
        assert_eq!(report.hands[0].outcome, HandOutcome::Win);
        assert_eq!(report.total_payout, 40.0);
        assert_eq!(report.delta, 20.0);
        assert_eq!(report.bankroll, 120.0);
    }

    #[test]
    fn test_doubled_bust_loses_both_bets() {
        let mut table = table_with(
            100.0,
            &[Rank::Ten, Rank::Ten, Rank::Three, Rank::Seven, Rank::Queen],
        );
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Double]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].outcome, HandOutcome::Bust);
        assert_eq!(report.delta, -20.0);
        assert!(sink.events.contains(&RoundEvent::DealerSkipped));
        assert_eq!(report.dealer.len(), 2);
    }

    #[test]
    fn test_dealer_skipped_when_player_busts() {
        // player 10, 6 hits K ; dealer 5, 6 would have to draw
        let mut table = table_with(
            100.0,
            &[Rank::Ten, Rank::Five, Rank::Six, Rank::Six, Rank::King],
        );
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Hit]);
        let mut sink = RecordingSink::default();
        let shoe_before = table.shoe().len();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].outcome, HandOutcome::Bust);
        assert_eq!(report.dealer.value(), 11);
        assert_eq!(table.shoe().len(), shoe_before - 5);
    }

    #[test]
    fn test_dealer_plays_once_for_split_hands() {
        // player 9, 9 ; dealer 10, 6 ; split draws 10 and 2 ; second hand hits 10 ; dealer draws 5
        let mut table = table_with(
            100.0,
            &[
                Rank::Nine,
                Rank::Ten,
                Rank::Nine,
                Rank::Six,
                Rank::Ten,
                Rank::Two,
                Rank::Ten,
                Rank::Five,
            ],
        );
        let mut source = ScriptedSource::new()
            .bets(&[10.0])
            .splits(&[true])
            .actions(&[Action::Stand, Action::Hit]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.dealer.value(), 21);
        assert_eq!(report.hands[0].outcome, HandOutcome::Lose);
        assert_eq!(report.hands[1].hand.value(), 21);
        assert_eq!(report.hands[1].outcome, HandOutcome::Push);
        assert_eq!(report.delta, -10.0);
    }

    #[test]
    fn test_cards_are_conserved() {
        let mut table = BlackjackTable::seeded(TableConfig::default(), 42);
        let mut sink = RecordingSink::default();
        for _ in 0..20 {
            let before = table.shoe().len();
            let mut source = ScriptedSource::new()
                .bets(&[1.0])
                .actions(&[Action::Hit, Action::Stand, Action::Stand]);
            let report = table.play_round(&mut source, &mut sink).unwrap();
            let dealt: usize = report.hands.iter().map(|h| h.hand.len()).sum::<usize>()
                + report.dealer.len();
            if sink.events.iter().any(|e| matches!(e, RoundEvent::Reshuffled { .. })) {
                break;
            }
            assert_eq!(before, table.shoe().len() + dealt);
        }
    }

    #[test]
    fn test_low_shoe_is_rebuilt_before_deal() {
        let config = TableConfig::default();
        let shoe = Shoe::stacked(cards(&[Rank::Two; 14]));
        let mut table = BlackjackTable::with_shoe(config, shoe, StdRng::seed_from_u64(9));
        let mut source = ScriptedSource::new()
            .bets(&[5.0])
            .actions(&[Action::Stand, Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(sink.events[0], RoundEvent::Reshuffled { cards: 208 });
        let dealt: usize =
            report.hands.iter().map(|h| h.hand.len()).sum::<usize>() + report.dealer.len();
        assert_eq!(table.shoe().len() + dealt, 208);
    }

    #[test]
    fn test_hole_card_hidden_until_players_finish() {
        let mut table = table_with(100.0, &[Rank::Ten, Rank::Ace, Rank::Eight, Rank::Six]);
        let mut source = ScriptedSource::new().bets(&[10.0]).actions(&[Action::Stand]);
        let mut sink = RecordingSink::default();
        table.play_round(&mut source, &mut sink).unwrap();
        let concealed = sink
            .events
            .iter()
            .position(|e| matches!(e, RoundEvent::DealerHand { concealed: true, .. }))
            .unwrap();
        let finished = sink
            .events
            .iter()
            .position(|e| matches!(e, RoundEvent::HandFinished { .. }))
            .unwrap();
        let revealed = sink
            .events
            .iter()
            .position(|e| matches!(e, RoundEvent::DealerHand { concealed: false, .. }))
            .unwrap();
        assert!(concealed < finished && finished < revealed);
        assert_eq!(
            sink.events[concealed],
            RoundEvent::DealerHand {
                cards: vec![card(Rank::Six)],
                concealed: true,
                value: None
            }
        );
        assert!(sink.events.contains(&RoundEvent::HandFinished {
            hand_index: 0,
            state: HandState::Stand
        }));
    }

    #[test]
    fn test_session_ends_when_player_declines() {
        let mut table = table_with(
            100.0,
            &[
                Rank::Ten,
                Rank::King,
                Rank::Eight,
                Rank::Queen,
                Rank::Ace,
                Rank::King,
                Rank::King,
                Rank::Queen,
            ],
        );
        let mut source = ScriptedSource::new()
            .bets(&[10.0, 10.0])
            .actions(&[Action::Stand])
            .again(&[true, false]);
        let mut sink = RecordingSink::default();
        let summary = table.run(&mut source, &mut sink).unwrap();
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.hands_lost, 1);
        assert_eq!(summary.blackjacks, 1);
        assert_eq!(summary.final_bankroll, 105.0);
        assert!(!summary.depleted);
    }

    #[test]
    fn test_session_ends_when_bankroll_depleted() {
        let mut table = table_with(10.0, &[Rank::Ten, Rank::King, Rank::Eight, Rank::Queen]);
        let mut source = ScriptedSource::new()
            .bets(&[10.0])
            .actions(&[Action::Stand])
            .again(&[true]);
        let mut sink = RecordingSink::default();
        let summary = table.run(&mut source, &mut sink).unwrap();
        assert_eq!(summary.rounds, 1);
        assert!(summary.depleted);
        assert_eq!(summary.final_bankroll, 0.0);
    }

    #[test]
    fn test_empty_shoe_is_fatal() {
        // 15 aces pass the capacity check. The player hits to 21 with nine of them and the dealer
        // runs the shoe dry drawing from 14.
        let shoe = Shoe::stacked(cards(&[Rank::Ace; 15]));
        let mut table =
            BlackjackTable::with_shoe(TableConfig::default(), shoe, StdRng::seed_from_u64(0));
        let mut source = ScriptedSource::new()
            .bets(&[10.0])
            .actions(&[Action::Hit; 9]);
        let mut sink = RecordingSink::default();
        assert_eq!(
            table.play_round(&mut source, &mut sink),
            Err(BlackjackGameError::EmptyShoe)
        );
        assert_eq!(source.split_offers, 1);
        assert!(table.shoe().is_empty());
    }

    #[test]
    fn test_zero_reshuffle_threshold_cannot_empty_the_shoe() {
        let config = TableConfig {
            starting_bankroll: 1000.0,
            num_decks: 1,
            min_shoe_cards: 0,
        };
        let mut table = BlackjackTable::new(config, StdRng::seed_from_u64(3));
        assert_eq!(table.config().min_shoe_cards, 15);
        let mut strategy = BasicStrategy::new(1.0, 500);
        let summary = table.run(&mut strategy, &mut SilentSink).unwrap();
        assert!(summary.rounds == 500 || summary.depleted);
    }

    #[test]
    fn test_depleted_bankroll_plays_no_rounds() {
        for start in [0.0, -10.0, f64::NAN] {
            let config = TableConfig::new().starting_bankroll(start).build();
            let mut table = BlackjackTable::seeded(config, 1);
            let mut source = ScriptedSource::new().bets(&[5.0]);
            let mut sink = RecordingSink::default();
            let summary = table.run(&mut source, &mut sink).unwrap();
            assert_eq!(summary.rounds, 0);
            assert!(summary.depleted);
            assert!(sink.events.is_empty());
            assert!(source.rejected.is_empty());
        }
    }

    #[test]
    fn test_double_after_split_limited_by_remaining_bankroll() {
        // player 8, 8 ; dealer 10, 7 ; split hands draw 3 and 2 ; first hand doubles onto a 9
        let mut table = table_with(
            30.0,
            &[
                Rank::Eight,
                Rank::Ten,
                Rank::Eight,
                Rank::Seven,
                Rank::Three,
                Rank::Two,
                Rank::Nine,
            ],
        );
        let mut source = ScriptedSource::new()
            .bets(&[10.0])
            .splits(&[true])
            .actions(&[Action::Double, Action::Double, Action::Stand]);
        let mut sink = RecordingSink::default();
        let report = table.play_round(&mut source, &mut sink).unwrap();
        assert_eq!(report.hands[0].bet, 20.0);
        assert_eq!(report.hands[0].hand.value(), 20);
        assert_eq!(report.hands[1].bet, 10.0);
        assert_eq!(report.hands[1].hand.value(), 10);
        assert_eq!(
            source.rejected,
            vec![BlackjackGameError::UnavailableAction(Action::Double)]
        );
        assert_eq!(source.last_options, vec![Action::Hit, Action::Stand, Action::Quit]);
        assert_eq!(report.hands[0].outcome, HandOutcome::Win);
        assert_eq!(report.hands[1].outcome, HandOutcome::Lose);
        assert_eq!(report.total_bet, 30.0);
        assert_eq!(report.total_payout, 40.0);
        assert_eq!(report.delta, 10.0);
        assert_eq!(report.bankroll, 40.0);
    }
}
