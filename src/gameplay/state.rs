use super::action::Action;
use crate::cards::{Card, Deck, Evaluator, Hole, Street};
use crate::error::{Result, SolverError};
use rand::Rng;

/// Outcome of a terminal hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player(usize),
    Tie,
}

/// Complete state of a heads-up hand, from the blinds through showdown.
///
/// `apply` never mutates `self` — it returns the successor state, so the
/// CFR traversal can hold a state by value at each tree node without
/// needing to undo moves.
#[derive(Debug, Clone)]
pub struct GameState {
    pub hole_cards: [Hole; 2],
    pub community_cards: Vec<Card>,
    pub pot: u32,
    pub stacks: [u32; 2],
    pub current_player: usize,
    pub street: Street,
    pub action_history: Vec<Action>,
    pub bets_this_round: [u32; 2],
    pub terminal: Option<Winner>,
    pub big_blind: u32,
    pub facing_bet: bool,
}

impl GameState {
    /// Starts a new hand with blinds posted: player 0 is the small blind
    /// and acts first preflop, player 1 is the big blind.
    pub fn new_hand(hole_cards: [Hole; 2], stacks: [u32; 2], big_blind: u32) -> Self {
        let small_blind = big_blind / 2;
        Self {
            hole_cards,
            community_cards: Vec::with_capacity(5),
            pot: small_blind + big_blind,
            stacks: [stacks[0] - small_blind, stacks[1] - big_blind],
            current_player: 0,
            street: Street::Preflop,
            action_history: Vec::new(),
            bets_this_round: [small_blind, big_blind],
            terminal: None,
            big_blind,
            facing_bet: true,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    fn opponent(&self) -> usize {
        1 - self.current_player
    }

    fn to_call(&self) -> u32 {
        self.bets_this_round[self.opponent()].saturating_sub(self.bets_this_round[self.current_player])
    }

    /// Minimum bet/raise size. The abstraction layer may request smaller
    /// increments than this only via an all-in.
    fn min_raise(&self) -> u32 {
        self.big_blind
    }

    /// All actions a fully unabstracted engine would allow here.
    pub fn legal_actions(&self) -> Result<Vec<Action>> {
        if self.is_terminal() {
            return Err(SolverError::InconsistentState("terminal state asked for legal actions".into()));
        }
        let player = self.current_player;
        let my_stack = self.stacks[player];
        let opp_bet = self.bets_this_round[self.opponent()];
        let my_bet = self.bets_this_round[player];
        let to_call = self.to_call();

        let mut actions = Vec::new();
        if to_call > 0 {
            actions.push(Action::Fold);
        }
        if to_call == 0 {
            actions.push(Action::Check);
        }
        if to_call > 0 && my_stack > 0 {
            let call_amount = to_call.min(my_stack);
            if call_amount < my_stack {
                actions.push(Action::Call);
            } else {
                actions.push(Action::AllIn(call_amount));
            }
        }

        let min_raise = self.min_raise();
        if my_stack > to_call {
            if to_call == 0 {
                if my_stack >= min_raise {
                    actions.push(Action::Bet(min_raise));
                }
                if my_stack > min_raise {
                    actions.push(Action::AllIn(my_stack));
                }
            } else {
                let raise_total = opp_bet + min_raise;
                if my_stack >= raise_total - my_bet {
                    actions.push(Action::Raise(raise_total));
                }
                if my_stack > to_call {
                    actions.push(Action::AllIn(my_stack));
                }
            }
        }
        Ok(actions)
    }

    /// Applies `action`, returning the successor state. `rng` is only
    /// consulted when the action closes a betting round with at least one
    /// player all-in, which requires running out the remaining board.
    pub fn apply(&self, action: Action, rng: &mut impl Rng) -> Result<Self> {
        if self.is_terminal() {
            return Err(SolverError::IllegalAction("state is already terminal".into()));
        }
        let mut next = self.clone();
        next.action_history.push(action);

        let player = self.current_player;
        let opponent = self.opponent();
        let my_bet = self.bets_this_round[player];
        let opp_bet = self.bets_this_round[opponent];
        let to_call = self.to_call();

        match action {
            Action::Fold => {
                next.terminal = Some(Winner::Player(opponent));
            }
            Action::Check => {
                if self.is_round_complete_after_check() {
                    next.advance_street(rng);
                } else {
                    next.current_player = opponent;
                }
            }
            Action::Call => {
                let call_amount = to_call.min(self.stacks[player]);
                next.stacks[player] -= call_amount;
                next.pot += call_amount;
                next.bets_this_round[player] += call_amount;

                // The only call that doesn't close the betting round is the
                // small blind limping in as the very first action preflop:
                // the big blind posted but never got a voluntary turn.
                let is_preflop_limp =
                    self.street == Street::Preflop && player == 0 && self.action_history.is_empty();
                if is_preflop_limp {
                    next.current_player = opponent;
                    next.facing_bet = false;
                } else {
                    next.advance_street(rng);
                }
            }
            Action::Bet(amount) | Action::Raise(amount) => {
                let amount_to_pot = if matches!(action, Action::Bet(_)) {
                    amount
                } else {
                    amount.checked_sub(my_bet).ok_or_else(|| {
                        SolverError::IllegalAction(format!(
                            "raise to {amount} is below current bet {my_bet}"
                        ))
                    })?
                };
                if amount_to_pot > self.stacks[player] {
                    return Err(SolverError::IllegalAction(format!(
                        "action requires {amount_to_pot} but only {} remain",
                        self.stacks[player]
                    )));
                }
                next.stacks[player] -= amount_to_pot;
                next.pot += amount_to_pot;
                next.bets_this_round[player] += amount_to_pot;
                next.current_player = opponent;
                next.facing_bet = true;
            }
            Action::AllIn(amount) => {
                if amount > self.stacks[player] {
                    return Err(SolverError::IllegalAction(format!(
                        "all-in of {amount} exceeds stack of {}",
                        self.stacks[player]
                    )));
                }
                next.stacks[player] -= amount;
                next.pot += amount;
                next.bets_this_round[player] += amount;
                if next.bets_this_round[player] > opp_bet {
                    next.current_player = opponent;
                    next.facing_bet = true;
                } else {
                    next.advance_street(rng);
                }
            }
        }
        Ok(next)
    }

    /// The small blind acts first preflop, the big blind acts first on
    /// every street after: a check closes the round only when it comes
    /// from whoever *isn't* first to act, i.e. the other player already
    /// had their turn this street.
    fn is_round_complete_after_check(&self) -> bool {
        let first_to_act = if self.street == Street::Preflop { 0 } else { 1 };
        self.current_player != first_to_act
    }

    fn advance_street(&mut self, rng: &mut impl Rng) {
        self.bets_this_round = [0, 0];
        self.facing_bet = false;
        self.current_player = 1;

        if self.stacks[0] == 0 || self.stacks[1] == 0 {
            self.run_out_board(rng);
            return;
        }

        match self.street.next() {
            Some(next_street) => {
                self.street = next_street;
                self.deal_board(rng, self.street.cards_dealt());
            }
            None => self.showdown(),
        }
    }

    fn run_out_board(&mut self, rng: &mut impl Rng) {
        let needed = 5 - self.community_cards.len();
        self.deal_board(rng, needed);
        self.street = Street::River;
        self.showdown();
    }

    /// Deals `needed` fresh community cards, drawn from a deck that
    /// excludes every card already known to the hand.
    fn deal_board(&mut self, rng: &mut impl Rng, needed: usize) {
        if needed == 0 {
            return;
        }
        let mut excluded: Vec<Card> = self.hole_cards[0].cards().to_vec();
        excluded.extend(self.hole_cards[1].cards());
        excluded.extend(self.community_cards.iter().copied());
        let mut deck = Deck::without(&excluded);
        deck.shuffle(rng);
        let dealt = deck.deal(needed).expect("excluded deck always has enough cards");
        self.community_cards.extend(dealt);
    }

    fn showdown(&mut self) {
        let hand0 = Evaluator::evaluate(&self.hole_cards[0], &self.community_cards)
            .expect("showdown always has 5-7 known cards");
        let hand1 = Evaluator::evaluate(&self.hole_cards[1], &self.community_cards)
            .expect("showdown always has 5-7 known cards");
        self.terminal = Some(match hand0.absolute_rank.cmp(&hand1.absolute_rank) {
            std::cmp::Ordering::Greater => Winner::Player(0),
            std::cmp::Ordering::Less => Winner::Player(1),
            std::cmp::Ordering::Equal => Winner::Tie,
        });
    }

    /// Payoff for `player`, in the ±pot/2 convention: the pot is split on a
    /// tie, and otherwise the winner's payoff is `pot/2` (their own
    /// contribution returned, plus the opponent's matching contribution).
    pub fn payoff(&self, player: usize) -> f64 {
        match self.terminal {
            None => 0.0,
            Some(Winner::Tie) => 0.0,
            Some(Winner::Player(winner)) if winner == player => self.pot as f64 / 2.0,
            Some(Winner::Player(_)) => -(self.pot as f64) / 2.0,
        }
    }

    pub fn encode_history(&self) -> String {
        self.action_history
            .iter()
            .map(|a| a.encode())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "GameState(street={}, pot={}, stacks={:?}, player={}, terminal={})",
            self.street,
            self.pot,
            self.stacks,
            self.current_player,
            self.is_terminal()
        )
    }
}
