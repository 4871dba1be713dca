//! Kuhn poker CFR, kept in-tree purely as a correctness harness: the game
//! has a closed-form Nash equilibrium, so training it end-to-end and
//! checking the resulting strategy against that known solution is a much
//! stronger regression test than anything the full NLHE tree allows.

use super::infoset::InformationSet;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

const ACTIONS: [char; 2] = ['b', 'c'];

fn is_terminal(history: &str) -> bool {
    matches!(history, "bc" | "bb" | "cc" | "cbb" | "cbc")
}

/// Payoff for the player *about to act* at this terminal history (i.e. the
/// player whose turn it would be, were the game not over) — matching the
/// sign convention the recursive traversal expects from its callee.
fn payoff(history: &str, cards: [char; 2]) -> f64 {
    let active_player = history.len() % 2;

    if history == "bc" || history == "cbc" {
        return 1.0;
    }

    let pot = if history.contains('b') { 2.0 } else { 1.0 };
    let active_card = cards[active_player];
    let opponent_card = cards[1 - active_player];

    if active_card == 'K' || opponent_card == 'J' {
        pot
    } else {
        -pot
    }
}

/// CFR over the 3-card Kuhn poker game tree.
pub struct KuhnSolver {
    infosets: HashMap<String, InformationSet>,
    total_utility: f64,
    iterations: u64,
}

impl KuhnSolver {
    pub fn new() -> Self {
        Self { infosets: HashMap::new(), total_utility: 0.0, iterations: 0 }
    }

    pub fn train(&mut self, iterations: u64, rng: &mut impl Rng) -> f64 {
        let mut cards = ['J', 'Q', 'K'];
        for _ in 0..iterations {
            cards.shuffle(rng);
            let dealt = [cards[0], cards[1]];
            let utility = self.cfr(dealt, String::new(), [1.0, 1.0], 0);
            self.total_utility += utility;
            self.iterations += 1;
        }
        self.total_utility / iterations as f64
    }

    fn cfr(&mut self, cards: [char; 2], history: String, reach_probs: [f64; 2], active_player: usize) -> f64 {
        if is_terminal(&history) {
            return payoff(&history, cards);
        }

        let opponent = 1 - active_player;
        let key = format!("{}{}", cards[active_player], history);

        let strategy = self
            .infosets
            .entry(key.clone())
            .or_insert_with(|| InformationSet::new(2))
            .strategy(reach_probs[active_player]);

        let mut action_utilities = [0.0; 2];
        for (i, action) in ACTIONS.iter().enumerate() {
            let mut new_history = history.clone();
            new_history.push(*action);
            let mut new_reach = reach_probs;
            new_reach[active_player] *= strategy[i];
            action_utilities[i] = -self.cfr(cards, new_history, new_reach, opponent);
        }

        let node_utility: f64 = strategy.iter().zip(&action_utilities).map(|(s, u)| s * u).sum();

        let cf_reach = reach_probs[opponent];
        self.infosets
            .get_mut(&key)
            .expect("infoset was just inserted above")
            .update_regrets(&action_utilities, cf_reach);

        node_utility
    }

    /// Average `(bet, check)` strategy for a card at the start of the
    /// game (empty history). Defaults to uniform if never visited.
    pub fn strategy(&self, card: char) -> (f64, f64) {
        match self.infosets.get(&card.to_string()) {
            Some(infoset) => {
                let avg = infoset.average_strategy();
                (avg[0], avg[1])
            }
            None => (0.5, 0.5),
        }
    }

    pub fn game_value(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.total_utility / self.iterations as f64
        }
    }

    /// Snapshots every discovered infoset's average `(bet, check)` strategy,
    /// keyed by its `<card><history>` infoset key.
    pub fn strategies(&self) -> Vec<(String, Vec<f64>)> {
        self.infosets.iter().map(|(key, infoset)| (key.clone(), infoset.average_strategy())).collect()
    }
}

impl Default for KuhnSolver {
    fn default() -> Self {
        Self::new()
    }
}
