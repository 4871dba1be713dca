use super::infoset::InformationSet;
use crate::abstraction::ActionAbstraction;
use crate::bucketing::HandBucketing;
use crate::cards::{Deck, Hole};
use crate::error::Result;
use crate::gameplay::GameState;
use rand::Rng;
use std::collections::HashMap;

/// Tunables for a CFR+ training run.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub big_blind: u32,
    pub starting_stack: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { big_blind: 2, starting_stack: 200 }
    }
}

/// A tabular CFR+ solver for heads-up NLHE, abstracted down to a tractable
/// number of hand buckets and bet sizes.
///
/// Traverses the full game tree from a freshly dealt hand each iteration,
/// alternating which player accumulates regret so that training is
/// unbiased between the two seats.
pub struct CFRSolver {
    hand_bucketing: HandBucketing,
    action_abstraction: ActionAbstraction,
    config: SolverConfig,
    infosets: HashMap<String, InformationSet>,
    iteration: u64,
    total_utility: f64,
}

impl CFRSolver {
    pub fn new(hand_bucketing: HandBucketing, action_abstraction: ActionAbstraction, config: SolverConfig) -> Self {
        Self {
            hand_bucketing,
            action_abstraction,
            config,
            infosets: HashMap::new(),
            iteration: 0,
            total_utility: 0.0,
        }
    }

    /// Runs `iterations` rounds of self-play CFR+, returning the average
    /// game value for player 0 across all of them.
    pub fn train(&mut self, iterations: u64, rng: &mut impl Rng) -> f64 {
        for i in 0..iterations {
            self.iteration = i + 1;

            let mut deck = Deck::full();
            deck.shuffle(rng);
            let p0 = deck.deal(2).expect("full deck always has 2 cards to deal");
            let p1 = deck.deal(2).expect("full deck always has 2 cards to deal");
            let hole_cards = [Hole::new(p0[0], p0[1]), Hole::new(p1[0], p1[1])];

            let state = GameState::new_hand(hole_cards, [self.config.starting_stack; 2], self.config.big_blind);
            let traversing_player = (i % 2) as usize;

            let utility = self
                .traverse(&state, [1.0, 1.0], traversing_player, rng)
                .expect("abstract actions are always legal to apply");
            self.total_utility += utility;

            if self.iteration % 1000 == 0 {
                log::debug!(
                    "iteration {}: {} infosets, avg utility {:.4}",
                    self.iteration,
                    self.infosets.len(),
                    self.total_utility / self.iteration as f64
                );
            }
        }
        self.total_utility / iterations as f64
    }

    fn traverse(
        &mut self,
        state: &GameState,
        reach_probs: [f64; 2],
        traversing_player: usize,
        rng: &mut impl Rng,
    ) -> Result<f64> {
        if state.is_terminal() {
            return Ok(state.payoff(traversing_player));
        }

        let current_player = state.current_player;
        let opponent = 1 - current_player;
        let actions = self.action_abstraction.abstract_actions(state);
        if actions.is_empty() {
            log::warn!("no legal abstract actions at non-terminal state {state}");
            return Ok(0.0);
        }
        let num_actions = actions.len();
        let key = self.infoset_key(state, current_player, rng);

        let strategy = self
            .infosets
            .entry(key.clone())
            .or_insert_with(|| InformationSet::new(num_actions))
            .strategy(reach_probs[current_player]);

        let mut action_utilities = vec![0.0; num_actions];
        for (i, &action) in actions.iter().enumerate() {
            let new_state = state.apply(action, rng)?;
            let mut new_reach = reach_probs;
            new_reach[current_player] *= strategy[i];
            action_utilities[i] = self.traverse(&new_state, new_reach, traversing_player, rng)?;
        }

        let node_utility: f64 = strategy.iter().zip(&action_utilities).map(|(s, u)| s * u).sum();

        if current_player == traversing_player {
            let cf_reach = reach_probs[opponent];
            self.infosets
                .get_mut(&key)
                .expect("infoset was just inserted above")
                .update_regrets(&action_utilities, cf_reach);
        }

        Ok(node_utility)
    }

    fn infoset_key(&self, state: &GameState, player: usize, rng: &mut impl Rng) -> String {
        let bucket = self
            .hand_bucketing
            .bucket(&state.hole_cards[player], &state.community_cards, rng);
        format!("{}:{}:{}", bucket, state.street, state.encode_history())
    }

    pub fn strategy(&self, infoset_key: &str) -> Option<Vec<f64>> {
        self.infosets.get(infoset_key).map(InformationSet::average_strategy)
    }

    /// Snapshots every discovered infoset's average strategy, for a trainer
    /// to export once training completes.
    pub fn strategies(&self) -> Vec<(String, Vec<f64>)> {
        self.infosets.iter().map(|(key, infoset)| (key.clone(), infoset.average_strategy())).collect()
    }

    pub fn game_value(&self) -> f64 {
        if self.iteration == 0 {
            0.0
        } else {
            self.total_utility / self.iteration as f64
        }
    }

    pub fn num_infosets(&self) -> usize {
        self.infosets.len()
    }
}
