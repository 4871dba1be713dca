use super::features::{self, Features};
use super::network::{Mlp, MlpConfig, ValueNetwork};
use super::reservoir::ReservoirBuffer;
use crate::abstraction::ActionAbstraction;
use crate::bucketing::HandBucketing;
use crate::cards::{Deck, Hole};
use crate::error::Result;
use crate::gameplay::GameState;
use rand::Rng;

/// Tunables for a Deep CFR training run. Buffer/traversal counts default
/// much smaller than the reference Python (which targets 10k traversals and
/// a 2M-sample reservoir per player) so a single test run stays fast; the
/// update equations are identical either way.
#[derive(Debug, Clone)]
pub struct DeepCFRConfig {
    pub big_blind: u32,
    pub starting_stack: u32,
    pub traversals_per_iteration: u64,
    pub train_every: u64,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub reservoir_capacity: usize,
    /// Upper bound on the number of abstract actions the value networks
    /// ever need to score; the live action list is trimmed to this size.
    pub max_actions: usize,
}

impl Default for DeepCFRConfig {
    fn default() -> Self {
        Self {
            big_blind: 2,
            starting_stack: 200,
            traversals_per_iteration: 200,
            train_every: 50,
            batch_size: 64,
            learning_rate: 0.01,
            reservoir_capacity: 200_000,
            max_actions: 8,
        }
    }
}

type Sample = (Features, Vec<f64>);

/// Deep CFR: the same traversal and regret-matching contract as the tabular
/// solver, but advantages are predicted by a value network per player
/// instead of looked up in an infoset table, with reservoir-sampled replay
/// buffers feeding periodic network training.
pub struct DeepCFRSolver {
    hand_bucketing: HandBucketing,
    action_abstraction: ActionAbstraction,
    config: DeepCFRConfig,
    value_networks: [Mlp; 2],
    strategy_network: Mlp,
    advantage_buffers: [ReservoirBuffer<Sample>; 2],
    strategy_buffer: ReservoirBuffer<Sample>,
    iteration: u64,
    traversals: u64,
    total_utility: f64,
}

impl DeepCFRSolver {
    pub fn new(
        hand_bucketing: HandBucketing,
        action_abstraction: ActionAbstraction,
        config: DeepCFRConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let num_buckets = hand_bucketing.num_preflop_buckets().max(hand_bucketing.num_postflop_buckets());
        let mlp_config = MlpConfig { num_buckets, num_actions: config.max_actions, ..MlpConfig::default() };

        let value_networks = [Mlp::new(mlp_config.clone(), rng), Mlp::new(mlp_config.clone(), rng)];
        let strategy_network = Mlp::new(mlp_config, rng);
        let reservoir_capacity = config.reservoir_capacity;

        Self {
            hand_bucketing,
            action_abstraction,
            config,
            value_networks,
            strategy_network,
            advantage_buffers: [ReservoirBuffer::new(reservoir_capacity), ReservoirBuffer::new(reservoir_capacity)],
            strategy_buffer: ReservoirBuffer::new(reservoir_capacity),
            iteration: 0,
            traversals: 0,
            total_utility: 0.0,
        }
    }

    /// Runs `iterations` rounds of traversal + periodic network training,
    /// returning the average traversing-player utility across all
    /// traversals.
    pub fn train(&mut self, iterations: u64, rng: &mut impl Rng) -> f64 {
        for i in 0..iterations {
            self.iteration = i + 1;

            for t in 0..self.config.traversals_per_iteration {
                let traversing_player = (t % 2) as usize;

                let mut deck = Deck::full();
                deck.shuffle(rng);
                let p0 = deck.deal(2).expect("full deck always has 2 cards to deal");
                let p1 = deck.deal(2).expect("full deck always has 2 cards to deal");
                let hole_cards = [Hole::new(p0[0], p0[1]), Hole::new(p1[0], p1[1])];

                let state =
                    GameState::new_hand(hole_cards, [self.config.starting_stack; 2], self.config.big_blind);

                let utility = self
                    .traverse(&state, traversing_player, rng)
                    .expect("abstract actions are always legal to apply");
                self.total_utility += utility;
                self.traversals += 1;

                if (t + 1) % self.config.train_every == 0 {
                    self.train_networks(rng);
                }
            }

            for _ in 0..10 {
                self.train_networks(rng);
            }

            log::info!(
                "deep cfr iteration {}: {} advantage samples, {} strategy samples",
                self.iteration,
                self.advantage_buffers[0].len() + self.advantage_buffers[1].len(),
                self.strategy_buffer.len()
            );
        }

        if self.traversals == 0 {
            0.0
        } else {
            self.total_utility / self.traversals as f64
        }
    }

    fn traverse(&mut self, state: &GameState, traversing_player: usize, rng: &mut impl Rng) -> Result<f64> {
        if state.is_terminal() {
            return Ok(state.payoff(traversing_player));
        }

        let current_player = state.current_player;
        let actions = self.action_abstraction.abstract_actions(state);
        if actions.is_empty() {
            log::warn!("no legal abstract actions at non-terminal state {state}");
            return Ok(0.0);
        }

        let features =
            features::extract(state, current_player, &self.hand_bucketing, &self.action_abstraction, self.config.starting_stack, rng);
        let raw = self.value_networks[current_player].predict(&features);
        let strategy = normalize_to_actions(&raw, actions.len());

        if current_player == traversing_player {
            let mut action_values = vec![0.0; actions.len()];
            for (i, &action) in actions.iter().enumerate() {
                let next_state = state.apply(action, rng)?;
                action_values[i] = self.traverse(&next_state, traversing_player, rng)?;
            }

            let expected_value: f64 = strategy.iter().zip(&action_values).map(|(s, u)| s * u).sum();
            let advantages: Vec<f64> = action_values.iter().map(|&u| u - expected_value).collect();
            self.advantage_buffers[current_player].add((features, advantages), rng);
            Ok(expected_value)
        } else {
            let idx = sample_index(&strategy, rng);
            self.strategy_buffer.add((features, strategy), rng);
            let next_state = state.apply(actions[idx], rng)?;
            self.traverse(&next_state, traversing_player, rng)
        }
    }

    fn train_networks(&mut self, rng: &mut impl Rng) {
        for player in 0..2 {
            if self.advantage_buffers[player].len() >= self.config.batch_size {
                let batch = self.advantage_buffers[player].sample(self.config.batch_size, rng);
                let loss = self.value_networks[player].train_batch(&batch, self.config.learning_rate);
                log::trace!("player {player} advantage network loss {loss:.5}");
            }
        }
        if self.strategy_buffer.len() >= self.config.batch_size {
            let batch = self.strategy_buffer.sample(self.config.batch_size, rng);
            let loss = self.strategy_network.train_batch(&batch, self.config.learning_rate);
            log::trace!("strategy network loss {loss:.5}");
        }
    }

    /// Inference-time strategy at `state` for `player`: softmax over the
    /// strategy network's outputs, trimmed to the live action set.
    pub fn strategy(&self, state: &GameState, player: usize, rng: &mut impl Rng) -> Vec<f64> {
        let actions = self.action_abstraction.abstract_actions(state);
        if actions.is_empty() {
            return Vec::new();
        }
        let features =
            features::extract(state, player, &self.hand_bucketing, &self.action_abstraction, self.config.starting_stack, rng);
        let raw = self.strategy_network.predict(&features);
        softmax(&raw[..raw.len().min(actions.len())])
    }

    pub fn num_advantage_samples(&self) -> usize {
        self.advantage_buffers[0].len() + self.advantage_buffers[1].len()
    }

    pub fn num_strategy_samples(&self) -> usize {
        self.strategy_buffer.len()
    }

    pub fn game_value(&self) -> f64 {
        if self.traversals == 0 {
            0.0
        } else {
            self.total_utility / self.traversals as f64
        }
    }
}

/// Clamps negative advantages to zero and normalizes into a probability
/// distribution over `num_actions` slots, falling back to uniform when
/// every predicted value is non-positive.
fn normalize_to_actions(raw: &[f64], num_actions: usize) -> Vec<f64> {
    let mut values = vec![0.0; num_actions];
    for (slot, &v) in values.iter_mut().zip(raw.iter()) {
        *slot = v.max(0.0);
    }
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter().map(|v| v / total).collect()
    } else {
        vec![1.0 / num_actions as f64; num_actions]
    }
}

fn sample_index(strategy: &[f64], rng: &mut impl Rng) -> usize {
    let draw: f64 = rng.gen_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (i, &p) in strategy.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return i;
        }
    }
    strategy.len() - 1
}

fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = values.iter().map(|&v| (v - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    exp.iter().map(|&v| v / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucketing::BucketingConfig;
    use rand::SeedableRng;

    #[test]
    fn training_collects_samples_and_yields_a_finite_game_value() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(11);
        let bucketing = HandBucketing::new(BucketingConfig {
            postflop_buckets: 4,
            equity_samples: 20,
            ..BucketingConfig::default()
        });
        let abstraction = ActionAbstraction::new(Default::default());
        let config = DeepCFRConfig {
            starting_stack: 20,
            traversals_per_iteration: 8,
            train_every: 4,
            batch_size: 4,
            reservoir_capacity: 100,
            ..DeepCFRConfig::default()
        };
        let mut solver = DeepCFRSolver::new(bucketing, abstraction, config, &mut rng);

        let value = solver.train(2, &mut rng);
        assert!(value.is_finite());
        assert!(solver.num_advantage_samples() > 0);
        assert_eq!(solver.game_value(), value);
    }

    #[test]
    fn normalize_to_actions_falls_back_to_uniform_when_all_nonpositive() {
        let strategy = normalize_to_actions(&[-1.0, -2.0, 0.0], 3);
        assert_eq!(strategy, vec![1.0 / 3.0; 3]);
    }

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
