/// Regret and strategy accumulators for a single information set.
///
/// Implements CFR+: regret matching against `max(0, regret)`, with
/// cumulative regrets floored at zero after every update rather than
/// allowed to go negative.
#[derive(Debug, Clone)]
pub struct InformationSet {
    cumulative_regrets: Vec<f64>,
    strategy_sum: Vec<f64>,
}

impl InformationSet {
    pub fn new(num_actions: usize) -> Self {
        Self {
            cumulative_regrets: vec![0.0; num_actions],
            strategy_sum: vec![0.0; num_actions],
        }
    }

    pub fn num_actions(&self) -> usize {
        self.cumulative_regrets.len()
    }

    /// Current regret-matching strategy, accumulating it into the running
    /// average weighted by `reach_probability`.
    pub fn strategy(&mut self, reach_probability: f64) -> Vec<f64> {
        let strategy = regret_matching(&self.cumulative_regrets);
        for (sum, &p) in self.strategy_sum.iter_mut().zip(&strategy) {
            *sum += reach_probability * p;
        }
        strategy
    }

    /// The time-averaged strategy, which converges to a Nash equilibrium
    /// strategy as training iterations grow.
    pub fn average_strategy(&self) -> Vec<f64> {
        normalize(&self.strategy_sum)
    }

    /// Accumulates per-action regret weighted by counterfactual reach, then
    /// re-applies the CFR+ floor.
    pub fn update_regrets(&mut self, action_utilities: &[f64], counterfactual_reach: f64) {
        let strategy = regret_matching(&self.cumulative_regrets);
        let expected_utility: f64 = strategy.iter().zip(action_utilities).map(|(s, u)| s * u).sum();
        for (regret, &utility) in self.cumulative_regrets.iter_mut().zip(action_utilities) {
            *regret += counterfactual_reach * (utility - expected_utility);
            *regret = regret.max(0.0);
        }
    }

    pub fn total_regret(&self) -> f64 {
        self.cumulative_regrets.iter().sum()
    }
}

fn regret_matching(regrets: &[f64]) -> Vec<f64> {
    let positive: Vec<f64> = regrets.iter().map(|&r| r.max(0.0)).collect();
    normalize(&positive)
}

fn normalize(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter().map(|&v| v / total).collect()
    } else {
        vec![1.0 / values.len() as f64; values.len()]
    }
}
