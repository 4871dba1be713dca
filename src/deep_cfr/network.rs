//! Value-function approximator for Deep CFR.
//!
//! The layer-level architecture is deliberately modest: a two-layer
//! feedforward net over a fixed-width feature vector (bucket/street
//! embeddings, pot ratios, and a pooled action-history summary). What
//! matters to the traversal is the contract in `ValueNetwork`, not the
//! network's internals.

use super::features::Features;
use rand::Rng;

const STREET_EMBED_DIM: usize = 4;
const HISTORY_DIM: usize = 8;

/// Predicts per-action advantages from features, and can be trained on a
/// batch of `(features, target)` pairs by gradient descent on MSE.
pub trait ValueNetwork {
    fn predict(&self, features: &Features) -> Vec<f64>;
    fn train_batch(&mut self, batch: &[(Features, Vec<f64>)], learning_rate: f64) -> f64;
    fn num_actions(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct MlpConfig {
    pub num_buckets: usize,
    pub num_streets: usize,
    pub embed_dim: usize,
    pub hidden_dim: usize,
    pub num_actions: usize,
}

impl Default for MlpConfig {
    fn default() -> Self {
        Self { num_buckets: 169, num_streets: 4, embed_dim: 16, hidden_dim: 64, num_actions: 7 }
    }
}

/// A single-hidden-layer MLP over bucket/street embeddings, pot features,
/// and a pooled action-history encoding.
///
/// The bucket and street embeddings are fixed random projections, not
/// trained — only the dense layers are updated by `train_batch`.
pub struct Mlp {
    config: MlpConfig,
    bucket_embed: Vec<Vec<f32>>,
    street_embed: Vec<Vec<f32>>,
    w1: Vec<Vec<f32>>,
    b1: Vec<f32>,
    w2: Vec<Vec<f32>>,
    b2: Vec<f32>,
}

impl Mlp {
    pub fn new(config: MlpConfig, rng: &mut impl Rng) -> Self {
        let input_dim = config.embed_dim + STREET_EMBED_DIM + 4 + HISTORY_DIM;

        let bucket_embed = (0..config.num_buckets)
            .map(|_| random_vec(config.embed_dim, 0.1, rng))
            .collect();
        let street_embed = (0..config.num_streets)
            .map(|_| random_vec(STREET_EMBED_DIM, 0.1, rng))
            .collect();

        let w1_scale = (6.0 / (input_dim + config.hidden_dim) as f32).sqrt();
        let w1 = (0..config.hidden_dim).map(|_| random_vec(input_dim, w1_scale, rng)).collect();
        let b1 = vec![0.0; config.hidden_dim];

        let w2_scale = (6.0 / (config.hidden_dim + config.num_actions) as f32).sqrt();
        let w2 = (0..config.num_actions).map(|_| random_vec(config.hidden_dim, w2_scale, rng)).collect();
        let b2 = vec![0.0; config.num_actions];

        Self { config, bucket_embed, street_embed, w1, b1, w2, b2 }
    }

    fn input_dim(&self) -> usize {
        self.config.embed_dim + STREET_EMBED_DIM + 4 + HISTORY_DIM
    }

    fn input_vector(&self, features: &Features) -> Vec<f32> {
        let bucket = features.bucket.min(self.config.num_buckets - 1);
        let street = features.street.min(self.config.num_streets - 1);

        let mut input = Vec::with_capacity(self.input_dim());
        input.extend_from_slice(&self.bucket_embed[bucket]);
        input.extend_from_slice(&self.street_embed[street]);
        input.extend(features.pot_features.iter().map(|&p| p as f32));
        input.extend(pool_history(&features.action_history, HISTORY_DIM));
        input
    }

    fn forward(&self, input: &[f32]) -> (Vec<f32>, Vec<f32>) {
        let hidden: Vec<f32> = self
            .w1
            .iter()
            .zip(&self.b1)
            .map(|(row, &bias)| (dot(row, input) + bias).max(0.0))
            .collect();
        let output: Vec<f32> =
            self.w2.iter().zip(&self.b2).map(|(row, &bias)| dot(row, &hidden) + bias).collect();
        (hidden, output)
    }
}

/// Encodes a variable-length action-index history into a fixed-width
/// vector by bucketing each token modulo `dim` and averaging.
fn pool_history(history: &[usize], dim: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; dim];
    for &token in history {
        pooled[token % dim] += 1.0;
    }
    let len = history.len().max(1) as f32;
    for v in &mut pooled {
        *v /= len;
    }
    pooled
}

fn random_vec(len: usize, scale: f32, rng: &mut impl Rng) -> Vec<f32> {
    (0..len).map(|_| rng.gen_range(-scale..=scale)).collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl ValueNetwork for Mlp {
    fn predict(&self, features: &Features) -> Vec<f64> {
        let input = self.input_vector(features);
        let (_, output) = self.forward(&input);
        output.into_iter().map(|v| v as f64).collect()
    }

    /// One step of full-batch gradient descent over `batch`, minimizing
    /// mean squared error between predicted and target advantages.
    fn train_batch(&mut self, batch: &[(Features, Vec<f64>)], learning_rate: f64) -> f64 {
        if batch.is_empty() {
            return 0.0;
        }
        let input_dim = self.input_dim();
        let hidden_dim = self.config.hidden_dim;
        let num_actions = self.config.num_actions;

        let mut grad_w1 = vec![vec![0.0f32; input_dim]; hidden_dim];
        let mut grad_b1 = vec![0.0f32; hidden_dim];
        let mut grad_w2 = vec![vec![0.0f32; hidden_dim]; num_actions];
        let mut grad_b2 = vec![0.0f32; num_actions];
        let mut total_loss = 0.0f64;

        for (features, target) in batch {
            let input = self.input_vector(features);
            let (hidden, output) = self.forward(&input);

            let mut output_grad = vec![0.0f32; num_actions];
            for k in 0..num_actions {
                let t = *target.get(k).unwrap_or(&0.0) as f32;
                let diff = output[k] - t;
                total_loss += (diff as f64).powi(2);
                output_grad[k] = 2.0 * diff / num_actions as f32;
            }

            for k in 0..num_actions {
                for h in 0..hidden_dim {
                    grad_w2[k][h] += output_grad[k] * hidden[h];
                }
                grad_b2[k] += output_grad[k];
            }

            let mut hidden_grad = vec![0.0f32; hidden_dim];
            for h in 0..hidden_dim {
                let mut g = 0.0f32;
                for k in 0..num_actions {
                    g += output_grad[k] * self.w2[k][h];
                }
                hidden_grad[h] = if hidden[h] > 0.0 { g } else { 0.0 };
            }

            for h in 0..hidden_dim {
                for i in 0..input_dim {
                    grad_w1[h][i] += hidden_grad[h] * input[i];
                }
                grad_b1[h] += hidden_grad[h];
            }
        }

        let n = batch.len() as f32;
        let lr = learning_rate as f32 / n;
        for h in 0..hidden_dim {
            for i in 0..input_dim {
                self.w1[h][i] -= lr * grad_w1[h][i];
            }
            self.b1[h] -= lr * grad_b1[h];
        }
        for k in 0..num_actions {
            for h in 0..hidden_dim {
                self.w2[k][h] -= lr * grad_w2[k][h];
            }
            self.b2[k] -= lr * grad_b2[k];
        }

        total_loss / batch.len() as f64
    }

    fn num_actions(&self) -> usize {
        self.config.num_actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn features(bucket: usize, street: usize, history: Vec<usize>) -> Features {
        Features { bucket, street, pot_features: [0.1, 0.5, 0.5, 0.2], action_history: history }
    }

    #[test]
    fn predict_returns_one_value_per_action() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        let net = Mlp::new(MlpConfig::default(), &mut rng);
        let output = net.predict(&features(10, 0, vec![0]));
        assert_eq!(output.len(), net.num_actions());
    }

    #[test]
    fn training_reduces_loss_on_a_fixed_batch() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(2);
        let mut net = Mlp::new(MlpConfig { num_actions: 3, hidden_dim: 16, ..MlpConfig::default() }, &mut rng);
        let batch = vec![
            (features(5, 0, vec![1, 2]), vec![1.0, 0.0, -1.0]),
            (features(80, 1, vec![2]), vec![-0.5, 0.5, 0.0]),
        ];

        let first_loss = net.train_batch(&batch, 0.1);
        let mut last_loss = first_loss;
        for _ in 0..50 {
            last_loss = net.train_batch(&batch, 0.1);
        }
        assert!(last_loss < first_loss, "loss did not decrease: {first_loss} -> {last_loss}");
    }

    #[test]
    fn history_pooling_is_order_independent_but_count_sensitive() {
        assert_eq!(pool_history(&[1, 2], 8), pool_history(&[2, 1], 8));
        assert_ne!(pool_history(&[1], 8), pool_history(&[1, 1], 8));
    }
}
