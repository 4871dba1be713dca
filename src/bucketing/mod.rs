//! Hand-strength bucketing: groups strategically similar hands together so
//! the CFR+ solver's information sets stay tractable in number.

pub mod equity;
pub mod preflop;

use crate::cards::{Card, Hole};
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct BucketingConfig {
    /// Number of preflop buckets, capped at the 169 canonical starting hands.
    pub preflop_buckets: usize,
    pub postflop_buckets: usize,
    pub equity_samples: usize,
}

impl Default for BucketingConfig {
    fn default() -> Self {
        Self {
            preflop_buckets: 169,
            postflop_buckets: 20,
            equity_samples: 1000,
        }
    }
}

/// Assigns hands to buckets: canonical 169-hand lookup preflop, Monte Carlo
/// equity clustering postflop.
pub struct HandBucketing {
    config: BucketingConfig,
    preflop_table: HashMap<&'static str, usize>,
}

impl HandBucketing {
    pub fn new(config: BucketingConfig) -> Self {
        let preflop_buckets = config.preflop_buckets.min(169);
        let preflop_table = preflop::build_table(preflop_buckets);
        Self { config: BucketingConfig { preflop_buckets, ..config }, preflop_table }
    }

    /// Bucket id for `hole` given `board` (empty preflop), in
    /// `0..num_preflop_buckets` or `0..num_postflop_buckets` depending on
    /// street.
    pub fn bucket(&self, hole: &Hole, board: &[Card], rng: &mut impl Rng) -> usize {
        if board.is_empty() {
            self.preflop_bucket(hole)
        } else {
            self.equity_bucket(hole, board, rng)
        }
    }

    fn preflop_bucket(&self, hole: &Hole) -> usize {
        let hand = preflop::canonical_form(hole);
        *self.preflop_table.get(hand.as_str()).unwrap_or(&0)
    }

    fn equity_bucket(&self, hole: &Hole, board: &[Card], rng: &mut impl Rng) -> usize {
        let equity = equity::estimate_equity(hole, board, self.config.equity_samples, rng);
        let bucket = (equity * self.config.postflop_buckets as f64) as usize;
        bucket.min(self.config.postflop_buckets - 1)
    }

    pub fn num_preflop_buckets(&self) -> usize {
        self.config.preflop_buckets
    }

    pub fn num_postflop_buckets(&self) -> usize {
        self.config.postflop_buckets
    }
}
