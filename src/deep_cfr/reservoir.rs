//! Reservoir sampling buffer: maintains a uniform random sample of bounded
//! size from an unbounded stream of offered training examples, used by the
//! Deep CFR solver's advantage and strategy replay buffers.

use rand::Rng;

#[derive(Debug, Clone)]
pub struct ReservoirBuffer<T> {
    capacity: usize,
    buffer: Vec<T>,
    offered: u64,
}

impl<T> ReservoirBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, buffer: Vec::with_capacity(capacity.min(1024)), offered: 0 }
    }

    /// Offers `sample` to the reservoir. The first `capacity` offers are
    /// always kept; after that, offer `j` replaces a uniformly-chosen
    /// existing slot with probability `capacity / j`, which keeps the
    /// buffer a uniform sample of every offer seen so far.
    pub fn add(&mut self, sample: T, rng: &mut impl Rng) {
        self.offered += 1;
        if self.buffer.len() < self.capacity {
            self.buffer.push(sample);
        } else if self.capacity > 0 {
            let slot = rng.gen_range(0..self.offered);
            if slot < self.capacity as u64 {
                self.buffer[slot as usize] = sample;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn offered(&self) -> u64 {
        self.offered
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.offered = 0;
    }
}

impl<T: Clone> ReservoirBuffer<T> {
    /// Draws `batch_size` samples without replacement (or the whole buffer,
    /// if smaller).
    pub fn sample(&self, batch_size: usize, rng: &mut impl Rng) -> Vec<T> {
        let n = self.buffer.len().min(batch_size);
        rand::seq::index::sample(rng, self.buffer.len(), n)
            .into_iter()
            .map(|i| self.buffer[i].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn keeps_every_offer_until_full() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        let mut buffer = ReservoirBuffer::new(5);
        for i in 0..5 {
            buffer.add(i, &mut rng);
        }
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.offered(), 5);
    }

    #[test]
    fn never_grows_past_capacity() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(2);
        let mut buffer = ReservoirBuffer::new(10);
        for i in 0..10_000 {
            buffer.add(i, &mut rng);
        }
        assert_eq!(buffer.len(), 10);
        assert_eq!(buffer.offered(), 10_000);
    }

    /// Property: with capacity C and M offers, each offer survives with
    /// probability C/M. Checked by tagging the very first offer and
    /// re-running many independent trials.
    #[test]
    fn retention_probability_matches_capacity_over_offers() {
        let capacity = 10usize;
        let total_offers = 100u64;
        let trials = 5_000;
        let mut survived = 0;

        for trial in 0..trials {
            let mut rng = rand::rngs::SmallRng::seed_from_u64(trial);
            let mut buffer: ReservoirBuffer<u64> = ReservoirBuffer::new(capacity);
            buffer.add(u64::MAX, &mut rng);
            for i in 1..total_offers {
                buffer.add(i, &mut rng);
            }
            if buffer.buffer.contains(&u64::MAX) {
                survived += 1;
            }
        }

        let observed = survived as f64 / trials as f64;
        let expected = capacity as f64 / total_offers as f64;
        assert!((observed - expected).abs() < 0.03, "observed {observed} vs expected {expected}");
    }

    #[test]
    fn sample_never_exceeds_buffer_size() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
        let mut buffer = ReservoirBuffer::new(4);
        for i in 0..4 {
            buffer.add(i, &mut rng);
        }
        let batch = buffer.sample(100, &mut rng);
        assert_eq!(batch.len(), 4);
    }
}
