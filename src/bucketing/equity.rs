use crate::cards::{Card, Deck, Evaluator, Hole};
use rand::seq::SliceRandom;
use rand::Rng;

/// Estimates equity by Monte Carlo rollout against a uniformly random
/// opponent hand and board runout, matching the original
/// `_calculate_equity` routine (wins count fully, ties count as half).
///
/// Takes its own `rng` rather than reaching for a shared solver RNG — the
/// equity sampler's randomness is independent of training reproducibility.
pub fn estimate_equity(hole: &Hole, board: &[Card], samples: usize, rng: &mut impl Rng) -> f64 {
    let mut dead: Vec<Card> = hole.cards().to_vec();
    dead.extend_from_slice(board);
    let available: Vec<Card> = Deck::without(&dead).remaining().to_vec();

    let cards_needed = 5 - board.len();
    let draw_size = 2 + cards_needed;

    let mut wins = 0.0;
    for _ in 0..samples {
        let mut indices: Vec<usize> = (0..available.len()).collect();
        let (chosen, _) = indices.partial_shuffle(rng, draw_size);

        let opp_hole = Hole::new(available[chosen[0]], available[chosen[1]]);
        let mut full_board = board.to_vec();
        full_board.extend(chosen[2..].iter().map(|&i| available[i]));

        let my_rank = Evaluator::evaluate(hole, &full_board)
            .expect("hole + board always yields 5-7 cards")
            .absolute_rank;
        let opp_rank = Evaluator::evaluate(&opp_hole, &full_board)
            .expect("hole + board always yields 5-7 cards")
            .absolute_rank;

        wins += match my_rank.cmp(&opp_rank) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        };
    }
    wins / samples as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use rand::SeedableRng;

    #[test]
    fn nut_hand_on_river_wins_every_sample() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(11);
        let hole = Hole::new(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
        let board = [
            Card::new(Rank::Ace, Suit::Diamonds),
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Two, Suit::Diamonds),
        ];
        let equity = estimate_equity(&hole, &board, 200, &mut rng);
        assert!(equity > 0.95, "expected near-certain equity, got {equity}");
    }

    #[test]
    fn equity_is_between_zero_and_one() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(12);
        let hole = Hole::new(Card::new(Rank::Seven, Suit::Clubs), Card::new(Rank::Two, Suit::Diamonds));
        let board = [
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::Queen, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Diamonds),
        ];
        let equity = estimate_equity(&hole, &board, 200, &mut rng);
        assert!((0.0..=1.0).contains(&equity));
    }
}
