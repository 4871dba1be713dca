//! Feature extraction: turns a `GameState` (from the acting player's point of
//! view) into the fixed-shape input a value network consumes.

use crate::abstraction::ActionAbstraction;
use crate::bucketing::HandBucketing;
use crate::gameplay::GameState;
use rand::Rng;

/// Network input for one decision point. `action_history` is the abstract
/// action index taken at each prior ply, 1-indexed so that `0` is free to
/// use as a padding token.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub bucket: usize,
    pub street: usize,
    pub pot_features: [f64; 4],
    pub action_history: Vec<usize>,
}

/// Builds the features for `player` at `state`, given a starting stack `S`
/// used to normalize pot/stack ratios.
pub fn extract(
    state: &GameState,
    player: usize,
    hand_bucketing: &HandBucketing,
    action_abstraction: &ActionAbstraction,
    starting_stack: u32,
    rng: &mut impl Rng,
) -> Features {
    let bucket = hand_bucketing.bucket(&state.hole_cards[player], &state.community_cards, rng);
    let street = state.street as usize;

    let total_chips = 2 * starting_stack as f64;
    let pot_features = [
        state.pot as f64 / total_chips,
        state.stacks[player] as f64 / starting_stack as f64,
        state.stacks[1 - player] as f64 / starting_stack as f64,
        state.bets_this_round[player] as f64 / (state.pot as f64).max(1.0),
    ];

    let mut action_history: Vec<usize> = state
        .action_history
        .iter()
        .map(|&action| action_abstraction.encode_action(action, state).map(|idx| idx + 1).unwrap_or(0))
        .collect();
    if action_history.is_empty() {
        action_history.push(0);
    }

    Features { bucket, street, pot_features, action_history }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::ActionAbstractionConfig;
    use crate::bucketing::BucketingConfig;
    use crate::cards::{Card, Hole, Rank, Suit};
    use rand::SeedableRng;

    fn hole(r1: Rank, s1: Suit, r2: Rank, s2: Suit) -> Hole {
        Hole::new(Card::new(r1, s1), Card::new(r2, s2))
    }

    #[test]
    fn fresh_hand_has_padding_history_and_bounded_pot_features() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(9);
        let hand_bucketing = HandBucketing::new(BucketingConfig::default());
        let action_abstraction = ActionAbstraction::new(ActionAbstractionConfig::default());
        let state = GameState::new_hand(
            [
                hole(Rank::Ace, Suit::Spades, Rank::King, Suit::Spades),
                hole(Rank::Two, Suit::Hearts, Rank::Seven, Suit::Diamonds),
            ],
            [200, 200],
            2,
        );

        let features = extract(&state, 0, &hand_bucketing, &action_abstraction, 200, &mut rng);
        assert_eq!(features.action_history, vec![0]);
        assert_eq!(features.street, 0);
        for &p in &features.pot_features {
            assert!(p.is_finite());
        }
    }

    #[test]
    fn history_entries_are_one_indexed_so_zero_stays_a_padding_token() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(10);
        let hand_bucketing = HandBucketing::new(BucketingConfig::default());
        let action_abstraction = ActionAbstraction::new(ActionAbstractionConfig::default());
        let state = GameState::new_hand(
            [
                hole(Rank::Ace, Suit::Spades, Rank::King, Suit::Spades),
                hole(Rank::Two, Suit::Hearts, Rank::Seven, Suit::Diamonds),
            ],
            [200, 200],
            2,
        )
        .apply(crate::gameplay::Action::Call, &mut rng)
        .unwrap();

        let features = extract(&state, 1, &hand_bucketing, &action_abstraction, 200, &mut rng);
        assert!(features.action_history.iter().all(|&idx| idx >= 1));
    }
}
