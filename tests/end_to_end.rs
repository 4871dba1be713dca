//! End-to-end scenarios with literal values (BB = 2, starting stack 200
//! unless noted), exercising the public library surface the way an external
//! caller would.

use nlhe_solver::cards::{Card, Evaluator, HandCategory, Hole, Rank, Suit};
use nlhe_solver::cfr::KuhnSolver;
use nlhe_solver::gameplay::{Action, GameState, Winner};
use rand::SeedableRng;

fn hole(r1: Rank, s1: Suit, r2: Rank, s2: Suit) -> Hole {
    Hole::new(Card::new(r1, s1), Card::new(r2, s2))
}

fn starting_state() -> GameState {
    GameState::new_hand(
        [
            hole(Rank::Ace, Suit::Spades, Rank::King, Suit::Spades),
            hole(Rank::Queen, Suit::Hearts, Rank::Jack, Suit::Hearts),
        ],
        [200, 200],
        2,
    )
}

#[test]
fn e1_p0_folding_from_the_initial_state_ends_the_hand_in_p1s_favor() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
    let state = starting_state().apply(Action::Fold, &mut rng).unwrap();

    assert!(state.is_terminal());
    assert_eq!(state.terminal, Some(Winner::Player(1)));
    assert!(state.payoff(1) > 0.0);
    assert!(state.payoff(0) < 0.0);
}

#[test]
fn e2_call_then_check_reaches_the_flop_with_a_clean_betting_round() {
    use nlhe_solver::cards::Street;

    let mut rng = rand::rngs::SmallRng::seed_from_u64(2);
    let state = starting_state()
        .apply(Action::Call, &mut rng)
        .unwrap()
        .apply(Action::Check, &mut rng)
        .unwrap();

    assert!(!state.is_terminal());
    assert_eq!(state.street, Street::Flop);
    assert_eq!(state.pot, 4);
    assert_eq!(state.bets_this_round, [0, 0]);
    assert_eq!(state.current_player, 1);
    assert!(!state.facing_bet);
}

#[test]
fn e3_ace_high_flush_is_named_and_ranked_correctly() {
    let hole = Hole::new(Card::new(Rank::Ace, Suit::Hearts), Card::new(Rank::King, Suit::Hearts));
    let board = [
        Card::new(Rank::Queen, Suit::Hearts),
        Card::new(Rank::Jack, Suit::Hearts),
        Card::new(Rank::Nine, Suit::Hearts),
        Card::new(Rank::Eight, Suit::Diamonds),
        Card::new(Rank::Two, Suit::Clubs),
    ];

    let result = Evaluator::evaluate(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::Flush);
    assert_eq!(result.description, "Flush, Ace high");
    assert!((5864..=7140).contains(&result.absolute_rank));
}

#[test]
fn e4_nine_high_straight_flush_ranks_in_its_category_range() {
    let hole = Hole::new(Card::new(Rank::Nine, Suit::Hearts), Card::new(Rank::Eight, Suit::Hearts));
    let board = [
        Card::new(Rank::Seven, Suit::Hearts),
        Card::new(Rank::Six, Suit::Hearts),
        Card::new(Rank::Five, Suit::Hearts),
        Card::new(Rank::King, Suit::Diamonds),
        Card::new(Rank::Two, Suit::Clubs),
    ];

    let result = Evaluator::evaluate(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert!((7453..=7462).contains(&result.absolute_rank));
}

#[test]
fn e5_pocket_aces_bucket_below_seven_deuce_under_169_bucket_mode() {
    use nlhe_solver::bucketing::{BucketingConfig, HandBucketing};

    let bucketing = HandBucketing::new(BucketingConfig::default());
    let mut rng = rand::rngs::SmallRng::seed_from_u64(5);

    let aces = hole(Rank::Ace, Suit::Spades, Rank::Ace, Suit::Hearts);
    let seven_deuce = hole(Rank::Seven, Suit::Hearts, Rank::Two, Suit::Clubs);

    assert!(bucketing.bucket(&aces, &[], &mut rng) < bucketing.bucket(&seven_deuce, &[], &mut rng));
}

#[test]
fn e6_kuhn_solver_converges_to_the_known_equilibrium_within_one_hundredth() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(6);
    let mut solver = KuhnSolver::new();

    let value = solver.train(100_000, &mut rng);
    assert!((value - (-1.0 / 18.0)).abs() <= 0.01, "game value {value} too far from -1/18");
}
