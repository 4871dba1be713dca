use super::card::Card;
use super::hole::Hole;
use super::rank::Rank;
use crate::error::{Result, SolverError};

/// The nine standard poker hand categories, ordered weakest to strongest.
/// Each owns a contiguous slice of the 1..=7462 absolute rank space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    /// Inclusive `(min, max)` absolute rank bounds for this category.
    pub const fn range(self) -> (u32, u32) {
        match self {
            HandCategory::HighCard => (1, 1277),
            HandCategory::OnePair => (1278, 4137),
            HandCategory::TwoPair => (4138, 4995),
            HandCategory::ThreeOfAKind => (4996, 5853),
            HandCategory::Straight => (5854, 5863),
            HandCategory::Flush => (5864, 7140),
            HandCategory::FullHouse => (7141, 7296),
            HandCategory::FourOfAKind => (7297, 7452),
            HandCategory::StraightFlush => (7453, 7462),
        }
    }

    const fn base_rank(self) -> u32 {
        self.range().0 - 1
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    /// Recovers the category from an absolute rank, per Testable Property #1:
    /// this must agree with whatever category the evaluator itself produced.
    pub fn from_rank(rank: u32) -> Result<Self> {
        if !(1..=7462).contains(&rank) {
            return Err(SolverError::InvalidInput(format!(
                "invalid hand rank: {rank} (must be 1-7462)"
            )));
        }
        HandCategory::ALL
            .into_iter()
            .find(|c| {
                let (min, max) = c.range();
                (min..=max).contains(&rank)
            })
            .ok_or_else(|| SolverError::InconsistentState(format!("no category covers rank {rank}")))
    }
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The result of evaluating the best 5-card hand available from a set of
/// hole and community cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandResult {
    pub absolute_rank: u32,
    pub category: HandCategory,
    pub description: String,
}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.absolute_rank.cmp(&other.absolute_rank)
    }
}

impl std::fmt::Display for HandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<16}{:>5}  {}", self.category, self.absolute_rank, self.description)
    }
}

/// Evaluates the best 5-card poker hand out of 5-7 available cards.
///
/// Every intermediate rank is computed with the same base-15 encode, then
/// proportionally mapped into its category's reserved range; this mirrors
/// the original evaluator's arithmetic exactly so that absolute ranks are
/// stable across reimplementations.
pub struct Evaluator;

impl Evaluator {
    pub fn evaluate(hole: &Hole, community: &[Card]) -> Result<HandResult> {
        let mut all_cards = hole.cards().to_vec();
        all_cards.extend_from_slice(community);
        Self::evaluate_cards(&all_cards)
    }

    pub fn evaluate_cards(cards: &[Card]) -> Result<HandResult> {
        if !(5..=7).contains(&cards.len()) {
            return Err(SolverError::InvalidInput(format!(
                "must have 5-7 cards, got {}",
                cards.len()
            )));
        }
        let unique: std::collections::HashSet<Card> = cards.iter().copied().collect();
        if unique.len() != cards.len() {
            return Err(SolverError::InvalidInput("duplicate card among hole and community cards".into()));
        }
        combinations5(cards)
            .map(|combo| Self::evaluate_five(&combo))
            .max_by_key(|r| r.absolute_rank)
            .ok_or_else(|| SolverError::InconsistentState("no five-card combination produced a hand".into()))
    }

    fn evaluate_five(cards: &[Card; 5]) -> HandResult {
        let mut values: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
        values.sort_unstable();
        let suits: Vec<_> = cards.iter().map(|c| c.suit()).collect();

        let mut counts: Vec<(u8, u8)> = Vec::new();
        for &v in &values {
            match counts.iter_mut().find(|(val, _)| *val == v) {
                Some((_, n)) => *n += 1,
                None => counts.push((v, 1)),
            }
        }

        let is_flush = suits.windows(2).all(|w| w[0] == w[1]);
        let is_wheel = values == [2, 3, 4, 5, 14];
        let is_straight = is_wheel || (values[4] - values[0] == 4 && counts.len() == 5);

        let four = find_count(&counts, 4);
        let three = find_count(&counts, 3);
        let pair_count = counts.iter().filter(|(_, n)| *n == 2).count();

        if is_flush && is_straight {
            let high = if is_wheel { 5 } else { values[4] };
            let within = straight_rank_within_category(high);
            let description = if high == 14 {
                "Royal Flush".to_string()
            } else {
                format!("Straight Flush, {} high", name(high))
            };
            return category_result(HandCategory::StraightFlush, within, description);
        }

        if let Some(quad) = four {
            let kicker = values.iter().copied().find(|&v| v != quad).unwrap();
            let within = normalize_pair(quad, kicker, 156);
            return category_result(
                HandCategory::FourOfAKind,
                within,
                format!("Four of a Kind, {}s", name(quad)),
            );
        }

        if let (Some(trips), Some(pair)) = (three, pair_count_value(&counts, 2)) {
            let within = normalize_pair(trips, pair, 156);
            return category_result(
                HandCategory::FullHouse,
                within,
                format!("Full House, {}s full of {}s", name(trips), name(pair)),
            );
        }

        if is_flush {
            let within = normalize_high_values(&values);
            return category_result(
                HandCategory::Flush,
                within,
                format!("Flush, {} high", name(values[4])),
            );
        }

        if is_straight {
            let high = if is_wheel { 5 } else { values[4] };
            let within = straight_rank_within_category(high);
            return category_result(
                HandCategory::Straight,
                within,
                format!("Straight, {} high", name(high)),
            );
        }

        if let Some(trips) = three {
            let mut kickers: Vec<u8> = values.iter().copied().filter(|&v| v != trips).collect();
            kickers.sort_unstable_by(|a, b| b.cmp(a));
            let within = normalize_three_of_a_kind(trips, kickers[0], kickers[1]);
            return category_result(
                HandCategory::ThreeOfAKind,
                within,
                format!("Three of a Kind, {}s", name(trips)),
            );
        }

        let mut pairs: Vec<u8> = counts
            .iter()
            .filter(|(_, n)| *n == 2)
            .map(|(v, _)| *v)
            .collect();
        pairs.sort_unstable_by(|a, b| b.cmp(a));

        if pairs.len() == 2 {
            let kicker = values
                .iter()
                .copied()
                .find(|v| !pairs.contains(v))
                .unwrap();
            let within = normalize_two_pair(pairs[0], pairs[1], kicker);
            return category_result(
                HandCategory::TwoPair,
                within,
                format!("Two Pair, {}s and {}s", name(pairs[0]), name(pairs[1])),
            );
        }

        if pairs.len() == 1 {
            let mut kickers: Vec<u8> = values.iter().copied().filter(|&v| v != pairs[0]).collect();
            kickers.sort_unstable_by(|a, b| b.cmp(a));
            let within = normalize_pair_with_kickers(pairs[0], &kickers[..3], 2860);
            return category_result(
                HandCategory::OnePair,
                within,
                format!("Pair of {}s", name(pairs[0])),
            );
        }

        let within = normalize_high_values(&values);
        category_result(HandCategory::HighCard, within, format!("High Card, {}", name(values[4])))
    }
}

fn find_count(counts: &[(u8, u8)], n: u8) -> Option<u8> {
    counts.iter().find(|(_, c)| *c == n).map(|(v, _)| *v)
}

fn pair_count_value(counts: &[(u8, u8)], n: u8) -> Option<u8> {
    find_count(counts, n)
}

fn name(value: u8) -> String {
    Rank::from_value(value)
        .map(Rank::name)
        .unwrap_or_else(|_| value.to_string())
}

/// Encodes a descending list of card values as a base-15 integer, so that
/// distinct rank tuples always produce distinct, order-preserving integers.
fn encode(values: &[u8]) -> u64 {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| v as u64 * 15u64.pow((values.len() - 1 - i) as u32))
        .sum()
}

/// Proportionally maps `encoded` from `[min_possible, max_possible]` into
/// `[1, target_max]`, matching the normalization arithmetic the category
/// ranges were derived from.
fn normalize_to_range(encoded: u64, min_possible: u64, max_possible: u64, target_max: u32) -> u32 {
    if max_possible == min_possible {
        return 1;
    }
    let proportion = (encoded - min_possible) as f64 / (max_possible - min_possible) as f64;
    1 + (proportion * (target_max - 1) as f64) as u32
}

fn normalize_high_values(values: &[u8]) -> u32 {
    let mut sorted: Vec<u8> = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let encoded = encode(&sorted);
    let min_encoded = encode(&[7, 5, 4, 3, 2]);
    let max_encoded = encode(&[14, 13, 12, 11, 9]);
    normalize_to_range(encoded, min_encoded, max_encoded, 1277)
}

fn normalize_pair_with_kickers(primary: u8, kickers: &[u8], target_max: u32) -> u32 {
    let mut values = vec![primary];
    values.extend_from_slice(kickers);
    let encoded = encode(&values);
    let min_encoded = encode(&[2, 5, 4, 3]);
    let max_encoded = encode(&[14, 13, 12, 11]);
    normalize_to_range(encoded, min_encoded, max_encoded, target_max)
}

fn normalize_two_pair(high_pair: u8, low_pair: u8, kicker: u8) -> u32 {
    let encoded = encode(&[high_pair, low_pair, kicker]);
    let min_encoded = encode(&[3, 2, 4]);
    let max_encoded = encode(&[14, 13, 12]);
    normalize_to_range(encoded, min_encoded, max_encoded, 858)
}

fn normalize_three_of_a_kind(trips: u8, kicker_hi: u8, kicker_lo: u8) -> u32 {
    let encoded = encode(&[trips, kicker_hi, kicker_lo]);
    let min_encoded = encode(&[2, 5, 4]);
    let max_encoded = encode(&[14, 13, 12]);
    normalize_to_range(encoded, min_encoded, max_encoded, 858)
}

fn normalize_pair(primary: u8, secondary: u8, target_max: u32) -> u32 {
    let encoded = encode(&[primary, secondary]);
    let min_encoded = encode(&[2, 3]);
    let max_encoded = encode(&[14, 13]);
    normalize_to_range(encoded, min_encoded, max_encoded, target_max)
}

fn straight_rank_within_category(high_card: u8) -> u32 {
    if high_card == 5 {
        1
    } else {
        (high_card - 4) as u32
    }
}

fn category_result(category: HandCategory, within_category: u32, description: String) -> HandResult {
    let absolute_rank = category.base_rank() + within_category;
    HandResult { absolute_rank, category, description }
}

/// All 5-element subsets of `cards`, in the order a nested-loop combination
/// generator would produce them. `cards.len()` is always 5, 6, or 7.
fn combinations5(cards: &[Card]) -> impl Iterator<Item = [Card; 5]> + '_ {
    let n = cards.len();
    (0..n).flat_map(move |a| {
        (a + 1..n).flat_map(move |b| {
            (b + 1..n).flat_map(move |c| {
                (c + 1..n).flat_map(move |d| {
                    (d + 1..n).map(move |e| [cards[a], cards[b], cards[c], cards[d], cards[e]])
                })
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    fn five(cards: [(Rank, Suit); 5]) -> HandResult {
        let cards: Vec<Card> = cards.iter().map(|&(r, s)| Card::new(r, s)).collect();
        Evaluator::evaluate_cards(&cards).unwrap()
    }

    #[test]
    fn high_card() {
        let r = five([
            (Rank::Ace, Suit::Spades),
            (Rank::King, Suit::Hearts),
            (Rank::Queen, Suit::Diamonds),
            (Rank::Jack, Suit::Clubs),
            (Rank::Nine, Suit::Spades),
        ]);
        assert_eq!(r.category, HandCategory::HighCard);
        assert_eq!(r.description, "High Card, Ace");
    }

    #[test]
    fn one_pair() {
        let r = five([
            (Rank::Ace, Suit::Spades),
            (Rank::Ace, Suit::Hearts),
            (Rank::King, Suit::Diamonds),
            (Rank::Queen, Suit::Clubs),
            (Rank::Jack, Suit::Spades),
        ]);
        assert_eq!(r.category, HandCategory::OnePair);
        assert_eq!(r.description, "Pair of Aces");
    }

    #[test]
    fn two_pair_beats_one_pair() {
        let two_pair = five([
            (Rank::Ace, Suit::Spades),
            (Rank::Ace, Suit::Hearts),
            (Rank::King, Suit::Diamonds),
            (Rank::King, Suit::Clubs),
            (Rank::Queen, Suit::Spades),
        ]);
        let one_pair = five([
            (Rank::Ace, Suit::Spades),
            (Rank::Ace, Suit::Hearts),
            (Rank::King, Suit::Diamonds),
            (Rank::Queen, Suit::Clubs),
            (Rank::Jack, Suit::Spades),
        ]);
        assert!(two_pair > one_pair);
        assert_eq!(two_pair.description, "Two Pair, Aces and Kings");
    }

    #[test]
    fn wheel_straight_is_five_high() {
        let r = five([
            (Rank::Ace, Suit::Spades),
            (Rank::Two, Suit::Hearts),
            (Rank::Three, Suit::Diamonds),
            (Rank::Four, Suit::Clubs),
            (Rank::Five, Suit::Spades),
        ]);
        assert_eq!(r.category, HandCategory::Straight);
        assert_eq!(r.description, "Straight, 5 high");
    }

    #[test]
    fn royal_flush_is_named_specially() {
        let r = five([
            (Rank::Ten, Suit::Spades),
            (Rank::Jack, Suit::Spades),
            (Rank::Queen, Suit::Spades),
            (Rank::King, Suit::Spades),
            (Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(r.category, HandCategory::StraightFlush);
        assert_eq!(r.description, "Royal Flush");
        assert_eq!(r.absolute_rank, 7462);
    }

    #[test]
    fn weakest_hand_ranks_at_one() {
        let r = five([
            (Rank::Seven, Suit::Spades),
            (Rank::Five, Suit::Hearts),
            (Rank::Four, Suit::Diamonds),
            (Rank::Three, Suit::Clubs),
            (Rank::Two, Suit::Spades),
        ]);
        assert_eq!(r.category, HandCategory::HighCard);
        assert_eq!(r.absolute_rank, 1);
    }

    #[test]
    fn seven_card_hand_picks_the_best_five() {
        let hole = Hole::new(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
        let board = [
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Spades),
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Diamonds),
        ];
        let r = Evaluator::evaluate(&hole, &board).unwrap();
        assert_eq!(r.category, HandCategory::TwoPair);
    }

    #[test]
    fn category_from_rank_agrees_with_evaluated_category() {
        let r = five([
            (Rank::Ace, Suit::Spades),
            (Rank::Ace, Suit::Hearts),
            (Rank::Ace, Suit::Diamonds),
            (Rank::Ace, Suit::Clubs),
            (Rank::King, Suit::Spades),
        ]);
        assert_eq!(HandCategory::from_rank(r.absolute_rank).unwrap(), r.category);
    }

    #[test]
    fn rejects_out_of_range_rank() {
        assert!(HandCategory::from_rank(0).is_err());
        assert!(HandCategory::from_rank(7463).is_err());
    }
}
