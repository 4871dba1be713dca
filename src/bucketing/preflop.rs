use crate::cards::{Hole, Rank};

/// The 169 canonical starting hands, ordered by approximate preflop
/// strength (`AA` strongest, `72o` weakest). Canonical form is
/// `{high}{low}` for pairs, `{high}{low}s` for suited, `{high}{low}o` for
/// offsuit, matching the ordering carried over from the original solver.
pub const CANONICAL_HAND_RANKINGS: [&str; 169] = [
    "AA", "KK", "QQ", "AKs", "JJ", "AQs", "KQs", "AJs", "KJs", "TT", "AKo", "ATs", "QJs", "KTs",
    "QTs", "JTs", "99", "AQo", "A9s", "KQo", "88", "K9s", "T9s", "A8s", "Q9s", "J9s", "AJo", "A5s",
    "77", "A7s", "KJo", "A4s", "A3s", "A6s", "QJo", "66", "K8s", "T8s", "A2s", "98s", "J8s", "ATo",
    "Q8s", "K7s", "KTo", "55", "JTo", "87s", "QTo", "44", "33", "22", "K6s", "97s", "K5s", "76s",
    "T7s", "K4s", "K3s", "K2s", "Q7s", "86s", "65s", "J7s", "54s", "Q6s", "75s", "96s", "Q5s",
    "64s", "Q4s", "Q3s", "T9o", "T6s", "Q2s", "A9o", "53s", "85s", "J6s", "J9o", "K9o", "J5s",
    "Q9o", "43s", "74s", "J4s", "J3s", "95s", "J2s", "63s", "A8o", "52s", "T5s", "84s", "T4s",
    "T3s", "42s", "T2s", "98o", "T8o", "A5o", "A7o", "73s", "A4o", "32s", "94s", "93s", "J8o",
    "A3o", "62s", "92s", "K8o", "A6o", "87o", "Q8o", "83s", "A2o", "82s", "97o", "72s", "76o",
    "K7o", "65o", "T7o", "K6o", "86o", "54o", "K5o", "J7o", "75o", "Q7o", "K4o", "K3o", "96o",
    "K2o", "64o", "Q6o", "53o", "85o", "T6o", "Q5o", "43o", "Q4o", "Q3o", "74o", "Q2o", "J6o",
    "63o", "J5o", "95o", "52o", "J4o", "J3o", "42o", "J2o", "84o", "T5o", "T4o", "32o", "T3o",
    "73o", "T2o", "62o", "94o", "93o", "92o", "83o", "82o", "72o",
];

/// Canonicalizes two hole cards into the `{high}{low}[s|o]` string used to
/// index [`CANONICAL_HAND_RANKINGS`].
pub fn canonical_form(hole: &Hole) -> String {
    let [a, b] = hole.cards();
    let (hi, lo) = if a.rank() >= b.rank() { (a, b) } else { (b, a) };
    if hi.rank() == lo.rank() {
        format!("{}{}", hi.rank().symbol(), lo.rank().symbol())
    } else {
        let suffix = if hi.suit() == lo.suit() { 's' } else { 'o' };
        format!("{}{}{}", hi.rank().symbol(), lo.rank().symbol(), suffix)
    }
}

/// Builds the canonical-hand → bucket lookup for a given bucket count,
/// scaling the 169-entry ranking proportionally, exactly as the original
/// `_build_preflop_table` does.
pub fn build_table(preflop_buckets: usize) -> std::collections::HashMap<&'static str, usize> {
    CANONICAL_HAND_RANKINGS
        .iter()
        .enumerate()
        .map(|(idx, &hand)| (hand, idx * preflop_buckets / CANONICAL_HAND_RANKINGS.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};

    #[test]
    fn canonical_form_orders_high_rank_first() {
        let hole = Hole::new(Card::new(Rank::Seven, Suit::Clubs), Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(canonical_form(&hole), "A7o");
    }

    #[test]
    fn canonical_form_tags_suited_hands() {
        let hole = Hole::new(Card::new(Rank::King, Suit::Spades), Card::new(Rank::Queen, Suit::Spades));
        assert_eq!(canonical_form(&hole), "KQs");
    }

    #[test]
    fn canonical_form_has_no_suffix_for_pairs() {
        let hole = Hole::new(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(canonical_form(&hole), "AA");
    }

    #[test]
    fn table_covers_all_169_canonical_hands() {
        let table = build_table(169);
        assert_eq!(table.len(), 169);
        assert_eq!(table["AA"], 0);
        assert_eq!(table["72o"], 168);
    }

    #[test]
    fn smaller_bucket_counts_scale_proportionally() {
        let table = build_table(20);
        assert_eq!(table["AA"], 0);
        assert!(*table.get("72o").unwrap() < 20);
    }
}
