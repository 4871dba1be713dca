use super::{card::Card, rank::Rank, suit::Suit};
use crate::error::{Result, SolverError};
use rand::seq::SliceRandom;
use rand::Rng;

/// A standard 52-card deck, optionally missing a set of known/dead cards.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full, unshuffled 52-card deck.
    pub fn full() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// A deck excluding the given cards, e.g. known hole cards and board.
    pub fn without(exclude: &[Card]) -> Self {
        let mut deck = Self::full();
        deck.remove(exclude);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) -> &mut Self {
        self.cards.shuffle(rng);
        self
    }

    /// Deals n cards from the top of the deck, removing them.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>> {
        if n > self.cards.len() {
            return Err(SolverError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn deal_one(&mut self) -> Result<Card> {
        Ok(self.deal(1)?[0])
    }

    /// Removes specific cards from the deck, wherever they sit.
    pub fn remove(&mut self, cards: &[Card]) -> &mut Self {
        self.cards.retain(|c| !cards.contains(c));
        self
    }

    /// Looks at the top n cards without removing them.
    pub fn peek(&self, n: usize) -> &[Card] {
        &self.cards[..n.min(self.cards.len())]
    }

    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    pub fn reset(&mut self, exclude: &[Card]) {
        *self = Self::without(exclude);
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn full_deck_has_52_distinct_cards() {
        let deck = Deck::full();
        assert_eq!(deck.len(), 52);
        let unique: std::collections::HashSet<_> = deck.remaining().iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn without_excludes_requested_cards() {
        let ace_spades = Card::new(Rank::Ace, Suit::Spades);
        let deck = Deck::without(&[ace_spades]);
        assert_eq!(deck.len(), 51);
        assert!(!deck.contains(&ace_spades));
    }

    #[test]
    fn deal_removes_from_the_top_and_errors_when_exhausted() {
        let mut deck = Deck::full();
        let dealt = deck.deal(5).unwrap();
        assert_eq!(dealt.len(), 5);
        assert_eq!(deck.len(), 47);

        let mut empty = Deck::without(&[]);
        empty.deal(52).unwrap();
        assert!(empty.deal(1).is_err());
    }

    #[test]
    fn shuffle_is_deterministic_given_a_seeded_rng() {
        let mut a = Deck::full();
        let mut b = Deck::full();
        let mut rng_a = rand::rngs::SmallRng::seed_from_u64(7);
        let mut rng_b = rand::rngs::SmallRng::seed_from_u64(7);
        a.shuffle(&mut rng_a);
        b.shuffle(&mut rng_b);
        assert_eq!(a.remaining(), b.remaining());
    }
}
