use super::{rank::Rank, suit::Suit};
use crate::error::{Result, SolverError};

/// A single playing card. Immutable and cheap to copy — used throughout
/// the crate as a plain value, never behind a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(&self) -> Rank {
        self.rank
    }

    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// Short notation, e.g. "As" for the ace of spades.
    pub fn notation(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }

    pub fn from_notation(notation: &str) -> Result<Self> {
        let chars: Vec<char> = notation.chars().collect();
        if chars.len() != 2 {
            return Err(SolverError::InvalidInput(format!(
                "card notation must be 2 characters: {notation}"
            )));
        }
        Ok(Self::new(
            Rank::from_symbol(chars[0])?,
            Suit::from_symbol(chars[1])?,
        ))
    }

    /// Parses a space-separated run of card notations, e.g. "As Kh Qd".
    pub fn many_from_str(s: &str) -> Result<Vec<Self>> {
        s.split_whitespace().map(Self::from_notation).collect()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}
