use crate::error::{Result, SolverError};

/// A card rank, Two through Ace. The wheel straight (A-2-3-4-5) is handled
/// by the evaluator, not by this type — here Ace is always high (14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value used throughout the evaluator (2-14).
    pub const fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self> {
        Ok(match symbol.to_ascii_uppercase() {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            other => {
                return Err(SolverError::InvalidInput(format!(
                    "unknown rank symbol: {other}"
                )))
            }
        })
    }

    pub const fn symbol(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Singular display name used in hand descriptions ("Ace", "King", ...).
    /// Numeral ranks fall back to their digit, matching the original's
    /// `_rank_to_name` table.
    pub fn name(self) -> String {
        match self {
            Rank::Ace => "Ace".to_string(),
            Rank::King => "King".to_string(),
            Rank::Queen => "Queen".to_string(),
            Rank::Jack => "Jack".to_string(),
            Rank::Ten => "Ten".to_string(),
            other => other.value().to_string(),
        }
    }

    pub fn from_value(value: u8) -> Result<Self> {
        Rank::ALL
            .into_iter()
            .find(|r| r.value() == value)
            .ok_or_else(|| SolverError::InvalidInput(format!("rank value out of range: {value}")))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
