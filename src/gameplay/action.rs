/// A single player action. Bet/raise/all-in carry the chip amount involved;
/// `Raise` carries the *total* bet the player is raising to, matching how
/// the betting engine accounts for it against `bets_this_round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

impl Action {
    pub fn is_aggressive(self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_) | Action::AllIn(_))
    }

    pub fn is_passive(self) -> bool {
        matches!(self, Action::Check | Action::Call)
    }

    pub fn amount(self) -> u32 {
        match self {
            Action::Bet(a) | Action::Raise(a) | Action::AllIn(a) => a,
            Action::Fold | Action::Check | Action::Call => 0,
        }
    }

    /// Short token used inside information-set history keys, mirroring the
    /// original solver's `encode()` scheme exactly (`f`, `x`, `c`, `b<n>`,
    /// `r<n>`, `a`).
    pub fn encode(self) -> String {
        match self {
            Action::Fold => "f".to_string(),
            Action::Check => "x".to_string(),
            Action::Call => "c".to_string(),
            Action::Bet(a) => format!("b{a}"),
            Action::Raise(a) => format!("r{a}"),
            Action::AllIn(_) => "a".to_string(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Bet(a) => write!(f, "bet({a})"),
            Action::Raise(a) => write!(f, "raise({a})"),
            Action::AllIn(a) => write!(f, "all_in({a})"),
        }
    }
}
