use serde::{Deserialize, Serialize};
use std::fmt;

/// Card rank, Two low to Ace high. The discriminant is the rank's pip value
/// with honours continuing from Ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
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

/// PBN rank letters, lowest first, indexed like [`Rank::ALL`].
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

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

    pub fn to_char(self) -> char {
        RANK_CHARS[self as usize - 2]
    }

    pub fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|&r| r == c)
            .map(|i| Rank::ALL[i])
    }

    /// Parses a rank as written after a suit letter. `10` is accepted for
    /// Ten.
    pub fn from_token(s: &str) -> Option<Self> {
        if s == "10" {
            return Some(Rank::Ten);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
