use crate::hand::Hand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Seat {
    #[default]
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub fn contains(self, seat: Seat) -> bool {
        seat.partnership() == self
    }
}

impl Seat {
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub fn partnership(self) -> Partnership {
        match self {
            Seat::North | Seat::South => Partnership::NS,
            Seat::East | Seat::West => Partnership::EW,
        }
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// The seat `n` places further round the table, clockwise.
    pub fn offset(self, n: usize) -> Self {
        Seat::ALL[(self.idx() + n) % 4]
    }

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn partner(self) -> Self {
        self.offset(2)
    }

    pub fn to_char(self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Seat::North),
            'E' => Some(Seat::East),
            'S' => Some(Seat::South),
            'W' => Some(Seat::West),
            _ => None,
        }
    }

    /// Parses a one-letter seat tag value such as `N`.
    pub fn from_pbn(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn dealer_from_board_number(board_number: u32) -> Self {
        let index = (board_number + 3) % 4;
        Seat::ALL[index as usize]
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    All,
}

impl Vulnerability {
    pub fn from_board_number(board_number: u32) -> Self {
        // Standard duplicate schedule, repeating every 16 boards.
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::All,
        }
    }

    pub fn from_pbn(s: &str) -> Option<Self> {
        match s.trim() {
            "None" | "Love" | "-" => Some(Vulnerability::None),
            "NS" => Some(Vulnerability::NS),
            "EW" => Some(Vulnerability::EW),
            "All" | "Both" => Some(Vulnerability::All),
            _ => None,
        }
    }

    pub fn to_pbn(self) -> &'static str {
        match self {
            Vulnerability::None => "None",
            Vulnerability::NS => "NS",
            Vulnerability::EW => "EW",
            Vulnerability::All => "All",
        }
    }
}

impl fmt::Display for Vulnerability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_pbn())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub number: u32,
    pub dealer: Seat,
    pub vulnerability: Vulnerability,
    pub hands: BTreeMap<Seat, Hand>,
}

impl Board {
    pub fn new(
        number: u32,
        dealer: Seat,
        vulnerability: Vulnerability,
        hands: BTreeMap<Seat, Hand>,
    ) -> Self {
        Self {
            number,
            dealer,
            vulnerability,
            hands,
        }
    }

    pub fn get_hand(&self, seat: Seat) -> Option<&Hand> {
        self.hands.get(&seat)
    }

    /// True when all four seats hold 13 cards.
    pub fn is_dealt(&self) -> bool {
        Seat::ALL
            .iter()
            .all(|seat| self.get_hand(*seat).is_some_and(Hand::is_full))
    }
}
