use crate::board::Seat;
use crate::call::Call;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

impl DoubleStatus {
    pub fn suffix(self) -> &'static str {
        match self {
            DoubleStatus::Undoubled => "",
            DoubleStatus::Doubled => "X",
            DoubleStatus::Redoubled => "XX",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Seat,
}

impl Contract {
    /// Parses the value of a PBN `Contract` tag such as `5HX` or `3NT`.
    ///
    /// Returns `Some(None)` for `Pass`, a passed-out board.
    pub fn from_pbn(value: &str, declarer: Seat) -> Option<Option<Contract>> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("pass") {
            return Some(None);
        }
        let upper = value.to_ascii_uppercase();
        let (bid, double_status) = if let Some(bid) = upper.strip_suffix("XX") {
            (bid, DoubleStatus::Redoubled)
        } else if let Some(bid) = upper.strip_suffix('X') {
            (bid, DoubleStatus::Doubled)
        } else {
            (upper.as_str(), DoubleStatus::Undoubled)
        };
        match bid.parse::<Call>().ok()? {
            Call::Bid { level, strain } => Some(Some(Contract {
                level,
                strain,
                double_status,
                declarer,
            })),
            _ => None,
        }
    }

    /// The contract without declarer, as written in a PBN `Contract` tag.
    pub fn to_pbn(&self) -> String {
        format!("{}{}{}", self.level, self.strain, self.double_status.suffix())
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.to_pbn(), self.declarer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_display() {
        let contract = Contract {
            level: 5,
            strain: Strain::Hearts,
            double_status: DoubleStatus::Doubled,
            declarer: Seat::South,
        };
        assert_eq!(contract.to_string(), "5HX by S");
    }

    #[test]
    fn test_contract_from_pbn() {
        let contract = Contract::from_pbn("3NTXX", Seat::East).flatten().unwrap();
        assert_eq!(contract.level, 3);
        assert_eq!(contract.strain, Strain::NoTrump);
        assert_eq!(contract.double_status, DoubleStatus::Redoubled);
        assert_eq!(contract.to_string(), "3NTXX by E");

        assert_eq!(Contract::from_pbn("Pass", Seat::North), Some(None));
        assert_eq!(Contract::from_pbn("9Z", Seat::North), None);
    }
}
