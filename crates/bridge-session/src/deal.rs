//! Dealing: decoding PBN `Deal` values and shuffling fresh boards.

use crate::board::{Board, Seat, Vulnerability};
use crate::card::Card;
use crate::hand::{Hand, HAND_SIZE};
use crate::rank::Rank;
use crate::suit::Suit;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDeal {
    #[error("deal {0:?} does not start with a seat and a colon")]
    MissingSeat(String),
    #[error("expected 4 hands, found {0}")]
    HandCount(usize),
    #[error("hand {0:?} does not list four suits")]
    SuitCount(String),
    #[error("invalid rank {rank:?} in hand {hand:?}")]
    InvalidRank { hand: String, rank: char },
    #[error("{seat} holds {count} cards instead of 13")]
    WrongSize { seat: Seat, count: usize },
    #[error("{0} is dealt more than once")]
    DuplicateCard(Card),
}

/// Parses one PBN hand, `S.H.D.C`, e.g. `AK3.QJ2.T98.7654`.
///
/// An undealt hand (`-`) has no suits and is rejected.
pub fn parse_hand(s: &str) -> Result<Hand, InvalidDeal> {
    let holdings: Vec<&str> = s.split('.').collect();
    if holdings.len() != 4 {
        return Err(InvalidDeal::SuitCount(s.to_string()));
    }
    let mut cards = Vec::with_capacity(HAND_SIZE);
    for (suit, holding) in Suit::PBN_ORDER.iter().zip(holdings) {
        for c in holding.chars() {
            let rank = Rank::from_char(c).ok_or_else(|| InvalidDeal::InvalidRank {
                hand: s.to_string(),
                rank: c,
            })?;
            cards.push(Card::new(*suit, rank));
        }
    }
    Ok(Hand::new(cards))
}

/// Assigns four hands, listed clockwise from `first`, to their seats.
///
/// Every hand must hold 13 cards and no card may appear twice.
pub fn hands_from_rotation(
    first: Seat,
    hands: [Hand; 4],
) -> Result<BTreeMap<Seat, Hand>, InvalidDeal> {
    let mut seen = HashSet::new();
    let mut by_seat = BTreeMap::new();
    for (i, hand) in hands.into_iter().enumerate() {
        let seat = first.offset(i);
        if hand.len() != HAND_SIZE {
            return Err(InvalidDeal::WrongSize {
                seat,
                count: hand.len(),
            });
        }
        if let Some(card) = hand.cards.iter().find(|card| !seen.insert(**card)) {
            return Err(InvalidDeal::DuplicateCard(*card));
        }
        by_seat.insert(seat, hand);
    }
    Ok(by_seat)
}

/// Decodes the value of a PBN `Deal` tag, `N:<hand> <hand> <hand> <hand>`.
pub fn parse_deal(value: &str) -> Result<BTreeMap<Seat, Hand>, InvalidDeal> {
    let (seat, hands) = value
        .trim()
        .split_once(':')
        .and_then(|(seat, hands)| Some((Seat::from_pbn(seat)?, hands)))
        .ok_or_else(|| InvalidDeal::MissingSeat(value.to_string()))?;
    let hands = hands
        .split_whitespace()
        .map(parse_hand)
        .collect::<Result<Vec<_>, _>>()?;
    let hands: [Hand; 4] = hands
        .try_into()
        .map_err(|hands: Vec<Hand>| InvalidDeal::HandCount(hands.len()))?;
    hands_from_rotation(seat, hands)
}

/// Renders hands as a PBN `Deal` value starting from `first`.
pub fn format_deal(first: Seat, hands: &BTreeMap<Seat, Hand>) -> String {
    let rendered: Vec<String> = (0..4)
        .map(|i| {
            hands
                .get(&first.offset(i))
                .map_or_else(|| "-".to_string(), Hand::to_pbn)
        })
        .collect();
    format!("{}:{}", first, rendered.join(" "))
}

/// Shuffles a full deck and deals 13 cards to each seat, North first.
pub fn deal_hands<R: Rng + ?Sized>(rng: &mut R) -> BTreeMap<Seat, Hand> {
    let mut deck = Card::deck();
    deck.shuffle(rng);
    Seat::ALL
        .iter()
        .zip(deck.chunks(HAND_SIZE))
        .map(|(seat, chunk)| (*seat, Hand::new(chunk.to_vec())))
        .collect()
}

/// A freshly shuffled board with the dealer and vulnerability that go
/// with its number.
pub fn generate_board<R: Rng + ?Sized>(number: u32, rng: &mut R) -> Board {
    Board::new(
        number,
        Seat::dealer_from_board_number(number),
        Vulnerability::from_board_number(number),
        deal_hands(rng),
    )
}

/// Boards numbered `1..=count`.
pub fn generate_boards<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<Board> {
    (1..=count).map(|number| generate_board(number, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCHIPHOL: &str =
        "N:.63.AKQ987.A9732 A8654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85";

    #[test]
    fn test_parse_deal() {
        let hands = parse_deal(SCHIPHOL).unwrap();
        assert_eq!(hands[&Seat::North].to_pbn(), ".63.AKQ987.A9732");
        assert_eq!(hands[&Seat::East].to_pbn(), "A8654.KQ5.T.QJT6");
        assert_eq!(hands[&Seat::West].to_pbn(), "KQT2.AT.J6542.85");
    }

    #[test]
    fn test_parse_deal_rotates_from_first_seat() {
        let from_west = "W:KQT2.AT.J6542.85 .63.AKQ987.A9732 A8654.KQ5.T.QJT6 J973.J98742.3.K4";
        assert_eq!(parse_deal(from_west).unwrap(), parse_deal(SCHIPHOL).unwrap());
    }

    #[test]
    fn test_hands_from_rotation() {
        let hands = [
            parse_hand("KQT2.AT.J6542.85").unwrap(),
            parse_hand(".63.AKQ987.A9732").unwrap(),
            parse_hand("A8654.KQ5.T.QJT6").unwrap(),
            parse_hand("J973.J98742.3.K4").unwrap(),
        ];
        let by_seat = hands_from_rotation(Seat::West, hands).unwrap();
        assert_eq!(by_seat[&Seat::South].to_pbn(), "J973.J98742.3.K4");
    }

    #[test]
    fn test_invalid_deals() {
        assert!(matches!(
            parse_deal(".63.AKQ987.A9732 A8654.KQ5.T.QJT6"),
            Err(InvalidDeal::MissingSeat(_))
        ));
        assert_eq!(
            parse_deal("N:.63.AKQ987.A9732 A8654.KQ5.T.QJT6 J973.J98742.3.K4"),
            Err(InvalidDeal::HandCount(3))
        );
        assert!(matches!(
            parse_deal("N:.63.AKQ987.A9732 - J973.J98742.3.K4 KQT2.AT.J6542.85"),
            Err(InvalidDeal::SuitCount(_))
        ));
        assert!(matches!(
            parse_deal("N:.63.AKQ987.A973Z A8654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85"),
            Err(InvalidDeal::InvalidRank { rank: 'Z', .. })
        ));
        assert_eq!(
            parse_deal("N:.63.AKQ987.A973 A8654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85"),
            Err(InvalidDeal::WrongSize {
                seat: Seat::North,
                count: 12
            })
        );
        // Spade king in both East and West.
        assert_eq!(
            parse_deal("N:.63.AKQ987.A9732 AK654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85"),
            Err(InvalidDeal::DuplicateCard(Card::new(Suit::Spades, Rank::King)))
        );
    }

    #[test]
    fn test_format_deal() {
        let hands = parse_deal(SCHIPHOL).unwrap();
        assert_eq!(format_deal(Seat::North, &hands), SCHIPHOL);
    }

    #[test]
    fn test_generate_boards() {
        let mut rng = StdRng::seed_from_u64(7);
        let boards = generate_boards(32, &mut rng);
        assert_eq!(boards.len(), 32);
        for (i, board) in boards.iter().enumerate() {
            assert_eq!(board.number, i as u32 + 1);
            assert!(board.is_dealt());
            let all: HashSet<Card> = board
                .hands
                .values()
                .flat_map(|h| h.cards.iter().copied())
                .collect();
            assert_eq!(all.len(), 52);
        }
        for b in 0..28 {
            assert_eq!(boards[b].dealer, boards[b + 4].dealer);
        }
        for b in 0..16 {
            assert_eq!(boards[b].vulnerability, boards[b + 16].vulnerability);
        }
        assert_eq!(boards[0].dealer, Seat::North);
        assert_eq!(boards[2].dealer, Seat::South);
    }
}
