use crate::board::{Partnership, Seat};
use crate::card::Card;
use crate::hand::Hand;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

pub const TRICKS_PER_BOARD: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalPlay {
    #[error("the trick already holds four cards")]
    TrickFull,
    #[error("{0} has already played to this trick")]
    SeatAlreadyPlayed(Seat),
    #[error("{seat} played out of turn, {expected} is to play")]
    OutOfTurn { seat: Seat, expected: Seat },
    #[error("{0} has already been played")]
    CardAlreadyPlayed(Card),
    #[error("{card} is not in {seat}'s hand")]
    NotInHand { seat: Seat, card: Card },
    #[error("the play has ended")]
    PlayComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: Seat,
    plays: Vec<(Seat, Card)>,
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    /// Plays in the order they were made, starting with the leader.
    pub fn plays(&self) -> &[(Seat, Card)] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn next_to_play(&self) -> Option<Seat> {
        (!self.is_complete()).then(|| self.leader.offset(self.plays.len()))
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.plays.first().map(|(_, card)| card.suit)
    }

    pub fn push(&mut self, seat: Seat, card: Card) -> Result<(), IllegalPlay> {
        if self.is_complete() {
            return Err(IllegalPlay::TrickFull);
        }
        if self.plays.iter().any(|(s, _)| *s == seat) {
            return Err(IllegalPlay::SeatAlreadyPlayed(seat));
        }
        let expected = self.leader.offset(self.plays.len());
        if seat != expected {
            return Err(IllegalPlay::OutOfTurn { seat, expected });
        }
        self.plays.push((seat, card));
        Ok(())
    }

    /// The seat that won the trick, once all four cards are in.
    pub fn winner(&self, trump: Option<Suit>) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        winning_play(&self.plays, trump).map(|(seat, _)| seat)
    }
}

/// The winning play among `plays`, the first of which was led.
///
/// The highest trump wins if any trump was played, otherwise the highest
/// card of the suit led. Discards never win.
pub fn winning_play(plays: &[(Seat, Card)], trump: Option<Suit>) -> Option<(Seat, Card)> {
    let (first, rest) = plays.split_first()?;
    let mut best = *first;
    for &(seat, card) in rest {
        let beats = if card.suit == best.1.suit {
            card.rank > best.1.rank
        } else {
            Some(card.suit) == trump
        };
        if beats {
            best = (seat, card);
        }
    }
    Some(best)
}

/// Card-play state machine for one board.
#[derive(Debug, Clone)]
pub struct Play {
    first_leader: Seat,
    trump: Option<Suit>,
    tricks: Vec<Trick>,
    played: HashSet<Card>,
    hands: Option<BTreeMap<Seat, Hand>>,
    ended: bool,
}

impl Play {
    pub fn new(leader: Seat, trump: Option<Suit>) -> Self {
        Self {
            first_leader: leader,
            trump,
            tricks: Vec::new(),
            played: HashSet::new(),
            hands: None,
            ended: false,
        }
    }

    /// Also checks every card against the hand it was dealt to.
    pub fn with_hands(mut self, hands: BTreeMap<Seat, Hand>) -> Self {
        self.hands = Some(hands);
        self
    }

    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn into_tricks(self) -> Vec<Trick> {
        self.tricks
    }

    pub fn completed_tricks(&self) -> usize {
        self.tricks.iter().filter(|t| t.is_complete()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.ended || self.completed_tricks() == TRICKS_PER_BOARD
    }

    /// The seat to play next, or `None` once the play is over.
    pub fn next_to_play(&self) -> Option<Seat> {
        if self.is_complete() {
            return None;
        }
        match self.tricks.last() {
            Some(trick) if !trick.is_complete() => trick.next_to_play(),
            _ => Some(self.next_leader()),
        }
    }

    /// Ends the play early, as after a claim. Later plays are rejected.
    pub fn end(&mut self) {
        self.ended = true;
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), IllegalPlay> {
        if self.is_complete() {
            return Err(IllegalPlay::PlayComplete);
        }
        if self.played.contains(&card) {
            return Err(IllegalPlay::CardAlreadyPlayed(card));
        }
        if let Some(hands) = &self.hands {
            let owner = hands
                .iter()
                .find(|(_, hand)| hand.contains(card))
                .map(|(owner, _)| *owner);
            if owner.is_some_and(|owner| owner != seat) {
                return Err(IllegalPlay::NotInHand { seat, card });
            }
        }

        match self.tricks.last_mut() {
            Some(trick) if !trick.is_complete() => trick.push(seat, card)?,
            _ => {
                let mut trick = Trick::new(self.next_leader());
                trick.push(seat, card)?;
                self.tricks.push(trick);
            }
        }
        self.played.insert(card);
        Ok(())
    }

    pub fn tricks_won_by(&self, partnership: Partnership) -> usize {
        self.tricks
            .iter()
            .filter_map(|t| t.winner(self.trump))
            .filter(|seat| partnership.contains(*seat))
            .count()
    }

    fn next_leader(&self) -> Seat {
        self.tricks
            .last()
            .and_then(|t| t.winner(self.trump))
            .unwrap_or(self.first_leader)
    }
}
