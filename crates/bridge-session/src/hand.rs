use crate::card::Card;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of cards in a fully dealt hand.
pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    /// Builds a hand and puts the cards in PBN order.
    pub fn new(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// True once the hand holds 13 distinct cards.
    pub fn is_full(&self) -> bool {
        self.cards.len() == HAND_SIZE && self.cards.iter().collect::<HashSet<_>>().len() == HAND_SIZE
    }

    /// Sorts into PBN order: spades, hearts, diamonds, clubs, high to low.
    pub fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| b.suit.cmp(&a.suit).then_with(|| b.rank.cmp(&a.rank)));
    }

    /// Cards of one suit, highest first.
    pub fn holding(&self, suit: Suit) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().filter(move |c| c.suit == suit)
    }

    /// Renders the hand as a PBN `S.H.D.C` holding list, e.g. `AK3.QJ2.T98.7654`.
    pub fn to_pbn(&self) -> String {
        let mut sorted = self.clone();
        sorted.sort();
        Suit::PBN_ORDER
            .iter()
            .map(|&suit| sorted.holding(suit).map(|c| c.rank.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join(".")
    }
}
