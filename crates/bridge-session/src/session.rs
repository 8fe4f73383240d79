use crate::auction::Auction;
use crate::board::{Board, Seat};
use crate::contract::Contract;
use crate::deal;
use crate::error::Result;
use crate::io::pbn;
use crate::play::Trick;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The event all boards and games of a session belong to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Competition {
    /// From the `Event` tag.
    pub name: String,
    /// Scoring method from the `Scoring` tag, e.g. `IMP` or `MP`.
    pub scoring: String,
}

/// The bidding and play at one table for one board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Game {
    pub board_number: u32,
    pub players: BTreeMap<Seat, String>,
    pub auction: Option<Auction>,
    pub tricks: Vec<Trick>,
    /// Contract stated by the `Contract` and `Declarer` tags.
    pub declared_contract: Option<Contract>,
    /// Tricks taken by declarer, from the `Result` tag.
    pub result: Option<u8>,
}

impl Game {
    pub fn player(&self, seat: Seat) -> Option<&str> {
        self.players.get(&seat).map(String::as_str)
    }

    /// The auction's contract, or the declared one when there is no
    /// closed auction.
    pub fn contract(&self) -> Option<Contract> {
        match &self.auction {
            Some(auction) if auction.is_closed() => auction.contract(),
            _ => self.declared_contract,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub competition: Competition,
    pub site: String,
    /// PBN date literal, `YYYY.MM.DD`, unknown parts as `?`.
    pub date: String,
    pub boards: Vec<Board>,
    pub games: Vec<Game>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports a whole PBN document with default options.
    pub fn import_pbn(source: &str) -> Result<Session> {
        pbn::import_pbn(source)
    }

    /// A session of `count` freshly shuffled boards and no games.
    pub fn generate_boards(count: u32) -> Session {
        Self::generate_boards_with(count, &mut rand::thread_rng())
    }

    pub fn generate_boards_with<R: rand::Rng + ?Sized>(count: u32, rng: &mut R) -> Session {
        Session {
            boards: deal::generate_boards(count, rng),
            ..Session::default()
        }
    }

    pub fn board(&self, number: u32) -> Option<&Board> {
        self.boards.iter().find(|b| b.number == number)
    }

    pub fn games_for(&self, number: u32) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(move |g| g.board_number == number)
    }

    pub fn to_pbn(&self) -> String {
        pbn::export_session(self)
    }
}
