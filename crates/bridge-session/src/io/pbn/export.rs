//! Writes sessions back out as PBN.

use super::tokenizer::escape;
use crate::auction::Auction;
use crate::board::{Board, Seat, Vulnerability};
use crate::deal;
use crate::play::Trick;
use crate::session::{Game, Session};
use std::collections::BTreeSet;

/// One PBN record: the board, and the game played on it if there is one.
pub fn export_board(board: &Board, game: Option<&Game>, session: &Session) -> String {
    let mut s = String::new();
    push_tag(&mut s, "Event", &session.competition.name);
    push_tag(&mut s, "Site", &session.site);
    push_tag(&mut s, "Date", &session.date);
    push_tag(&mut s, "Board", &board.number.to_string());
    for seat in [Seat::West, Seat::North, Seat::East, Seat::South] {
        let name = game.and_then(|g| g.player(seat)).unwrap_or_default();
        push_tag(&mut s, player_tag(seat), name);
    }
    push_tag(&mut s, "Dealer", &board.dealer.to_string());
    push_tag(&mut s, "Vulnerable", board.vulnerability.to_pbn());
    let deal = if board.is_dealt() {
        deal::format_deal(board.dealer, &board.hands)
    } else {
        String::new()
    };
    push_tag(&mut s, "Deal", &deal);
    push_tag(&mut s, "Scoring", &session.competition.scoring);

    if let Some(game) = game {
        push_game(&mut s, game);
    }
    s
}

/// The whole session, one record per game plus one for each board nobody
/// played, in board order.
pub fn export_session(session: &Session) -> String {
    let numbers: BTreeSet<u32> = session
        .boards
        .iter()
        .map(|b| b.number)
        .chain(session.games.iter().map(|g| g.board_number))
        .collect();

    let mut records = Vec::new();
    for number in numbers {
        let board = session
            .board(number)
            .cloned()
            .unwrap_or_else(|| bare_board(number));
        let mut games = session.games_for(number).peekable();
        if games.peek().is_none() {
            records.push(export_board(&board, None, session));
        }
        for game in games {
            records.push(export_board(&board, Some(game), session));
        }
    }
    records.join("\n")
}

fn bare_board(number: u32) -> Board {
    Board::new(
        number,
        Seat::dealer_from_board_number(number),
        Vulnerability::from_board_number(number),
        Default::default(),
    )
}

fn push_game(s: &mut String, game: &Game) {
    let contract = game.contract();
    let declarer = contract.map(|c| c.declarer.to_string()).unwrap_or_default();
    push_tag(s, "Declarer", &declarer);
    let contract = match (&game.auction, contract) {
        (_, Some(contract)) => contract.to_pbn(),
        (Some(auction), None) if auction.is_passed_out() => "Pass".to_string(),
        _ => String::new(),
    };
    push_tag(s, "Contract", &contract);
    let result = game.result.map(|r| r.to_string()).unwrap_or_default();
    push_tag(s, "Result", &result);

    if let Some(auction) = &game.auction {
        push_auction(s, auction);
    }
    if let Some(first) = game.tricks.first() {
        push_play(s, first.leader(), &game.tricks);
    }
}

fn push_auction(s: &mut String, auction: &Auction) {
    push_tag(s, "Auction", &auction.dealer.to_string());
    for row in auction.calls().chunks(4) {
        let row: Vec<String> = row.iter().map(|call| call.render()).collect();
        s.push_str(&row.join(" "));
        s.push('\n');
    }
}

/// Columns are fixed seats clockwise from the opening leader; a seat with
/// no card in a trick gets `-`.
fn push_play(s: &mut String, leader: Seat, tricks: &[Trick]) {
    push_tag(s, "Play", &leader.to_string());
    for trick in tricks {
        let row: Vec<String> = (0..4)
            .map(|i| {
                let seat = leader.offset(i);
                trick
                    .plays()
                    .iter()
                    .find(|(played_by, _)| *played_by == seat)
                    .map_or_else(|| "-".to_string(), |(_, card)| card.to_string())
            })
            .collect();
        s.push_str(&row.join(" "));
        s.push('\n');
    }
    s.push_str("*\n");
}

/// Unknown values are written as `?`.
fn push_tag(s: &mut String, name: &str, value: &str) {
    let value = if value.is_empty() { "?".to_string() } else { escape(value) };
    s.push_str(&format!("[{} \"{}\"]\n", name, value));
}

fn player_tag(seat: Seat) -> &'static str {
    match seat {
        Seat::North => "North",
        Seat::East => "East",
        Seat::South => "South",
        Seat::West => "West",
    }
}
