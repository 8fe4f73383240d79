use bridge_session::board::{Board, Seat};
use bridge_session::hand::Hand;
use bridge_session::session::{Game, Session};
use bridge_session::suit::Suit;
use serde::Serialize;
use std::collections::BTreeMap;

pub fn get_hand_suits(hand: &Hand) -> Vec<String> {
    Suit::PBN_ORDER
        .iter()
        .map(|suit| {
            let cards: String = hand.holding(*suit).map(|c| c.rank.to_char()).collect();
            format!(
                "{}: {}",
                suit.to_char(),
                if cards.is_empty() { "-" } else { &cards }
            )
        })
        .collect()
}

pub fn format_hands_table(hands: &BTreeMap<Seat, Hand>) -> String {
    let empty = vec!["-".to_string(); 4];
    let suits = |seat: Seat| hands.get(&seat).map(get_hand_suits).unwrap_or_else(|| empty.clone());
    let (n, e, s, w) = (
        suits(Seat::North),
        suits(Seat::East),
        suits(Seat::South),
        suits(Seat::West),
    );

    let mut out = String::new();
    let indent = "        ";
    out.push_str(&format!("{}North\n", indent));
    for line in &n {
        out.push_str(&format!("{}{}\n", indent, line));
    }
    out.push('\n');
    out.push_str(&format!("{:<20} East\n", "West"));
    for (west, east) in w.iter().zip(&e) {
        out.push_str(&format!("{:<20} {}\n", west, east));
    }
    out.push('\n');
    out.push_str(&format!("{}South\n", indent));
    for line in &s {
        out.push_str(&format!("{}{}\n", indent, line));
    }
    out
}

/// One line per game: board, contract and how far the play got.
pub fn format_game(game: &Game) -> String {
    let contract = match (&game.auction, game.contract()) {
        (_, Some(contract)) => contract.to_string(),
        (Some(auction), None) if auction.is_passed_out() => "passed out".to_string(),
        _ => "-".to_string(),
    };
    let result = game
        .result
        .map_or_else(|| "?".to_string(), |r| r.to_string());
    let players: Vec<&str> = Seat::ALL
        .iter()
        .map(|seat| game.player(*seat).unwrap_or("?"))
        .collect();
    format!(
        "{:>3} | {:<12} | {:>2} tricks | result {:>2} | {}",
        game.board_number,
        contract,
        game.tricks.len(),
        result,
        players.join(" / ")
    )
}

pub fn format_board(board: &Board) -> String {
    let mut out = format!(
        "Board {}  Dealer {}  Vulnerable {}\n",
        board.number, board.dealer, board.vulnerability
    );
    if board.is_dealt() {
        out.push('\n');
        out.push_str(&format_hands_table(&board.hands));
    }
    out
}

pub fn format_session(session: &Session, show_hands: bool) -> String {
    let mut out = String::new();
    let or_unknown = |s: &str| if s.is_empty() { "?".to_string() } else { s.to_string() };
    out.push_str(&format!("Event: {}\n", or_unknown(&session.competition.name)));
    out.push_str(&format!("Site:  {}\n", or_unknown(&session.site)));
    out.push_str(&format!("Date:  {}\n", or_unknown(&session.date)));
    out.push_str(&format!(
        "{} boards, {} games\n",
        session.boards.len(),
        session.games.len()
    ));
    if show_hands {
        for board in &session.boards {
            out.push('\n');
            out.push_str(&format_board(board));
        }
    }
    if !session.games.is_empty() {
        out.push('\n');
        for game in &session.games {
            out.push_str(&format_game(game));
            out.push('\n');
        }
    }
    out
}

/// Counts reported by `pbn inspect --format stats`.
#[derive(Debug, Serialize)]
pub struct SessionStats<'a> {
    pub event: &'a str,
    pub site: &'a str,
    pub date: &'a str,
    pub boards: usize,
    pub games: usize,
    pub complete_auctions: usize,
    pub tricks: usize,
}

impl<'a> SessionStats<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            event: &session.competition.name,
            site: &session.site,
            date: &session.date,
            boards: session.boards.len(),
            games: session.games.len(),
            complete_auctions: session
                .games
                .iter()
                .filter(|g| g.auction.as_ref().is_some_and(|a| a.is_closed()))
                .count(),
            tricks: session.games.iter().map(|g| g.tricks.len()).sum(),
        }
    }
}
