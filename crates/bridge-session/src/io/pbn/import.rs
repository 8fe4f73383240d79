//! Assembles a [`Session`] from PBN records.
//!
//! Every `[Board]` tag closes the board and game in progress. A board is
//! kept once a `Board` or `Deal` tag was seen for it; a game only when
//! player names or an `Auction` tag were seen.

use super::tokenizer::{LineBuffer, Record, Tag, TagPair, Tokenizer};
use crate::auction::Auction;
use crate::board::{Board, Seat, Vulnerability};
use crate::call::Call;
use crate::card::Card;
use crate::contract::Contract;
use crate::deal;
use crate::error::{ParseError, Result};
use crate::hand::Hand;
use crate::options::{ImportOptions, MetadataPolicy};
use crate::play::{IllegalPlay, Play};
use crate::session::{Game, Session};
use crate::suit::Suit;
use log::{debug, info, trace, warn};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Imports a complete PBN document with default options.
pub fn import_pbn(source: &str) -> Result<Session> {
    import_pbn_with(source, &ImportOptions::default())
}

pub fn import_pbn_with(source: &str, options: &ImportOptions) -> Result<Session> {
    let mut importer = SessionImporter::new(options.clone());
    importer.feed(source)?;
    importer.finish()
}

/// Imports from a reader line by line.
pub fn import_reader<R: BufRead>(reader: R, options: &ImportOptions) -> Result<Session> {
    let mut importer = SessionImporter::new(options.clone());
    for line in reader.lines() {
        importer.feed_line(&line?)?;
    }
    importer.finish()
}

/// Push-style importer. Text may arrive in chunks split anywhere; records
/// are only processed once their line is complete.
#[derive(Debug)]
pub struct SessionImporter {
    buffer: LineBuffer,
    tokenizer: Tokenizer,
    cursor: Cursor,
}

impl SessionImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            buffer: LineBuffer::new(),
            tokenizer: Tokenizer::new(),
            cursor: Cursor::new(options),
        }
    }

    pub fn feed(&mut self, chunk: &str) -> Result<()> {
        for line in self.buffer.push(chunk) {
            self.feed_line(&line)?;
        }
        Ok(())
    }

    /// Processes one complete line, without its terminator.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        let record = self.tokenizer.tokenize(line)?;
        let number = self.tokenizer.line_number();
        self.cursor.apply(record, number, line)
    }

    /// Processes any trailing partial line and closes the board and game
    /// in progress.
    pub fn finish(mut self) -> Result<Session> {
        if let Some(line) = self.buffer.flush() {
            self.feed_line(&line)?;
        }
        let session = self.cursor.finish(self.tokenizer.line_number())?;
        info!(
            "imported {} boards and {} games",
            session.boards.len(),
            session.games.len()
        );
        Ok(session)
    }
}

#[derive(Debug, Default)]
struct BoardBuilder {
    /// Line of the tag that opened this board.
    line: usize,
    started: bool,
    number: Option<u32>,
    dealer: Option<Seat>,
    vulnerability: Option<Vulnerability>,
    hands: BTreeMap<Seat, Hand>,
}

impl BoardBuilder {
    fn is_populated(&self) -> bool {
        self.started || !self.hands.is_empty()
    }

    fn finish(self, number: u32) -> Board {
        Board::new(
            number,
            self.dealer.unwrap_or_default(),
            self.vulnerability.unwrap_or_default(),
            self.hands,
        )
    }
}

#[derive(Debug, Default)]
struct GameBuilder {
    opened: bool,
    players: BTreeMap<Seat, String>,
    auction: Option<Auction>,
    play: Option<Play>,
    declarer: Option<Seat>,
    contract: Option<String>,
    result: Option<u8>,
}

impl GameBuilder {
    fn declared_contract(&self) -> Option<Contract> {
        let declarer = self.declarer?;
        Contract::from_pbn(self.contract.as_deref()?, declarer).flatten()
    }

    /// The trump suit for the play: from the auction, else the declared
    /// contract, else no trump.
    fn trump(&self) -> Option<Suit> {
        let contract = match &self.auction {
            Some(auction) if auction.is_closed() => auction.contract(),
            _ => self.declared_contract(),
        };
        contract.and_then(|c| c.strain.to_suit())
    }

    fn finish(self, board_number: u32, options: &ImportOptions) -> Option<Game> {
        if !self.opened {
            return None;
        }
        if let Some(auction) = &self.auction {
            if !auction.is_closed() && !options.keep_open_auctions {
                warn!(
                    "dropping game on board {}: auction never closed",
                    board_number
                );
                return None;
            }
        }
        let declared_contract = self.declared_contract();
        Some(Game {
            board_number,
            players: self.players,
            auction: self.auction,
            tricks: self.play.map(Play::into_tricks).unwrap_or_default(),
            declared_contract,
            result: self.result,
        })
    }
}

#[derive(Debug, Default)]
enum Section {
    #[default]
    None,
    Auction,
    Play {
        first: Seat,
        row: Vec<Option<Card>>,
    },
}

/// Import state: the session so far and the board and game being built.
#[derive(Debug)]
struct Cursor {
    options: ImportOptions,
    session: Session,
    board: BoardBuilder,
    game: GameBuilder,
    section: Section,
}

impl Cursor {
    fn new(options: ImportOptions) -> Self {
        Self {
            options,
            session: Session::default(),
            board: BoardBuilder::default(),
            game: GameBuilder::default(),
            section: Section::None,
        }
    }

    fn apply(&mut self, record: Record, line: usize, text: &str) -> Result<()> {
        match record {
            Record::Tag(pair) => {
                self.close_section(line, text)?;
                self.apply_tag(pair, line, text)
            }
            Record::Line(fields) => self.apply_fields(&fields, line, text),
            Record::Blank => self.close_section(line, text),
            Record::Comment(_) => Ok(()),
        }
    }

    fn finish(mut self, line: usize) -> Result<Session> {
        self.close_section(line, "")?;
        self.finish_board()?;
        Ok(self.session)
    }

    fn apply_tag(&mut self, pair: TagPair, line: usize, text: &str) -> Result<()> {
        let TagPair { tag, value } = pair;

        // `[Board "?"]` still separates boards; it just carries no number.
        if tag == Tag::Board {
            self.finish_board()?;
            self.board.started = true;
            self.board.line = line;
            self.board.number = match value {
                Some(v) => match v.trim().parse::<u32>() {
                    Ok(0) => {
                        return Err(ParseError::malformed(line, text, "board number out of range"))
                    }
                    Ok(number) => Some(number),
                    Err(_) => {
                        return Err(ParseError::malformed(line, text, "invalid board number"))
                    }
                },
                None => None,
            };
            debug!("board {:?} starts at line {}", self.board.number, line);
            return Ok(());
        }

        let Some(value) = value else {
            trace!("ignoring unknown value for {}", tag.name());
            return Ok(());
        };

        match tag {
            Tag::Event => {
                set_metadata(&mut self.session.competition.name, value, self.options.metadata)
            }
            Tag::Site => set_metadata(&mut self.session.site, value, self.options.metadata),
            Tag::Date => set_metadata(&mut self.session.date, value, self.options.metadata),
            Tag::Scoring => set_metadata(
                &mut self.session.competition.scoring,
                value,
                self.options.metadata,
            ),
            Tag::Dealer => self.board.dealer = Some(parse_seat(&value, line, text)?),
            Tag::Vulnerable => {
                let vulnerability = Vulnerability::from_pbn(&value)
                    .ok_or_else(|| ParseError::malformed(line, text, "invalid vulnerability"))?;
                self.board.vulnerability = Some(vulnerability);
            }
            Tag::Deal => {
                if !self.board.is_populated() {
                    self.board.line = line;
                }
                self.board.hands =
                    deal::parse_deal(&value).map_err(|source| ParseError::InvalidDeal {
                        line,
                        text: text.to_string(),
                        source,
                    })?;
            }
            Tag::West | Tag::North | Tag::East | Tag::South => {
                if let Some(seat) = tag.player_seat() {
                    self.game.players.insert(seat, value);
                    self.game.opened = true;
                }
            }
            Tag::Declarer => self.game.declarer = Some(parse_seat(&value, line, text)?),
            Tag::Contract => {
                // Checked now so a bad value points at its own line.
                if Contract::from_pbn(&value, Seat::North).is_none() {
                    return Err(ParseError::malformed(line, text, "invalid contract"));
                }
                self.game.contract = Some(value);
            }
            Tag::Result => match value.trim().parse::<u8>() {
                Ok(tricks) if tricks <= 13 => self.game.result = Some(tricks),
                _ => debug!("ignoring result {:?} at line {}", value, line),
            },
            Tag::Auction => {
                if self.game.auction.is_some() {
                    return Err(ParseError::malformed(line, text, "second auction for board"));
                }
                let first = parse_seat(&value, line, text)?;
                self.game.auction = Some(Auction::new(first));
                self.game.opened = true;
                self.section = Section::Auction;
                debug!("auction opened by {} at line {}", first, line);
            }
            Tag::Play => {
                if self.game.play.is_some() {
                    return Err(ParseError::malformed(line, text, "second play section for board"));
                }
                let first = parse_seat(&value, line, text)?;
                let mut play = Play::new(first, self.game.trump());
                if self.options.check_card_ownership && !self.board.hands.is_empty() {
                    play = play.with_hands(self.board.hands.clone());
                }
                self.game.play = Some(play);
                self.section = Section::Play {
                    first,
                    row: Vec::with_capacity(4),
                };
                debug!("play opened by {} at line {}", first, line);
            }
            Tag::Board | Tag::Note | Tag::Other(_) => {}
        }
        Ok(())
    }

    fn apply_fields(&mut self, fields: &[String], line: usize, text: &str) -> Result<()> {
        match self.section {
            Section::None => {
                trace!("ignoring data line {}", line);
                Ok(())
            }
            Section::Auction => self.apply_calls(fields, line, text),
            Section::Play { .. } => self.apply_cards(fields, line, text),
        }
    }

    fn apply_calls(&mut self, fields: &[String], line: usize, text: &str) -> Result<()> {
        let Some(auction) = self.game.auction.as_mut() else {
            return Ok(());
        };
        let illegal = |source| ParseError::IllegalCall {
            line,
            text: text.to_string(),
            source,
        };
        for field in fields {
            match field.as_str() {
                "*" => {
                    self.section = Section::None;
                    break;
                }
                "AP" => auction.pass_out_remaining().map_err(illegal)?,
                "+" | "-" => {}
                token if is_annotation(token) => {}
                token => {
                    let call: Call = strip_suffix(token)
                        .parse()
                        .map_err(|_| ParseError::malformed(line, text, "invalid call"))?;
                    auction.push(call).map_err(illegal)?;
                }
            }
        }
        Ok(())
    }

    fn apply_cards(&mut self, fields: &[String], line: usize, text: &str) -> Result<()> {
        for field in fields {
            let entry = match field.as_str() {
                "*" => {
                    self.flush_row(line, text)?;
                    self.section = Section::None;
                    return Ok(());
                }
                "-" => None,
                token if is_annotation(token) => continue,
                token => Some(
                    strip_suffix(token)
                        .parse::<Card>()
                        .map_err(|_| ParseError::malformed(line, text, "invalid card"))?,
                ),
            };
            let full = match &mut self.section {
                Section::Play { row, .. } => {
                    row.push(entry);
                    row.len() == 4
                }
                _ => false,
            };
            if full {
                self.flush_row(line, text)?;
            }
        }
        Ok(())
    }

    /// Plays one row of the play section as a trick. Columns are fixed
    /// seats clockwise from the `Play` tag's seat; the trick itself starts
    /// with whoever won the last one.
    fn flush_row(&mut self, line: usize, text: &str) -> Result<()> {
        let Section::Play { first, row } = &mut self.section else {
            return Ok(());
        };
        if row.is_empty() {
            return Ok(());
        }
        let first = *first;
        let row = std::mem::take(row);
        let Some(play) = self.game.play.as_mut() else {
            return Ok(());
        };
        let illegal = |source| ParseError::IllegalPlay {
            line,
            text: text.to_string(),
            source,
        };

        let Some(leader) = play.next_to_play() else {
            if row.iter().any(Option::is_some) {
                return Err(illegal(IllegalPlay::PlayComplete));
            }
            return Ok(());
        };
        for i in 0..4 {
            let seat = leader.offset(i);
            let column = (seat.idx() + 4 - first.idx()) % 4;
            match row.get(column).copied().flatten() {
                Some(card) => play.play(seat, card).map_err(illegal)?,
                None => play.end(),
            }
        }
        Ok(())
    }

    fn close_section(&mut self, line: usize, text: &str) -> Result<()> {
        if matches!(self.section, Section::Play { .. }) {
            self.flush_row(line, text)?;
        }
        self.section = Section::None;
        Ok(())
    }

    /// Appends the board and game in progress and starts fresh ones.
    fn finish_board(&mut self) -> Result<()> {
        let board = std::mem::take(&mut self.board);
        let game = std::mem::take(&mut self.game);
        if !board.is_populated() && !game.opened {
            return Ok(());
        }
        let line = board.line;
        let number = match board.number {
            Some(number) => number,
            None => self
                .session
                .boards
                .last()
                .map_or(Some(1), |b| b.number.checked_add(1))
                .ok_or_else(|| {
                    ParseError::malformed(line, "[Board \"?\"]", "board number out of range")
                })?,
        };

        if board.is_populated() {
            let given_dealer = board.dealer;
            let given_vulnerability = board.vulnerability;
            let board = board.finish(number);
            match self.session.boards.last() {
                // The same board played again at another table. Whatever it
                // states must agree with the first table.
                Some(last) if last.number == number => {
                    let conflict = if !board.hands.is_empty() && board.hands != last.hands {
                        Some("repeated board with a different deal")
                    } else if given_dealer.is_some_and(|d| d != last.dealer) {
                        Some("repeated board with a different dealer")
                    } else if given_vulnerability.is_some_and(|v| v != last.vulnerability) {
                        Some("repeated board with a different vulnerability")
                    } else {
                        None
                    };
                    if let Some(reason) = conflict {
                        return Err(ParseError::malformed(
                            line,
                            &format!("[Board \"{}\"]", number),
                            reason,
                        ));
                    }
                }
                Some(last) if last.number > number => {
                    return Err(ParseError::malformed(
                        line,
                        &format!("[Board \"{}\"]", number),
                        "board number out of order",
                    ));
                }
                _ => {
                    debug!("board {} finished", number);
                    self.session.boards.push(board);
                }
            }
        }

        if let Some(game) = game.finish(number, &self.options) {
            debug!("game on board {} finished", number);
            self.session.games.push(game);
        }
        Ok(())
    }
}

fn set_metadata(field: &mut String, value: String, policy: MetadataPolicy) {
    match policy {
        MetadataPolicy::FirstWriteWins if !field.is_empty() => {
            if *field != value {
                debug!("keeping {:?} over {:?}", field, value);
            }
        }
        _ => *field = value,
    }
}

fn parse_seat(value: &str, line: usize, text: &str) -> Result<Seat> {
    Seat::from_pbn(value).ok_or_else(|| ParseError::malformed(line, text, "invalid seat"))
}

/// Note references (`=1=`) and numeric annotation glyphs (`$4`).
fn is_annotation(token: &str) -> bool {
    (token.len() > 2 && token.starts_with('=') && token.ends_with('=')) || token.starts_with('$')
}

/// Drops trailing `!` and `?` commentary marks, as in `1S!` or `HQ?!`.
fn strip_suffix(token: &str) -> &str {
    token.trim_end_matches(['!', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::IllegalCall;
    use crate::contract::DoubleStatus;
    use crate::strain::Strain;

    const DEAL: &str = "N:.63.AKQ987.A9732 A8654.KQ5.T.QJT6 J973.J98742.3.K4 KQT2.AT.J6542.85";

    fn board_header(number: u32) -> String {
        format!(
            "[Board \"{number}\"]\n[Dealer \"N\"]\n[Vulnerable \"None\"]\n[Deal \"{DEAL}\"]\n"
        )
    }

    #[test]
    fn test_board_only_record() {
        let pbn = format!(
            "[Event \"Club night\"]\n[Site \"Delft\"]\n[Date \"2016.08.16\"]\n{}",
            board_header(1)
        );
        let session = import_pbn(&pbn).unwrap();
        assert_eq!(session.competition.name, "Club night");
        assert_eq!(session.site, "Delft");
        assert_eq!(session.date, "2016.08.16");
        assert_eq!(session.boards.len(), 1);
        assert!(session.games.is_empty());
        assert!(session.boards[0].is_dealt());
    }

    #[test]
    fn test_question_marks_are_ignored() {
        let pbn = format!(
            "[Event \"Pairs\"]\n{}[Event \"?\"]\n[Site \"?\"]\n[Date \"?\"]\n[West \"?\"]\n[North \"?\"]\n[East \"?\"]\n[South \"?\"]\n[Dealer \"?\"]\n",
            board_header(1)
        );
        let session = import_pbn(&pbn).unwrap();
        assert_eq!(session.competition.name, "Pairs");
        assert_eq!(session.site, "");
        assert_eq!(session.date, "");
        assert_eq!(session.boards[0].dealer, Seat::North);
        assert!(session.games.is_empty());
    }

    #[test]
    fn test_metadata_policies() {
        let pbn = format!(
            "[Event \"First\"]\n{}[Event \"Second\"]\n{}",
            board_header(1),
            board_header(2)
        );
        let last = import_pbn(&pbn).unwrap();
        assert_eq!(last.competition.name, "Second");

        let options = ImportOptions {
            metadata: MetadataPolicy::FirstWriteWins,
            ..ImportOptions::default()
        };
        let first = import_pbn_with(&pbn, &options).unwrap();
        assert_eq!(first.competition.name, "First");
        assert_eq!(first.boards.len(), 2);
    }

    #[test]
    fn test_players_open_a_game() {
        let pbn = format!("{}[West \"Podgor\"]\n", board_header(4));
        let session = import_pbn(&pbn).unwrap();
        assert_eq!(session.games.len(), 1);
        let game = &session.games[0];
        assert_eq!(game.board_number, 4);
        assert_eq!(game.player(Seat::West), Some("Podgor"));
        assert!(game.auction.is_none());
        assert!(game.tricks.is_empty());
    }

    #[test]
    fn test_auction_with_all_pass_and_annotations() {
        let pbn = format!(
            "{}[Auction \"N\"]\n1NT! $1 2C =1=\nAP\n[Note \"1:Stayman\"]\n",
            board_header(1)
        );
        let session = import_pbn(&pbn).unwrap();
        let auction = session.games[0].auction.as_ref().unwrap();
        assert!(auction.is_closed());
        assert_eq!(auction.calls().len(), 5);
        assert_eq!(auction.contract().unwrap().to_string(), "2C by E");
    }

    #[test]
    fn test_open_auction_drops_game() {
        let pbn = format!("{}[Auction \"N\"]\n1NT Pass\n", board_header(1));
        let session = import_pbn(&pbn).unwrap();
        assert_eq!(session.boards.len(), 1);
        assert!(session.games.is_empty());

        let options = ImportOptions {
            keep_open_auctions: true,
            ..ImportOptions::default()
        };
        let session = import_pbn_with(&pbn, &options).unwrap();
        assert_eq!(session.games.len(), 1);
        assert!(!session.games[0].auction.as_ref().unwrap().is_closed());
    }

    #[test]
    fn test_illegal_call_reports_line() {
        let pbn = format!("{}[Auction \"N\"]\n1H 1D\n", board_header(1));
        match import_pbn(&pbn) {
            Err(ParseError::IllegalCall { line, source, .. }) => {
                assert_eq!(line, 6);
                assert!(matches!(source, IllegalCall::InsufficientBid { .. }));
            }
            other => panic!("expected IllegalCall, got {other:?}"),
        }

        let pbn = format!("{}[Auction \"N\"]\nPass X\n", board_header(1));
        assert!(matches!(
            import_pbn(&pbn),
            Err(ParseError::IllegalCall {
                source: IllegalCall::DoubleNotAllowed,
                ..
            })
        ));
    }

    #[test]
    fn test_calls_after_close_are_illegal() {
        let pbn = format!("{}[Auction \"N\"]\n1C Pass Pass Pass\n1D\n", board_header(1));
        assert!(matches!(
            import_pbn(&pbn),
            Err(ParseError::IllegalCall {
                source: IllegalCall::AuctionClosed,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_call_is_malformed() {
        let pbn = format!("{}[Auction \"N\"]\n1Z\n", board_header(1));
        assert!(matches!(
            import_pbn(&pbn),
            Err(ParseError::MalformedRecord { line: 6, .. })
        ));
    }

    #[test]
    fn test_declared_contract_and_result() {
        let pbn = format!(
            "{}[North \"Westra\"]\n[Declarer \"S\"]\n[Contract \"5HX\"]\n[Result \"9\"]\n",
            board_header(1)
        );
        let session = import_pbn(&pbn).unwrap();
        let game = &session.games[0];
        let contract = game.contract().unwrap();
        assert_eq!(contract.strain, Strain::Hearts);
        assert_eq!(contract.double_status, DoubleStatus::Doubled);
        assert_eq!(contract.to_string(), "5HX by S");
        assert_eq!(game.result, Some(9));
    }

    #[test]
    fn test_invalid_deal() {
        let pbn = "[Board \"1\"]\n[Deal \"N:AKQ.AKQ.AKQ.AKQ - - -\"]\n";
        match import_pbn(pbn) {
            Err(ParseError::InvalidDeal { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected InvalidDeal, got {other:?}"),
        }
    }

    #[test]
    fn test_board_numbers_must_not_decrease() {
        let pbn = format!("{}{}", board_header(2), board_header(1));
        assert!(matches!(
            import_pbn(&pbn),
            Err(ParseError::MalformedRecord { line: 5, .. })
        ));

        let pbn = "[Board \"x\"]\n";
        assert!(matches!(
            import_pbn(pbn),
            Err(ParseError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_board_number_range() {
        match import_pbn("[Event \"x\"]\n[Board \"0\"]\n") {
            Err(ParseError::MalformedRecord { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "board number out of range");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }

        match import_pbn("[Board \"4294967295\"]\n[Board \"?\"]\n") {
            Err(ParseError::MalformedRecord { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "board number out of range");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }

        let session = import_pbn("[Board \"4294967295\"]\n").unwrap();
        assert_eq!(session.boards[0].number, u32::MAX);
    }

    #[test]
    fn test_repeated_board_must_agree() {
        let second = "[Board \"1\"]\n[Dealer \"E\"]\n[North \"B\"]\n";
        let pbn = format!("{}[North \"A\"]\n{}", board_header(1), second);
        match import_pbn(&pbn) {
            Err(ParseError::MalformedRecord { line, reason, .. }) => {
                assert_eq!(line, 6);
                assert_eq!(reason, "repeated board with a different dealer");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }

        let second = "[Board \"1\"]\n[Vulnerable \"All\"]\n";
        let pbn = format!("{}{}", board_header(1), second);
        assert!(matches!(
            import_pbn(&pbn),
            Err(ParseError::MalformedRecord {
                reason: "repeated board with a different vulnerability",
                ..
            })
        ));

        // A second table that restates nothing is fine.
        let pbn = format!("{}[Board \"1\"]\n[South \"C\"]\n", board_header(1));
        let session = import_pbn(&pbn).unwrap();
        assert_eq!(session.boards.len(), 1);
        assert_eq!(session.games.len(), 1);
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let session = import_pbn("\u{feff}[Event \"Club\"]\n[Board \"1\"]\n").unwrap();
        assert_eq!(session.competition.name, "Club");
        assert_eq!(session.boards.len(), 1);
    }

    #[test]
    fn test_repeated_board_adds_game_only() {
        let pbn = format!(
            "{}[North \"A\"]\n\n{}[North \"B\"]\n",
            board_header(1),
            board_header(1)
        );
        let session = import_pbn(&pbn).unwrap();
        assert_eq!(session.boards.len(), 1);
        assert_eq!(session.games.len(), 2);
        assert_eq!(session.games_for(1).count(), 2);
    }

    #[test]
    fn test_board_without_number_follows_previous() {
        let pbn = format!("{}[Board \"?\"]\n[Deal \"{DEAL}\"]\n", board_header(7));
        let session = import_pbn(&pbn).unwrap();
        let numbers: Vec<u32> = session.boards.iter().map(|b| b.number).collect();
        assert_eq!(numbers, [7, 8]);
    }

    #[test]
    fn test_data_lines_outside_sections_are_ignored() {
        let pbn = format!(
            "{}[OptimumResultTable \"Declarer;Denomination\\2R;Result\\2R\"]\nN NT 9\nS NT 9\n",
            board_header(1)
        );
        let session = import_pbn(&pbn).unwrap();
        assert_eq!(session.boards.len(), 1);
    }

    #[test]
    fn test_chunked_feed_matches_whole_import() {
        let pbn = format!(
            "[Event \"Chunks\"]\r\n{}[Auction \"N\"]\r\n1C Pass Pass Pass\r\n",
            board_header(1)
        );
        let whole = import_pbn(&pbn).unwrap();
        let mut importer = SessionImporter::new(ImportOptions::default());
        let bytes: Vec<char> = pbn.chars().collect();
        for chunk in bytes.chunks(7) {
            importer.feed(&chunk.iter().collect::<String>()).unwrap();
        }
        assert_eq!(importer.finish().unwrap(), whole);
    }

    #[test]
    fn test_last_line_without_newline() {
        let session = import_pbn("[Board \"3\"]\n[Dealer \"W\"]").unwrap();
        assert_eq!(session.boards[0].number, 3);
        assert_eq!(session.boards[0].dealer, Seat::West);
    }

    #[test]
    fn test_import_reader() {
        let pbn = format!("[Site \"Reader\"]\n{}", board_header(1));
        let session = import_reader(pbn.as_bytes(), &ImportOptions::default()).unwrap();
        assert_eq!(session.site, "Reader");
        assert_eq!(session.boards.len(), 1);
    }
}
