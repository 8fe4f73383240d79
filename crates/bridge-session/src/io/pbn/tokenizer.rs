use crate::board::Seat;
use crate::error::{ParseError, Result};
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[([A-Za-z][A-Za-z0-9_]*)\s+"(.*)"\s*\]$"#).expect("tag pair pattern")
});

/// Tag names the importer understands. Anything else is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Event,
    Site,
    Date,
    Board,
    West,
    North,
    East,
    South,
    Dealer,
    Vulnerable,
    Deal,
    Scoring,
    Declarer,
    Contract,
    Result,
    Auction,
    Play,
    Note,
    Other(String),
}

impl Tag {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Event" => Tag::Event,
            "Site" => Tag::Site,
            "Date" => Tag::Date,
            "Board" => Tag::Board,
            "West" => Tag::West,
            "North" => Tag::North,
            "East" => Tag::East,
            "South" => Tag::South,
            "Dealer" => Tag::Dealer,
            "Vulnerable" => Tag::Vulnerable,
            "Deal" => Tag::Deal,
            "Scoring" => Tag::Scoring,
            "Declarer" => Tag::Declarer,
            "Contract" => Tag::Contract,
            "Result" => Tag::Result,
            "Auction" => Tag::Auction,
            "Play" => Tag::Play,
            "Note" => Tag::Note,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Event => "Event",
            Tag::Site => "Site",
            Tag::Date => "Date",
            Tag::Board => "Board",
            Tag::West => "West",
            Tag::North => "North",
            Tag::East => "East",
            Tag::South => "South",
            Tag::Dealer => "Dealer",
            Tag::Vulnerable => "Vulnerable",
            Tag::Deal => "Deal",
            Tag::Scoring => "Scoring",
            Tag::Declarer => "Declarer",
            Tag::Contract => "Contract",
            Tag::Result => "Result",
            Tag::Auction => "Auction",
            Tag::Play => "Play",
            Tag::Note => "Note",
            Tag::Other(name) => name,
        }
    }

    /// The seat a player-name tag refers to.
    pub fn player_seat(&self) -> Option<Seat> {
        match self {
            Tag::West => Some(Seat::West),
            Tag::North => Some(Seat::North),
            Tag::East => Some(Seat::East),
            Tag::South => Some(Seat::South),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub tag: Tag,
    /// `None` when the source value was `?`.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Tag(TagPair),
    /// Whitespace-separated tokens of an auction, play or other data line.
    Line(Vec<String>),
    Comment(String),
    Blank,
}

/// Turns PBN lines into [`Record`]s. Keeps track of line numbers and of
/// `{ ... }` comments spanning several lines.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    line: usize,
    in_comment: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of the last line tokenized, 1-based.
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn tokenize(&mut self, line: &str) -> Result<Record> {
        self.line += 1;
        let mut text = line.trim_end_matches(['\r', '\n']);
        if self.line == 1 {
            text = text.strip_prefix('\u{feff}').unwrap_or(text);
        }

        if self.in_comment {
            match text.find('}') {
                Some(end) => {
                    self.in_comment = false;
                    text = &text[end + 1..];
                    if text.trim().is_empty() {
                        return Ok(Record::Comment(line.to_string()));
                    }
                }
                None => return Ok(Record::Comment(text.to_string())),
            }
        }

        let trimmed = text.trim();
        let record = if trimmed.is_empty() {
            Record::Blank
        } else if trimmed.starts_with('%') || trimmed.starts_with(';') {
            Record::Comment(trimmed.to_string())
        } else if trimmed.starts_with('[') {
            Record::Tag(parse_tag_pair(trimmed).ok_or_else(|| {
                ParseError::malformed(self.line, line, "malformed tag pair")
            })?)
        } else {
            let fields = self.strip_comments(trimmed);
            if fields.is_empty() {
                Record::Comment(trimmed.to_string())
            } else {
                Record::Line(fields)
            }
        };
        trace!("line {}: {:?}", self.line, record);
        Ok(record)
    }

    /// Splits a data line into tokens, dropping `{...}` and `;` comments.
    fn strip_comments(&mut self, text: &str) -> Vec<String> {
        let mut kept = String::with_capacity(text.len());
        for c in text.chars() {
            if self.in_comment {
                if c == '}' {
                    self.in_comment = false;
                    kept.push(' ');
                }
                continue;
            }
            match c {
                '{' => self.in_comment = true,
                ';' => break,
                _ => kept.push(c),
            }
        }
        kept.split_whitespace().map(str::to_string).collect()
    }
}

fn parse_tag_pair(line: &str) -> Option<TagPair> {
    let captures = TAG_PAIR.captures(line)?;
    let name = captures.get(1)?.as_str();
    let value = unescape(captures.get(2)?.as_str())?;
    Some(TagPair {
        tag: Tag::from_name(name),
        value: (value != "?").then_some(value),
    })
}

/// Decodes `\"` and `\\`. A bare quote or a dangling backslash is an error.
fn unescape(raw: &str) -> Option<String> {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                escaped @ ('"' | '\\') => value.push(escaped),
                other => {
                    value.push('\\');
                    value.push(other);
                }
            },
            '"' => return None,
            _ => value.push(c),
        }
    }
    Some(value)
}

/// Escapes a value for writing between the quotes of a tag pair.
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Accumulates text chunks and hands back only complete lines.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chunk and returns the lines it completed, without terminators.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);
        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        complete
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect()
    }

    /// The trailing partial line, if any.
    pub fn flush(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        (!rest.is_empty()).then(|| rest.trim_end_matches('\r').to_string())
    }
}
