use crate::auction::IllegalCall;
use crate::deal::InvalidDeal;
use crate::play::IllegalPlay;
use thiserror::Error;

/// Why a PBN import failed. Every variant but `Io` points at the offending
/// source line.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: {reason}: {text:?}")]
    MalformedRecord {
        line: usize,
        text: String,
        reason: &'static str,
    },

    #[error("line {line}: illegal call in {text:?}: {source}")]
    IllegalCall {
        line: usize,
        text: String,
        source: IllegalCall,
    },

    #[error("line {line}: illegal play in {text:?}: {source}")]
    IllegalPlay {
        line: usize,
        text: String,
        source: IllegalPlay,
    },

    #[error("line {line}: invalid deal {text:?}: {source}")]
    InvalidDeal {
        line: usize,
        text: String,
        source: InvalidDeal,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn malformed(line: usize, text: &str, reason: &'static str) -> Self {
        ParseError::MalformedRecord {
            line,
            text: text.to_string(),
            reason,
        }
    }

    /// The 1-based source line the error was found on.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedRecord { line, .. }
            | ParseError::IllegalCall { line, .. }
            | ParseError::IllegalPlay { line, .. }
            | ParseError::InvalidDeal { line, .. } => Some(*line),
            ParseError::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Failure to load [`ImportOptions`](crate::options::ImportOptions).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
