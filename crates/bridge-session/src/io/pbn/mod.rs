//! Portable Bridge Notation.
//!
//! [`tokenizer`] turns text lines into records, [`import`] assembles those
//! records into a [`Session`](crate::session::Session), and [`export`]
//! writes boards and games back out.

pub mod export;
pub mod import;
pub mod tokenizer;

pub use export::{export_board, export_session};
pub use import::{import_pbn, import_pbn_with, import_reader, SessionImporter};
pub use tokenizer::{LineBuffer, Record, Tag, TagPair, Tokenizer};
