pub mod suit;
pub mod rank;
pub mod strain;
pub mod card;
pub mod hand;
pub mod board;
pub mod call;
pub mod contract;
pub mod auction;
pub mod play;
pub mod deal;
pub mod error;
pub mod options;
pub mod session;
pub mod io;

pub use suit::Suit;
pub use rank::Rank;
pub use strain::Strain;
pub use card::Card;
pub use hand::Hand;
pub use board::{Board, Partnership, Seat, Vulnerability};
pub use call::Call;
pub use contract::{Contract, DoubleStatus};
pub use auction::{Auction, AuctionState, IllegalCall};
pub use play::{IllegalPlay, Play, Trick};
pub use deal::InvalidDeal;
pub use error::{ConfigError, ParseError};
pub use options::{ImportOptions, MetadataPolicy};
pub use session::{Competition, Game, Session};
