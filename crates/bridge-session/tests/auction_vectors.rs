use bridge_session::auction::{Auction, IllegalCall};
use bridge_session::board::Seat;
use bridge_session::call::Call;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct AuctionVector {
    name: String,
    dealer: String,
    calls: String,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    contract: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn load_vectors() -> Vec<AuctionVector> {
    let yaml = fs::read_to_string("tests/vectors/auctions.yaml")
        .expect("Failed to read auction vectors");
    serde_yaml::from_str(&yaml).expect("Failed to parse auction vectors")
}

fn error_name(err: &IllegalCall) -> &'static str {
    match err {
        IllegalCall::AuctionClosed => "closed",
        IllegalCall::InvalidLevel(_) => "level",
        IllegalCall::InsufficientBid { .. } => "insufficient",
        IllegalCall::DoubleNotAllowed => "double",
        IllegalCall::RedoubleNotAllowed => "redouble",
    }
}

#[test]
fn test_auction_vectors() {
    let vectors = load_vectors();
    assert!(!vectors.is_empty());

    for vector in vectors {
        let dealer = Seat::from_pbn(&vector.dealer)
            .unwrap_or_else(|| panic!("{}: bad dealer", vector.name));
        let calls: Vec<Call> = vector
            .calls
            .split_whitespace()
            .map(|token| token.parse().unwrap_or_else(|_| panic!("{}: bad call {}", vector.name, token)))
            .collect();

        let mut auction = Auction::new(dealer);
        let mut failure = None;
        for call in calls {
            if let Err(err) = auction.push(call) {
                failure = Some(err);
                break;
            }
        }

        match (&vector.error, failure) {
            (Some(expected), Some(err)) => {
                assert_eq!(error_name(&err), expected, "{}", vector.name);
                continue;
            }
            (Some(expected), None) => panic!("{}: expected {} error", vector.name, expected),
            (None, Some(err)) => panic!("{}: unexpected error {}", vector.name, err),
            (None, None) => {}
        }

        assert_eq!(auction.is_closed(), vector.closed, "{}", vector.name);
        assert_eq!(
            auction.contract().map(|c| c.to_string()),
            vector.contract,
            "{}",
            vector.name
        );
    }
}
