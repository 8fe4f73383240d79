use crate::board::Seat;
use crate::call::Call;
use crate::contract::{Contract, DoubleStatus};
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionState {
    Open { next: Seat },
    /// `contract` is `None` when the board was passed out.
    Closed { contract: Option<Contract> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalCall {
    #[error("the auction is already closed")]
    AuctionClosed,
    #[error("bid level {0} is outside 1..=7")]
    InvalidLevel(u8),
    #[error("{call} is not higher than {current}")]
    InsufficientBid { call: Call, current: Call },
    #[error("double needs an undoubled bid by the opponents")]
    DoubleNotAllowed,
    #[error("redouble needs a bid by the caller's side doubled by the opponents")]
    RedoubleNotAllowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct LastBid {
    seat: Seat,
    level: u8,
    strain: Strain,
}

/// Bidding state machine. Calls are checked for legality as they arrive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub dealer: Seat,
    calls: Vec<Call>,
    state: AuctionState,
    last_bid: Option<LastBid>,
    double_status: DoubleStatus,
}

impl Auction {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            calls: Vec::new(),
            state: AuctionState::Open { next: dealer },
            last_bid: None,
            double_status: DoubleStatus::Undoubled,
        }
    }

    /// Replays `calls` from a fresh auction.
    pub fn from_calls(
        dealer: Seat,
        calls: impl IntoIterator<Item = Call>,
    ) -> Result<Self, IllegalCall> {
        let mut auction = Self::new(dealer);
        for call in calls {
            auction.push(call)?;
        }
        Ok(auction)
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn state(&self) -> AuctionState {
        self.state
    }

    /// Calls paired with the seat that made them.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Call)> {
        let dealer = self.dealer;
        self.calls
            .iter()
            .enumerate()
            .map(move |(i, call)| (dealer.offset(i), call))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, AuctionState::Closed { .. })
    }

    pub fn next_to_call(&self) -> Option<Seat> {
        match self.state {
            AuctionState::Open { next } => Some(next),
            AuctionState::Closed { .. } => None,
        }
    }

    /// The final contract. `None` while open or after a pass-out.
    pub fn contract(&self) -> Option<Contract> {
        match self.state {
            AuctionState::Closed { contract } => contract,
            AuctionState::Open { .. } => None,
        }
    }

    pub fn is_passed_out(&self) -> bool {
        self.state == AuctionState::Closed { contract: None }
    }

    /// The contract as it stands after the calls so far.
    pub fn current_contract(&self) -> Option<Contract> {
        let last = self.last_bid?;
        let side = last.seat.partnership();
        let declarer = self
            .iter()
            .find(|(seat, call)| {
                seat.partnership() == side
                    && matches!(call, Call::Bid { strain, .. } if *strain == last.strain)
            })
            .map_or(last.seat, |(seat, _)| seat);
        Some(Contract {
            level: last.level,
            strain: last.strain,
            double_status: self.double_status,
            declarer,
        })
    }

    pub fn push(&mut self, call: Call) -> Result<(), IllegalCall> {
        let AuctionState::Open { next } = self.state else {
            return Err(IllegalCall::AuctionClosed);
        };

        match call {
            Call::Pass => {}
            Call::Bid { level, strain } => {
                if !(1..=7).contains(&level) {
                    return Err(IllegalCall::InvalidLevel(level));
                }
                if let Some(last) = self.last_bid {
                    if (level, strain) <= (last.level, last.strain) {
                        return Err(IllegalCall::InsufficientBid {
                            call,
                            current: Call::Bid {
                                level: last.level,
                                strain: last.strain,
                            },
                        });
                    }
                }
                self.last_bid = Some(LastBid {
                    seat: next,
                    level,
                    strain,
                });
                self.double_status = DoubleStatus::Undoubled;
            }
            Call::Double => {
                let by_opponents = self
                    .last_bid
                    .is_some_and(|last| last.seat.partnership() != next.partnership());
                if !by_opponents || self.double_status != DoubleStatus::Undoubled {
                    return Err(IllegalCall::DoubleNotAllowed);
                }
                self.double_status = DoubleStatus::Doubled;
            }
            Call::Redouble => {
                let by_own_side = self
                    .last_bid
                    .is_some_and(|last| last.seat.partnership() == next.partnership());
                if !by_own_side || self.double_status != DoubleStatus::Doubled {
                    return Err(IllegalCall::RedoubleNotAllowed);
                }
                self.double_status = DoubleStatus::Redoubled;
            }
        }

        self.calls.push(call);
        self.state = if self.has_ended() {
            AuctionState::Closed {
                contract: self.current_contract(),
            }
        } else {
            AuctionState::Open { next: next.next() }
        };
        Ok(())
    }

    /// Passes until the auction closes, as PBN's `AP` token.
    pub fn pass_out_remaining(&mut self) -> Result<(), IllegalCall> {
        if self.is_closed() {
            return Err(IllegalCall::AuctionClosed);
        }
        while !self.is_closed() {
            self.push(Call::Pass)?;
        }
        Ok(())
    }

    fn has_ended(&self) -> bool {
        let passes = self.calls.iter().rev().take_while(|c| c.is_pass()).count();
        match self.last_bid {
            Some(_) => passes >= 3,
            None => passes >= 4,
        }
    }
}
