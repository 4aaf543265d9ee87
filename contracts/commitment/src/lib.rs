#![no_std]

//! Timed commitment engine.
//!
//! Prices contributions of a native and a stable token on the issuance curve,
//! escrows funds in the matching vesting ledger and splits the reward between
//! the contributor and the platform. Before the start, whitelist admins reserve
//! curve allocation for selected contributors; unused reservations are burned
//! at the end of the phase that serves their token, which gives the value back
//! to the curve.

mod agreement;
mod contract;
mod errors;
mod events;
mod interfaces;
mod phase;
mod storage;
mod types;


pub use contract::{CommitmentContract, CommitmentContractClient};
pub use errors::Error;
pub use interfaces::{LedgerInterface, LedgerState, RewardIssuer};
pub use phase::{phase_at, PUBLIC_DURATION, WHITELIST_DURATION};
pub use types::{
    Agreement, CommitmentConfig, ContributionOutcome, Phase, Reservation, Ticket, ValueKind,
};
