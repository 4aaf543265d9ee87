#![no_std]

mod contract;
mod errors;
mod events;
mod snapshot;
mod storage;
mod types;


pub use contract::{RewardToken, RewardTokenClient};
pub use errors::Error;
pub use types::{Checkpoint, TokenConfig, DECIMALS, SECONDS_PER_SNAPSHOT};
