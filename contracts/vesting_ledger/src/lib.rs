#![no_std]

//! Per-contributor custody of committed funds.
//!
//! A single controller (the commitment engine) locks funds together with the
//! reward the contributor owes back on exit. Once the controller reports
//! success, contributors unlock by burning that reward, paying a penalty if
//! they leave before their unlock date. If the controller reports failure,
//! everything is released without burn or penalty.

mod contract;
mod errors;
mod events;
mod interfaces;
mod storage;
mod types;


pub use contract::{VestingLedger, VestingLedgerClient};
pub use errors::Error;
pub use interfaces::{MigrationTarget, MigrationTargetClient};
pub use types::{LedgerConfig, LedgerEntry, LockState, Migration};
