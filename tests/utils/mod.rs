//! Testing utilities shared by the scenario suites.
pub mod assertions;
pub mod fixtures;

pub use fixtures::*;

/// Common test constants
pub mod constants {
    /// One whole token in ulps.
    pub const E: u128 = 1_000_000_000_000_000_000;
    pub const NOW: u64 = 1_700_000_000;
    pub const START: u64 = NOW + 3_600;
    pub const LOCK_DURATION: u64 = 18 * 30 * 86_400;
}
