//! Shared deployment fixtures for the cross-contract scenarios.

pub mod utils;
