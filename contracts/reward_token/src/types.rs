use soroban_sdk::{contracttype, Address, String};

pub const DECIMALS: u32 = 18;

/// Snapshots roll over once per day.
pub const SECONDS_PER_SNAPSHOT: u64 = 86_400;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TokenConfig {
    pub policy: Address,
    pub name: String,
    pub symbol: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

/// Value held at the end of snapshot `snapshot`, until superseded by a later checkpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Checkpoint {
    pub snapshot: u64,
    pub value: i128,
}

/// Owner of a checkpoint history.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum History {
    Balance(Address),
    Supply,
}

#[contracttype]
pub enum DataKey {
    Config,
    Allowance(Address, Address),
    CheckpointCount(History),
    Checkpoint(History, u32),
}
