use soroban_sdk::{contracttype, Address};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum LockState {
    Uncontrolled = 0,
    AcceptingLocks = 1,
    AcceptingUnlocks = 2,
    ReleaseAll = 3,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct LedgerEntry {
    pub locked_amount: u128,
    pub reward_due: u128,
    pub unlock_date: u64,
}

impl LedgerEntry {
    pub fn is_empty(&self) -> bool {
        self.locked_amount == 0
    }
}

/// Outbound migration; set once and never cleared.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Migration {
    Disabled,
    Enabled(Address),
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LedgerConfig {
    pub policy: Address,
    /// Token held in custody.
    pub asset_token: Address,
    /// Token burned from the contributor on unlock.
    pub reward_token: Address,
    /// Seconds from the first lock until a penalty-free unlock.
    pub lock_duration: u64,
    /// Decimal fraction of the locked amount withheld on early unlock.
    pub penalty_fraction: u128,
    pub penalty_disbursal: Address,
}

#[contracttype]
pub enum DataKey {
    Config,
    State,
    Controller,
    Migration,
    MigrationSource,
    TotalLocked,
    ContributorCount,
    Entry(Address),
}
