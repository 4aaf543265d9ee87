use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Lock state as reported by a custody ledger.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum LedgerState {
    Uncontrolled = 0,
    AcceptingLocks = 1,
    AcceptingUnlocks = 2,
    ReleaseAll = 3,
}

#[contractclient(name = "LedgerClient")]
pub trait LedgerInterface {
    fn lock(env: Env, controller: Address, contributor: Address, amount: u128, reward_due: u128);
    fn controller_succeeded(env: Env, controller: Address);
    fn controller_failed(env: Env, controller: Address);
    fn lock_state(env: Env) -> LedgerState;
}

#[contractclient(name = "RewardIssuerClient")]
pub trait RewardIssuer {
    fn mint(env: Env, minter: Address, to: Address, amount: i128);
}
