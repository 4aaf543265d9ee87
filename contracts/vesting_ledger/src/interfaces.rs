use soroban_sdk::{contractclient, Address, Env};

/// Successor ledger accepting entries pushed by `migrate`.
#[contractclient(name = "MigrationTargetClient")]
pub trait MigrationTarget {
    fn migration_source(env: Env) -> Option<Address>;

    fn migrate_in(
        env: Env,
        source: Address,
        contributor: Address,
        amount: u128,
        reward_due: u128,
        unlock_date: u64,
    );
}
