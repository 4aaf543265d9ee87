use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn get_config(env: &Env) -> Option<LedgerConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_state(env: &Env) -> LockState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or(LockState::Uncontrolled)
}

pub fn set_state(env: &Env, state: LockState) {
    env.storage().instance().set(&DataKey::State, &state);
}

pub fn get_controller(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Controller)
}

pub fn set_controller(env: &Env, controller: &Address) {
    env.storage().instance().set(&DataKey::Controller, controller);
}

pub fn get_migration(env: &Env) -> Migration {
    env.storage()
        .instance()
        .get(&DataKey::Migration)
        .unwrap_or(Migration::Disabled)
}

pub fn set_migration(env: &Env, migration: &Migration) {
    env.storage().instance().set(&DataKey::Migration, migration);
}

pub fn get_migration_source(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::MigrationSource)
}

pub fn set_migration_source(env: &Env, source: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::MigrationSource, source);
}

pub fn get_total_locked(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalLocked)
        .unwrap_or(0)
}

pub fn set_total_locked(env: &Env, amount: u128) {
    env.storage().instance().set(&DataKey::TotalLocked, &amount);
}

pub fn get_contributor_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

pub fn set_contributor_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ContributorCount, &count);
}

pub fn get_entry(env: &Env, contributor: &Address) -> LedgerEntry {
    env.storage()
        .persistent()
        .get(&DataKey::Entry(contributor.clone()))
        .unwrap_or_default()
}

pub fn set_entry(env: &Env, contributor: &Address, entry: &LedgerEntry) {
    let key = DataKey::Entry(contributor.clone());
    if entry.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, entry);
    }
}
