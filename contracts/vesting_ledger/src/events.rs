use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::LockState;

#[derive(Clone)]
#[contracttype]
pub struct LockStateChangedEvent {
    pub old_state: LockState,
    pub new_state: LockState,
}

#[derive(Clone)]
#[contracttype]
pub struct FundsLockedEvent {
    pub contributor: Address,
    pub amount: u128,
    pub reward_due: u128,
    pub unlock_date: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct FundsUnlockedEvent {
    pub contributor: Address,
    pub released: u128,
    pub penalty: u128,
    pub reward_burned: u128,
}

#[derive(Clone)]
#[contracttype]
pub struct MigrationEvent {
    pub contributor: Address,
    pub counterpart: Address,
    pub amount: u128,
    pub reward_due: u128,
    pub unlock_date: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ReclaimEvent {
    pub token: Address,
    pub reclaimer: Address,
    pub amount: i128,
}

pub fn state_changed(env: &Env, event: LockStateChangedEvent) {
    env.events()
        .publish((symbol_short!("LEDGER"), symbol_short!("state")), event);
}

pub fn controller_set(env: &Env, controller: &Address) {
    env.events().publish(
        (symbol_short!("LEDGER"), symbol_short!("ctrl_set")),
        controller.clone(),
    );
}

pub fn penalty_disbursal_set(env: &Env, target: &Address) {
    env.events().publish(
        (symbol_short!("LEDGER"), symbol_short!("pen_set")),
        target.clone(),
    );
}

pub fn funds_locked(env: &Env, event: FundsLockedEvent) {
    env.events()
        .publish((symbol_short!("LEDGER"), symbol_short!("locked")), event);
}

pub fn funds_unlocked(env: &Env, event: FundsUnlockedEvent) {
    env.events()
        .publish((symbol_short!("LEDGER"), symbol_short!("unlocked")), event);
}

pub fn migration_enabled(env: &Env, target: &Address) {
    env.events().publish(
        (symbol_short!("LEDGER"), symbol_short!("mig_on")),
        target.clone(),
    );
}

pub fn migration_source_set(env: &Env, source: &Address) {
    env.events().publish(
        (symbol_short!("LEDGER"), symbol_short!("mig_src")),
        source.clone(),
    );
}

pub fn migrated_out(env: &Env, event: MigrationEvent) {
    env.events()
        .publish((symbol_short!("LEDGER"), symbol_short!("mig_out")), event);
}

pub fn migrated_in(env: &Env, event: MigrationEvent) {
    env.events()
        .publish((symbol_short!("LEDGER"), symbol_short!("mig_in")), event);
}

pub fn reclaimed(env: &Env, event: ReclaimEvent) {
    env.events()
        .publish((symbol_short!("LEDGER"), symbol_short!("reclaim")), event);
}
