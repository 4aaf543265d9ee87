use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn get_config(env: &Env) -> Option<TokenConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &TokenConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_checkpoint_count(env: &Env, history: &History) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::CheckpointCount(history.clone()))
        .unwrap_or(0)
}

pub fn set_checkpoint_count(env: &Env, history: &History, count: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::CheckpointCount(history.clone()), &count);
}

pub fn get_checkpoint(env: &Env, history: &History, index: u32) -> Option<Checkpoint> {
    env.storage()
        .persistent()
        .get(&DataKey::Checkpoint(history.clone(), index))
}

pub fn set_checkpoint(env: &Env, history: &History, index: u32, checkpoint: &Checkpoint) {
    env.storage()
        .persistent()
        .set(&DataKey::Checkpoint(history.clone(), index), checkpoint);
}

pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let allowance: Option<AllowanceValue> = env
        .storage()
        .persistent()
        .get(&DataKey::Allowance(from.clone(), spender.clone()));
    match allowance {
        Some(value) if value.expiration_ledger >= env.ledger().sequence() => value,
        _ => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, allowance: &AllowanceValue) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    if allowance.amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, allowance);
    }
}
