use crate::types::*;
use soroban_sdk::{Address, Env, Vec};

pub fn get_config(env: &Env) -> Option<CommitmentConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &CommitmentConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_settled_phase(env: &Env) -> Phase {
    env.storage()
        .instance()
        .get(&DataKey::SettledPhase)
        .unwrap_or(Phase::Before)
}

pub fn set_settled_phase(env: &Env, phase: Phase) {
    env.storage().instance().set(&DataKey::SettledPhase, &phase);
}

pub fn get_aborted(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Aborted)
        .unwrap_or(false)
}

pub fn set_aborted(env: &Env) {
    env.storage().instance().set(&DataKey::Aborted, &true);
}

pub fn get_total_value(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalValue)
        .unwrap_or(0)
}

pub fn set_total_value(env: &Env, value: u128) {
    env.storage().instance().set(&DataKey::TotalValue, &value);
}

pub fn get_escrowed_reward(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::EscrowedReward)
        .unwrap_or(0)
}

pub fn set_escrowed_reward(env: &Env, amount: u128) {
    env.storage()
        .instance()
        .set(&DataKey::EscrowedReward, &amount);
}

pub fn get_contributors(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Contributors)
        .unwrap_or(Vec::new(env))
}

pub fn set_contributors(env: &Env, contributors: &Vec<Address>) {
    env.storage()
        .persistent()
        .set(&DataKey::Contributors, contributors);
}

pub fn get_reservation(env: &Env, contributor: &Address) -> Option<Reservation> {
    env.storage()
        .persistent()
        .get(&DataKey::Reservation(contributor.clone()))
}

pub fn set_reservation(env: &Env, reservation: &Reservation) {
    env.storage().persistent().set(
        &DataKey::Reservation(reservation.contributor.clone()),
        reservation,
    );
}
