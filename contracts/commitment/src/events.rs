use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::{Phase, ValueKind};

#[derive(Clone)]
#[contracttype]
pub struct PhaseChangedEvent {
    pub old_phase: Phase,
    pub new_phase: Phase,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ReservedEvent {
    pub contributor: Address,
    pub kind: ValueKind,
    pub ticket_amount: u128,
    pub value: u128,
    pub reward: u128,
}

#[derive(Clone)]
#[contracttype]
pub struct ContributedEvent {
    pub contributor: Address,
    pub kind: ValueKind,
    pub amount: u128,
    pub value: u128,
    pub reward: u128,
    pub platform_share: u128,
}

#[derive(Clone)]
#[contracttype]
pub struct RolledBackEvent {
    pub kind: ValueKind,
    pub reward_burned: u128,
    pub value_released: u128,
}

#[derive(Clone)]
#[contracttype]
pub struct AbortedEvent {
    pub reward_burned: u128,
    pub value_released: u128,
}

pub fn phase_changed(env: &Env, event: PhaseChangedEvent) {
    env.events()
        .publish((symbol_short!("COMMIT"), symbol_short!("phase")), event);
}

pub fn reserved(env: &Env, event: ReservedEvent) {
    env.events()
        .publish((symbol_short!("COMMIT"), symbol_short!("reserved")), event);
}

pub fn contributed(env: &Env, event: ContributedEvent) {
    env.events()
        .publish((symbol_short!("COMMIT"), symbol_short!("contrib")), event);
}

pub fn rolled_back(env: &Env, event: RolledBackEvent) {
    env.events()
        .publish((symbol_short!("COMMIT"), symbol_short!("rollback")), event);
}

pub fn aborted(env: &Env, event: AbortedEvent) {
    env.events()
        .publish((symbol_short!("COMMIT"), symbol_short!("aborted")), event);
}

pub fn agreement_amended(env: &Env, version: u32, uri: String) {
    env.events().publish(
        (symbol_short!("COMMIT"), symbol_short!("amended"), version),
        uri,
    );
}

pub fn agreement_accepted(env: &Env, signer: &Address, version: u32) {
    env.events().publish(
        (symbol_short!("COMMIT"), symbol_short!("accepted"), signer.clone()),
        version,
    );
}
