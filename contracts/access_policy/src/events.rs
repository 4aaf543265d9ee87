use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::{Scope, Subject, TriState};

#[derive(Clone)]
#[contracttype]
pub struct AccessChangedEvent {
    pub subject: Subject,
    pub role: Symbol,
    pub scope: Scope,
    pub old_state: TriState,
    pub new_state: TriState,
    pub controller: Address,
}

pub fn access_changed(env: &Env, event: AccessChangedEvent) {
    env.events()
        .publish((symbol_short!("ACCESS"), symbol_short!("changed")), event);
}
