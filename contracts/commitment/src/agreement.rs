//! Versioned agreement contributors accept by contributing.

use crate::errors::Error;
use crate::events;
use crate::types::{Agreement, DataKey};
use soroban_sdk::{Address, Env, String};

pub fn current(env: &Env) -> Option<Agreement> {
    env.storage().instance().get(&DataKey::Agreement)
}

pub fn amend(env: &Env, uri: String, now: u64) -> Result<Agreement, Error> {
    let version = match current(env) {
        Some(previous) => previous.version.checked_add(1).ok_or(Error::Overflow)?,
        None => 1,
    };
    let agreement = Agreement {
        version,
        uri,
        amended_at: now,
    };
    env.storage().instance().set(&DataKey::Agreement, &agreement);
    Ok(agreement)
}

pub fn accepted_at(env: &Env, signer: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::AcceptedAt(signer.clone()))
}

/// Requires an agreement in force and records the first acceptance by `signer`.
pub fn accept(env: &Env, signer: &Address, now: u64) -> Result<(), Error> {
    let agreement = current(env).ok_or(Error::AgreementMissing)?;
    if accepted_at(env, signer).is_none() {
        env.storage()
            .persistent()
            .set(&DataKey::AcceptedAt(signer.clone()), &now);
        events::agreement_accepted(env, signer, agreement.version);
    }
    Ok(())
}
