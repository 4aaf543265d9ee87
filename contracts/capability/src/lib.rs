#![no_std]

//! Role names and the cross-contract view of the access policy.
//!
//! Gated contracts never keep their own permission tables. They authenticate
//! the acting address and ask the policy whether it holds a role on the
//! calling contract.

use soroban_sdk::{contractclient, symbol_short, Address, Env, Symbol};

/// May change entries of the access policy itself.
pub const ROLE_ACCESS_CONTROLLER: Symbol = symbol_short!("acc_ctrl");
/// May reserve whitelist tickets and abort the commitment before it starts.
pub const ROLE_WHITELIST_ADMIN: Symbol = symbol_short!("wl_admin");
/// May assign the ledger controller, penalty target and migration endpoints.
pub const ROLE_LOCKED_ACCOUNT_ADMIN: Symbol = symbol_short!("lock_adm");
/// May sweep stray assets out of a contract.
pub const ROLE_RECLAIMER: Symbol = symbol_short!("reclaimer");
/// May mint the reward token.
pub const ROLE_REWARD_ISSUER: Symbol = symbol_short!("issuer");
/// May amend the agreement contributors accept.
pub const ROLE_PLATFORM_OPERATOR: Symbol = symbol_short!("platf_op");

#[contractclient(name = "AccessPolicyClient")]
pub trait AccessPolicyInterface {
    fn allowed(env: Env, subject: Address, role: Symbol, object: Address) -> bool;
}

/// Authenticates `subject` and checks that it holds `role` on the current contract.
pub fn has_role(env: &Env, policy: &Address, subject: &Address, role: &Symbol) -> bool {
    subject.require_auth();
    AccessPolicyClient::new(env, policy).allowed(subject, role, &env.current_contract_address())
}
