#![no_std]

//! Role-based capability checker consulted by every gated contract.
//!
//! Entries are keyed by `(subject | Everyone, role, object | Global)`. A query
//! walks [`PRECEDENCE`] from the most specific cell to the least specific one
//! and the first explicit `Allow` or `Deny` wins. Nothing set means deny.


mod errors;
mod events;
mod types;

pub use errors::Error;
pub use types::{RoleAssignment, Scope, ScopeTier, Subject, SubjectTier, TriState, PRECEDENCE};

use capability::ROLE_ACCESS_CONTROLLER;
use events::AccessChangedEvent;
use soroban_sdk::{contract, contractimpl, contractmeta, Address, Env, Symbol, Vec};
use types::DataKey;

contractmeta!(
    key = "Description",
    val = "Cascading role-based access policy"
);

#[contract]
pub struct AccessPolicyContract;

fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

fn cell(env: &Env, subject: &Subject, role: &Symbol, scope: &Scope) -> TriState {
    env.storage()
        .persistent()
        .get(&DataKey::Access(subject.clone(), role.clone(), scope.clone()))
        .unwrap_or(TriState::Unset)
}

fn users(env: &Env, scope: &Scope, role: &Symbol) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Users(scope.clone(), role.clone()))
        .unwrap_or(Vec::new(env))
}

fn resolve(env: &Env, subject: &Address, role: &Symbol, object: &Address) -> TriState {
    for (subject_tier, scope_tier) in PRECEDENCE.iter() {
        let who = match subject_tier {
            SubjectTier::Account => Subject::Account(subject.clone()),
            SubjectTier::Everyone => Subject::Everyone,
        };
        let scope = match scope_tier {
            ScopeTier::Object => Scope::Object(object.clone()),
            ScopeTier::Global => Scope::Global,
        };
        let state = cell(env, &who, role, &scope);
        if state != TriState::Unset {
            return state;
        }
    }
    TriState::Unset
}

fn update_index(env: &Env, assignment: &RoleAssignment, old_state: TriState) {
    let account = match &assignment.subject {
        Subject::Account(account) => account,
        Subject::Everyone => return,
    };
    let key = DataKey::Users(assignment.scope.clone(), assignment.role.clone());
    let mut listed = users(env, &assignment.scope, &assignment.role);
    match (old_state, assignment.state) {
        (TriState::Unset, TriState::Allow) | (TriState::Unset, TriState::Deny) => {
            listed.push_back(account.clone());
        }
        (TriState::Allow, TriState::Unset) | (TriState::Deny, TriState::Unset) => {
            if let Some(index) = listed.first_index_of(account) {
                listed.remove(index);
            }
        }
        _ => return,
    }
    if listed.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &listed);
    }
}

fn apply(env: &Env, controller: &Address, assignment: RoleAssignment) {
    let old_state = cell(env, &assignment.subject, &assignment.role, &assignment.scope);
    if old_state == assignment.state {
        return;
    }
    let key = DataKey::Access(
        assignment.subject.clone(),
        assignment.role.clone(),
        assignment.scope.clone(),
    );
    if assignment.state == TriState::Unset {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &assignment.state);
    }
    update_index(env, &assignment, old_state);

    events::access_changed(
        env,
        AccessChangedEvent {
            subject: assignment.subject,
            role: assignment.role,
            scope: assignment.scope,
            old_state,
            new_state: assignment.state,
            controller: controller.clone(),
        },
    );
}

fn require_controller(env: &Env, controller: &Address) -> Result<(), Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    controller.require_auth();
    let policy = env.current_contract_address();
    if resolve(env, controller, &ROLE_ACCESS_CONTROLLER, &policy) != TriState::Allow {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

#[contractimpl]
impl AccessPolicyContract {
    /// Grants `admin` the access controller role globally.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Initialized, &true);
        apply(
            &env,
            &admin,
            RoleAssignment {
                subject: Subject::Account(admin.clone()),
                role: ROLE_ACCESS_CONTROLLER,
                scope: Scope::Global,
                state: TriState::Allow,
            },
        );
        Ok(())
    }

    pub fn allowed(env: Env, subject: Address, role: Symbol, object: Address) -> bool {
        resolve(&env, &subject, &role, &object) == TriState::Allow
    }

    pub fn set_user_role(
        env: Env,
        controller: Address,
        subject: Subject,
        role: Symbol,
        scope: Scope,
        state: TriState,
    ) -> Result<(), Error> {
        require_controller(&env, &controller)?;
        apply(
            &env,
            &controller,
            RoleAssignment {
                subject,
                role,
                scope,
                state,
            },
        );
        Ok(())
    }

    pub fn set_user_roles(
        env: Env,
        controller: Address,
        assignments: Vec<RoleAssignment>,
    ) -> Result<(), Error> {
        if assignments.is_empty() {
            return Err(Error::EmptyBatch);
        }
        require_controller(&env, &controller)?;
        for assignment in assignments.iter() {
            apply(&env, &controller, assignment);
        }
        Ok(())
    }

    /// Raw cell, without cascading.
    pub fn get_user_role(env: Env, subject: Subject, role: Symbol, scope: Scope) -> TriState {
        cell(&env, &subject, &role, &scope)
    }

    /// Accounts holding an explicit entry for `role` on `scope`.
    pub fn get_users(env: Env, scope: Scope, role: Symbol) -> Vec<Address> {
        users(&env, &scope, &role)
    }
}
