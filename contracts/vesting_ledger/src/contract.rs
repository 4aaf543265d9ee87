use crate::errors::Error;
use crate::events::{
    self, FundsLockedEvent, FundsUnlockedEvent, LockStateChangedEvent, MigrationEvent,
    ReclaimEvent,
};
use crate::interfaces::MigrationTargetClient;
use crate::storage::*;
use crate::types::*;
use capability::{has_role, ROLE_LOCKED_ACCOUNT_ADMIN, ROLE_RECLAIMER};
use fp_math::{decimal_fraction, is_decimal_fraction, to_token_amount};
use soroban_sdk::{contract, contractimpl, contractmeta, token, Address, Env, Symbol};

contractmeta!(
    key = "Description",
    val = "Vesting custody ledger with early exit penalty and migration"
);

#[contract]
pub struct VestingLedger;

fn load_config(env: &Env) -> Result<LedgerConfig, Error> {
    get_config(env).ok_or(Error::NotInitialized)
}

fn require_role(env: &Env, config: &LedgerConfig, who: &Address, role: &Symbol) -> Result<(), Error> {
    if !has_role(env, &config.policy, who, role) {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

fn require_controller(env: &Env, controller: &Address) -> Result<(), Error> {
    controller.require_auth();
    match get_controller(env) {
        Some(current) if current == *controller => Ok(()),
        _ => Err(Error::NotController),
    }
}

fn require_state(env: &Env, expected: LockState) -> Result<(), Error> {
    if get_state(env) != expected {
        return Err(Error::InvalidLockState);
    }
    Ok(())
}

fn change_state(env: &Env, new_state: LockState) {
    let old_state = get_state(env);
    set_state(env, new_state);
    events::state_changed(
        env,
        LockStateChangedEvent {
            old_state,
            new_state,
        },
    );
}

fn token_amount(amount: u128) -> Result<i128, Error> {
    to_token_amount(amount).ok_or(Error::Overflow)
}

fn send(env: &Env, token: &Address, to: &Address, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    token::Client::new(env, token).transfer(
        &env.current_contract_address(),
        to,
        &token_amount(amount)?,
    );
    Ok(())
}

// custody must cover every locked unit once the incoming transfer has landed
fn check_funds(env: &Env, config: &LedgerConfig, total_locked: u128) -> Result<(), Error> {
    let held = token::Client::new(env, &config.asset_token).balance(&env.current_contract_address());
    if held < token_amount(total_locked)? {
        return Err(Error::FundsNotReceived);
    }
    Ok(())
}

/// Adds to an entry, keeping the earliest unlock date of an existing balance.
fn credit(
    env: &Env,
    contributor: &Address,
    amount: u128,
    reward_due: u128,
    unlock_date: u64,
) -> Result<LedgerEntry, Error> {
    let mut entry = get_entry(env, contributor);
    if entry.is_empty() {
        entry.unlock_date = unlock_date;
        let count = get_contributor_count(env)
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        set_contributor_count(env, count);
    } else if unlock_date < entry.unlock_date {
        entry.unlock_date = unlock_date;
    }
    entry.locked_amount = entry
        .locked_amount
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    entry.reward_due = entry
        .reward_due
        .checked_add(reward_due)
        .ok_or(Error::Overflow)?;
    set_entry(env, contributor, &entry);

    let total = get_total_locked(env)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    set_total_locked(env, total);
    Ok(entry)
}

/// Zeroes an entry and returns what it held.
fn debit_all(env: &Env, contributor: &Address) -> LedgerEntry {
    let entry = get_entry(env, contributor);
    if entry.is_empty() {
        return entry;
    }
    set_entry(env, contributor, &LedgerEntry::default());
    set_total_locked(env, get_total_locked(env) - entry.locked_amount);
    set_contributor_count(env, get_contributor_count(env) - 1);
    entry
}

#[contractimpl]
impl VestingLedger {
    pub fn initialize(env: Env, config: LedgerConfig) -> Result<(), Error> {
        if get_config(&env).is_some() {
            return Err(Error::AlreadyInitialized);
        }
        if !is_decimal_fraction(config.penalty_fraction) {
            return Err(Error::InvalidFraction);
        }
        set_config(&env, &config);
        set_state(&env, LockState::Uncontrolled);
        set_migration(&env, &Migration::Disabled);
        set_total_locked(&env, 0);
        set_contributor_count(&env, 0);
        Ok(())
    }

    // ---- controller lifecycle ----

    pub fn set_controller(env: Env, admin: Address, controller: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_role(&env, &config, &admin, &ROLE_LOCKED_ACCOUNT_ADMIN)?;
        require_state(&env, LockState::Uncontrolled)?;
        set_controller(&env, &controller);
        events::controller_set(&env, &controller);
        change_state(&env, LockState::AcceptingLocks);
        Ok(())
    }

    /// The commitment finished; contributors may unlock against their reward.
    pub fn controller_succeeded(env: Env, controller: Address) -> Result<(), Error> {
        load_config(&env)?;
        require_controller(&env, &controller)?;
        require_state(&env, LockState::AcceptingLocks)?;
        change_state(&env, LockState::AcceptingUnlocks);
        Ok(())
    }

    /// The commitment failed; every entry is released in full.
    pub fn controller_failed(env: Env, controller: Address) -> Result<(), Error> {
        load_config(&env)?;
        require_controller(&env, &controller)?;
        match get_state(&env) {
            LockState::AcceptingLocks | LockState::AcceptingUnlocks => {
                change_state(&env, LockState::ReleaseAll);
                Ok(())
            }
            _ => Err(Error::InvalidLockState),
        }
    }

    pub fn set_penalty_disbursal(env: Env, admin: Address, target: Address) -> Result<(), Error> {
        let mut config = load_config(&env)?;
        require_role(&env, &config, &admin, &ROLE_LOCKED_ACCOUNT_ADMIN)?;
        config.penalty_disbursal = target.clone();
        set_config(&env, &config);
        events::penalty_disbursal_set(&env, &target);
        Ok(())
    }

    // ---- custody ----

    /// Records `amount` of asset already transferred to the ledger for `contributor`.
    pub fn lock(
        env: Env,
        controller: Address,
        contributor: Address,
        amount: u128,
        reward_due: u128,
    ) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_state(&env, LockState::AcceptingLocks)?;
        require_controller(&env, &controller)?;
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        let unlock_date = env
            .ledger()
            .timestamp()
            .checked_add(config.lock_duration)
            .ok_or(Error::Overflow)?;
        let entry = credit(&env, &contributor, amount, reward_due, unlock_date)?;
        check_funds(&env, &config, get_total_locked(&env))?;

        events::funds_locked(
            &env,
            FundsLockedEvent {
                contributor,
                amount,
                reward_due,
                unlock_date: entry.unlock_date,
            },
        );
        Ok(())
    }

    /// Releases the caller's entry and returns the amount paid out to them.
    ///
    /// After success the owed reward is burned through the caller's allowance
    /// to this ledger; before the unlock date a penalty goes to the penalty
    /// disbursal target. After failure the full amount is returned.
    pub fn unlock(env: Env, contributor: Address) -> Result<u128, Error> {
        let config = load_config(&env)?;
        contributor.require_auth();
        let state = get_state(&env);
        if state != LockState::AcceptingUnlocks && state != LockState::ReleaseAll {
            return Err(Error::InvalidLockState);
        }
        let now = env.ledger().timestamp();
        let entry = debit_all(&env, &contributor);
        if entry.is_empty() {
            return Ok(0);
        }

        let mut penalty = 0u128;
        let mut reward_burned = 0u128;
        if state == LockState::AcceptingUnlocks {
            if entry.reward_due > 0 {
                token::Client::new(&env, &config.reward_token).burn_from(
                    &env.current_contract_address(),
                    &contributor,
                    &token_amount(entry.reward_due)?,
                );
                reward_burned = entry.reward_due;
            }
            if now < entry.unlock_date {
                penalty = decimal_fraction(&env, entry.locked_amount, config.penalty_fraction)
                    .ok_or(Error::Overflow)?;
                send(&env, &config.asset_token, &config.penalty_disbursal, penalty)?;
            }
        }
        let released = entry.locked_amount - penalty;
        send(&env, &config.asset_token, &contributor, released)?;

        events::funds_unlocked(
            &env,
            FundsUnlockedEvent {
                contributor,
                released,
                penalty,
                reward_burned,
            },
        );
        Ok(released)
    }

    // ---- migration, source side ----

    pub fn enable_migration(env: Env, admin: Address, target: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_role(&env, &config, &admin, &ROLE_LOCKED_ACCOUNT_ADMIN)?;
        require_state(&env, LockState::Uncontrolled)?;
        if get_migration(&env) != Migration::Disabled {
            return Err(Error::MigrationAlreadyEnabled);
        }
        let declared = MigrationTargetClient::new(&env, &target).migration_source();
        if declared != Some(env.current_contract_address()) {
            return Err(Error::MigrationTargetMismatch);
        }
        set_migration(&env, &Migration::Enabled(target.clone()));
        events::migration_enabled(&env, &target);
        Ok(())
    }

    /// Moves `contributor`'s entry and funds to the migration target. Anyone may call.
    pub fn migrate(env: Env, contributor: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        let target = match get_migration(&env) {
            Migration::Enabled(target) => target,
            Migration::Disabled => return Err(Error::MigrationDisabled),
        };
        let entry = debit_all(&env, &contributor);
        if entry.is_empty() {
            return Ok(());
        }
        send(&env, &config.asset_token, &target, entry.locked_amount)?;
        MigrationTargetClient::new(&env, &target).migrate_in(
            &env.current_contract_address(),
            &contributor,
            &entry.locked_amount,
            &entry.reward_due,
            &entry.unlock_date,
        );

        events::migrated_out(
            &env,
            MigrationEvent {
                contributor,
                counterpart: target,
                amount: entry.locked_amount,
                reward_due: entry.reward_due,
                unlock_date: entry.unlock_date,
            },
        );
        Ok(())
    }

    // ---- migration, target side ----

    pub fn set_migration_source(env: Env, admin: Address, source: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_role(&env, &config, &admin, &ROLE_LOCKED_ACCOUNT_ADMIN)?;
        if get_migration_source(&env).is_some() {
            return Err(Error::MigrationSourceAlreadySet);
        }
        set_migration_source(&env, &source);
        events::migration_source_set(&env, &source);
        Ok(())
    }

    pub fn migrate_in(
        env: Env,
        source: Address,
        contributor: Address,
        amount: u128,
        reward_due: u128,
        unlock_date: u64,
    ) -> Result<(), Error> {
        let config = load_config(&env)?;
        source.require_auth();
        match get_migration_source(&env) {
            Some(expected) if expected == source => {}
            _ => return Err(Error::NotMigrationSource),
        }
        if get_state(&env) == LockState::ReleaseAll {
            return Err(Error::InvalidLockState);
        }
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        let entry = credit(&env, &contributor, amount, reward_due, unlock_date)?;
        check_funds(&env, &config, get_total_locked(&env))?;

        events::migrated_in(
            &env,
            MigrationEvent {
                contributor,
                counterpart: source,
                amount,
                reward_due,
                unlock_date: entry.unlock_date,
            },
        );
        Ok(())
    }

    // ---- reclaim ----

    /// Sweeps a token sent here by mistake. The custody asset and the reward token are refused.
    pub fn reclaim(env: Env, reclaimer: Address, token: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_role(&env, &config, &reclaimer, &ROLE_RECLAIMER)?;
        if token == config.asset_token || token == config.reward_token {
            return Err(Error::ReclaimForbidden);
        }
        sweep(&env, &token, &reclaimer);
        Ok(())
    }

    /// Sweeps reward tokens transferred to the ledger; unlock never leaves any here.
    pub fn reclaim_stray_reward(env: Env, reclaimer: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_role(&env, &config, &reclaimer, &ROLE_RECLAIMER)?;
        sweep(&env, &config.reward_token, &reclaimer);
        Ok(())
    }

    // ---- views ----

    pub fn entry(env: Env, contributor: Address) -> LedgerEntry {
        get_entry(&env, &contributor)
    }

    pub fn total_locked(env: Env) -> u128 {
        get_total_locked(&env)
    }

    pub fn contributor_count(env: Env) -> u32 {
        get_contributor_count(&env)
    }

    pub fn lock_state(env: Env) -> LockState {
        get_state(&env)
    }

    pub fn controller(env: Env) -> Option<Address> {
        get_controller(&env)
    }

    pub fn migration(env: Env) -> Migration {
        get_migration(&env)
    }

    pub fn migration_source(env: Env) -> Option<Address> {
        get_migration_source(&env)
    }

    pub fn config(env: Env) -> Result<LedgerConfig, Error> {
        load_config(&env)
    }
}

fn sweep(env: &Env, token: &Address, to: &Address) {
    let client = token::Client::new(env, token);
    let this = env.current_contract_address();
    let amount = client.balance(&this);
    if amount <= 0 {
        return;
    }
    client.transfer(&this, to, &amount);
    events::reclaimed(
        env,
        ReclaimEvent {
            token: token.clone(),
            reclaimer: to.clone(),
            amount,
        },
    );
}
