use crate::errors::Error;
use crate::events::{self, ApproveEvent, MintEvent};
use crate::snapshot;
use crate::storage::*;
use crate::types::*;
use capability::{has_role, ROLE_REWARD_ISSUER};
use soroban_sdk::token::TokenInterface as _;
use soroban_sdk::{
    contract, contractimpl, contractmeta, panic_with_error, token, Address, Env, String,
};

contractmeta!(
    key = "Description",
    val = "Mintable reward token with daily balance snapshots"
);

#[contract]
pub struct RewardToken;

fn require_config(env: &Env) -> TokenConfig {
    get_config(env).unwrap_or_else(|| panic_with_error!(env, Error::NotInitialized))
}

fn check_nonnegative(env: &Env, amount: i128) {
    if amount < 0 {
        panic_with_error!(env, Error::NegativeAmount);
    }
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    snapshot::latest(env, &History::Balance(id.clone()))
}

fn write_balance(env: &Env, id: &Address, value: i128) {
    snapshot::record(env, &History::Balance(id.clone()), value);
}

fn receive_balance(env: &Env, id: &Address, amount: i128) {
    let balance = read_balance(env, id)
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    write_balance(env, id, balance);
}

fn spend_balance(env: &Env, id: &Address, amount: i128) {
    let balance = read_balance(env, id);
    if balance < amount {
        panic_with_error!(env, Error::InsufficientBalance);
    }
    write_balance(env, id, balance - amount);
}

fn change_supply(env: &Env, delta: i128) {
    let supply = snapshot::latest(env, &History::Supply)
        .checked_add(delta)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    snapshot::record(env, &History::Supply, supply);
}

fn spend_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let allowance = get_allowance(env, from, spender);
    if allowance.amount < amount {
        panic_with_error!(env, Error::InsufficientAllowance);
    }
    if amount > 0 {
        set_allowance(
            env,
            from,
            spender,
            &AllowanceValue {
                amount: allowance.amount - amount,
                expiration_ledger: allowance.expiration_ledger,
            },
        );
    }
}

fn burn_balance(env: &Env, from: &Address, amount: i128) {
    spend_balance(env, from, amount);
    change_supply(env, -amount);
    events::burned(env, from, amount);
}

fn check_snapshot(env: &Env, snapshot_id: u64) -> Result<(), Error> {
    if snapshot_id > snapshot::current_snapshot(env) {
        return Err(Error::SnapshotInFuture);
    }
    Ok(())
}

#[contractimpl]
impl RewardToken {
    pub fn initialize(env: Env, config: TokenConfig) -> Result<(), Error> {
        if get_config(&env).is_some() {
            return Err(Error::AlreadyInitialized);
        }
        set_config(&env, &config);
        Ok(())
    }

    /// Issues `amount` new units to `to`; `minter` must hold the reward issuer role here.
    pub fn mint(env: Env, minter: Address, to: Address, amount: i128) -> Result<(), Error> {
        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        if amount < 0 {
            return Err(Error::NegativeAmount);
        }
        if !has_role(&env, &config.policy, &minter, &ROLE_REWARD_ISSUER) {
            return Err(Error::NotAuthorized);
        }
        receive_balance(&env, &to, amount);
        change_supply(&env, amount);
        events::minted(&env, MintEvent { minter, to, amount });
        Ok(())
    }

    pub fn total_supply(env: Env) -> i128 {
        snapshot::latest(&env, &History::Supply)
    }

    pub fn current_snapshot(env: Env) -> u64 {
        snapshot::current_snapshot(&env)
    }

    /// Balance of `id` at the end of `snapshot_id` (the running balance for today's id).
    pub fn balance_at(env: Env, id: Address, snapshot_id: u64) -> Result<i128, Error> {
        check_snapshot(&env, snapshot_id)?;
        Ok(snapshot::value_at(&env, &History::Balance(id), snapshot_id))
    }

    pub fn total_supply_at(env: Env, snapshot_id: u64) -> Result<i128, Error> {
        check_snapshot(&env, snapshot_id)?;
        Ok(snapshot::value_at(&env, &History::Supply, snapshot_id))
    }

    pub fn config(env: Env) -> Result<TokenConfig, Error> {
        get_config(&env).ok_or(Error::NotInitialized)
    }
}

#[contractimpl]
impl token::TokenInterface for RewardToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        get_allowance(&env, &from, &spender).amount
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        check_nonnegative(&env, amount);
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            panic_with_error!(&env, Error::InvalidExpiration);
        }
        set_allowance(
            &env,
            &from,
            &spender,
            &AllowanceValue {
                amount,
                expiration_ledger,
            },
        );
        events::approved(
            &env,
            &from,
            &spender,
            ApproveEvent {
                amount,
                expiration_ledger,
            },
        );
    }

    fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        check_nonnegative(&env, amount);
        spend_balance(&env, &from, amount);
        receive_balance(&env, &to, amount);
        events::transferred(&env, &from, &to, amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative(&env, amount);
        spend_allowance(&env, &from, &spender, amount);
        spend_balance(&env, &from, amount);
        receive_balance(&env, &to, amount);
        events::transferred(&env, &from, &to, amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        check_nonnegative(&env, amount);
        burn_balance(&env, &from, amount);
    }

    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative(&env, amount);
        spend_allowance(&env, &from, &spender, amount);
        burn_balance(&env, &from, amount);
    }

    fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    fn name(env: Env) -> String {
        require_config(&env).name
    }

    fn symbol(env: Env) -> String {
        require_config(&env).symbol
    }
}
