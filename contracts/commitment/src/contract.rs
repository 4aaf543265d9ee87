use crate::agreement;
use crate::errors::Error;
use crate::events::{
    self, AbortedEvent, ContributedEvent, PhaseChangedEvent, ReservedEvent, RolledBackEvent,
};
use crate::interfaces::{LedgerClient, LedgerState, RewardIssuerClient};
use crate::phase::phase_at;
use crate::storage::*;
use crate::types::*;
use capability::{has_role, ROLE_PLATFORM_OPERATOR, ROLE_RECLAIMER, ROLE_WHITELIST_ADMIN};
use fp_math::{decimal_fraction, proportion, to_token_amount};
use issuance_curve::{cumulative, incremental, incremental_inverse};
use soroban_sdk::{
    contract, contractimpl, contractmeta, token, Address, Env, String, Symbol, Vec,
};

contractmeta!(
    key = "Description",
    val = "Curve priced commitment with whitelist reservations"
);

#[contract]
pub struct CommitmentContract;

fn load_config(env: &Env) -> Result<CommitmentConfig, Error> {
    get_config(env).ok_or(Error::NotInitialized)
}

fn require_role(
    env: &Env,
    config: &CommitmentConfig,
    who: &Address,
    role: &Symbol,
) -> Result<(), Error> {
    if !has_role(env, &config.policy, who, role) {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

fn token_amount(amount: u128) -> Result<i128, Error> {
    to_token_amount(amount).ok_or(Error::Overflow)
}

fn value_of(
    env: &Env,
    config: &CommitmentConfig,
    kind: ValueKind,
    amount: u128,
) -> Result<u128, Error> {
    match kind {
        ValueKind::Native => decimal_fraction(env, amount, config.native_rate).ok_or(Error::Overflow),
        ValueKind::Stable => Ok(amount),
    }
}

fn mint_reward(env: &Env, config: &CommitmentConfig, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let this = env.current_contract_address();
    RewardIssuerClient::new(env, &config.reward_token).mint(&this, &this, &token_amount(amount)?);
    Ok(())
}

fn burn_reward(env: &Env, config: &CommitmentConfig, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    token::Client::new(env, &config.reward_token)
        .burn(&env.current_contract_address(), &token_amount(amount)?);
    Ok(())
}

fn pay_reward(env: &Env, config: &CommitmentConfig, to: &Address, amount: u128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    token::Client::new(env, &config.reward_token).transfer(
        &env.current_contract_address(),
        to,
        &token_amount(amount)?,
    );
    Ok(())
}

/// Value to take off the accumulator so that `burn` reward leaves circulation.
fn released_value(env: &Env, total: u128, burn: u128) -> Result<u128, Error> {
    if burn >= cumulative(env, total)? {
        return Ok(total);
    }
    Ok(incremental_inverse(env, total, burn)?)
}

/// Expires every reservation of `kind` and burns their unreleased reward in one step.
fn rollback(env: &Env, config: &CommitmentConfig, kind: ValueKind) -> Result<(), Error> {
    let mut burn = 0u128;
    for contributor in get_contributors(env).iter() {
        let Some(mut reservation) = get_reservation(env, &contributor) else {
            continue;
        };
        if reservation.expired || reservation.kind != kind {
            continue;
        }
        let remaining = reservation.remaining_reward();
        reservation.expired = true;
        reservation.expired_reward = remaining;
        set_reservation(env, &reservation);
        burn = burn.checked_add(remaining).ok_or(Error::Overflow)?;
    }
    if burn == 0 {
        return Ok(());
    }

    let total = get_total_value(env);
    let value_released = released_value(env, total, burn)?;
    set_total_value(env, total - value_released);
    set_escrowed_reward(env, get_escrowed_reward(env) - burn);
    burn_reward(env, config, burn)?;

    events::rolled_back(
        env,
        RolledBackEvent {
            kind,
            reward_burned: burn,
            value_released,
        },
    );
    Ok(())
}

fn signal_ledgers(env: &Env, config: &CommitmentConfig, succeeded: bool) {
    let this = env.current_contract_address();
    for kind in [ValueKind::Native, ValueKind::Stable] {
        let ledger = LedgerClient::new(env, config.ledger(kind));
        // both kinds may share one ledger
        if ledger.lock_state() != LedgerState::AcceptingLocks {
            continue;
        }
        if succeeded {
            ledger.controller_succeeded(&this);
        } else {
            ledger.controller_failed(&this);
        }
    }
}

/// Runs the boundary actions between the last settled phase and the phase at `now`.
fn advance(env: &Env, config: &CommitmentConfig, now: u64) -> Result<Phase, Error> {
    if get_aborted(env) {
        return Err(Error::Aborted);
    }
    let current = phase_at(config.start_date, now);
    let mut settled = get_settled_phase(env);
    while settled < current {
        let Some(next) = settled.next() else {
            break;
        };
        match next {
            Phase::Public => rollback(env, config, ValueKind::Native)?,
            Phase::Finished => {
                rollback(env, config, ValueKind::Stable)?;
                signal_ledgers(env, config, true);
            }
            _ => {}
        }
        events::phase_changed(
            env,
            PhaseChangedEvent {
                old_phase: settled,
                new_phase: next,
                timestamp: now,
            },
        );
        settled = next;
        set_settled_phase(env, settled);
    }
    Ok(current)
}

fn reserve_ticket(
    env: &Env,
    config: &CommitmentConfig,
    contributor: Address,
    kind: ValueKind,
    ticket_amount: u128,
) -> Result<(), Error> {
    if ticket_amount == 0 {
        return Err(Error::InvalidAmount);
    }
    if get_reservation(env, &contributor).is_some() {
        return Err(Error::DuplicateReservation);
    }
    let value = value_of(env, config, kind, ticket_amount)?;
    if value < config.min_ticket {
        return Err(Error::BelowMinTicket);
    }
    let total = get_total_value(env);
    let new_total = total.checked_add(value).ok_or(Error::Overflow)?;
    if new_total > config.cap {
        return Err(Error::CapExceeded);
    }
    let reward = incremental(env, total, value)?;
    let escrowed = get_escrowed_reward(env)
        .checked_add(reward)
        .ok_or(Error::Overflow)?;

    set_total_value(env, new_total);
    set_escrowed_reward(env, escrowed);
    mint_reward(env, config, reward)?;

    set_reservation(
        env,
        &Reservation {
            contributor: contributor.clone(),
            kind,
            ticket_amount,
            reserved_value: value,
            reserved_reward: reward,
            fulfilled_value: 0,
            released_reward: 0,
            expired: false,
            expired_reward: 0,
        },
    );
    let mut contributors = get_contributors(env);
    contributors.push_back(contributor.clone());
    set_contributors(env, &contributors);

    events::reserved(
        env,
        ReservedEvent {
            contributor,
            kind,
            ticket_amount,
            value,
            reward,
        },
    );
    Ok(())
}

/// Draws up to `value` from a live reservation; returns (value drawn, reward released).
fn draw_reservation(env: &Env, reservation: &mut Reservation, value: u128) -> Result<(u128, u128), Error> {
    let drawn = value.min(reservation.remaining_value());
    let fulfilled = reservation.fulfilled_value + drawn;
    // cumulative proportion, so tranches add up to the whole reservation
    let released_after = proportion(env, reservation.reserved_reward, fulfilled, reservation.reserved_value)
        .ok_or(Error::Overflow)?;
    let released = released_after - reservation.released_reward;
    reservation.fulfilled_value = fulfilled;
    reservation.released_reward = released_after;
    set_reservation(env, reservation);
    Ok((drawn, released))
}

#[contractimpl]
impl CommitmentContract {
    pub fn initialize(env: Env, config: CommitmentConfig) -> Result<(), Error> {
        if get_config(&env).is_some() {
            return Err(Error::AlreadyInitialized);
        }
        if config.start_date <= env.ledger().timestamp()
            || config.cap == 0
            || config.native_rate == 0
            || config.min_ticket > config.cap
        {
            return Err(Error::InvalidConfig);
        }
        set_config(&env, &config);
        set_settled_phase(&env, Phase::Before);
        set_total_value(&env, 0);
        set_escrowed_reward(&env, 0);
        Ok(())
    }

    /// Settles any phase boundaries that have passed. Callable by anyone.
    pub fn advance_phase(env: Env) -> Result<Phase, Error> {
        let config = load_config(&env)?;
        advance(&env, &config, env.ledger().timestamp())
    }

    // ---- reservations ----

    pub fn reserve(
        env: Env,
        admin: Address,
        contributor: Address,
        kind: ValueKind,
        ticket_amount: u128,
    ) -> Result<(), Error> {
        let config = load_config(&env)?;
        let phase = advance(&env, &config, env.ledger().timestamp())?;
        require_role(&env, &config, &admin, &ROLE_WHITELIST_ADMIN)?;
        if phase != Phase::Before {
            return Err(Error::PhaseMismatch);
        }
        reserve_ticket(&env, &config, contributor, kind, ticket_amount)
    }

    pub fn reserve_batch(env: Env, admin: Address, tickets: Vec<Ticket>) -> Result<(), Error> {
        let config = load_config(&env)?;
        let phase = advance(&env, &config, env.ledger().timestamp())?;
        require_role(&env, &config, &admin, &ROLE_WHITELIST_ADMIN)?;
        if phase != Phase::Before {
            return Err(Error::PhaseMismatch);
        }
        if tickets.is_empty() {
            return Err(Error::InvalidAmount);
        }
        for ticket in tickets.iter() {
            reserve_ticket(&env, &config, ticket.contributor, ticket.kind, ticket.amount)?;
        }
        Ok(())
    }

    /// Burns every escrowed reservation and fails both ledgers. Only before the start.
    pub fn abort(env: Env, admin: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        let phase = advance(&env, &config, env.ledger().timestamp())?;
        require_role(&env, &config, &admin, &ROLE_WHITELIST_ADMIN)?;
        if phase != Phase::Before {
            return Err(Error::PhaseMismatch);
        }

        for contributor in get_contributors(&env).iter() {
            if let Some(mut reservation) = get_reservation(&env, &contributor) {
                reservation.expired_reward = reservation.remaining_reward();
                reservation.expired = true;
                set_reservation(&env, &reservation);
            }
        }
        let escrowed = get_escrowed_reward(&env);
        let value_released = get_total_value(&env);
        burn_reward(&env, &config, escrowed)?;
        set_escrowed_reward(&env, 0);
        set_total_value(&env, 0);
        signal_ledgers(&env, &config, false);
        set_aborted(&env);

        events::aborted(
            &env,
            AbortedEvent {
                reward_burned: escrowed,
                value_released,
            },
        );
        Ok(())
    }

    // ---- contributions ----

    /// Commits `amount` of the `kind` token into custody and pays out the reward.
    ///
    /// During the whitelist phase only holders of a live reservation of the
    /// same kind may contribute; anything beyond the reservation is priced live.
    pub fn contribute(
        env: Env,
        contributor: Address,
        kind: ValueKind,
        amount: u128,
    ) -> Result<ContributionOutcome, Error> {
        let config = load_config(&env)?;
        contributor.require_auth();
        let now = env.ledger().timestamp();
        let phase = advance(&env, &config, now)?;
        if phase != Phase::Whitelist && phase != Phase::Public {
            return Err(Error::PhaseMismatch);
        }
        if amount == 0 {
            return Err(Error::InvalidAmount);
        }
        agreement::accept(&env, &contributor, now)?;
        let value = value_of(&env, &config, kind, amount)?;

        let reservation = get_reservation(&env, &contributor).filter(|r| r.is_live_for(kind));
        let (drawn, reserved_reward) = match reservation {
            Some(mut reservation) => draw_reservation(&env, &mut reservation, value)?,
            None if phase == Phase::Whitelist => return Err(Error::NotWhitelisted),
            None => (0, 0),
        };
        if drawn == 0 && value < config.min_ticket {
            return Err(Error::BelowMinTicket);
        }

        let excess = value - drawn;
        let mut live_reward = 0u128;
        if excess > 0 {
            let total = get_total_value(&env);
            let new_total = total.checked_add(excess).ok_or(Error::Overflow)?;
            if new_total > config.cap {
                return Err(Error::CapExceeded);
            }
            live_reward = incremental(&env, total, excess)?;
            set_total_value(&env, new_total);
            mint_reward(&env, &config, live_reward)?;
        }
        if reserved_reward > 0 {
            set_escrowed_reward(&env, get_escrowed_reward(&env) - reserved_reward);
        }

        let reward = reserved_reward
            .checked_add(live_reward)
            .ok_or(Error::Overflow)?;
        let platform_share = reward / 2;
        let contributor_share = reward - platform_share;

        let ledger = config.ledger(kind);
        token::Client::new(&env, config.token(kind)).transfer(
            &contributor,
            ledger,
            &token_amount(amount)?,
        );
        LedgerClient::new(&env, ledger).lock(
            &env.current_contract_address(),
            &contributor,
            &amount,
            &contributor_share,
        );
        pay_reward(&env, &config, &config.platform_wallet, platform_share)?;
        pay_reward(&env, &config, &contributor, contributor_share)?;

        events::contributed(
            &env,
            ContributedEvent {
                contributor,
                kind,
                amount,
                value,
                reward,
                platform_share,
            },
        );
        Ok(ContributionOutcome {
            value,
            reserved_reward,
            live_reward,
            platform_share,
            contributor_share,
        })
    }

    // ---- agreement ----

    pub fn amend_agreement(env: Env, operator: Address, uri: String) -> Result<u32, Error> {
        let config = load_config(&env)?;
        require_role(&env, &config, &operator, &ROLE_PLATFORM_OPERATOR)?;
        let agreement = agreement::amend(&env, uri, env.ledger().timestamp())?;
        events::agreement_amended(&env, agreement.version, agreement.uri);
        Ok(agreement.version)
    }

    pub fn current_agreement(env: Env) -> Option<Agreement> {
        agreement::current(&env)
    }

    pub fn agreement_accepted_at(env: Env, signer: Address) -> Option<u64> {
        agreement::accepted_at(&env, &signer)
    }

    // ---- reclaim ----

    /// Sweeps a token sent here by mistake; the reward token backs reservations and is refused.
    pub fn reclaim(env: Env, reclaimer: Address, token: Address) -> Result<(), Error> {
        let config = load_config(&env)?;
        require_role(&env, &config, &reclaimer, &ROLE_RECLAIMER)?;
        if token == config.reward_token {
            return Err(Error::ReclaimForbidden);
        }
        let client = token::Client::new(&env, &token);
        let this = env.current_contract_address();
        let balance = client.balance(&this);
        if balance > 0 {
            client.transfer(&this, &reclaimer, &balance);
        }
        Ok(())
    }

    // ---- views ----

    pub fn phase(env: Env) -> Result<Phase, Error> {
        let config = load_config(&env)?;
        Ok(phase_at(config.start_date, env.ledger().timestamp()))
    }

    pub fn is_aborted(env: Env) -> bool {
        get_aborted(&env)
    }

    pub fn total_value_committed(env: Env) -> u128 {
        get_total_value(&env)
    }

    pub fn escrowed_reward(env: Env) -> u128 {
        get_escrowed_reward(&env)
    }

    pub fn reservation(env: Env, contributor: Address) -> Option<Reservation> {
        get_reservation(&env, &contributor)
    }

    /// Reservations in the order they were made.
    pub fn reservations(env: Env) -> Vec<Reservation> {
        let mut all = Vec::new(&env);
        for contributor in get_contributors(&env).iter() {
            if let Some(reservation) = get_reservation(&env, &contributor) {
                all.push_back(reservation);
            }
        }
        all
    }

    pub fn config(env: Env) -> Result<CommitmentConfig, Error> {
        load_config(&env)
    }

    /// Reward a contribution of `value` would receive at the current accumulator.
    pub fn estimate_reward(env: Env, value: u128) -> Result<u128, Error> {
        Ok(incremental(&env, get_total_value(&env), value)?)
    }

    pub fn value_equivalent(env: Env, kind: ValueKind, amount: u128) -> Result<u128, Error> {
        let config = load_config(&env)?;
        value_of(&env, &config, kind, amount)
    }
}
