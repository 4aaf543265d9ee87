use commitment::{Error, Phase, ValueKind};
use commitment_tests::assert_contract_error;
use commitment_tests::utils::constants::*;
use commitment_tests::utils::*;
use vesting_ledger::LockState;

#[test]
fn test_whitelist_public_finish_unlock() {
    let d = Deployment::new();
    let alice = d.contributor(ValueKind::Stable, 100 * E);
    let bob = d.contributor(ValueKind::Native, 50 * E);
    d.engine
        .reserve(&d.admin, &alice, &ValueKind::Stable, &(100 * E));

    d.go_to(Phase::Whitelist);
    assert_contract_error!(
        d.engine.try_contribute(&bob, &ValueKind::Native, &(50 * E)),
        Error::NotWhitelisted
    );
    let whitelisted = d.engine.contribute(&alice, &ValueKind::Stable, &(100 * E));
    assert_eq!(whitelisted.live_reward, 0);
    assert_eq!(d.engine.escrowed_reward(), 0);

    d.go_to(Phase::Public);
    let public = d.engine.contribute(&bob, &ValueKind::Native, &(50 * E));
    assert!(public.live_reward > 0);
    assert_eq!(d.engine.total_value_committed(), 150 * E);
    assert!(d.engine.agreement_accepted_at(&alice).is_some());
    assert!(d.engine.agreement_accepted_at(&bob).is_some());

    d.go_to(Phase::Finished);
    assert_eq!(d.engine.advance_phase(), Phase::Finished);
    assert_eq!(d.native_ledger.lock_state(), LockState::AcceptingUnlocks);
    assert_eq!(d.stable_ledger.lock_state(), LockState::AcceptingUnlocks);
    assert_contract_error!(
        d.engine.try_contribute(&bob, &ValueKind::Native, &E),
        Error::PhaseMismatch
    );

    d.set_time(Deployment::phase_start(Phase::Public) + LOCK_DURATION);
    for (who, kind, ledger, amount) in [
        (&alice, ValueKind::Stable, &d.stable_ledger, 100 * E),
        (&bob, ValueKind::Native, &d.native_ledger, 50 * E),
    ] {
        d.approve_reward(who, &ledger.address, ledger.entry(who).reward_due);
        assert_eq!(ledger.unlock(who), amount);
        assert_eq!(d.balance(kind, who), amount);
        assert_eq!(d.reward_balance(who), 0);
    }
    assert_eq!(
        d.reward.total_supply() as u128,
        d.reward_balance(&d.platform)
    );
}

#[test]
fn test_abort_releases_everything() {
    let d = Deployment::new();
    let alice = d.contributor(ValueKind::Stable, 10 * E);
    d.engine
        .reserve(&d.admin, &alice, &ValueKind::Stable, &(500 * E));
    assert!(d.engine.escrowed_reward() > 0);

    d.engine.abort(&d.admin);
    assert!(d.engine.is_aborted());
    assert_eq!(d.engine.escrowed_reward(), 0);
    assert_eq!(d.engine.total_value_committed(), 0);
    assert_eq!(d.reward.total_supply(), 0);
    assert!(d.engine.reservation(&alice).unwrap().expired);
    assert_eq!(d.native_ledger.lock_state(), LockState::ReleaseAll);
    assert_eq!(d.stable_ledger.lock_state(), LockState::ReleaseAll);

    d.go_to(Phase::Whitelist);
    assert_contract_error!(
        d.engine.try_contribute(&alice, &ValueKind::Stable, &E),
        Error::Aborted
    );
    assert_contract_error!(d.engine.try_advance_phase(), Error::Aborted);
    // nothing was locked, so there is nothing to release
    assert_eq!(d.stable_ledger.unlock(&alice), 0);
    assert_eq!(d.balance(ValueKind::Stable, &alice), 10 * E);
}
