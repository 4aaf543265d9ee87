#![allow(clippy::unwrap_used)]

use super::*;
use soroban_sdk::Env;

const E: u128 = 1_000_000_000_000_000_000;

// (value, cumulative) pairs; random rows drawn uniformly from [0, 1e9 E) and [0, 1e6 E).
const REFERENCE: [(u128, u128); 42] = [
    (0, 0),
    (1, 6),
    (2, 12),
    (3, 19),
    (10, 64),
    (1000, 6499),
    (1000000000000000000, 6499999985916666687),
    (100000000000000000000, 649999859166687009257),
    (300000000000000000000, 1949998732500549249821),
    (900000000000000000000, 5849988592514829735541),
    (1000000000000000000000, 6499985916687009237221),
    (10000000000000000000000, 64998591687009038883082),
    (100000000000000000000000, 649859187007055669375610),
    (1000000000000000000000000, 6485936987240536265939091),
    (10000000000000000000000000, 63611790777407150693808584),
    (100000000000000000000000000, 527483488497735414122531320),
    (500000000000000000000000000, 1328161734010968421019856056),
    (1000000000000000000000000000, 1480314406894588555264999817),
    (2000000000000000000000000000, 1499741651616058784927798676),
    (2099999999999999999999999999, 1499832501287264827896539871),
    (2100000000000000000000000000, 1499832501287264827896539871),
    (2100000000000000000000000001, 1499832501287264827896539871),
    (5000000000000000000000000000, 1499910847459350634202997028),
    (8299999999999999999999999999, 1499999999999999999999999999),
    (8300000000000000000000000000, 1500000000000000000000000000),
    (8300000000000000000000000001, 1500000000000000000000000000),
    (391586193348529581364748088, 1225116634408018436597833096),
    (901487253438739123235889844, 1469832185163585325498304870),
    (426251315417790158681077565, 1263456682079766816516966042),
    (162479659982770382256537158, 758153861985754257271692493),
    (692890973521713165033301113, 1425507918200765274556364661),
    (249718850580184569063034800, 991682949575023945459317420),
    (369772856133788417258242511, 1197865783590613890678864897),
    (29754711060633125137295227, 181456093173840178923204525),
    (356244215824607363308577709, 1179623953279950485107092301),
    (792996342616769320058972889, 1451725527444793550963680139),
    (650529080310711616524606453, 1410497993942739881705682668),
    (39745536722008057063712995, 237322521926271447883709340),
    (30041441503996255312852, 195256660285229461956372),
    (531864025294614448467516, 3453135339205344058210721),
    (44911716821362560740834, 291897754220761535903228),
    (291178205396578388922187, 1891464785268757774223793),
];

fn env() -> Env {
    let env = Env::default();
    env.budget().reset_unlimited();
    env
}

fn abs_diff(a: u128, b: u128) -> u128 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[test]
fn test_matches_reference_table() {
    let env = env();
    for (value, expected) in REFERENCE.iter() {
        let actual = cumulative(&env, *value).unwrap();
        assert!(
            abs_diff(actual, *expected) <= 2,
            "cumulative({}) = {}, expected {}",
            value,
            actual,
            expected
        );
    }
}

#[test]
fn test_reference_table_is_monotone() {
    let env = env();
    let mut points = REFERENCE;
    points.sort_unstable_by_key(|(value, _)| *value);
    let mut previous = 0u128;
    for (value, _) in points.iter() {
        let reward = cumulative(&env, *value).unwrap();
        assert!(reward >= previous);
        previous = reward;
    }
}

#[test]
fn test_origin_is_linear_at_initial_rate() {
    let env = env();
    assert_eq!(cumulative(&env, 0).unwrap(), 0);
    assert_eq!(cumulative(&env, 2).unwrap(), 12);
    let one = cumulative(&env, E).unwrap();
    assert!(one < 65 * E / 10 && one > 65 * E / 10 - E / 1_000_000);
}

#[test]
fn test_stays_below_cap_until_asymptotic_limit() {
    let env = env();
    assert!(cumulative(&env, ASYMPTOTIC_LIMIT - 1).unwrap() < CAP);
    assert_eq!(cumulative(&env, ASYMPTOTIC_LIMIT).unwrap(), CAP);
    assert_eq!(cumulative(&env, u128::MAX).unwrap(), CAP);
}

#[test]
fn test_linear_tail_joins_series_without_step() {
    let env = env();
    let below = cumulative(&env, LINEAR_LIMIT - 1).unwrap();
    let at = cumulative(&env, LINEAR_LIMIT).unwrap();
    assert_eq!(at, REWARD_AT_LINEAR_LIMIT);
    assert!(below <= at);
}

#[test]
fn test_incremental_zero_delta() {
    let env = env();
    assert_eq!(incremental(&env, 0, 0).unwrap(), 0);
    assert_eq!(incremental(&env, 1_000 * E, 0).unwrap(), 0);
    assert_eq!(incremental(&env, LINEAR_LIMIT + 5, 0).unwrap(), 0);
}

#[test]
fn test_incremental_partition_of_1000() {
    let env = env();
    let first = incremental(&env, 0, 100 * E).unwrap();
    let second = incremental(&env, 100 * E, 900 * E).unwrap();
    let whole = cumulative(&env, 1_000 * E).unwrap();
    assert!(abs_diff(first + second, whole) <= 2);
}

#[test]
fn test_incremental_rejects_overflow() {
    let env = env();
    assert_eq!(incremental(&env, u128::MAX, 1), Err(CurveError::Overflow));
}

#[test]
fn test_inverse_recovers_exact_point_on_steep_part() {
    let env = env();
    let target = cumulative(&env, 300 * E).unwrap();
    assert_eq!(cumulative_inverse(&env, target, 0, 1_000 * E).unwrap(), 300 * E);
}

#[test]
fn test_inverse_returns_lowest_point_of_plateau() {
    let env = env();
    // the linear tail rises by one ulp every ~37k ulps of value
    let target = cumulative(&env, LINEAR_LIMIT + 100_000).unwrap();
    let found = cumulative_inverse(&env, target, LINEAR_LIMIT, LINEAR_LIMIT + 1_000_000).unwrap();
    assert_eq!(found, LINEAR_LIMIT + 74_031);
    assert!(cumulative(&env, found - 1).unwrap() < cumulative(&env, found).unwrap());
}

#[test]
fn test_inverse_rejects_bad_brackets() {
    let env = env();
    assert_eq!(
        cumulative_inverse(&env, 0, 10, 5),
        Err(CurveError::InvalidBracket)
    );
    let above = cumulative(&env, 10 * E).unwrap() + 1;
    assert_eq!(
        cumulative_inverse(&env, above, 0, 10 * E),
        Err(CurveError::TargetOutOfBracket)
    );
    let below = cumulative(&env, 5 * E).unwrap() - 1;
    assert_eq!(
        cumulative_inverse(&env, below, 5 * E, 10 * E),
        Err(CurveError::TargetOutOfBracket)
    );
}

#[test]
fn test_incremental_inverse_undoes_incremental() {
    let env = env();
    let burn = incremental(&env, 300 * E, 700 * E).unwrap();
    assert_eq!(incremental_inverse(&env, 1_000 * E, burn).unwrap(), 700 * E);
}

#[test]
fn test_incremental_inverse_partial_ticket_rollback() {
    let env = env();
    let reserved = cumulative(&env, 300 * E).unwrap();
    let released = reserved * 100 / 300;
    let delta = incremental_inverse(&env, 300 * E, reserved - released).unwrap();
    assert_eq!(delta, 200_000_043_333_327_074_072);
}

#[test]
fn test_incremental_inverse_rejects_burning_more_than_issued() {
    let env = env();
    let issued = cumulative(&env, 10 * E).unwrap();
    assert_eq!(
        incremental_inverse(&env, 10 * E, issued + 1),
        Err(CurveError::InsufficientReward)
    );
    assert_eq!(incremental_inverse(&env, 10 * E, issued).unwrap(), 10 * E);
}

// Least preimage check: the value reaches `goal` and one ulp less does not.
fn assert_least_reaching(env: &Env, value: u128, goal: u128) {
    assert!(cumulative(env, value).unwrap() >= goal);
    assert!(value == 0 || cumulative(env, value - 1).unwrap() < goal);
}

#[test]
fn test_incremental_inverse_fits_default_budget_at_cap_scale() {
    for base in [100_000_000 * E, 1_000_000_000 * E, LINEAR_LIMIT - 1] {
        let env = Env::default();
        let issued = cumulative(&env, base).unwrap();
        let burn = issued / 3;

        env.budget().reset_default();
        let delta = incremental_inverse(&env, base, burn).unwrap();

        env.budget().reset_unlimited();
        assert_least_reaching(&env, base - delta, issued - burn);
    }
}

#[test]
fn test_inverse_on_flat_part_of_series() {
    let env = env();
    // slope well below one ulp of reward per ulp of value
    let base = 2_000_000_000 * E;
    let target = cumulative(&env, base).unwrap() - 12_345;
    let found = cumulative_inverse(&env, target, 0, base).unwrap();
    assert_least_reaching(&env, found, target);
}

#[test]
fn test_inverse_target_across_linear_limit() {
    let env = env();
    let target = cumulative(&env, LINEAR_LIMIT + 10 * E).unwrap();
    let found = cumulative_inverse(&env, target, 1_000 * E, ASYMPTOTIC_LIMIT).unwrap();
    assert_least_reaching(&env, found, target);
    assert_eq!(cumulative_inverse(&env, CAP, 0, u128::MAX).unwrap(), ASYMPTOTIC_LIMIT);
}
