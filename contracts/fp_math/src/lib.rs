//! Decimal fixed point shared by the issuance curve, the commitment engine and
//! the custody ledger.
//!
//! Every quantity carries 18 fractional digits. Products that may leave the
//! `u128` range are formed on the host as 256-bit integers.
#![no_std]

use soroban_sdk::{Env, U256};

/// One whole unit expressed in ulps.
pub const DECIMAL_ONE: u128 = 1_000_000_000_000_000_000;

/// `a * b / denominator`, rounded down.
///
/// Returns `None` for a zero denominator or when the quotient does not fit in
/// `u128`.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    if let Some(product) = a.checked_mul(b) {
        return Some(product / denominator);
    }
    U256::from_u128(env, a)
        .mul(&U256::from_u128(env, b))
        .div(&U256::from_u128(env, denominator))
        .to_u128()
}

/// `amount * fraction` where `fraction` is a decimal fraction (`DECIMAL_ONE` == 1.0).
pub fn decimal_fraction(env: &Env, amount: u128, fraction: u128) -> Option<u128> {
    mul_div(env, amount, fraction, DECIMAL_ONE)
}

/// Share of `whole` corresponding to `part / total`, rounded down.
pub fn proportion(env: &Env, whole: u128, part: u128, total: u128) -> Option<u128> {
    mul_div(env, whole, part, total)
}

pub fn is_decimal_fraction(fraction: u128) -> bool {
    fraction <= DECIMAL_ONE
}

/// Converts an unsigned ulp amount into the signed amount used by the token interface.
pub fn to_token_amount(amount: u128) -> Option<i128> {
    i128::try_from(amount).ok()
}

/// Converts a token interface balance back into ulps; negative balances are rejected.
pub fn from_token_amount(amount: i128) -> Option<u128> {
    u128::try_from(amount).ok()
}
