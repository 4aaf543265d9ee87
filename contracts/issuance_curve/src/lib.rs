//! Capped reward issuance curve.
//!
//! Maps cumulative contributed value to cumulative reward supply:
//! `cumulative(x) = floor(CAP * (1 - e^(-x / D)))` with `D = CAP / INITIAL_RATE`.
//!
//! The functions hold no state. The caller owns the accumulator of value
//! issued so far and passes it in explicitly.
#![no_std]

use fp_math::{mul_div, DECIMAL_ONE};
use soroban_sdk::{contracterror, Env, U256};

#[cfg(test)]
mod test;

/// Upper bound of the reward supply, in ulps.
pub const CAP: u128 = 1_500_000_000_000_000_000_000_000_000;

/// Reward per unit of value at the origin, as a decimal fraction (6.5).
pub const INITIAL_RATE: u128 = 6_500_000_000_000_000_000;

/// `CAP / INITIAL_RATE` rounded up, the value scale of the exponent.
pub const D: u128 = 230_769_230_769_230_769_230_769_231;

/// Value from which the exponential is replaced by its linear tail towards `CAP`.
pub const LINEAR_LIMIT: u128 = 2_100_000_000_000_000_000_000_000_000;

/// Value at and above which the curve returns `CAP`.
pub const ASYMPTOTIC_LIMIT: u128 = 8_300_000_000_000_000_000_000_000_000;

/// `cumulative(LINEAR_LIMIT)`.
pub const REWARD_AT_LINEAR_LIMIT: u128 = 1_499_832_501_287_264_827_896_539_871;

/// Extra fractional digits carried through the series so that the final floor
/// equals the floor of the exact exponential.
const GUARD_SCALE: u128 = 1_000_000_000_000_000_000;

/// Fractional digits of reward kept while inverting. Flooring a fine value by
/// this scale gives back `cumulative`.
const FINE_SCALE: u128 = 1_000_000_000;

const CAP_FINE: u128 = CAP * FINE_SCALE;
const REWARD_AT_LINEAR_LIMIT_FINE: u128 = REWARD_AT_LINEAR_LIMIT * FINE_SCALE;

/// `ln 2` as a decimal fraction, rounded down.
const LN_2: u128 = 693_147_180_559_945_309;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CurveError {
    Overflow = 200,
    InvalidBracket = 201,
    TargetOutOfBracket = 202,
    InsufficientReward = 203,
}

/// Total reward issued once `value` has been contributed in total.
///
/// Strictly below `CAP` for every value under `ASYMPTOTIC_LIMIT`; exactly
/// `CAP` at and above it.
pub fn cumulative(env: &Env, value: u128) -> Result<u128, CurveError> {
    Ok(cumulative_fine(env, value)? / FINE_SCALE)
}

// cumulative scaled by FINE_SCALE, rounded down
fn cumulative_fine(env: &Env, value: u128) -> Result<u128, CurveError> {
    if value >= ASYMPTOTIC_LIMIT {
        return Ok(CAP_FINE);
    }
    if value >= LINEAR_LIMIT {
        let tail = mul_div(
            env,
            CAP_FINE - REWARD_AT_LINEAR_LIMIT_FINE,
            value - LINEAR_LIMIT,
            ASYMPTOTIC_LIMIT - LINEAR_LIMIT,
        )
        .ok_or(CurveError::Overflow)?;
        return Ok(REWARD_AT_LINEAR_LIMIT_FINE + tail);
    }
    exponential_series(env, value)
}

// CAP * (1 - e^(-x/D)) = CAP * sum_{k>=1} (-1)^(k+1) x^k / (k! D^k)
// Positive and negative terms are summed apart; partial sums of the
// alternating series dip below zero for large x.
fn exponential_series(env: &Env, value: u128) -> Result<u128, CurveError> {
    let x = U256::from_u128(env, value);
    let step = U256::from_u128(env, D);
    let zero = U256::from_u32(env, 0);

    let mut term = U256::from_u128(env, CAP).mul(&U256::from_u128(env, GUARD_SCALE));
    let mut gains = zero.clone();
    let mut losses = zero.clone();
    let mut denominator = step.clone();
    loop {
        term = term.mul(&x).div(&denominator);
        if term == zero {
            break;
        }
        gains = gains.add(&term);
        denominator = denominator.add(&step);

        term = term.mul(&x).div(&denominator);
        if term == zero {
            break;
        }
        losses = losses.add(&term);
        denominator = denominator.add(&step);
    }
    gains
        .sub(&losses)
        .div(&U256::from_u128(env, GUARD_SCALE / FINE_SCALE))
        .to_u128()
        .ok_or(CurveError::Overflow)
}

/// Reward issued for contributing `delta` on top of `base`.
pub fn incremental(env: &Env, base: u128, delta: u128) -> Result<u128, CurveError> {
    let top = base.checked_add(delta).ok_or(CurveError::Overflow)?;
    let upper = cumulative(env, top)?;
    let lower = cumulative(env, base)?;
    Ok(upper - lower)
}

/// Least `value` in `[lo, hi]` with `cumulative(value) >= target`.
///
/// The bracket must satisfy `cumulative(lo) <= target <= cumulative(hi)`.
/// On a plateau of equal outputs the lowest value is returned.
pub fn cumulative_inverse(env: &Env, target: u128, lo: u128, hi: u128) -> Result<u128, CurveError> {
    if hi < lo {
        return Err(CurveError::InvalidBracket);
    }
    if target > CAP {
        return Err(CurveError::TargetOutOfBracket);
    }
    let goal = target * FINE_SCALE;
    let at_lo = cumulative_fine(env, lo)?;
    let at_hi = cumulative_fine(env, hi)?;
    if at_lo / FINE_SCALE > target || at_hi < goal {
        return Err(CurveError::TargetOutOfBracket);
    }
    if at_lo >= goal {
        return Ok(lo);
    }
    Bracket {
        low: lo,
        at_low: at_lo,
        high: hi,
        at_high: at_hi,
    }
    .least_reaching(env, goal)
}

/// Value to take off `base` so that `burn` reward leaves circulation.
pub fn incremental_inverse(env: &Env, base: u128, burn: u128) -> Result<u128, CurveError> {
    let at_base = cumulative_fine(env, base)?;
    let issued = at_base / FINE_SCALE;
    if burn > issued {
        return Err(CurveError::InsufficientReward);
    }
    let goal = (issued - burn) * FINE_SCALE;
    if goal == 0 {
        return Ok(base);
    }
    let lowered = Bracket {
        low: 0,
        at_low: 0,
        high: base,
        at_high: at_base,
    }
    .least_reaching(env, goal)?;
    Ok(base - lowered)
}

/// Bracket width under which guesses come from the chord through its ends.
const CHORD_WIDTH: u128 = 1 << 40;

// Search state over fine cumulative values: at_low < goal <= at_high.
struct Bracket {
    low: u128,
    at_low: u128,
    high: u128,
    at_high: u128,
}

impl Bracket {
    // Each round evaluates a guess just under and one just over the root and
    // halves the bracket whenever the guesses did not.
    fn least_reaching(mut self, env: &Env, goal: u128) -> Result<u128, CurveError> {
        while self.high - self.low > 1 {
            let width = self.high - self.low;
            let (under, over) = self.guesses(env, goal)?;
            self.narrow(env, goal, under)?;
            self.narrow(env, goal, over)?;
            if self.high - self.low > width / 2 {
                let mid = self.low + (self.high - self.low) / 2;
                self.narrow(env, goal, mid)?;
            }
        }
        Ok(self.high)
    }

    fn narrow(&mut self, env: &Env, goal: u128, guess: u128) -> Result<(), CurveError> {
        if guess <= self.low || guess >= self.high {
            return Ok(());
        }
        let at = cumulative_fine(env, guess)?;
        if at >= goal {
            self.high = guess;
            self.at_high = at;
        } else {
            self.low = guess;
            self.at_low = at;
        }
        Ok(())
    }

    fn guesses(&self, env: &Env, goal: u128) -> Result<(u128, u128), CurveError> {
        if goal > REWARD_AT_LINEAR_LIMIT_FINE {
            let offset = mul_div(
                env,
                goal - REWARD_AT_LINEAR_LIMIT_FINE,
                ASYMPTOTIC_LIMIT - LINEAR_LIMIT,
                CAP_FINE - REWARD_AT_LINEAR_LIMIT_FINE,
            )
            .ok_or(CurveError::Overflow)?;
            let root = LINEAR_LIMIT + offset;
            return Ok((root - 1, root + 1));
        }
        let width = self.high - self.low;
        if width <= CHORD_WIDTH {
            let offset = mul_div(
                env,
                goal - self.at_low,
                width,
                self.at_high - self.at_low,
            )
            .ok_or(CurveError::Overflow)?;
            let chord = self.low + offset + 1;
            return Ok((chord - 1, chord));
        }
        // CAP - cumulative(x) = CAP * e^(-x/D), so the root sits D * ln(ratio) past low
        let (ln_under, ln_over) = ln_bounds(env, CAP_FINE - self.at_low, CAP_FINE - goal)?;
        let under = mul_div(env, D, ln_under, DECIMAL_ONE).ok_or(CurveError::Overflow)?;
        let over = mul_div(env, D, ln_over, DECIMAL_ONE).ok_or(CurveError::Overflow)?;
        Ok((
            self.low.saturating_add(under),
            self.low.saturating_add(over).saturating_add(1),
        ))
    }
}

// Lower and upper bounds of ln(num / den) as decimal fractions, for num >= den > 0.
// num / den = 2^k * m with m in [1, 2), and 2(m-1)/(m+1) <= ln m <= (m^2-1)/(2m).
fn ln_bounds(env: &Env, num: u128, den: u128) -> Result<(u128, u128), CurveError> {
    let doublings = 127 - (num / den).leading_zeros();
    let m = mul_div(env, num, DECIMAL_ONE, den << doublings).ok_or(CurveError::Overflow)?;
    let excess = m - DECIMAL_ONE;
    let under = mul_div(env, 2 * excess, DECIMAL_ONE, m + DECIMAL_ONE).ok_or(CurveError::Overflow)?;
    let over = mul_div(env, excess, m + DECIMAL_ONE, 2 * m).ok_or(CurveError::Overflow)?;
    let k = doublings as u128;
    Ok((k * LN_2 + under, k * (LN_2 + 1) + over + 1))
}
