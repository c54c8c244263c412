use crate::tick_math::q128;
use soroban_sdk::{Env, U256};
use synth_types::SynthError;

/// Arithmetic mean tick between two tick-cumulative samples taken `period`
/// seconds apart.
///
/// Integer division truncates toward zero; a negative delta with a remainder
/// is pulled down by one so the mean is floored toward negative infinity.
pub fn mean_tick(
    tick_cumulative_past: i64,
    tick_cumulative_now: i64,
    period: u32,
) -> Result<i32, SynthError> {
    if period == 0 {
        return Err(SynthError::OutOfRange);
    }

    let delta = tick_cumulative_now
        .checked_sub(tick_cumulative_past)
        .ok_or(SynthError::Overflow)?;
    let period = i64::from(period);

    let mut tick = delta / period;
    if delta < 0 && delta % period != 0 {
        tick -= 1;
    }

    i32::try_from(tick).map_err(|_| SynthError::OutOfRange)
}

/// Harmonic mean liquidity over `period` from two seconds-per-liquidity
/// samples (Q128 cumulatives held in 160 bits):
/// `(period * (2^160 - 1)) / (delta << 32)`
///
/// The accumulator wraps at 2^160, so `delta` is taken modulo 2^160.
pub fn harmonic_mean_liquidity(
    env: &Env,
    period: u32,
    seconds_per_liquidity_past: &U256,
    seconds_per_liquidity_now: &U256,
) -> Result<u128, SynthError> {
    if period == 0 {
        return Err(SynthError::OutOfRange);
    }

    let two_160 = U256::from_u128(env, 1u128 << 32).mul(&q128(env));
    let uint160_max = two_160.sub(&U256::from_u32(env, 1));

    if seconds_per_liquidity_past > &uint160_max || seconds_per_liquidity_now > &uint160_max {
        return Err(SynthError::OracleFailure);
    }

    let delta = if seconds_per_liquidity_now >= seconds_per_liquidity_past {
        seconds_per_liquidity_now.sub(seconds_per_liquidity_past)
    } else {
        seconds_per_liquidity_now
            .add(&two_160)
            .sub(seconds_per_liquidity_past)
    };
    if delta == U256::from_u32(env, 0) {
        return Err(SynthError::OracleFailure);
    }

    let numerator = U256::from_u32(env, period).mul(&uint160_max);
    let denominator = delta.mul(&U256::from_u128(env, 1u128 << 32));

    numerator
        .div(&denominator)
        .to_u128()
        .ok_or(SynthError::Overflow)
}
