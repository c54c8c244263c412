use soroban_sdk::{Env, U256};
use synth_types::{
    SynthError, MAX_SQRT_RATIO_HI, MAX_SQRT_RATIO_LO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK,
};

/// sqrt(1.0001^-(2^i)) in Q128, one entry per bit of |tick|.
/// Twenty bits cover |tick| <= 887272.
const SQRT_RATIO_LADDER: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

// Q128 constant: 2^128 represented as U256
pub(crate) fn q128(env: &Env) -> U256 {
    U256::from_u128(env, 1u128 << 64).mul(&U256::from_u128(env, 1u128 << 64))
}

/// U256 max = 2^256 - 1
pub(crate) fn u256_max(env: &Env) -> U256 {
    let high = U256::from_u128(env, u128::MAX);
    high.mul(&q128(env)).add(&U256::from_u128(env, u128::MAX))
}

/// Lowest sqrt price the ladder can produce (at MIN_TICK)
pub fn min_sqrt_ratio(env: &Env) -> U256 {
    U256::from_u128(env, MIN_SQRT_RATIO)
}

/// Highest sqrt price the ladder can produce (at MAX_TICK)
pub fn max_sqrt_ratio(env: &Env) -> U256 {
    U256::from_u128(env, MAX_SQRT_RATIO_HI)
        .mul(&q128(env))
        .add(&U256::from_u128(env, MAX_SQRT_RATIO_LO))
}

/// Calculate sqrt(1.0001^tick) * 2^96 as a Q64.96 value.
///
/// The ladder multiplies the per-bit constants of |tick| together in Q128,
/// which yields the price for -|tick|; positive ticks take the reciprocal
/// through `U256::MAX / ratio`. The Q128 result is then shifted right by 32
/// bits, rounding up whenever a discarded bit is set, so the value fits in
/// 160 bits.
pub fn sqrt_price_at_tick(env: &Env, tick: i32) -> Result<U256, SynthError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(SynthError::OutOfRange);
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from_u128(env, SQRT_RATIO_LADDER[0])
    } else {
        q128(env)
    };

    for (bit, factor) in SQRT_RATIO_LADDER.iter().enumerate().skip(1) {
        if abs_tick & (1u32 << bit) != 0 {
            ratio = mul_shift_128(env, &ratio, *factor);
        }
    }

    if tick > 0 {
        ratio = u256_max(env).div(&ratio);
    }

    // Q128.128 -> Q64.96
    let shift_32 = U256::from_u128(env, 1u128 << 32);
    let sqrt_price = ratio.div(&shift_32);
    if ratio.rem_euclid(&shift_32) == U256::from_u32(env, 0) {
        Ok(sqrt_price)
    } else {
        Ok(sqrt_price.add(&U256::from_u32(env, 1)))
    }
}

/// Helper: multiply by u128 and right shift by 128 bits
fn mul_shift_128(env: &Env, x: &U256, y: u128) -> U256 {
    let product = x.mul(&U256::from_u128(env, y));
    product.div(&q128(env))
}
