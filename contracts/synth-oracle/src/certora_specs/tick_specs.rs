// ============================================================================
// TICK LADDER SPECIFICATIONS
// ============================================================================
//
// KEY INVARIANTS:
// 1. Every in-range tick produces a price
// 2. Prices increase strictly with the tick
// 3. Prices stay inside [MIN_SQRT_RATIO, MAX_SQRT_RATIO]
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume, cvlr_satisfy};
use cvlr_soroban_derive::rule;
use soroban_sdk::Env;
use synth_math::{max_sqrt_ratio, min_sqrt_ratio, sqrt_price_at_tick};
use synth_types::{MAX_TICK, MIN_TICK};

/// RULE: Sanity check - the ladder is reachable
#[rule]
pub fn sanity_sqrt_price(env: Env, tick: i32) {
    cvlr_assume!(tick >= MIN_TICK && tick <= MAX_TICK);
    cvlr_satisfy!(sqrt_price_at_tick(&env, tick).is_ok());
}

/// RULE: In-range ticks never fail
#[rule]
pub fn in_range_tick_succeeds(env: Env, tick: i32) {
    cvlr_assume!(tick >= MIN_TICK && tick <= MAX_TICK);
    cvlr_assert!(sqrt_price_at_tick(&env, tick).is_ok());
}

/// RULE: Out-of-range ticks are rejected
#[rule]
pub fn out_of_range_tick_fails(env: Env, tick: i32) {
    cvlr_assume!(tick < MIN_TICK || tick > MAX_TICK);
    cvlr_assert!(sqrt_price_at_tick(&env, tick).is_err());
}

/// RULE: Sqrt price is strictly increasing in the tick
#[rule]
pub fn sqrt_price_monotonic(env: Env, tick1: i32, tick2: i32) {
    cvlr_assume!(tick1 >= MIN_TICK && tick2 <= MAX_TICK);
    cvlr_assume!(tick1 < tick2);

    if let (Ok(lower), Ok(upper)) = (
        sqrt_price_at_tick(&env, tick1),
        sqrt_price_at_tick(&env, tick2),
    ) {
        cvlr_assert!(lower < upper);
    }
}

/// RULE: Sqrt price stays inside the representable bounds
#[rule]
pub fn sqrt_price_bounded(env: Env, tick: i32) {
    cvlr_assume!(tick >= MIN_TICK && tick <= MAX_TICK);

    if let Ok(price) = sqrt_price_at_tick(&env, tick) {
        cvlr_assert!(price >= min_sqrt_ratio(&env));
        cvlr_assert!(price <= max_sqrt_ratio(&env));
    }
}
