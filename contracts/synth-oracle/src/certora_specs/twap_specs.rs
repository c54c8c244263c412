// ============================================================================
// MEAN TICK SPECIFICATIONS
// ============================================================================
//
// KEY INVARIANTS:
// 1. The mean tick is the floor of delta / period
// 2. A constant tick is recovered exactly
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume};
use cvlr_soroban_derive::rule;
use synth_math::mean_tick;

/// RULE: mean * period <= delta < (mean + 1) * period
#[rule]
pub fn mean_tick_is_floor(past: i64, now: i64, period: u32) {
    cvlr_assume!(period > 0);
    cvlr_assume!(past > -(1i64 << 48) && past < (1i64 << 48));
    cvlr_assume!(now > -(1i64 << 48) && now < (1i64 << 48));

    if let Ok(tick) = mean_tick(past, now, period) {
        let delta = now - past;
        let period = i64::from(period);
        cvlr_assert!(i64::from(tick) * period <= delta);
        cvlr_assert!(delta < (i64::from(tick) + 1) * period);
    }
}

/// RULE: A pool that held one tick for the whole period reports that tick
#[rule]
pub fn constant_tick_recovered(past: i64, tick: i32, period: u32) {
    cvlr_assume!(period > 0 && period <= 86_400);
    cvlr_assume!(tick >= -887_272 && tick <= 887_272);
    cvlr_assume!(past > -(1i64 << 48) && past < (1i64 << 48));

    let now = past + i64::from(tick) * i64::from(period);
    cvlr_assert!(mean_tick(past, now, period) == Ok(tick));
}
