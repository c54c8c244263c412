#![no_std]

#[cfg(feature = "certora")]
pub mod certora_specs;

use soroban_sdk::{contract, contractimpl, log, vec, Address, Env, Vec, U256};
use synth_math::{harmonic_mean_liquidity, mean_tick};
use synth_types::{settle, PricePoolClient, SynthError, TwapConsultation};

/// Stateless TWAP oracle over any pool exposing cumulative observations
#[contract]
pub struct SynthOracle;

/// Two observations `period` seconds apart, oldest first
struct Window {
    tick_cumulatives: (i64, i64),
    seconds_per_liquidity: (U256, U256),
}

#[contractimpl]
impl SynthOracle {
    /// sqrt(1.0001^tick) * 2^96
    pub fn sqrt_price_at_tick(env: Env, tick: i32) -> Result<U256, SynthError> {
        synth_math::sqrt_price_at_tick(&env, tick)
    }

    /// Time-weighted sqrt price of `pool` over the last `period` seconds
    pub fn consult_twap(env: Env, pool: Address, period: u32) -> Result<U256, SynthError> {
        let window = observe_window(&env, &pool, period)?;
        let tick = mean_tick(window.tick_cumulatives.0, window.tick_cumulatives.1, period)?;
        synth_math::sqrt_price_at_tick(&env, tick)
    }

    /// Mean tick and harmonic mean liquidity of `pool` over the last `period` seconds
    pub fn consult(env: Env, pool: Address, period: u32) -> Result<TwapConsultation, SynthError> {
        let window = observe_window(&env, &pool, period)?;

        let tick = mean_tick(window.tick_cumulatives.0, window.tick_cumulatives.1, period)?;
        let liquidity = harmonic_mean_liquidity(
            &env,
            period,
            &window.seconds_per_liquidity.0,
            &window.seconds_per_liquidity.1,
        )?;

        Ok(TwapConsultation {
            mean_tick: tick,
            harmonic_mean_liquidity: liquidity,
        })
    }
}

fn observe_window(env: &Env, pool: &Address, period: u32) -> Result<Window, SynthError> {
    if period == 0 {
        return Err(SynthError::OutOfRange);
    }

    let seconds_agos: Vec<u32> = vec![env, period, 0];
    let (tick_cumulatives, seconds_per_liquidity) = settle(
        PricePoolClient::new(env, pool).try_observe(&seconds_agos),
        SynthError::OracleFailure,
    )?;

    if tick_cumulatives.len() != 2 || seconds_per_liquidity.len() != 2 {
        log!(
            env,
            "malformed observation",
            tick_cumulatives.len(),
            seconds_per_liquidity.len()
        );
        return Err(SynthError::OracleFailure);
    }

    let (Some(tick_past), Some(tick_now), Some(spl_past), Some(spl_now)) = (
        tick_cumulatives.get(0),
        tick_cumulatives.get(1),
        seconds_per_liquidity.get(0),
        seconds_per_liquidity.get(1),
    ) else {
        return Err(SynthError::OracleFailure);
    };

    Ok(Window {
        tick_cumulatives: (tick_past, tick_now),
        seconds_per_liquidity: (spl_past, spl_now),
    })
}
