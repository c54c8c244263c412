use soroban_fixed_point_math::FixedPoint;
use synth_types::{SynthError, BPS_DENOMINATOR, SYNTH_TO_COLLATERAL_SCALE};

/// Synthetic amount (18 decimals) expressed in collateral units (6 decimals).
/// Truncates; the sub-unit remainder is ignored by every ratio check.
pub fn scale_to_collateral(synth_amount: i128) -> i128 {
    synth_amount / SYNTH_TO_COLLATERAL_SCALE
}

/// Collateralization ratio in basis points, or `None` when the scaled supply
/// is zero and the ratio is undefined.
pub fn collateral_ratio_bps(collateral: i128, synth_supply: i128) -> Result<Option<i128>, SynthError> {
    let scaled_supply = scale_to_collateral(synth_supply);
    if scaled_supply == 0 {
        return Ok(None);
    }

    collateral
        .fixed_mul_floor(BPS_DENOMINATOR, scaled_supply)
        .map(Some)
        .ok_or(SynthError::Overflow)
}

/// Check that minting `amount` on top of `synth_supply` keeps the reserve at
/// or above `target_ratio_bps`.
pub fn check_mint(
    collateral: i128,
    synth_supply: i128,
    amount: i128,
    target_ratio_bps: u32,
) -> Result<(), SynthError> {
    let supply_after = synth_supply
        .checked_add(amount)
        .ok_or(SynthError::Overflow)?;

    match collateral_ratio_bps(collateral, supply_after)? {
        Some(ratio) if ratio < i128::from(target_ratio_bps) => Err(SynthError::InvariantViolation),
        _ => Ok(()),
    }
}

/// Largest amount `check_mint` would currently accept.
///
/// floor(C * 10000 / s) >= T  <=>  s <= floor(C * 10000 / T), so the scaled
/// post-mint supply may reach `max_scaled` and the raw supply may reach one
/// unit below `(max_scaled + 1) * 1e12`.
pub fn max_mintable(
    collateral: i128,
    synth_supply: i128,
    target_ratio_bps: u32,
) -> Result<i128, SynthError> {
    let max_scaled = collateral
        .fixed_mul_floor(BPS_DENOMINATOR, i128::from(target_ratio_bps))
        .ok_or(SynthError::Overflow)?;

    let ceiling = max_scaled
        .checked_add(1)
        .and_then(|units| units.checked_mul(SYNTH_TO_COLLATERAL_SCALE))
        .map(|raw| raw - 1)
        .ok_or(SynthError::Overflow)?;

    Ok((ceiling - synth_supply).max(0))
}

/// Synthetic amount issued against `collateral_amount` fresh collateral at
/// the target ratio: `collateral * 1e12 * 10000 / target_ratio_bps`
pub fn issuance_for_collateral(
    collateral_amount: i128,
    target_ratio_bps: u32,
) -> Result<i128, SynthError> {
    if target_ratio_bps == 0 {
        return Err(SynthError::OutOfRange);
    }

    collateral_amount
        .checked_mul(SYNTH_TO_COLLATERAL_SCALE)
        .and_then(|raw| raw.fixed_mul_floor(BPS_DENOMINATOR, i128::from(target_ratio_bps)))
        .ok_or(SynthError::Overflow)
}
