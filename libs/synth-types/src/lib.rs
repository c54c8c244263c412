#![no_std]

mod error;
mod interfaces;
mod params;

pub use error::*;
pub use interfaces::*;
pub use params::*;

/// Q96 constant (2^96) for fixed-point math
pub const Q96: u128 = 1 << 96;

/// Minimum tick index, the lowest tick representable by a uint160 sqrt price
pub const MIN_TICK: i32 = -887272;

/// Maximum tick index
pub const MAX_TICK: i32 = 887272;

/// Minimum sqrt price (at MIN_TICK)
/// sqrt(1.0001^-887272) * 2^96
pub const MIN_SQRT_RATIO: u128 = 4295128739;

/// Maximum sqrt price (at MAX_TICK), split around bit 128 because it needs 160 bits.
/// 0xfffd8963efd1fc6a506488495d951d5263988d26
pub const MAX_SQRT_RATIO_HI: u128 = 0xfffd8963;
pub const MAX_SQRT_RATIO_LO: u128 = 0xefd1fc6a506488495d951d5263988d26;

/// Basis point denominator (10000 = 100%)
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Decimal places of the synthetic token
pub const SYNTH_DECIMALS: u32 = 18;

/// Decimal places of the collateral token
pub const COLLATERAL_DECIMALS: u32 = 6;

/// Divisor bringing an 18-decimal synthetic amount down to 6-decimal collateral units
pub const SYNTH_TO_COLLATERAL_SCALE: i128 = 1_000_000_000_000;

/// Seconds added to the ledger timestamp when a caller does not pick a deadline
pub const DEFAULT_DEADLINE_SECS: u64 = 300;

/// Fee amount in hundredths of a basis point (1e-6)
/// 500 = 0.05%, 3000 = 0.3%, 10000 = 1%
pub type Fee = u32;

/// Get tick spacing for a given fee amount
pub fn fee_to_tick_spacing(fee: Fee) -> Option<i32> {
    match fee {
        500 => Some(10),    // 0.05%
        3000 => Some(60),   // 0.3%
        10000 => Some(200), // 1%
        _ => None,
    }
}

/// Widest (lower, upper) tick pair usable with a tick spacing
pub fn full_range_ticks(tick_spacing: i32) -> (i32, i32) {
    let lower = (MIN_TICK / tick_spacing) * tick_spacing;
    let upper = (MAX_TICK / tick_spacing) * tick_spacing;
    (lower, upper)
}

// TTL constants shared by every contract in the workspace
pub const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
pub const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
pub const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
pub const PERSISTENT_TTL_EXTEND: u32 = 518400;
