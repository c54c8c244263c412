#![no_std]

pub mod collateral_math;
pub mod oracle_math;
pub mod tick_math;

pub use collateral_math::*;
pub use oracle_math::*;
pub use tick_math::*;
