// ============================================================================
// CERTORA SUNBEAM FORMAL VERIFICATION SPECIFICATIONS
// ============================================================================
//
// Rules for the reserve's collateral check.
//
// - ratio_specs.rs : mint acceptance is monotone and respects the target
//
// USAGE:
// - Unit tests: cargo test -p synth-reserve
// - Certora build: cargo build --features certora -p synth-reserve
//
// ============================================================================

pub mod ratio_specs;
