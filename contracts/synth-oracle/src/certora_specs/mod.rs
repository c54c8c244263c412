// ============================================================================
// CERTORA SUNBEAM FORMAL VERIFICATION SPECIFICATIONS
// ============================================================================
//
// Rules for the TWAP oracle.
//
// - tick_specs.rs : sqrt price ladder bounds and ordering
// - twap_specs.rs : mean tick rounding
//
// USAGE:
// - Unit tests: cargo test -p synth-oracle
// - Certora build: cargo build --features certora -p synth-oracle
//
// ============================================================================

pub mod tick_specs;
pub mod twap_specs;
