// ============================================================================
// COLLATERAL RATIO SPECIFICATIONS
// ============================================================================
//
// KEY INVARIANTS:
// 1. An accepted mint leaves the ratio at or above the target
// 2. If a mint is accepted, every smaller mint is accepted too
// 3. max_mintable is itself accepted
//
// ============================================================================

use cvlr::asserts::{cvlr_assert, cvlr_assume, cvlr_satisfy};
use cvlr_soroban_derive::rule;
use synth_math::{check_mint, collateral_ratio_bps, max_mintable};

/// RULE: Sanity check - an accepting state is reachable
#[rule]
pub fn sanity_check_mint(collateral: i128, supply: i128, amount: i128) {
    cvlr_assume!(collateral > 0 && supply >= 0 && amount > 0);
    cvlr_satisfy!(check_mint(collateral, supply, amount, 12_000).is_ok());
}

/// RULE: Accepted mints never push the ratio under the target
#[rule]
pub fn accepted_mint_respects_target(collateral: i128, supply: i128, amount: i128, target: u32) {
    cvlr_assume!(collateral >= 0 && supply >= 0 && amount > 0);
    cvlr_assume!(target >= 10_000);

    if check_mint(collateral, supply, amount, target).is_ok() {
        match collateral_ratio_bps(collateral, supply + amount) {
            Ok(Some(ratio)) => cvlr_assert!(ratio >= i128::from(target)),
            Ok(None) => cvlr_assert!(true),
            Err(_) => cvlr_assert!(false),
        }
    }
}

/// RULE: Acceptance is monotone in the minted amount
#[rule]
pub fn smaller_mint_also_accepted(collateral: i128, supply: i128, amount: i128, smaller: i128) {
    cvlr_assume!(collateral >= 0 && supply >= 0);
    cvlr_assume!(smaller > 0 && smaller <= amount);

    if check_mint(collateral, supply, amount, 12_000).is_ok() {
        cvlr_assert!(check_mint(collateral, supply, smaller, 12_000).is_ok());
    }
}

/// RULE: The advertised headroom can always be minted
#[rule]
pub fn max_mintable_is_accepted(collateral: i128, supply: i128) {
    cvlr_assume!(collateral >= 0 && collateral <= i128::MAX / 10_000);
    cvlr_assume!(supply >= 0);

    if let Ok(max) = max_mintable(collateral, supply, 12_000) {
        if max > 0 {
            cvlr_assert!(check_mint(collateral, supply, max, 12_000).is_ok());
        }
    }
}
