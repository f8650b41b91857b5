//! Validation Helpers
//!
//! Reusable request checks run before any external call or ledger mutation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stakepool_common::validation::{check, require_positive};
//!
//! check!(shares > 0, StakePoolError::ZeroAmount);
//! require_valid_account(&destination, "destination")?;
//! ```

use crate::{
    errors::{StakePoolError, StakePoolResult},
    types::{AccountKey, EvmAddress, NativeAmount, ShareAmount},
};

// ============ Validation Macro ============

/// Check a condition and return an error if it fails.
///
/// # Examples
///
/// ```rust,ignore
/// check!(amount > 0, StakePoolError::ZeroAmount);
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr, $error:expr) => {
        if !($condition) {
            return Err($error);
        }
    };
}

pub use crate::check;

// ============ Common Validation Helpers ============

/// Require an amount to be non-zero.
pub fn require_positive(value: u128) -> StakePoolResult<()> {
    if value == 0 {
        return Err(StakePoolError::ZeroAmount);
    }
    Ok(())
}

/// Require a native amount to reach a floor.
pub fn require_min_amount(amount: NativeAmount, minimum: NativeAmount) -> StakePoolResult<()> {
    if amount < minimum {
        return Err(StakePoolError::BelowMinimum { amount, minimum });
    }
    Ok(())
}

/// Require a holder to own at least `requested` shares.
pub fn require_sufficient_shares(available: ShareAmount, requested: ShareAmount) -> StakePoolResult<()> {
    if available < requested {
        return Err(StakePoolError::InsufficientShares {
            available,
            requested,
        });
    }
    Ok(())
}

/// Require a host-chain address to not be zero.
pub fn require_valid_address(address: &EvmAddress, reason: &'static str) -> StakePoolResult<()> {
    if *address == [0u8; 20] {
        return Err(StakePoolError::InvalidAddress { reason });
    }
    Ok(())
}

/// Require an external-chain account to not be zero.
pub fn require_valid_account(account: &AccountKey, reason: &'static str) -> StakePoolResult<()> {
    if *account == [0u8; 32] {
        return Err(StakePoolError::InvalidAddress { reason });
    }
    Ok(())
}
