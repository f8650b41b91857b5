//! Mathematical Utilities for Pooled-Staking Vaults
//!
//! Share/underlying conversion, unit scaling across the staking boundary and
//! full-precision `a * b / d` arithmetic. All divisions round down so that the
//! vault never releases or credits more than is proportionally owned.

use crate::constants::{precision::RATE_PRECISION, units::DECIMAL_SCALE_FACTOR};
use crate::errors::{OutputStage, StakePoolError, StakePoolResult};
use crate::types::{NativeAmount, ShareAmount, StakeAmount};
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for full-precision products
    pub struct U256(4);
}

/// Compute `floor(a * b / divisor)` without intermediate overflow
///
/// # Errors
/// * `DivisionByZero` if `divisor == 0`
/// * `Overflow` if the quotient does not fit in u128
pub fn mul_div_floor(a: u128, b: u128, divisor: u128) -> StakePoolResult<u128> {
    if divisor == 0 {
        return Err(StakePoolError::DivisionByZero);
    }

    let quotient = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(StakePoolError::Overflow)?
        .checked_div(U256::from(divisor))
        .ok_or(StakePoolError::DivisionByZero)?;

    if quotient > U256::from(u128::MAX) {
        return Err(StakePoolError::Overflow);
    }
    Ok(quotient.as_u128())
}

/// Convert a native deposit amount into staking-subsystem units
///
/// Rounds down; anything below one staking unit is dropped.
pub fn native_to_stake(native: NativeAmount) -> StakePoolResult<StakeAmount> {
    let scaled = native / DECIMAL_SCALE_FACTOR;
    StakeAmount::try_from(scaled).map_err(|_| StakePoolError::ExceedsMaximum {
        amount: native,
        maximum: (StakeAmount::MAX as u128) * DECIMAL_SCALE_FACTOR,
    })
}

/// Convert staking-subsystem units into native units (and share units)
pub fn stake_to_native(stake: StakeAmount) -> NativeAmount {
    // u64::MAX * 1e9 < u128::MAX
    (stake as u128) * DECIMAL_SCALE_FACTOR
}

/// Calculate the underlying staked amount owed for `shares`
///
/// underlying = floor(staked * shares / total_shares)
///
/// # Arguments
/// * `shares` - Shares being redeemed
/// * `total_shares` - Share supply before the redemption burn
/// * `staked` - The vault's current staked amount
///
/// # Errors
/// * `DivisionByZero` if no shares exist (a withdrawal always has shares)
/// * `ExceedsSupply` if redeeming more than the supply
/// * `ZeroOutput` if the result rounds to zero
pub fn shares_to_underlying(
    shares: ShareAmount,
    total_shares: ShareAmount,
    staked: StakeAmount,
) -> StakePoolResult<StakeAmount> {
    if total_shares == 0 {
        return Err(StakePoolError::DivisionByZero);
    }
    if shares > total_shares {
        return Err(StakePoolError::ExceedsSupply { shares, total_shares });
    }

    let underlying = mul_div_floor(staked as u128, shares, total_shares)?;
    if underlying == 0 {
        return Err(StakePoolError::ZeroOutput {
            stage: OutputStage::Conversion,
        });
    }

    // Bounded by `staked` since shares <= total_shares
    StakeAmount::try_from(underlying).map_err(|_| StakePoolError::Overflow)
}

/// Calculate shares to mint from observed stake snapshots
///
/// minted = (post - pre) * DECIMAL_SCALE_FACTOR
///
/// # Errors
/// * `ZeroOutput` if the stake did not grow
pub fn shares_for_stake_delta(pre: StakeAmount, post: StakeAmount) -> StakePoolResult<ShareAmount> {
    let delta = post.saturating_sub(pre);
    if delta == 0 {
        return Err(StakePoolError::ZeroOutput {
            stage: OutputStage::Deposit,
        });
    }
    Ok(stake_to_native(delta))
}

/// Staked units backing `RATE_PRECISION` shares, or `None` without shares
pub fn exchange_rate(staked: StakeAmount, total_shares: ShareAmount) -> StakePoolResult<Option<u128>> {
    if total_shares == 0 {
        return Ok(None);
    }
    mul_div_floor(staked as u128, RATE_PRECISION, total_shares).map(Some)
}

/// Safe addition with overflow check
pub fn safe_add(a: u128, b: u128) -> StakePoolResult<u128> {
    a.checked_add(b).ok_or(StakePoolError::Overflow)
}

/// Safe subtraction with underflow check
pub fn safe_sub(a: u128, b: u128) -> StakePoolResult<u128> {
    a.checked_sub(b).ok_or(StakePoolError::Underflow)
}
