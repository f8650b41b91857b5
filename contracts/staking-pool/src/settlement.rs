//! Settlement Engine
//!
//! Deposit and withdrawal flows. Amounts credited or paid out always come
//! from snapshots taken around the external call, never from the request.
//!
//! Withdrawals burn shares before the external call. If that call fails
//! the burn is undone and the error returned, so a failed request leaves the
//! ledger as it found it. Once the unstake has succeeded the shares stay
//! burned; a zero native delta or a failed forward leaves the proceeds in
//! the vault's custody.

use stakepool_common::{
    constants::units::DECIMAL_SCALE_FACTOR,
    errors::{OutputStage, StakePoolError, StakePoolResult},
    events::PoolEvent,
    math::{native_to_stake, shares_for_stake_delta, shares_to_underlying},
    types::{AccountKey, EvmAddress, NativeAmount, ShareAmount, StakeAmount, StakeOrder, ValidatorKey},
    validation::{check, require_min_amount, require_positive, require_sufficient_shares, require_valid_account, require_valid_address},
};

use crate::StakingPool;

impl StakingPool {
    /// Stake `amount` of attached native funds and mint shares to `destination`.
    ///
    /// Shares minted equal the observed stake delta scaled to share units;
    /// any remainder a partial fill leaves unstaked stays in the vault.
    ///
    /// # Errors
    /// * `InvalidAddress` for a zero destination
    /// * `UnsupportedOrder` if the order kind does not match the variant
    /// * `ZeroAmount` / `BelowMinimum` for amounts too small to stake
    /// * `StakeCallFailed` if the precompile rejects the stake
    /// * `ZeroOutput` if the stake did not grow
    pub fn deposit(
        &self,
        caller: EvmAddress,
        amount: NativeAmount,
        destination: EvmAddress,
        order: StakeOrder,
    ) -> StakePoolResult<ShareAmount> {
        let _guard = self.lock.enter()?;

        // 1. Validate request
        require_valid_address(&destination, "deposit destination cannot be zero")?;
        check!(self.variant.accepts(&order), StakePoolError::UnsupportedOrder);
        require_positive(amount)?;
        require_min_amount(amount, self.min_deposit.get())?;

        // 2. Scale to staking units
        let scaled = native_to_stake(amount)?;
        if scaled == 0 {
            return Err(StakePoolError::BelowMinimum {
                amount,
                minimum: DECIMAL_SCALE_FACTOR,
            });
        }

        // 3. Snapshot before staking
        let hotkey = self.validator_hotkey()?;
        let pre_staked = self.staked_on(&hotkey)?;

        // 4. Stake
        self.adapter.stake(&hotkey, scaled, self.netuid, &order)?;

        // 5. Measure what was actually staked
        let post_staked = self.staked_on(&hotkey)?;
        let minted = shares_for_stake_delta(pre_staked, post_staked)?;

        // 6. Mint and record
        self.ledger.mint(&destination, minted)?;
        self.emit(PoolEvent::Deposited {
            requester: caller,
            native_in: amount,
            shares_minted: minted,
            destination,
        });

        Ok(minted)
    }

    /// Redeem `shares` for the native asset, forwarded to `destination`.
    ///
    /// Returns the native amount actually received from the unstake.
    ///
    /// # Errors
    /// * `ZeroAmount`, `InvalidAddress`, `UnsupportedOrder`, `InsufficientShares`
    /// * `ZeroOutput` if the shares are worth no stake or the unstake paid nothing
    /// * `StakeCallFailed` if the unstake is rejected (shares restored)
    /// * `ForwardingFailed` if the proceeds could not be delivered
    pub fn withdraw(
        &self,
        caller: EvmAddress,
        shares: ShareAmount,
        destination: AccountKey,
        order: StakeOrder,
    ) -> StakePoolResult<NativeAmount> {
        let _guard = self.lock.enter()?;

        // 1. Validate request
        check!(self.variant.accepts(&order), StakePoolError::UnsupportedOrder);
        let (hotkey, alpha_out) = self.prepare_redemption(&caller, shares, &destination)?;

        // 2. Burn before the external call
        self.ledger.burn(&caller, shares)?;

        // 3. Unstake, measuring the native balance around the call
        let native_before = self.bank.balance();
        let unstaked = self.adapter.unstake(&hotkey, alpha_out, self.netuid, &order);
        self.restore_on_failure(&caller, shares, unstaked)?;

        let native_out = self.bank.balance().saturating_sub(native_before);
        if native_out == 0 {
            return Err(StakePoolError::ZeroOutput {
                stage: OutputStage::Unstake,
            });
        }

        // 4. Forward proceeds
        if !self.bank.transfer(&destination, native_out) {
            return Err(StakePoolError::ForwardingFailed { amount: native_out });
        }

        self.emit(PoolEvent::WithdrawnNative {
            requester: caller,
            shares_burned: shares,
            native_out,
            destination,
        });

        Ok(native_out)
    }

    /// Redeem `shares` for staked units handed to `destination` on the same
    /// subnet. Returns the staked amount transferred.
    pub fn withdraw_stake(
        &self,
        caller: EvmAddress,
        shares: ShareAmount,
        destination: AccountKey,
    ) -> StakePoolResult<StakeAmount> {
        let _guard = self.lock.enter()?;

        let (hotkey, alpha_out) = self.prepare_redemption(&caller, shares, &destination)?;

        self.ledger.burn(&caller, shares)?;

        let transferred = self
            .adapter
            .transfer_stake(&destination, &hotkey, self.netuid, self.netuid, alpha_out);
        self.restore_on_failure(&caller, shares, transferred)?;

        self.emit(PoolEvent::WithdrawnStake {
            requester: caller,
            shares_burned: shares,
            stake_out: alpha_out,
            destination,
        });

        Ok(alpha_out)
    }

    /// Validate a redemption and price it against the live position
    fn prepare_redemption(
        &self,
        caller: &EvmAddress,
        shares: ShareAmount,
        destination: &AccountKey,
    ) -> StakePoolResult<(ValidatorKey, StakeAmount)> {
        require_positive(shares)?;
        require_valid_account(destination, "withdrawal destination cannot be zero")?;
        require_sufficient_shares(self.ledger.balance_of(caller), shares)?;

        let hotkey = self.validator_hotkey()?;
        let staked = self.staked_on(&hotkey)?;
        let alpha_out = shares_to_underlying(shares, self.ledger.total_supply(), staked)?;

        Ok((hotkey, alpha_out))
    }

    /// Re-mint burned shares if the external call failed
    fn restore_on_failure(
        &self,
        caller: &EvmAddress,
        shares: ShareAmount,
        result: StakePoolResult<()>,
    ) -> StakePoolResult<()> {
        if let Err(err) = result {
            self.ledger.mint(caller, shares)?;
            return Err(err);
        }
        Ok(())
    }

    pub(crate) fn staked_on(&self, hotkey: &ValidatorKey) -> StakePoolResult<StakeAmount> {
        self.adapter.get_stake(hotkey, &self.self_identity, self.netuid)
    }
}
