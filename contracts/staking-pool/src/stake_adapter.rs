//! Stake Adapter
//!
//! Protocol client for the staking precompile. Each request is a borsh
//! encoded `StakeCall`; the precompile answers with a success flag and opaque
//! data. Error payloads are never parsed: a failed call maps to
//! `StakeCallFailed` for the operation that was attempted.
//!
//! The adapter reports what was requested, not what happened. Callers that
//! need the effect of a call measure it with `get_stake` snapshots.

use std::rc::Rc;

use stakepool_common::{
    errors::{StakePoolError, StakePoolResult},
    interfaces::{CallOutcome, StakingPrecompile},
    types::{AccountKey, NetUid, PriceLimit, StakeAmount, StakeCall, StakeOrder, ValidatorKey},
};

/// Client for the staking precompile
#[derive(Clone)]
pub struct StakeAdapter {
    precompile: Rc<dyn StakingPrecompile>,
}

impl StakeAdapter {
    pub fn new(precompile: Rc<dyn StakingPrecompile>) -> Self {
        Self { precompile }
    }

    // ============ Staking ============

    /// Stake `amount` of the vault's free balance on `hotkey`
    pub fn add_stake(&self, hotkey: &ValidatorKey, amount: StakeAmount, netuid: NetUid) -> StakePoolResult<()> {
        self.execute(StakeCall::AddStake {
            hotkey: *hotkey,
            amount,
            netuid,
        })
    }

    /// Stake `amount` unless the price exceeds `limit`
    pub fn add_stake_limit(
        &self,
        hotkey: &ValidatorKey,
        amount: StakeAmount,
        limit: PriceLimit,
        netuid: NetUid,
    ) -> StakePoolResult<()> {
        self.execute(StakeCall::AddStakeLimit {
            hotkey: *hotkey,
            amount,
            limit_price: limit.limit_price,
            allow_partial: limit.allow_partial,
            netuid,
        })
    }

    /// Unstake `amount` back into the vault's free balance
    pub fn remove_stake(&self, hotkey: &ValidatorKey, amount: StakeAmount, netuid: NetUid) -> StakePoolResult<()> {
        self.execute(StakeCall::RemoveStake {
            hotkey: *hotkey,
            amount,
            netuid,
        })
    }

    /// Unstake `amount` unless the price falls below `limit`
    pub fn remove_stake_limit(
        &self,
        hotkey: &ValidatorKey,
        amount: StakeAmount,
        limit: PriceLimit,
        netuid: NetUid,
    ) -> StakePoolResult<()> {
        self.execute(StakeCall::RemoveStakeLimit {
            hotkey: *hotkey,
            amount,
            limit_price: limit.limit_price,
            allow_partial: limit.allow_partial,
            netuid,
        })
    }

    /// Stake according to `order`
    pub fn stake(
        &self,
        hotkey: &ValidatorKey,
        amount: StakeAmount,
        netuid: NetUid,
        order: &StakeOrder,
    ) -> StakePoolResult<()> {
        match order {
            StakeOrder::Market => self.add_stake(hotkey, amount, netuid),
            StakeOrder::Limit(limit) => self.add_stake_limit(hotkey, amount, *limit, netuid),
        }
    }

    /// Unstake according to `order`
    pub fn unstake(
        &self,
        hotkey: &ValidatorKey,
        amount: StakeAmount,
        netuid: NetUid,
        order: &StakeOrder,
    ) -> StakePoolResult<()> {
        match order {
            StakeOrder::Market => self.remove_stake(hotkey, amount, netuid),
            StakeOrder::Limit(limit) => self.remove_stake_limit(hotkey, amount, *limit, netuid),
        }
    }

    // ============ Stake Movement ============

    /// Hand `amount` of the vault's stake on `hotkey` to `destination`
    pub fn transfer_stake(
        &self,
        destination: &AccountKey,
        hotkey: &ValidatorKey,
        origin_netuid: NetUid,
        destination_netuid: NetUid,
        amount: StakeAmount,
    ) -> StakePoolResult<()> {
        self.execute(StakeCall::TransferStake {
            destination: *destination,
            hotkey: *hotkey,
            origin_netuid,
            destination_netuid,
            amount,
        })
    }

    /// Move `amount` of the vault's stake between validators
    pub fn move_stake(
        &self,
        origin_hotkey: &ValidatorKey,
        destination_hotkey: &ValidatorKey,
        origin_netuid: NetUid,
        destination_netuid: NetUid,
        amount: StakeAmount,
    ) -> StakePoolResult<()> {
        self.execute(StakeCall::MoveStake {
            origin_hotkey: *origin_hotkey,
            destination_hotkey: *destination_hotkey,
            origin_netuid,
            destination_netuid,
            amount,
        })
    }

    // ============ Reads ============

    /// Stake `owner` holds on `hotkey` in subnet `netuid`
    pub fn get_stake(&self, hotkey: &ValidatorKey, owner: &AccountKey, netuid: NetUid) -> StakePoolResult<StakeAmount> {
        let call = StakeCall::GetStake {
            hotkey: *hotkey,
            owner: *owner,
            netuid,
        };
        let operation = call.operation();
        let outcome = self.precompile.static_call(&encode(&call)?);
        let data = check_outcome(&call, outcome)?;

        borsh::from_slice::<StakeAmount>(&data).map_err(|_| StakePoolError::InvalidCallData { operation })
    }

    fn execute(&self, call: StakeCall) -> StakePoolResult<()> {
        let outcome = self.precompile.call(&encode(&call)?);
        check_outcome(&call, outcome).map(|_| ())
    }
}

fn encode(call: &StakeCall) -> StakePoolResult<Vec<u8>> {
    borsh::to_vec(call).map_err(|_| StakePoolError::InvalidCallData {
        operation: call.operation(),
    })
}

fn check_outcome(call: &StakeCall, outcome: CallOutcome) -> StakePoolResult<Vec<u8>> {
    if !outcome.success {
        return Err(StakePoolError::StakeCallFailed {
            operation: call.operation(),
        });
    }
    Ok(outcome.data)
}
