//! Core Types for Pooled-Staking Vaults
//!
//! Identities, amount aliases, pool variants and the wire form of requests
//! sent to the external staking subsystem.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// The vault's own (and its callers') 20-byte host-chain address
pub type EvmAddress = [u8; 20];

/// 32-byte account key on the external staking chain
pub type AccountKey = [u8; 32];

/// Routing key of a validator (hotkey) on the external staking chain
pub type ValidatorKey = [u8; 32];

/// Subnet identifier
pub type NetUid = u16;

/// Validator slot inside a subnet
pub type ValidatorUid = u16;

/// Amount in native deposit units (18 decimals)
pub type NativeAmount = u128;

/// Amount in staking-subsystem units (9 decimals)
pub type StakeAmount = u64;

/// Amount of pool shares (18 decimals)
pub type ShareAmount = u128;

// ============ Pool Variants ============

/// Which staking calls a pool issues and which deposit floor it enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum PoolVariant {
    /// Market orders only (`addStake` / `removeStake`)
    Plain,
    /// Limit orders only (`addStakeLimit` / `removeStakeLimit`)
    PriceLimited {
        /// Minimum deposit in native units
        min_deposit: NativeAmount,
    },
}

impl PoolVariant {
    /// Returns true if this variant accepts the given order kind
    pub fn accepts(&self, order: &StakeOrder) -> bool {
        matches!(
            (self, order),
            (PoolVariant::Plain, StakeOrder::Market)
                | (PoolVariant::PriceLimited { .. }, StakeOrder::Limit(_))
        )
    }

    /// Minimum deposit configured at construction (zero for plain pools)
    pub fn min_deposit(&self) -> NativeAmount {
        match self {
            PoolVariant::Plain => 0,
            PoolVariant::PriceLimited { min_deposit } => *min_deposit,
        }
    }

    /// Returns true for the price-limited variant
    pub fn is_price_limited(&self) -> bool {
        matches!(self, PoolVariant::PriceLimited { .. })
    }
}

// ============ Orders ============

/// Price bound for a stake or unstake request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PriceLimit {
    /// Rate (staking units per staked unit, 9 decimals) beyond which nothing fills
    pub limit_price: u64,
    /// Fill what is possible at the limit instead of rejecting the request
    pub allow_partial: bool,
}

impl PriceLimit {
    pub fn new(limit_price: u64, allow_partial: bool) -> Self {
        Self {
            limit_price,
            allow_partial,
        }
    }
}

/// How a stake or unstake request is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StakeOrder {
    /// Execute at whatever rate the subsystem offers
    Market,
    /// Execute only within the given price bound
    Limit(PriceLimit),
}

// ============ Staking Subsystem Calls ============

/// Operations offered by the external staking subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum StakeOperation {
    AddStake = 0x01,
    AddStakeLimit = 0x02,
    RemoveStake = 0x03,
    RemoveStakeLimit = 0x04,
    TransferStake = 0x05,
    MoveStake = 0x06,
    GetStake = 0x10,
}

/// A request to the staking subsystem, borsh-encoded on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum StakeCall {
    /// Stake `amount` of the caller's free balance on `hotkey`
    AddStake {
        hotkey: ValidatorKey,
        amount: StakeAmount,
        netuid: NetUid,
    },
    /// Price-bounded `AddStake`
    AddStakeLimit {
        hotkey: ValidatorKey,
        amount: StakeAmount,
        limit_price: u64,
        allow_partial: bool,
        netuid: NetUid,
    },
    /// Unstake `amount` staked units back into the caller's free balance
    RemoveStake {
        hotkey: ValidatorKey,
        amount: StakeAmount,
        netuid: NetUid,
    },
    /// Price-bounded `RemoveStake`
    RemoveStakeLimit {
        hotkey: ValidatorKey,
        amount: StakeAmount,
        limit_price: u64,
        allow_partial: bool,
        netuid: NetUid,
    },
    /// Hand `amount` of the caller's stake on `hotkey` to another owner
    TransferStake {
        destination: AccountKey,
        hotkey: ValidatorKey,
        origin_netuid: NetUid,
        destination_netuid: NetUid,
        amount: StakeAmount,
    },
    /// Move `amount` of the caller's stake from one validator to another
    MoveStake {
        origin_hotkey: ValidatorKey,
        destination_hotkey: ValidatorKey,
        origin_netuid: NetUid,
        destination_netuid: NetUid,
        amount: StakeAmount,
    },
    /// Read the stake `owner` holds on `hotkey`
    GetStake {
        hotkey: ValidatorKey,
        owner: AccountKey,
        netuid: NetUid,
    },
}

impl StakeCall {
    /// The operation this call performs
    pub fn operation(&self) -> StakeOperation {
        match self {
            Self::AddStake { .. } => StakeOperation::AddStake,
            Self::AddStakeLimit { .. } => StakeOperation::AddStakeLimit,
            Self::RemoveStake { .. } => StakeOperation::RemoveStake,
            Self::RemoveStakeLimit { .. } => StakeOperation::RemoveStakeLimit,
            Self::TransferStake { .. } => StakeOperation::TransferStake,
            Self::MoveStake { .. } => StakeOperation::MoveStake,
            Self::GetStake { .. } => StakeOperation::GetStake,
        }
    }
}
