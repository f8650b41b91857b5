//! External Interfaces
//!
//! Seams between a vault and the host environment: the staking precompile,
//! the validator registry and the vault's own native balance.

use crate::Vec;
use crate::types::{AccountKey, NativeAmount, NetUid, ValidatorKey, ValidatorUid};

/// Result of a low-level call into a precompile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallOutcome {
    /// Whether the call succeeded
    pub success: bool,
    /// Returned bytes
    pub data: Vec<u8>,
}

impl CallOutcome {
    /// Successful call returning `data`
    pub fn success(data: Vec<u8>) -> Self {
        Self { success: true, data }
    }

    /// Failed call
    pub fn failure() -> Self {
        Self { success: false, data: Vec::new() }
    }
}

/// Staking precompile reachable by encoded call data
pub trait StakingPrecompile {
    /// State-changing call
    fn call(&self, input: &[u8]) -> CallOutcome;

    /// Read-only call
    fn static_call(&self, input: &[u8]) -> CallOutcome;
}

/// Metagraph lookup of validator slots
pub trait ValidatorRegistry {
    /// Key currently registered at `uid` in subnet `netuid`
    fn get_hotkey(&self, netuid: NetUid, uid: ValidatorUid) -> Option<ValidatorKey>;
}

/// The vault's own native balance and outbound transfers
pub trait NativeBank {
    /// Current native balance held by the vault
    fn balance(&self) -> NativeAmount;

    /// Send `amount` to `destination`; returns false if the transfer failed
    fn transfer(&self, destination: &AccountKey, amount: NativeAmount) -> bool;
}
