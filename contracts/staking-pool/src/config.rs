//! Pool Configuration
//!
//! Construction-time parameters of a pool. Deployment tooling ships them as
//! CBOR; they are validated before a pool is built from them.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use stakepool_common::{
    constants::{deposits, token},
    errors::{StakePoolError, StakePoolResult},
    types::{NativeAmount, NetUid, PoolVariant, ValidatorUid},
};

/// Deployment parameters of a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolConfig {
    /// Share token name
    pub name: String,
    /// Share token symbol
    pub symbol: String,
    /// Subnet the pool stakes on (fixed for the pool's lifetime)
    pub netuid: NetUid,
    /// Initial validator slot
    pub validator_uid: ValidatorUid,
    /// Market or price-limited staking
    pub variant: PoolVariant,
}

impl PoolConfig {
    /// Market-order pool
    pub fn plain(name: &str, symbol: &str, netuid: NetUid, validator_uid: ValidatorUid) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            netuid,
            validator_uid,
            variant: PoolVariant::Plain,
        }
    }

    /// Limit-order pool with an explicit deposit floor
    pub fn price_limited(
        name: &str,
        symbol: &str,
        netuid: NetUid,
        validator_uid: ValidatorUid,
        min_deposit: NativeAmount,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            netuid,
            validator_uid,
            variant: PoolVariant::PriceLimited { min_deposit },
        }
    }

    /// Limit-order pool using the network's default deposit floor
    pub fn price_limited_default(
        name: &str,
        symbol: &str,
        netuid: NetUid,
        validator_uid: ValidatorUid,
    ) -> Self {
        Self::price_limited(name, symbol, netuid, validator_uid, deposits::DEFAULT_MIN_DEPOSIT)
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> StakePoolResult<()> {
        if self.name.is_empty() || self.name.len() > token::MAX_NAME_LEN {
            return Err(StakePoolError::InvalidConfig {
                reason: "name must be 1..=64 bytes",
            });
        }
        if self.symbol.is_empty() || self.symbol.len() > token::MAX_SYMBOL_LEN {
            return Err(StakePoolError::InvalidConfig {
                reason: "symbol must be 1..=16 bytes",
            });
        }
        if let PoolVariant::PriceLimited { min_deposit: 0 } = self.variant {
            return Err(StakePoolError::InvalidConfig {
                reason: "price-limited pool needs a non-zero minimum deposit",
            });
        }
        Ok(())
    }

    /// Decode and validate CBOR-encoded parameters
    pub fn from_cbor(bytes: &[u8]) -> StakePoolResult<Self> {
        let config: Self = ciborium::from_reader(bytes).map_err(|_| StakePoolError::InvalidConfig {
            reason: "malformed CBOR parameters",
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Encode as CBOR
    pub fn to_cbor(&self) -> StakePoolResult<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes).map_err(|_| StakePoolError::InvalidConfig {
            reason: "parameters could not be encoded",
        })?;
        Ok(bytes)
    }
}
