//! Address Derivation
//!
//! Maps a vault's own host-chain address to the account key the staking
//! subsystem knows it by: `H("evm:" || address)` for a 256-bit hash `H`.
//! The mapping is pure; callers compute it once and cache the result.

use sha2::{Digest, Sha256};
use crate::constants::identity::{EVM_ADDRESS_LEN, EVM_PREFIX};
use crate::types::{AccountKey, EvmAddress};

/// A deterministic 256-bit hash primitive
pub trait Hash256 {
    /// Digest of `data`
    fn digest(&self, data: &[u8]) -> [u8; 32];
}

/// SHA-256 hash primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hash256 for Sha256Hasher {
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        let result = Sha256::digest(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }
}

/// Derive the external-chain account key of a host-chain address
pub fn derive_account_key<H: Hash256 + ?Sized>(hasher: &H, address: &EvmAddress) -> AccountKey {
    let mut preimage = [0u8; EVM_PREFIX.len() + EVM_ADDRESS_LEN];
    preimage[..EVM_PREFIX.len()].copy_from_slice(EVM_PREFIX);
    preimage[EVM_PREFIX.len()..].copy_from_slice(address);
    hasher.digest(&preimage)
}
