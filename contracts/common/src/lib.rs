//! Stake Pool Common Library
//!
//! Shared types, constants, and utilities for pooled-staking vaults.
//! Depositors hand a vault native funds, the vault stakes them with a single
//! validator through an external staking subsystem, and issues fungible
//! shares that track a pro-rata claim on the staked position.
//!
//! ## Accounting Model
//!
//! - **Observed, not requested**: minted and redeemed amounts always come from
//!   before/after snapshots of the external subsystem
//! - **Floor conversion**: `underlying = floor(staked * shares / total_shares)`
//! - **Two unit scales**: native amounts carry 18 decimals, staked amounts 9;
//!   `DECIMAL_SCALE_FACTOR` converts between them at every boundary
//!
//! ## Modules
//!
//! - **Conversion Math**: 256-bit intermediate `mul_div` and unit scaling
//! - **Address Derivation**: a vault's external-chain account key
//! - **Share Ledger**: mint/burn capability over the share token
//! - **Interfaces**: staking precompile, validator registry, native bank
//! - **Access Control**: Admin/Operator roles
//! - **Reentrancy Guard**: scoped per-vault lock
//!
//! This crate is `no_std` compatible for WASM compilation when built
//! without the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::vec::Vec;
#[cfg(not(feature = "std"))]
pub use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
pub use std::collections::BTreeMap;

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod validation;
pub mod access_control;
pub mod address;
pub mod guard;
pub mod share_ledger;
pub mod interfaces;

// Re-exports for convenience
pub use errors::*;
pub use types::*;
pub use math::*;
pub use events::*;
pub use access_control::*;
pub use address::{derive_account_key, Hash256, Sha256Hasher};
pub use guard::{LockGuard, ReentrancyLock};
pub use share_ledger::{ShareBook, ShareLedger, ShareSupply};
pub use interfaces::{CallOutcome, NativeBank, StakingPrecompile, ValidatorRegistry};
