//! Protocol Constants
//!
//! Unit conventions, identity prefixes and deployment defaults for
//! pooled-staking vaults.
//!
//! # Network Configuration
//!
//! Use feature flags to compile for different networks:
//! - `mainnet` - Production values (higher minimum deposit)
//! - Default (no feature) - Testnet values (lower minimums for testing)
//!
//! ```toml
//! # For mainnet deployment:
//! stakepool-common = { path = "...", features = ["mainnet"] }
//! ```

/// Share token metadata
pub mod token {
    /// Share decimals (same as the native asset)
    pub const DECIMALS: u8 = 18;
    /// Longest accepted share token name
    pub const MAX_NAME_LEN: usize = 64;
    /// Longest accepted share token symbol
    pub const MAX_SYMBOL_LEN: usize = 16;
}

/// Units on both sides of the staking boundary
pub mod units {
    /// Factor between native deposit units and staking-subsystem units.
    ///
    /// Deposits divide by it before staking; minted shares and redeemed
    /// native amounts multiply by it.
    pub const DECIMAL_SCALE_FACTOR: u128 = 1_000_000_000;

    /// One whole native token in native units
    pub const ONE_NATIVE: u128 = 1_000_000_000_000_000_000;

    /// One whole token in staking-subsystem units
    pub const ONE_STAKE: u64 = 1_000_000_000;
}

/// External-chain identity derivation
pub mod identity {
    /// Prefix hashed in front of the vault's own address
    pub const EVM_PREFIX: &[u8] = b"evm:";

    /// Width of the vault's own (EVM-style) address
    pub const EVM_ADDRESS_LEN: usize = 20;
}

/// Deposit thresholds
///
/// Values differ between mainnet and testnet to allow easier testing.
pub mod deposits {
    use super::units::ONE_NATIVE;

    /// Default minimum deposit for the price-limited variant
    /// - Mainnet: 0.1 native token
    /// - Testnet: 0.001 native token
    #[cfg(feature = "mainnet")]
    pub const DEFAULT_MIN_DEPOSIT: u128 = ONE_NATIVE / 10;
    #[cfg(not(feature = "mainnet"))]
    pub const DEFAULT_MIN_DEPOSIT: u128 = ONE_NATIVE / 1_000;
}

/// Precision constants
pub mod precision {
    /// Fixed-point base for exchange-rate views (1e18 shares)
    pub const RATE_PRECISION: u128 = 1_000_000_000_000_000_000;
}
