//! Error Types for Pooled-Staking Vaults
//!
//! Typed errors carrying the offending values, grouped into the failure
//! classes the settlement engine reasons about.

use crate::types::{EvmAddress, NativeAmount, NetUid, ShareAmount, StakeOperation, ValidatorUid};

/// Result type alias for vault operations
pub type StakePoolResult<T> = Result<T, StakePoolError>;

/// Main error enum for all vault errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakePoolError {
    // ============ Validation Errors ============
    /// Zero amount not allowed
    ZeroAmount,

    /// Amount below minimum threshold
    BelowMinimum { amount: NativeAmount, minimum: NativeAmount },

    /// Amount does not fit the staking subsystem's unit range
    ExceedsMaximum { amount: NativeAmount, maximum: NativeAmount },

    /// Redeeming more shares than exist
    ExceedsSupply { shares: ShareAmount, total_shares: ShareAmount },

    /// Holder does not own enough shares
    InsufficientShares { available: ShareAmount, requested: ShareAmount },

    /// Invalid address (e.g., zero address)
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },

    /// Order kind not accepted by this pool variant
    UnsupportedOrder,

    /// Operation not available on this pool variant
    InvalidOperation,

    /// Bare value transfers are never credited
    DirectTransferRejected { amount: NativeAmount },

    /// Migration target equals the current validator slot
    SameValidator { uid: ValidatorUid },

    // ============ Authorization Errors ============
    /// Caller lacks the role for this operation
    Unauthorized { caller: EvmAddress },

    /// Only the pool admin can perform this action
    AdminOnly,

    // ============ Resolution Errors ============
    /// Registry has no validator in this slot
    UnknownValidator { netuid: NetUid, uid: ValidatorUid },

    // ============ Adapter Errors ============
    /// Staking subsystem reported failure
    StakeCallFailed { operation: StakeOperation },

    /// Staking subsystem returned data that does not decode
    InvalidCallData { operation: StakeOperation },

    // ============ Output Errors ============
    /// Computed mint or payout is zero despite non-zero input
    ZeroOutput { stage: OutputStage },

    /// Native proceeds could not be delivered
    ForwardingFailed { amount: NativeAmount },

    // ============ Guard Errors ============
    /// A mutating entry point is already executing
    Reentrancy,

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    /// Division by zero
    DivisionByZero,

    // ============ Config Errors ============
    /// Construction parameters rejected
    InvalidConfig { reason: &'static str },
}

/// Where a zero output was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStage {
    /// Observed stake delta of a deposit
    Deposit,
    /// Share-to-underlying conversion of a withdrawal
    Conversion,
    /// Native balance delta after unstaking
    Unstake,
}

/// Failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    Resolution,
    Adapter,
    ZeroOutput,
    Forwarding,
    Reentrancy,
    Math,
    Config,
}

impl StakePoolError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "E010_ZERO_AMOUNT",
            Self::BelowMinimum { .. } => "E011_BELOW_MINIMUM",
            Self::ExceedsMaximum { .. } => "E012_EXCEEDS_MAXIMUM",
            Self::ExceedsSupply { .. } => "E013_EXCEEDS_SUPPLY",
            Self::InsufficientShares { .. } => "E014_INSUFFICIENT_SHARES",
            Self::InvalidAddress { .. } => "E015_INVALID_ADDRESS",
            Self::UnsupportedOrder => "E017_UNSUPPORTED_ORDER",
            Self::InvalidOperation => "E018_INVALID_OP",
            Self::DirectTransferRejected { .. } => "E019_DIRECT_TRANSFER",
            Self::SameValidator { .. } => "E020_SAME_VALIDATOR",
            Self::Unauthorized { .. } => "E030_UNAUTHORIZED",
            Self::AdminOnly => "E031_ADMIN_ONLY",
            Self::UnknownValidator { .. } => "E040_UNKNOWN_VALIDATOR",
            Self::StakeCallFailed { .. } => "E050_STAKE_CALL_FAILED",
            Self::InvalidCallData { .. } => "E051_INVALID_CALL_DATA",
            Self::ZeroOutput { .. } => "E060_ZERO_OUTPUT",
            Self::ForwardingFailed { .. } => "E061_FORWARDING_FAILED",
            Self::Reentrancy => "E070_REENTRANCY",
            Self::Overflow => "E080_OVERFLOW",
            Self::Underflow => "E081_UNDERFLOW",
            Self::DivisionByZero => "E082_DIV_ZERO",
            Self::InvalidConfig { .. } => "E090_INVALID_CONFIG",
        }
    }

    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroAmount
            | Self::BelowMinimum { .. }
            | Self::ExceedsMaximum { .. }
            | Self::ExceedsSupply { .. }
            | Self::InsufficientShares { .. }
            | Self::InvalidAddress { .. }
            | Self::UnsupportedOrder
            | Self::InvalidOperation
            | Self::DirectTransferRejected { .. }
            | Self::SameValidator { .. } => ErrorKind::Validation,
            Self::Unauthorized { .. } | Self::AdminOnly => ErrorKind::Authorization,
            Self::UnknownValidator { .. } => ErrorKind::Resolution,
            Self::StakeCallFailed { .. } | Self::InvalidCallData { .. } => ErrorKind::Adapter,
            Self::ZeroOutput { .. } => ErrorKind::ZeroOutput,
            Self::ForwardingFailed { .. } => ErrorKind::Forwarding,
            Self::Reentrancy => ErrorKind::Reentrancy,
            Self::Overflow | Self::Underflow | Self::DivisionByZero => ErrorKind::Math,
            Self::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    /// Returns true if this error is recoverable (user can fix it)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::DirectTransferRejected { .. } => false, // Never accepted
            _ => self.kind() == ErrorKind::Validation,
        }
    }
}
