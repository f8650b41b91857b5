//! Pool Events
//!
//! Records emitted by successful vault operations. They carry no lifecycle
//! beyond emission and can be indexed off-chain for auditing.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::access_control::Role;
use crate::types::{AccountKey, EvmAddress, NativeAmount, ShareAmount, StakeAmount, ValidatorUid};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Settlement Events (0x01 - 0x1F)
    Deposited = 0x01,
    WithdrawnNative = 0x02,
    WithdrawnStake = 0x03,

    // Validator Events (0x20 - 0x3F)
    ValidatorMigrated = 0x20,

    // Admin Events (0x40 - 0x5F)
    MinDepositUpdated = 0x40,
    RoleGranted = 0x41,
    RoleRevoked = 0x42,
}

/// Main event enum containing all pool events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum PoolEvent {
    // ============ Settlement Events ============

    /// Emitted when native funds are staked and shares minted
    Deposited {
        requester: EvmAddress,
        native_in: NativeAmount,
        shares_minted: ShareAmount,
        destination: EvmAddress,
    },

    /// Emitted when shares are redeemed for the native asset
    WithdrawnNative {
        requester: EvmAddress,
        shares_burned: ShareAmount,
        native_out: NativeAmount,
        destination: AccountKey,
    },

    /// Emitted when shares are redeemed for staked units
    WithdrawnStake {
        requester: EvmAddress,
        shares_burned: ShareAmount,
        stake_out: StakeAmount,
        destination: AccountKey,
    },

    // ============ Validator Events ============

    /// Emitted when the validator target changes
    ValidatorMigrated {
        old_uid: ValidatorUid,
        new_uid: ValidatorUid,
        stake_moved: StakeAmount,
    },

    // ============ Admin Events ============

    /// Emitted when the deposit floor changes
    MinDepositUpdated {
        old_minimum: NativeAmount,
        new_minimum: NativeAmount,
        by: EvmAddress,
    },

    /// Emitted when a role is granted
    RoleGranted {
        account: EvmAddress,
        role: Role,
        by: EvmAddress,
    },

    /// Emitted when a role is revoked
    RoleRevoked {
        account: EvmAddress,
        role: Role,
        by: EvmAddress,
    },
}

impl PoolEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Deposited { .. } => EventType::Deposited,
            Self::WithdrawnNative { .. } => EventType::WithdrawnNative,
            Self::WithdrawnStake { .. } => EventType::WithdrawnStake,
            Self::ValidatorMigrated { .. } => EventType::ValidatorMigrated,
            Self::MinDepositUpdated { .. } => EventType::MinDepositUpdated,
            Self::RoleGranted { .. } => EventType::RoleGranted,
            Self::RoleRevoked { .. } => EventType::RoleRevoked,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting multiple events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<PoolEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Take ownership of all events, leaving the log empty
    pub fn drain(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&PoolEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<&PoolEvent> {
        self.events.last()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events were emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
