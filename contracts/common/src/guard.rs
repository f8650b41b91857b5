//! Reentrancy Guard
//!
//! A per-vault lock held for the whole of every mutating entry point. The
//! lock is released when the guard drops, on success and error paths alike.

use core::cell::Cell;
use crate::errors::{StakePoolError, StakePoolResult};

/// Per-instance lock flag
#[derive(Debug, Default)]
pub struct ReentrancyLock {
    entered: Cell<bool>,
}

impl ReentrancyLock {
    /// Create an unlocked lock
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock, failing with `Reentrancy` if it is already held
    pub fn enter(&self) -> StakePoolResult<LockGuard<'_>> {
        if self.entered.replace(true) {
            return Err(StakePoolError::Reentrancy);
        }
        Ok(LockGuard { lock: self })
    }

    /// Returns true while a guarded call is in progress
    pub fn is_entered(&self) -> bool {
        self.entered.get()
    }
}

/// Releases the lock on drop
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a> {
    lock: &'a ReentrancyLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.entered.set(false);
    }
}
