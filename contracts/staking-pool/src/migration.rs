//! Migration Controller
//!
//! Moves the vault's whole position from the current validator slot to a
//! new one. Share supply is never touched.

use stakepool_common::{
    access_control::{require_permission, Permission},
    errors::{StakePoolError, StakePoolResult},
    events::PoolEvent,
    types::{EvmAddress, StakeAmount, ValidatorUid},
};

use crate::StakingPool;

impl StakingPool {
    /// Retarget the pool to validator slot `new_uid`, moving all stake.
    ///
    /// The slot is switched before the new key is resolved and the stake
    /// moved; if either step fails the previous slot is put back. An empty
    /// position switches the slot without a move.
    ///
    /// Returns the staked amount moved.
    pub fn set_validator_target(&self, caller: EvmAddress, new_uid: ValidatorUid) -> StakePoolResult<StakeAmount> {
        let _guard = self.lock.enter()?;
        require_permission(&*self.access.borrow(), &caller, Permission::SetValidator)?;

        let old_uid = self.validator_uid.get();
        if new_uid == old_uid {
            return Err(StakePoolError::SameValidator { uid: new_uid });
        }

        // 1. Read the full position on the old validator
        let old_hotkey = self.validator_hotkey()?;
        let amount = self.staked_on(&old_hotkey)?;

        // 2. Switch the slot, then resolve the new validator through it
        self.validator_uid.set(new_uid);
        let moved = self.validator_hotkey().and_then(|new_hotkey| {
            if amount == 0 {
                return Ok(());
            }
            self.adapter
                .move_stake(&old_hotkey, &new_hotkey, self.netuid, self.netuid, amount)
        });

        if let Err(err) = moved {
            self.validator_uid.set(old_uid);
            return Err(err);
        }

        self.emit(PoolEvent::ValidatorMigrated {
            old_uid,
            new_uid,
            stake_moved: amount,
        });

        Ok(amount)
    }
}
