//! Share Ledger
//!
//! Fungible share balances minted and burned by a vault. The vault holds
//! the exclusive mint/burn capability; holders transfer shares freely
//! through whatever token surface sits in front of the ledger.
//!
//! ## Key Features
//!
//! - **Mint/Burn Only**: The vault never moves balances between holders
//! - **Supply Tracking**: Cumulative minted and burned totals
//! - **Conservation**: `total_supply == total_minted - total_burned`

use core::cell::RefCell;
use crate::{BTreeMap, StakePoolError, StakePoolResult};
use crate::math::{safe_add, safe_sub};
use crate::types::{EvmAddress, ShareAmount};
use crate::validation::require_sufficient_shares;

/// Mint/burn capability over a share token
pub trait ShareLedger {
    /// Credit `amount` new shares to `holder`
    fn mint(&self, holder: &EvmAddress, amount: ShareAmount) -> StakePoolResult<()>;

    /// Destroy `amount` shares held by `holder`
    fn burn(&self, holder: &EvmAddress, amount: ShareAmount) -> StakePoolResult<()>;

    /// Shares outstanding across all holders
    fn total_supply(&self) -> ShareAmount;

    /// Shares held by `holder`
    fn balance_of(&self, holder: &EvmAddress) -> ShareAmount;
}

/// Share supply counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShareSupply {
    /// Outstanding shares
    pub total_supply: ShareAmount,
    /// Total minted (cumulative)
    pub total_minted: ShareAmount,
    /// Total burned (cumulative)
    pub total_burned: ShareAmount,
}

#[derive(Debug, Default)]
struct BookState {
    balances: BTreeMap<EvmAddress, ShareAmount>,
    supply: ShareSupply,
}

/// In-memory share ledger
#[derive(Debug, Default)]
pub struct ShareBook {
    state: RefCell<BookState>,
}

impl ShareBook {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the supply counters
    pub fn supply(&self) -> ShareSupply {
        self.state.borrow().supply
    }

    /// Number of addresses holding a non-zero balance
    pub fn holder_count(&self) -> usize {
        self.state.borrow().balances.len()
    }
}

fn set_balance(balances: &mut BTreeMap<EvmAddress, ShareAmount>, holder: EvmAddress, amount: ShareAmount) {
    if amount == 0 {
        balances.remove(&holder);
    } else {
        balances.insert(holder, amount);
    }
}

impl ShareLedger for ShareBook {
    fn mint(&self, holder: &EvmAddress, amount: ShareAmount) -> StakePoolResult<()> {
        if amount == 0 {
            return Err(StakePoolError::ZeroAmount);
        }
        let mut state = self.state.borrow_mut();
        let balance = state.balances.get(holder).copied().unwrap_or(0);
        let new_balance = safe_add(balance, amount)?;
        let new_supply = safe_add(state.supply.total_supply, amount)?;

        set_balance(&mut state.balances, *holder, new_balance);
        state.supply.total_supply = new_supply;
        state.supply.total_minted = state.supply.total_minted.saturating_add(amount);
        Ok(())
    }

    fn burn(&self, holder: &EvmAddress, amount: ShareAmount) -> StakePoolResult<()> {
        if amount == 0 {
            return Err(StakePoolError::ZeroAmount);
        }
        let mut state = self.state.borrow_mut();
        let balance = state.balances.get(holder).copied().unwrap_or(0);
        require_sufficient_shares(balance, amount)?;
        let new_supply = safe_sub(state.supply.total_supply, amount)?;

        set_balance(&mut state.balances, *holder, balance - amount);
        state.supply.total_supply = new_supply;
        state.supply.total_burned = state.supply.total_burned.saturating_add(amount);
        Ok(())
    }

    fn total_supply(&self) -> ShareAmount {
        self.state.borrow().supply.total_supply
    }

    fn balance_of(&self, holder: &EvmAddress) -> ShareAmount {
        self.state.borrow().balances.get(holder).copied().unwrap_or(0)
    }
}
