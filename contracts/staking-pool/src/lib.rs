//! Staking Pool - Pooled-staking vault over a single validator
//!
//! Users deposit the native asset, the vault stakes it with the configured
//! validator through the staking precompile, and mints pool shares for the
//! stake actually observed. Shares redeem either for the native asset
//! (unstake and forward) or directly for staked units (transfer of stake).
//!
//! ## Core Operations
//!
//! - **Deposit**: Stake native funds and mint shares for the observed delta
//! - **Withdraw**: Burn shares, unstake, forward the native proceeds
//! - **WithdrawStake**: Burn shares, hand the proportional stake over
//! - **SetValidatorTarget**: Move the whole position to another validator slot
//! - **SetMinDeposit**: Maintain the deposit floor of price-limited pools
//!
//! ## Variants
//!
//! A pool is either `Plain` (market orders) or `PriceLimited` (limit orders
//! with a minimum deposit). Both offer the staked-asset withdrawal path.
//!
//! ## Execution Model
//!
//! Entry points take `&self` and run under a per-pool reentrancy lock; any
//! nested mutating call made from within a collaborator callback fails with
//! `Reentrancy`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub mod config;
pub mod resolver;
pub mod stake_adapter;
mod settlement;
mod migration;

#[cfg(test)]
mod mock;

pub use config::PoolConfig;
pub use resolver::ValidatorResolver;
pub use stake_adapter::StakeAdapter;

use stakepool_common::{
    access_control::{self, require_permission, AccessControlState, Permission, Role},
    address::{derive_account_key, Hash256},
    constants::token,
    errors::{StakePoolError, StakePoolResult},
    events::{EventLog, PoolEvent},
    guard::ReentrancyLock,
    interfaces::{NativeBank, StakingPrecompile, ValidatorRegistry},
    math,
    share_ledger::ShareLedger,
    types::{
        AccountKey, EvmAddress, NativeAmount, NetUid, PoolVariant, ShareAmount, StakeAmount,
        ValidatorKey, ValidatorUid,
    },
    validation::{require_positive, require_valid_address},
};

// ============ Collaborators ============

/// External collaborators injected at construction
#[derive(Clone)]
pub struct Collaborators {
    /// Share token mint/burn capability
    pub ledger: Rc<dyn ShareLedger>,
    /// Staking subsystem
    pub precompile: Rc<dyn StakingPrecompile>,
    /// Metagraph lookup
    pub registry: Rc<dyn ValidatorRegistry>,
    /// The vault's own native balance
    pub bank: Rc<dyn NativeBank>,
}

impl Collaborators {
    pub fn new(
        ledger: Rc<dyn ShareLedger>,
        precompile: Rc<dyn StakingPrecompile>,
        registry: Rc<dyn ValidatorRegistry>,
        bank: Rc<dyn NativeBank>,
    ) -> Self {
        Self {
            ledger,
            precompile,
            registry,
            bank,
        }
    }
}

// ============ Pool ============

/// A pooled-staking vault
pub struct StakingPool {
    name: String,
    symbol: String,
    netuid: NetUid,
    variant: PoolVariant,
    /// Host-chain address of the vault
    evm_address: EvmAddress,
    /// External-chain identity owning the vault's stake, derived once
    self_identity: AccountKey,
    validator_uid: Cell<ValidatorUid>,
    min_deposit: Cell<NativeAmount>,
    access: RefCell<AccessControlState>,
    events: RefCell<EventLog>,
    lock: ReentrancyLock,
    ledger: Rc<dyn ShareLedger>,
    bank: Rc<dyn NativeBank>,
    resolver: ValidatorResolver,
    adapter: StakeAdapter,
}

impl StakingPool {
    /// Creates a pool from validated deployment parameters.
    ///
    /// # Arguments
    /// * `config` - Name, symbol, subnet, initial validator slot and variant
    /// * `evm_address` - The vault's own host-chain address
    /// * `admin` - Founding admin
    /// * `hasher` - Hash primitive used to derive the vault's account key
    /// * `collaborators` - Ledger, precompile, registry and bank
    ///
    /// # Errors
    /// Returns `InvalidConfig` for bad parameters and `InvalidAddress` if the
    /// vault or admin address is zero.
    pub fn new<H: Hash256 + ?Sized>(
        config: PoolConfig,
        evm_address: EvmAddress,
        admin: EvmAddress,
        hasher: &H,
        collaborators: Collaborators,
    ) -> StakePoolResult<Self> {
        config.validate()?;
        require_valid_address(&evm_address, "pool address cannot be zero")?;
        require_valid_address(&admin, "admin cannot be zero")?;

        let self_identity = derive_account_key(hasher, &evm_address);
        let min_deposit = config.variant.min_deposit();

        Ok(Self {
            name: config.name,
            symbol: config.symbol,
            netuid: config.netuid,
            variant: config.variant,
            evm_address,
            self_identity,
            validator_uid: Cell::new(config.validator_uid),
            min_deposit: Cell::new(min_deposit),
            access: RefCell::new(AccessControlState::new(admin)),
            events: RefCell::new(EventLog::new()),
            lock: ReentrancyLock::new(),
            ledger: collaborators.ledger,
            bank: collaborators.bank,
            resolver: ValidatorResolver::new(collaborators.registry),
            adapter: StakeAdapter::new(collaborators.precompile),
        })
    }

    // ============ Views ============

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        token::DECIMALS
    }

    pub fn netuid(&self) -> NetUid {
        self.netuid
    }

    pub fn validator_uid(&self) -> ValidatorUid {
        self.validator_uid.get()
    }

    pub fn variant(&self) -> PoolVariant {
        self.variant
    }

    /// Current deposit floor in native units
    pub fn min_deposit(&self) -> NativeAmount {
        self.min_deposit.get()
    }

    pub fn evm_address(&self) -> EvmAddress {
        self.evm_address
    }

    /// Account key the staking subsystem knows the vault by
    pub fn self_identity(&self) -> AccountKey {
        self.self_identity
    }

    /// Key of the current validator, read live from the registry
    pub fn validator_hotkey(&self) -> StakePoolResult<ValidatorKey> {
        self.resolver.resolve(self.netuid, self.validator_uid.get())
    }

    /// Stake the vault holds on the current validator
    pub fn total_staked(&self) -> StakePoolResult<StakeAmount> {
        let hotkey = self.validator_hotkey()?;
        self.adapter.get_stake(&hotkey, &self.self_identity, self.netuid)
    }

    pub fn total_shares(&self) -> ShareAmount {
        self.ledger.total_supply()
    }

    pub fn share_balance(&self, holder: &EvmAddress) -> ShareAmount {
        self.ledger.balance_of(holder)
    }

    /// Staked units `shares` would redeem for at the current rate
    pub fn preview_redeem(&self, shares: ShareAmount) -> StakePoolResult<StakeAmount> {
        require_positive(shares)?;
        let staked = self.total_staked()?;
        math::shares_to_underlying(shares, self.ledger.total_supply(), staked)
    }

    /// Staked units per 10^18 shares, `None` while no shares exist
    pub fn exchange_rate(&self) -> StakePoolResult<Option<u128>> {
        let total_shares = self.ledger.total_supply();
        if total_shares == 0 {
            return Ok(None);
        }
        math::exchange_rate(self.total_staked()?, total_shares)
    }

    /// Returns true if `address` holds `role`
    pub fn has_role(&self, address: &EvmAddress, role: Role) -> bool {
        access_control::has_role(&self.access.borrow(), address, role)
    }

    // ============ Events ============

    /// Events emitted so far
    pub fn events(&self) -> Vec<PoolEvent> {
        self.events.borrow().events().to_vec()
    }

    /// Take all emitted events, leaving the log empty
    pub fn take_events(&self) -> Vec<PoolEvent> {
        self.events.borrow_mut().drain()
    }

    fn emit(&self, event: PoolEvent) {
        self.events.borrow_mut().emit(event);
    }

    // ============ Bare Transfers ============

    /// Unsolicited value transfers are never credited
    pub fn receive(&self, amount: NativeAmount) -> StakePoolResult<()> {
        Err(StakePoolError::DirectTransferRejected { amount })
    }

    // ============ Administration ============

    /// Update the deposit floor of a price-limited pool
    pub fn set_min_deposit(&self, caller: EvmAddress, amount: NativeAmount) -> StakePoolResult<()> {
        let _guard = self.lock.enter()?;
        require_permission(&*self.access.borrow(), &caller, Permission::SetMinDeposit)?;

        if !self.variant.is_price_limited() {
            return Err(StakePoolError::InvalidOperation);
        }
        require_positive(amount)?;

        let old_minimum = self.min_deposit.replace(amount);
        self.emit(PoolEvent::MinDepositUpdated {
            old_minimum,
            new_minimum: amount,
            by: caller,
        });

        Ok(())
    }

    /// Grant `role` to `account`; returns false if it was already held
    pub fn grant_role(&self, caller: EvmAddress, account: EvmAddress, role: Role) -> StakePoolResult<bool> {
        let _guard = self.lock.enter()?;
        let granted = access_control::grant_role(&mut self.access.borrow_mut(), caller, account, role)?;
        if granted {
            self.emit(PoolEvent::RoleGranted { account, role, by: caller });
        }
        Ok(granted)
    }

    /// Revoke `role` from `account`; returns false if it was not held
    pub fn revoke_role(&self, caller: EvmAddress, account: EvmAddress, role: Role) -> StakePoolResult<bool> {
        let _guard = self.lock.enter()?;
        let revoked = access_control::revoke_role(&mut self.access.borrow_mut(), caller, account, role)?;
        if revoked {
            self.emit(PoolEvent::RoleRevoked { account, role, by: caller });
        }
        Ok(revoked)
    }
}
