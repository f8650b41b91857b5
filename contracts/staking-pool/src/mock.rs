//! In-memory staking subsystem for tests.
//!
//! `MockSubtensor` plays the staking precompile, the validator registry and
//! the vault's native bank at once. Prices are quoted in staking units per
//! `ONE_STAKE` staked units. Failures, limit fills and reentry hooks are
//! configurable per test.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use stakepool_common::{
    address::{derive_account_key, Sha256Hasher},
    constants::units::{DECIMAL_SCALE_FACTOR, ONE_STAKE},
    interfaces::{CallOutcome, NativeBank, StakingPrecompile, ValidatorRegistry},
    share_ledger::ShareBook,
    types::{
        AccountKey, EvmAddress, NativeAmount, NetUid, PriceLimit, ShareAmount, StakeAmount, StakeCall,
        StakeOperation, StakeOrder, ValidatorKey, ValidatorUid,
    },
    StakePoolResult,
};

use crate::{Collaborators, PoolConfig, StakingPool};

pub const POOL_ADDRESS: EvmAddress = [0x50; 20];
pub const ADMIN: EvmAddress = [0xAD; 20];
pub const OPERATOR: EvmAddress = [0x0E; 20];
pub const ALICE: EvmAddress = [0xA1; 20];
pub const BOB: EvmAddress = [0xB0; 20];
pub const DEST_KEY: AccountKey = [0xDE; 32];
pub const NETUID: NetUid = 7;
pub const HOTKEY_0: ValidatorKey = [0x10; 32];
pub const HOTKEY_1: ValidatorKey = [0x11; 32];

type Hook = Box<dyn Fn()>;

pub struct MockSubtensor {
    pool_key: AccountKey,
    hotkeys: RefCell<BTreeMap<(NetUid, ValidatorUid), ValidatorKey>>,
    stakes: RefCell<BTreeMap<(ValidatorKey, AccountKey, NetUid), StakeAmount>>,
    balance: Cell<NativeAmount>,
    price: Cell<u64>,
    fillable_at_limit: Cell<StakeAmount>,
    stake_absorbed: Cell<bool>,
    reject_transfers: Cell<bool>,
    failing: RefCell<Vec<StakeOperation>>,
    calls: RefCell<Vec<StakeCall>>,
    transfers: RefCell<Vec<(AccountKey, NativeAmount)>>,
    on_stake_call: RefCell<Option<Hook>>,
    on_transfer: RefCell<Option<Hook>>,
}

impl MockSubtensor {
    /// Subsystem at a 1:1 price with slots 0 and 1 registered on `NETUID`
    pub fn new(pool_key: AccountKey) -> Self {
        let mut hotkeys = BTreeMap::new();
        hotkeys.insert((NETUID, 0), HOTKEY_0);
        hotkeys.insert((NETUID, 1), HOTKEY_1);

        Self {
            pool_key,
            hotkeys: RefCell::new(hotkeys),
            stakes: RefCell::new(BTreeMap::new()),
            balance: Cell::new(0),
            price: Cell::new(ONE_STAKE),
            fillable_at_limit: Cell::new(0),
            stake_absorbed: Cell::new(false),
            reject_transfers: Cell::new(false),
            failing: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            transfers: RefCell::new(Vec::new()),
            on_stake_call: RefCell::new(None),
            on_transfer: RefCell::new(None),
        }
    }

    // ============ Configuration ============

    pub fn register(&self, netuid: NetUid, uid: ValidatorUid, hotkey: ValidatorKey) {
        self.hotkeys.borrow_mut().insert((netuid, uid), hotkey);
    }

    pub fn deregister(&self, netuid: NetUid, uid: ValidatorUid) {
        self.hotkeys.borrow_mut().remove(&(netuid, uid));
    }

    pub fn set_price(&self, price: u64) {
        self.price.set(price);
    }

    /// Staking units that still fill when the price is beyond a limit
    pub fn set_fillable_at_limit(&self, amount: StakeAmount) {
        self.fillable_at_limit.set(amount);
    }

    /// Accept stake calls without crediting any stake
    pub fn set_stake_absorbed(&self, absorbed: bool) {
        self.stake_absorbed.set(absorbed);
    }

    pub fn set_reject_transfers(&self, reject: bool) {
        self.reject_transfers.set(reject);
    }

    pub fn fail_on(&self, operation: StakeOperation) {
        self.failing.borrow_mut().push(operation);
    }

    pub fn clear_failures(&self) {
        self.failing.borrow_mut().clear();
    }

    /// Native value attached to a call into the vault
    pub fn credit(&self, amount: NativeAmount) {
        self.balance.set(self.balance.get() + amount);
    }

    pub fn seed_stake(&self, hotkey: &ValidatorKey, owner: &AccountKey, amount: StakeAmount) {
        *self.stakes.borrow_mut().entry((*hotkey, *owner, NETUID)).or_insert(0) += amount;
    }

    pub fn on_stake_call(&self, hook: impl Fn() + 'static) {
        *self.on_stake_call.borrow_mut() = Some(Box::new(hook));
    }

    pub fn on_transfer(&self, hook: impl Fn() + 'static) {
        *self.on_transfer.borrow_mut() = Some(Box::new(hook));
    }

    // ============ Inspection ============

    pub fn calls(&self) -> Vec<StakeCall> {
        self.calls.borrow().clone()
    }

    pub fn transfers(&self) -> Vec<(AccountKey, NativeAmount)> {
        self.transfers.borrow().clone()
    }

    pub fn stake_of(&self, hotkey: &ValidatorKey, owner: &AccountKey) -> StakeAmount {
        self.read_stake(hotkey, owner, NETUID)
    }

    pub fn stake_of_pool(&self, hotkey: &ValidatorKey) -> StakeAmount {
        self.read_stake(hotkey, &self.pool_key, NETUID)
    }

    // ============ Internals ============

    fn read_stake(&self, hotkey: &ValidatorKey, owner: &AccountKey, netuid: NetUid) -> StakeAmount {
        self.stakes
            .borrow()
            .get(&(*hotkey, *owner, netuid))
            .copied()
            .unwrap_or(0)
    }

    fn write_stake(&self, hotkey: &ValidatorKey, owner: &AccountKey, netuid: NetUid, amount: StakeAmount) {
        self.stakes.borrow_mut().insert((*hotkey, *owner, netuid), amount);
    }

    fn fire(hook: &RefCell<Option<Hook>>) {
        if let Some(hook) = hook.borrow().as_ref() {
            hook();
        }
    }

    /// Amount that fills, or `None` if the request is rejected
    fn fill(&self, requested: StakeAmount, within_limit: bool, allow_partial: bool) -> Option<StakeAmount> {
        if within_limit {
            return Some(requested);
        }
        let fillable = self.fillable_at_limit.get().min(requested);
        if allow_partial && fillable > 0 {
            Some(fillable)
        } else {
            None
        }
    }

    fn add(&self, hotkey: &ValidatorKey, amount: StakeAmount, netuid: NetUid, limit: Option<PriceLimit>) -> bool {
        let price = self.price.get();
        let filled = match limit {
            None => Some(amount),
            Some(limit) => self.fill(amount, price <= limit.limit_price, limit.allow_partial),
        };
        let Some(filled) = filled else { return false };

        let cost = filled as u128 * DECIMAL_SCALE_FACTOR;
        if self.balance.get() < cost || price == 0 {
            return false;
        }
        self.balance.set(self.balance.get() - cost);

        if !self.stake_absorbed.get() {
            let alpha = (filled as u128 * ONE_STAKE as u128 / price as u128) as StakeAmount;
            let current = self.read_stake(hotkey, &self.pool_key, netuid);
            self.write_stake(hotkey, &self.pool_key, netuid, current + alpha);
        }
        true
    }

    fn remove(&self, hotkey: &ValidatorKey, amount: StakeAmount, netuid: NetUid, limit: Option<PriceLimit>) -> bool {
        let price = self.price.get();
        let filled = match limit {
            None => Some(amount),
            Some(limit) => self.fill(amount, price >= limit.limit_price, limit.allow_partial),
        };
        let Some(filled) = filled else { return false };

        let current = self.read_stake(hotkey, &self.pool_key, netuid);
        if current < filled {
            return false;
        }
        self.write_stake(hotkey, &self.pool_key, netuid, current - filled);

        let proceeds = filled as u128 * price as u128 / ONE_STAKE as u128;
        self.balance.set(self.balance.get() + proceeds * DECIMAL_SCALE_FACTOR);
        true
    }

    fn relocate(
        &self,
        from: (&ValidatorKey, &AccountKey, NetUid),
        to: (&ValidatorKey, &AccountKey, NetUid),
        amount: StakeAmount,
    ) -> bool {
        let available = self.read_stake(from.0, from.1, from.2);
        if available < amount {
            return false;
        }
        self.write_stake(from.0, from.1, from.2, available - amount);
        let existing = self.read_stake(to.0, to.1, to.2);
        self.write_stake(to.0, to.1, to.2, existing + amount);
        true
    }

    fn apply(&self, call: &StakeCall) -> bool {
        let pool_key = self.pool_key;
        match *call {
            StakeCall::AddStake { hotkey, amount, netuid } => self.add(&hotkey, amount, netuid, None),
            StakeCall::AddStakeLimit { hotkey, amount, limit_price, allow_partial, netuid } => {
                self.add(&hotkey, amount, netuid, Some(PriceLimit::new(limit_price, allow_partial)))
            }
            StakeCall::RemoveStake { hotkey, amount, netuid } => self.remove(&hotkey, amount, netuid, None),
            StakeCall::RemoveStakeLimit { hotkey, amount, limit_price, allow_partial, netuid } => {
                self.remove(&hotkey, amount, netuid, Some(PriceLimit::new(limit_price, allow_partial)))
            }
            StakeCall::TransferStake { destination, hotkey, origin_netuid, destination_netuid, amount } => self.relocate(
                (&hotkey, &pool_key, origin_netuid),
                (&hotkey, &destination, destination_netuid),
                amount,
            ),
            StakeCall::MoveStake { origin_hotkey, destination_hotkey, origin_netuid, destination_netuid, amount } => self
                .relocate(
                    (&origin_hotkey, &pool_key, origin_netuid),
                    (&destination_hotkey, &pool_key, destination_netuid),
                    amount,
                ),
            StakeCall::GetStake { .. } => false,
        }
    }

    fn decode(&self, input: &[u8]) -> Option<StakeCall> {
        let call: StakeCall = borsh::from_slice(input).ok()?;
        self.calls.borrow_mut().push(call.clone());
        if self.failing.borrow().contains(&call.operation()) {
            return None;
        }
        Some(call)
    }
}

impl StakingPrecompile for MockSubtensor {
    fn call(&self, input: &[u8]) -> CallOutcome {
        let Some(call) = self.decode(input) else {
            return CallOutcome::failure();
        };
        Self::fire(&self.on_stake_call);
        if self.apply(&call) {
            CallOutcome::success(Vec::new())
        } else {
            CallOutcome::failure()
        }
    }

    fn static_call(&self, input: &[u8]) -> CallOutcome {
        match self.decode(input) {
            Some(StakeCall::GetStake { hotkey, owner, netuid }) => {
                let stake = self.read_stake(&hotkey, &owner, netuid);
                CallOutcome::success(borsh::to_vec(&stake).unwrap_or_default())
            }
            _ => CallOutcome::failure(),
        }
    }
}

impl ValidatorRegistry for MockSubtensor {
    fn get_hotkey(&self, netuid: NetUid, uid: ValidatorUid) -> Option<ValidatorKey> {
        self.hotkeys.borrow().get(&(netuid, uid)).copied()
    }
}

impl NativeBank for MockSubtensor {
    fn balance(&self) -> NativeAmount {
        self.balance.get()
    }

    fn transfer(&self, destination: &AccountKey, amount: NativeAmount) -> bool {
        Self::fire(&self.on_transfer);
        if self.reject_transfers.get() || self.balance.get() < amount {
            return false;
        }
        self.balance.set(self.balance.get() - amount);
        self.transfers.borrow_mut().push((*destination, amount));
        true
    }
}

// ============ Test Environment ============

/// A pool wired to a fresh `MockSubtensor` and `ShareBook`
pub struct TestEnv {
    pub pool: Rc<StakingPool>,
    pub mock: Rc<MockSubtensor>,
    pub ledger: Rc<ShareBook>,
}

impl TestEnv {
    pub fn plain() -> Self {
        Self::with_config(PoolConfig::plain("Pooled Stake", "pSTK", NETUID, 0))
    }

    pub fn price_limited() -> Self {
        Self::with_config(PoolConfig::price_limited_default("Pooled Stake", "pSTK", NETUID, 0))
    }

    pub fn with_config(config: PoolConfig) -> Self {
        let pool_key = derive_account_key(&Sha256Hasher, &POOL_ADDRESS);
        let mock = Rc::new(MockSubtensor::new(pool_key));
        let ledger = Rc::new(ShareBook::new());
        let collaborators = Collaborators::new(ledger.clone(), mock.clone(), mock.clone(), mock.clone());
        let pool = StakingPool::new(config, POOL_ADDRESS, ADMIN, &Sha256Hasher, collaborators).unwrap();

        Self {
            pool: Rc::new(pool),
            mock,
            ledger,
        }
    }

    /// Collaborators sharing this environment's mock and ledger
    pub fn collaborators(&self) -> Collaborators {
        Collaborators::new(self.ledger.clone(), self.mock.clone(), self.mock.clone(), self.mock.clone())
    }

    /// Deposit with `amount` attached as value
    pub fn deposit(
        &self,
        caller: EvmAddress,
        amount: NativeAmount,
        destination: EvmAddress,
        order: StakeOrder,
    ) -> StakePoolResult<ShareAmount> {
        self.mock.credit(amount);
        self.pool.deposit(caller, amount, destination, order)
    }
}
