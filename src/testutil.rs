//! Test fixtures: an in-memory supply bank and a ready keeper

use crate::config::KeeperConfig;
use crate::handler::BlockContext;
use crate::keeper::{Keeper, ParamSubspace};
use crate::store::MemStore;
use crate::supply::{SupplyError, SupplyKeeper, FEE_COLLECTOR_NAME, MODULE_NAME};
use crate::types::{Address, Coins};
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

/// Block time of the default test context (2023-11-14T22:13:20Z)
pub const GENESIS_TIME: i64 = 1_700_000_000;

pub type TestKeeper = Keeper<MemStore, MockSupply, ParamSubspace>;

/// Balance-tracking supply capability for tests
#[derive(Debug, Clone, Default)]
pub struct MockSupply {
    accounts: BTreeMap<Address, Coins>,
    modules: BTreeMap<String, Coins>,
    total: Coins,
    /// When set, every module -> account transfer fails
    pub fail_releases: bool,
}

impl MockSupply {
    pub fn new() -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(MODULE_NAME.to_string(), Coins::empty());
        modules.insert(FEE_COLLECTOR_NAME.to_string(), Coins::empty());
        Self {
            modules,
            ..Default::default()
        }
    }

    pub fn fund(&mut self, account: &Address, amount: &Coins) {
        let balance = self.balance(account).checked_add(amount).unwrap();
        self.accounts.insert(*account, balance);
        self.total = self.total.checked_add(amount).unwrap();
    }

    pub fn balance(&self, account: &Address) -> Coins {
        self.accounts.get(account).cloned().unwrap_or_default()
    }

    pub fn module_balance(&self, module: &str) -> Coins {
        self.modules.get(module).cloned().unwrap_or_default()
    }

    pub fn total_supply(&self) -> &Coins {
        &self.total
    }

    fn module_mut(&mut self, module: &str) -> Result<&mut Coins, SupplyError> {
        self.modules
            .get_mut(module)
            .ok_or_else(|| SupplyError::UnknownModule(module.to_string()))
    }
}

impl SupplyKeeper for MockSupply {
    fn send_coins_from_account_to_module(
        &mut self,
        from: &Address,
        module: &str,
        amount: &Coins,
    ) -> Result<(), SupplyError> {
        if !self.modules.contains_key(module) {
            return Err(SupplyError::UnknownModule(module.to_string()));
        }
        let have = self.balance(from);
        let rest = have
            .checked_sub(amount)
            .ok_or_else(|| SupplyError::InsufficientCoins {
                have: have.clone(),
                need: amount.clone(),
            })?;
        let custody = self.module_mut(module)?;
        *custody = custody
            .checked_add(amount)
            .ok_or_else(|| SupplyError::InvalidCoins(amount.to_string()))?;
        self.accounts.insert(*from, rest);
        Ok(())
    }

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), SupplyError> {
        if self.fail_releases {
            return Err(SupplyError::InvalidCoins("releases disabled".to_string()));
        }
        let custody = self.module_mut(module)?;
        let rest = custody
            .checked_sub(amount)
            .ok_or_else(|| SupplyError::InsufficientCoins {
                have: custody.clone(),
                need: amount.clone(),
            })?;
        *custody = rest;
        let balance = self
            .balance(to)
            .checked_add(amount)
            .ok_or_else(|| SupplyError::InvalidCoins(amount.to_string()))?;
        self.accounts.insert(*to, balance);
        Ok(())
    }

    fn mint_coins(&mut self, module: &str, amount: &Coins) -> Result<(), SupplyError> {
        if module != MODULE_NAME {
            return Err(SupplyError::Unauthorized(module.to_string()));
        }
        let custody = self.module_mut(module)?;
        *custody = custody
            .checked_add(amount)
            .ok_or_else(|| SupplyError::InvalidCoins(amount.to_string()))?;
        self.total = self
            .total
            .checked_add(amount)
            .ok_or_else(|| SupplyError::InvalidCoins(amount.to_string()))?;
        Ok(())
    }
}

pub fn addr(seed: &str) -> Address {
    Address::derive(seed.as_bytes())
}

pub fn block_at(height: i64, unix_time: i64) -> BlockContext {
    BlockContext::new(height, Utc.timestamp_opt(unix_time, 0).unwrap())
}

pub fn setup_test_input() -> (TestKeeper, BlockContext) {
    setup_test_input_with(KeeperConfig::default())
}

pub fn setup_test_input_with(config: KeeperConfig) -> (TestKeeper, BlockContext) {
    let _ = env_logger::builder().is_test(true).try_init();

    let keeper = Keeper::new(
        MemStore::new(),
        MockSupply::new(),
        ParamSubspace::default(),
        config,
    );
    (keeper, block_at(1, GENESIS_TIME))
}
