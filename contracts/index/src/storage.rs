use common::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use soroban_sdk::{contracttype, Address, Env, String, Vec};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    Pools,
    TotalWeight,
    Initialized,
    OperationLock,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// The settlement asset accepted for deposits, fixed at initialization.
    pub deposit_token: Address,
    /// The share ledger this engine exclusively mints into and burns from.
    pub share_token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolEntry {
    /// Display label, informational only.
    pub name: String,
    /// Address of the sub-pool contract, unique within the engine.
    pub pool: Address,
    /// The sub-pool's own LP token. The engine's balance of it is the
    /// engine's only record of value held in that pool.
    pub pool_share_token: Address,
    /// Relative allocation weight, positive and immutable once set.
    pub weight: u64,
}

pub fn save_config(env: &Env, config: Config) {
    env.storage().persistent().set(&DataKey::Config, &config);
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .persistent()
        .get(&DataKey::Config)
        .expect("Config not set");

    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    config
}

/// Registered pools in insertion order. The order is load-bearing: the last
/// pool absorbs the rounding remainder of every deposit split.
pub fn get_pools(env: &Env) -> Vec<PoolEntry> {
    let pools = match env.storage().persistent().get(&DataKey::Pools) {
        Some(pools) => pools,
        None => Vec::new(env),
    };
    if env.storage().persistent().has(&DataKey::Pools) {
        env.storage().persistent().extend_ttl(
            &DataKey::Pools,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }
    pools
}

pub fn save_pools(env: &Env, pools: &Vec<PoolEntry>) {
    env.storage().persistent().set(&DataKey::Pools, pools);
    env.storage().persistent().extend_ttl(
        &DataKey::Pools,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_total_weight(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalWeight)
        .unwrap_or(0)
}

pub fn save_total_weight(env: &Env, total_weight: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalWeight, &total_weight);
    env.storage().persistent().extend_ttl(
        &DataKey::TotalWeight,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub mod utils {
    use soroban_sdk::{log, panic_with_error};

    use crate::errors::ErrorCode;

    use super::*;

    pub fn is_initialized(env: &Env) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Initialized)
            .unwrap_or(false)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().persistent().set(&DataKey::Initialized, &true);
        env.storage().persistent().extend_ttl(
            &DataKey::Initialized,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }

    /// Marks a guarded operation as in flight. A collaborator calling back
    /// into the engine while the flag is set fails here instead of
    /// observing a half-committed share price.
    pub fn acquire_operation_lock(env: &Env) {
        if env
            .storage()
            .instance()
            .get(&DataKey::OperationLock)
            .unwrap_or(false)
        {
            log!(env, "Index: an operation is already in progress");
            panic_with_error!(env, ErrorCode::Reentrant);
        }
        env.storage().instance().set(&DataKey::OperationLock, &true);
    }

    /// Clears the in-flight flag. Error paths need no explicit release: a
    /// panic rolls back the whole invocation, flag included.
    pub fn release_operation_lock(env: &Env) {
        env.storage()
            .instance()
            .set(&DataKey::OperationLock, &false);
    }
}
