use soroban_sdk::{contractclient, Address, Env, String, Vec};

use crate::storage::{Config, PoolEntry};

#[contractclient(name = "IndexEngineClient")]
pub trait IndexTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(env: Env, admin: Address, deposit_token: Address, share_token: Address);

    /// Registers a new sub-pool with a fixed allocation weight. Weights are
    /// immutable once set and pools cannot be removed.
    fn add_pool(
        env: Env,
        sender: Address,
        name: String,
        pool: Address,
        pool_share_token: Address,
        weight: u64,
    );

    // ################################################################
    //                             USER
    // ################################################################

    /// Pulls `amount` of the deposit asset from `sender`, allocates it
    /// across the registered sub-pools by weight and mints index shares
    /// against the pre-deposit value. Returns the shares minted.
    fn deposit(env: Env, sender: Address, amount: i128) -> i128;

    /// Redeems `share_amount` of `sender`'s index shares for a proportional
    /// slice of every sub-pool position. Passing 0 redeems the full balance.
    /// Returns the deposit-asset amount paid out.
    fn withdraw_shares(env: Env, sender: Address, share_amount: i128) -> i128;

    /// Redeems `sender`'s entire share balance.
    fn withdraw_all(env: Env, sender: Address) -> i128;

    // ################################################################
    //                             QUERIES
    // ################################################################

    /// Aggregate value of the engine's claims on all registered sub-pools,
    /// in the deposit asset.
    fn total_value(env: Env) -> i128;

    /// The engine's claim on a single registered sub-pool; 0 if `pool` is
    /// not registered.
    fn query_pool_value(env: Env, pool: Address) -> i128;

    fn deposit_asset(env: Env) -> Address;

    fn query_config(env: Env) -> Config;

    fn query_pools(env: Env) -> Vec<PoolEntry>;

    fn query_total_weight(env: Env) -> u64;
}
