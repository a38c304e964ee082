use common::constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env, String, Vec,
};

use crate::{
    engine::IndexTrait,
    errors::ErrorCode,
    events::IndexEvents,
    math,
    pool::SubPoolClient,
    share_token::ShareTokenClient,
    storage::{
        get_config, get_pools, get_total_weight, save_config, save_pools, save_total_weight,
        utils, Config, PoolEntry,
    },
};

use common::math::safe_math::SafeMath;

contractmeta!(
    key = "Description",
    val = "Weighted index of yield pools with a fungible share token"
);

#[contract]
pub struct Index;

#[contractimpl]
impl IndexTrait for Index {
    fn initialize(env: Env, admin: Address, deposit_token: Address, share_token: Address) {
        if utils::is_initialized(&env) {
            log!(&env, "Index: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }
        utils::set_initialized(&env);

        save_config(
            &env,
            Config {
                admin: admin.clone(),
                deposit_token: deposit_token.clone(),
                share_token: share_token.clone(),
            },
        );
        save_total_weight(&env, 0);

        IndexEvents::initialize(&env, admin, deposit_token, share_token);
    }

    fn add_pool(
        env: Env,
        sender: Address,
        name: String,
        pool: Address,
        pool_share_token: Address,
        weight: u64,
    ) {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let config = get_config(&env);
        if sender != config.admin {
            log!(&env, "Index: Add pool: only the admin may register pools");
            panic_with_error!(&env, ErrorCode::NotAuthorized);
        }

        if weight == 0 {
            log!(&env, "Index: Add pool: weight must be positive");
            panic_with_error!(&env, ErrorCode::InvalidWeight);
        }

        let mut pools = get_pools(&env);
        for entry in pools.iter() {
            if entry.pool == pool {
                log!(&env, "Index: Add pool: pool is already registered");
                panic_with_error!(&env, ErrorCode::DuplicatePool);
            }
        }

        let total_weight = get_total_weight(&env)
            .safe_add(weight, &env)
            .unwrap_or_else(|err| panic_with_error!(&env, err));

        pools.push_back(PoolEntry {
            name: name.clone(),
            pool: pool.clone(),
            pool_share_token,
            weight,
        });
        save_pools(&env, &pools);
        save_total_weight(&env, total_weight);

        IndexEvents::add_pool(&env, pool, name, weight, total_weight);
    }

    fn deposit(env: Env, sender: Address, amount: i128) -> i128 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        utils::acquire_operation_lock(&env);

        if amount <= 0 {
            log!(&env, "Index: Deposit: amount must be positive");
            panic_with_error!(&env, ErrorCode::ZeroAmount);
        }

        let config = get_config(&env);
        let pools = get_pools(&env);
        let total_weight = get_total_weight(&env);
        if total_weight == 0 {
            log!(&env, "Index: Deposit: no pools registered");
            panic_with_error!(&env, ErrorCode::NoPools);
        }

        // Value the engine's existing claims before any new funds move, so
        // the depositor pays the pre-deposit share price.
        let value_before = aggregate_value(&env, &pools);

        let engine = env.current_contract_address();
        token::Client::new(&env, &config.deposit_token).transfer(&sender, &engine, &amount);

        let allocations = math::allocate_deposit(&env, &pools, total_weight, amount);
        for (i, entry) in pools.iter().enumerate() {
            let allocation = allocations.get(i as u32).unwrap_or(0);
            if allocation == 0 {
                continue;
            }
            let pool_client = SubPoolClient::new(&env, &entry.pool);
            match pool_client.try_deposit(&engine, &allocation) {
                Ok(Ok(_)) => (),
                _ => {
                    log!(&env, "Index: Deposit: sub-pool deposit failed");
                    panic_with_error!(&env, ErrorCode::SubPoolCallFailed);
                }
            }
        }

        let share_client = ShareTokenClient::new(&env, &config.share_token);
        let supply = share_client.total_supply();
        let minted = if supply == 0 {
            amount
        } else {
            // supply > 0 with zero prior value has no meaningful price;
            // the division traps as a math error.
            math::mul_div_floor(&env, amount, supply, value_before)
        };
        share_client.mint(&engine, &sender, &minted);

        utils::release_operation_lock(&env);
        IndexEvents::deposit(&env, sender, amount, minted);
        minted
    }

    fn withdraw_shares(env: Env, sender: Address, share_amount: i128) -> i128 {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        utils::acquire_operation_lock(&env);

        if share_amount < 0 {
            log!(&env, "Index: Withdraw: share amount must not be negative");
            panic_with_error!(&env, ErrorCode::ZeroAmount);
        }

        let config = get_config(&env);
        let share_client = ShareTokenClient::new(&env, &config.share_token);

        let supply = share_client.total_supply();
        if supply == 0 {
            log!(&env, "Index: Withdraw: no shares outstanding");
            panic_with_error!(&env, ErrorCode::ZeroSupply);
        }

        let balance = share_client.balance(&sender);
        let resolved = if share_amount == 0 { balance } else { share_amount };
        if resolved == 0 {
            log!(&env, "Index: Withdraw: nothing to redeem");
            panic_with_error!(&env, ErrorCode::ZeroAmount);
        }
        if balance < resolved {
            log!(&env, "Index: Withdraw: share balance too low");
            panic_with_error!(&env, ErrorCode::InsufficientShares);
        }

        // Burn first. The redemption fraction below is fixed against the
        // pre-burn supply, and a failure in any pool rolls the burn back.
        share_client.burn(&sender, &resolved);

        let engine = env.current_contract_address();
        let pools = get_pools(&env);
        let mut returned: i128 = 0;
        for entry in pools.iter() {
            let lp_client = ShareTokenClient::new(&env, &entry.pool_share_token);
            let held = lp_client.balance(&engine);
            if held == 0 {
                continue;
            }
            let units = math::mul_div_floor(&env, held, resolved, supply);
            if units == 0 {
                continue;
            }
            let pool_client = SubPoolClient::new(&env, &entry.pool);
            let paid = match pool_client.try_withdraw_units(&engine, &units) {
                Ok(Ok(paid)) => paid,
                _ => {
                    log!(&env, "Index: Withdraw: sub-pool withdrawal failed");
                    panic_with_error!(&env, ErrorCode::SubPoolCallFailed);
                }
            };
            returned = returned
                .safe_add(paid, &env)
                .unwrap_or_else(|err| panic_with_error!(&env, err));
        }

        if returned > 0 {
            token::Client::new(&env, &config.deposit_token).transfer(&engine, &sender, &returned);
        }

        utils::release_operation_lock(&env);
        IndexEvents::withdraw(&env, sender, resolved, returned);
        returned
    }

    fn withdraw_all(env: Env, sender: Address) -> i128 {
        Self::withdraw_shares(env, sender, 0)
    }

    fn total_value(env: Env) -> i128 {
        let pools = get_pools(&env);
        aggregate_value(&env, &pools)
    }

    fn query_pool_value(env: Env, pool: Address) -> i128 {
        let pools = get_pools(&env);
        for entry in pools.iter() {
            if entry.pool == pool {
                return pool_claim(&env, &entry);
            }
        }
        0
    }

    fn deposit_asset(env: Env) -> Address {
        get_config(&env).deposit_token
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_pools(env: Env) -> Vec<PoolEntry> {
        get_pools(&env)
    }

    fn query_total_weight(env: Env) -> u64 {
        get_total_weight(&env)
    }
}

/// The engine's claim on one sub-pool: its slice of the pool's LP supply
/// applied to the pool's self-reported value.
fn pool_claim(env: &Env, entry: &PoolEntry) -> i128 {
    let lp_client = ShareTokenClient::new(env, &entry.pool_share_token);
    let held = lp_client.balance(&env.current_contract_address());
    if held == 0 {
        return 0;
    }
    let lp_supply = lp_client.total_supply();
    if lp_supply == 0 {
        return 0;
    }
    let pool_value = SubPoolClient::new(env, &entry.pool).total_value();
    math::mul_div_floor(env, held, pool_value, lp_supply)
}

fn aggregate_value(env: &Env, pools: &Vec<PoolEntry>) -> i128 {
    let mut total: i128 = 0;
    for entry in pools.iter() {
        total = total
            .safe_add(pool_claim(env, &entry), env)
            .unwrap_or_else(|err| panic_with_error!(env, err));
    }
    total
}
