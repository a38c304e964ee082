use soroban_sdk::{
    contract, contractimpl, symbol_short, testutils::Address as _, token, Address, Env, String,
};

use index_lp_token::{IndexLpToken, IndexLpTokenClient};

use crate::contract::{Index, IndexClient};
use crate::engine::IndexEngineClient;

pub const SHARE_DECIMALS: u32 = 6;

/// Minimal sub-pool for exercising the engine. Holds the deposit asset
/// directly, so its total value is simply its token balance, and tracks
/// depositors with an `IndexLpToken` instance it is a minter of.
#[contract]
pub struct MockPool;

#[contractimpl]
impl MockPool {
    pub fn __constructor(env: Env, deposit_token: Address, lp_token: Address) {
        env.storage()
            .instance()
            .set(&symbol_short!("dep_tok"), &deposit_token);
        env.storage()
            .instance()
            .set(&symbol_short!("lp_tok"), &lp_token);
    }

    pub fn total_value(env: Env) -> i128 {
        let deposit_token: Address = env
            .storage()
            .instance()
            .get(&symbol_short!("dep_tok"))
            .unwrap();
        token::Client::new(&env, &deposit_token).balance(&env.current_contract_address())
    }

    pub fn deposit(env: Env, from: Address, amount: i128) -> i128 {
        let this = env.current_contract_address();
        let deposit_token: Address = env
            .storage()
            .instance()
            .get(&symbol_short!("dep_tok"))
            .unwrap();
        let lp_token: Address = env
            .storage()
            .instance()
            .get(&symbol_short!("lp_tok"))
            .unwrap();

        let token_client = token::Client::new(&env, &deposit_token);
        let lp_client = IndexLpTokenClient::new(&env, &lp_token);

        let value_before = token_client.balance(&this);
        token_client.transfer(&from, &this, &amount);

        let supply = lp_client.total_supply();
        let units = if supply == 0 || value_before == 0 {
            amount
        } else {
            amount * supply / value_before
        };
        lp_client.mint(&this, &from, &units);
        units
    }

    pub fn withdraw_units(env: Env, from: Address, units: i128) -> i128 {
        let this = env.current_contract_address();
        let deposit_token: Address = env
            .storage()
            .instance()
            .get(&symbol_short!("dep_tok"))
            .unwrap();
        let lp_token: Address = env
            .storage()
            .instance()
            .get(&symbol_short!("lp_tok"))
            .unwrap();

        let token_client = token::Client::new(&env, &deposit_token);
        let lp_client = IndexLpTokenClient::new(&env, &lp_token);

        let supply = lp_client.total_supply();
        let value = token_client.balance(&this);
        let paid = units * value / supply;

        lp_client.burn(&from, &units);
        token_client.transfer(&this, &from, &paid);
        paid
    }
}

/// Sub-pool that calls back into the engine from its own `deposit`. Used to
/// verify the operation lock. Lives in its own module so the contract spec
/// symbols generated by `#[contractimpl]` don't collide with `MockPool`'s.
mod reentrant_pool {
    use super::*;

    #[contract]
    pub struct ReentrantPool;

    #[contractimpl]
    impl ReentrantPool {
        pub fn __constructor(env: Env, engine: Address) {
            env.storage().instance().set(&symbol_short!("engine"), &engine);
        }

        pub fn total_value(_env: Env) -> i128 {
            0
        }

        pub fn deposit(env: Env, from: Address, amount: i128) -> i128 {
            let engine: Address = env
                .storage()
                .instance()
                .get(&symbol_short!("engine"))
                .unwrap();
            IndexEngineClient::new(&env, &engine).deposit(&from, &amount);
            amount
        }

        pub fn withdraw_units(_env: Env, _from: Address, _units: i128) -> i128 {
            0
        }
    }
}

pub use reentrant_pool::ReentrantPool;

pub struct TestIndex<'a> {
    pub admin: Address,
    pub index: IndexClient<'a>,
    pub deposit_token: token::Client<'a>,
    pub deposit_token_admin: token::StellarAssetClient<'a>,
    pub share_token: IndexLpTokenClient<'a>,
}

pub fn deploy_index_contract(env: &Env) -> TestIndex<'_> {
    env.mock_all_auths_allowing_non_root_auth();

    let admin = Address::generate(env);

    let asset = env.register_stellar_asset_contract_v2(admin.clone());
    let deposit_token = token::Client::new(env, &asset.address());
    let deposit_token_admin = token::StellarAssetClient::new(env, &asset.address());

    let share_token_address = env.register(
        IndexLpToken,
        (
            admin.clone(),
            SHARE_DECIMALS,
            String::from_str(env, "Index LP Token"),
            String::from_str(env, "IDXLP"),
        ),
    );
    let share_token = IndexLpTokenClient::new(env, &share_token_address);

    let index_address = env.register(Index, ());
    let index = IndexClient::new(env, &index_address);
    index.initialize(&admin, &asset.address(), &share_token_address);
    share_token.add_minter(&index_address);

    TestIndex {
        admin,
        index,
        deposit_token,
        deposit_token_admin,
        share_token,
    }
}

/// Registers a fresh `MockPool` with its own LP token under `weight`.
pub fn add_mock_pool<'a>(
    env: &'a Env,
    ctx: &TestIndex<'a>,
    name: &str,
    weight: u64,
) -> (Address, IndexLpTokenClient<'a>) {
    let lp_address = env.register(
        IndexLpToken,
        (
            ctx.admin.clone(),
            SHARE_DECIMALS,
            String::from_str(env, "Pool LP"),
            String::from_str(env, "PLP"),
        ),
    );
    let pool_address = env.register(
        MockPool,
        (ctx.deposit_token.address.clone(), lp_address.clone()),
    );
    IndexLpTokenClient::new(env, &lp_address).add_minter(&pool_address);

    ctx.index.add_pool(
        &ctx.admin,
        &String::from_str(env, name),
        &pool_address,
        &lp_address,
        &weight,
    );

    (pool_address, IndexLpTokenClient::new(env, &lp_address))
}

/// Registers a `ReentrantPool` backed by an empty LP token so valuation
/// passes before the malicious callback fires.
pub fn add_reentrant_pool(env: &Env, ctx: &TestIndex, weight: u64) -> Address {
    let lp_address = env.register(
        IndexLpToken,
        (
            ctx.admin.clone(),
            SHARE_DECIMALS,
            String::from_str(env, "Pool LP"),
            String::from_str(env, "PLP"),
        ),
    );
    let pool_address = env.register(ReentrantPool, (ctx.index.address.clone(),));

    ctx.index.add_pool(
        &ctx.admin,
        &String::from_str(env, "reentrant"),
        &pool_address,
        &lp_address,
        &weight,
    );

    pool_address
}

pub fn fund(ctx: &TestIndex, user: &Address, amount: i128) {
    ctx.deposit_token_admin.mint(user, &amount);
}
