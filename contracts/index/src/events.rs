use soroban_sdk::{Address, Env, String, Symbol};

pub struct IndexEvents {}

impl IndexEvents {
    /// Emitted when the engine is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[deposit_token: Address, share_token: Address]`
    pub fn initialize(env: &Env, admin: Address, deposit_token: Address, share_token: Address) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, (deposit_token, share_token));
    }

    /// Emitted when a sub-pool is registered
    ///
    /// - topics - `["add_pool", pool: Address]`
    /// - data - `[name: String, weight: u64, total_weight: u64]`
    pub fn add_pool(env: &Env, pool: Address, name: String, weight: u64, total_weight: u64) {
        let topics = (Symbol::new(env, "add_pool"), pool);
        env.events().publish(topics, (name, weight, total_weight));
    }

    /// Emitted when a user deposits into the index
    ///
    /// - topics - `["deposit", sender: Address]`
    /// - data - `[amount: i128, shares_minted: i128]`
    pub fn deposit(env: &Env, sender: Address, amount: i128, shares_minted: i128) {
        let topics = (Symbol::new(env, "deposit"), sender);
        env.events().publish(topics, (amount, shares_minted));
    }

    /// Emitted when a user redeems index shares
    ///
    /// - topics - `["withdraw", sender: Address]`
    /// - data - `[shares_burned: i128, amount_returned: i128]`
    pub fn withdraw(env: &Env, sender: Address, shares_burned: i128, amount_returned: i128) {
        let topics = (Symbol::new(env, "withdraw"), sender);
        env.events().publish(topics, (shares_burned, amount_returned));
    }
}
