use soroban_sdk::{contractclient, Address, Env};

/// Interface every registered sub-pool must expose. The engine never looks
/// at a sub-pool's strategy; it only deposits, withdraws and values its
/// position through this client.
#[contractclient(name = "SubPoolClient")]
pub trait SubPool {
    /// Current valuation of the sub-pool's entire position, in the
    /// settlement asset.
    fn total_value(env: Env) -> i128;

    /// Deposits `amount` of the settlement asset taken from `from` and
    /// credits the sub-pool's own LP units to `from`. Returns the units
    /// credited.
    fn deposit(env: Env, from: Address, amount: i128) -> i128;

    /// Redeems `units` of `from`'s LP units for settlement asset paid back
    /// to `from`. Returns the amount paid.
    fn withdraw_units(env: Env, from: Address, units: i128) -> i128;
}
