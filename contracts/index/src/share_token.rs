use soroban_sdk::{contractclient, Address, Env};

/// Client for the fungible-share ledger the engine mints into and burns
/// from. Sub-pool LP tokens expose the same surface, so the engine also
/// uses this client to read its per-pool holdings.
#[contractclient(name = "ShareTokenClient")]
pub trait ShareToken {
    /// Minter-gated issuance; `sender` must be a registered minter.
    fn mint(env: Env, sender: Address, to: Address, amount: i128);

    fn burn(env: Env, from: Address, amount: i128);

    fn balance(env: Env, id: Address) -> i128;

    fn total_supply(env: Env) -> i128;
}
