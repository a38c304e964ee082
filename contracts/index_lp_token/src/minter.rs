use soroban_sdk::{Address, Env, Vec};

use crate::storage_types::DataKey;

pub fn read_minters(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Minters)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_minters(env: &Env, minters: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Minters, minters);
}

pub fn is_minter(env: &Env, id: &Address) -> bool {
    read_minters(env).contains(id)
}
