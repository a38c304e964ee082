#![no_std]

mod contract;
mod engine;
mod errors;
mod events;
mod math;
mod pool;
mod share_token;
mod storage;

#[cfg(test)]
mod tests;

pub use crate::contract::{Index, IndexClient};
pub use crate::engine::IndexEngineClient;
pub use crate::pool::SubPoolClient;
pub use crate::storage::{Config, PoolEntry};
