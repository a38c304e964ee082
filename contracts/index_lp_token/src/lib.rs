#![no_std]

mod admin;
mod allowance;
mod balance;
mod contract;
mod errors;
mod metadata;
mod minter;
mod storage_types;


pub use crate::contract::{IndexLpToken, IndexLpTokenClient};
