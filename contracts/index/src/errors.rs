use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotAuthorized = 2,
    InvalidWeight = 3,
    DuplicatePool = 4,
    NoPools = 5,
    ZeroAmount = 6,
    InsufficientShares = 7,
    ZeroSupply = 8,
    Reentrant = 9,
    SubPoolCallFailed = 10,
}
