use common::math::safe_math::SafeMath;
use soroban_sdk::{panic_with_error, Env, Vec};

use crate::storage::PoolEntry;

/// `a * b / denom`, rounded toward zero. Multiplies before dividing so the
/// quotient never loses precision it did not have to.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denom: i128) -> i128 {
    a.safe_mul(b, env)
        .and_then(|product| product.safe_div(denom, env))
        .unwrap_or_else(|err| panic_with_error!(env, err))
}

/// Splits `amount` across `pools` proportionally to weight. Every pool but
/// the last receives `floor(amount * weight / total_weight)`; the last pool
/// receives whatever remains, so the parts always sum to `amount` exactly.
pub fn allocate_deposit(
    env: &Env,
    pools: &Vec<PoolEntry>,
    total_weight: u64,
    amount: i128,
) -> Vec<i128> {
    let mut allocations: Vec<i128> = Vec::new(env);
    let mut allocated: i128 = 0;

    let count = pools.len();
    for (i, entry) in pools.iter().enumerate() {
        let share = if (i as u32) == count - 1 {
            amount
                .safe_sub(allocated, env)
                .unwrap_or_else(|err| panic_with_error!(env, err))
        } else {
            mul_div_floor(env, amount, entry.weight as i128, total_weight as i128)
        };
        allocated = allocated
            .safe_add(share, env)
            .unwrap_or_else(|err| panic_with_error!(env, err));
        allocations.push_back(share);
    }

    allocations
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, String};
    use test_case::test_case;

    fn pools_with_weights(env: &Env, weights: &[u64]) -> Vec<PoolEntry> {
        let mut pools = Vec::new(env);
        for weight in weights {
            pools.push_back(PoolEntry {
                name: String::from_str(env, "pool"),
                pool: Address::generate(env),
                pool_share_token: Address::generate(env),
                weight: *weight,
            });
        }
        pools
    }

    #[test]
    fn mul_div_floor_rounds_toward_zero() {
        let env = Env::default();
        assert_eq!(mul_div_floor(&env, 10, 3, 4), 7);
        assert_eq!(mul_div_floor(&env, 1, 1, 3), 0);
        assert_eq!(mul_div_floor(&env, 1_000_000, 2_000_000, 4_000_000), 500_000);
    }

    #[test_case(&[20, 30, 50], 1_000, &[200, 300, 500]; "even split")]
    #[test_case(&[1, 1, 1], 1_003, &[334, 334, 335]; "last pool takes remainder")]
    #[test_case(&[1, 1, 1], 2, &[0, 0, 2]; "amount below pool count")]
    #[test_case(&[100], 777, &[777]; "single pool takes everything")]
    #[test_case(&[7, 13], 100, &[35, 65]; "uneven weights")]
    fn allocate_deposit_cases(weights: &[u64], amount: i128, expected: &[i128]) {
        let env = Env::default();
        let pools = pools_with_weights(&env, weights);
        let total_weight: u64 = weights.iter().sum();

        let allocations = allocate_deposit(&env, &pools, total_weight, amount);

        assert_eq!(allocations.len(), expected.len() as u32);
        let mut sum: i128 = 0;
        for (i, value) in expected.iter().enumerate() {
            assert_eq!(allocations.get(i as u32).unwrap(), *value);
            sum += allocations.get(i as u32).unwrap();
        }
        assert_eq!(sum, amount);
    }
}
