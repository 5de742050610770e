//! Price Oracle - Collateral price in pool-asset terms
//!
//! The pool only consumes the `PriceFeed` interface. `PriceOracle` is an
//! admin-fed implementation of it for deployments and tests; any contract
//! exposing `latest_price` can stand in.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::LendingError;

/// Latest price reported by a feed
#[odra::odra_type]
pub struct PriceData {
    /// Price of one collateral unit in pool-asset units, scaled by `10^decimals`
    /// Example: $1 with 8 decimals = 100_000_000
    pub price: U256,
    /// Decimal scale of `price`
    pub decimals: u8,
    /// Time of the last update, in seconds
    pub updated_at: u64,
}

/// External price feed interface consumed by the lending pool
#[odra::external_contract]
pub trait PriceFeed {
    /// Latest price, its decimal scale and update time
    fn latest_price(&self) -> PriceData;
}

/// Price Oracle contract
#[odra::module]
pub struct PriceOracle {
    /// Current price
    price: Var<U256>,
    /// Decimal scale of the price
    decimals: Var<u8>,
    /// Time of the last update, in seconds
    updated_at: Var<u64>,
    /// Admin address
    admin: Var<Address>,
}

#[odra::module]
impl PriceOracle {
    /// Initialize the oracle with a starting price
    ///
    /// # Arguments
    /// * `price` - Initial price, scaled by `10^decimals`
    /// * `decimals` - Decimal scale used for every price
    pub fn init(&mut self, price: U256, decimals: u8) {
        let caller = self.env().caller();
        self.admin.set(caller);
        self.decimals.set(decimals);
        self.write_price(price);
    }

    /// Set the price (admin only)
    pub fn set_price(&mut self, price: U256) {
        self.only_admin();
        self.write_price(price);
    }

    /// Latest price, its decimal scale and update time
    pub fn latest_price(&self) -> PriceData {
        PriceData {
            price: self.price.get_or_revert_with(LendingError::InvalidPrice),
            decimals: self.decimals.get_or_default(),
            updated_at: self.updated_at.get_or_default(),
        }
    }

    /// Get admin address
    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(LendingError::Unauthorized)
    }

    fn write_price(&mut self, price: U256) {
        if price.is_zero() {
            self.env().revert(LendingError::InvalidPrice);
        }
        self.price.set(price);
        self.updated_at.set(self.env().get_block_time() / 1000);
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        if caller != admin {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};

    fn setup() -> (HostEnv, PriceOracleHostRef) {
        let env = odra_test::env();
        let oracle = PriceOracle::deploy(
            &env,
            PriceOracleInitArgs {
                price: U256::from(100_000_000u64),
                decimals: 8,
            },
        );
        (env, oracle)
    }

    #[test]
    fn test_init_and_latest_price() {
        let (env, oracle) = setup();
        let data = oracle.latest_price();
        assert_eq!(data.price, U256::from(100_000_000u64));
        assert_eq!(data.decimals, 8);
        assert_eq!(oracle.get_admin(), env.get_account(0));
    }

    #[test]
    fn test_set_price_records_time() {
        let (env, mut oracle) = setup();
        let deployed_at = oracle.latest_price().updated_at;
        env.advance_block_time(60_000);
        oracle.set_price(U256::from(90_000_000u64));

        let data = oracle.latest_price();
        assert_eq!(data.price, U256::from(90_000_000u64));
        assert_eq!(data.updated_at, deployed_at + 60);
    }

    #[test]
    fn test_set_price_rejects_zero() {
        let (_, mut oracle) = setup();
        assert_eq!(
            oracle.try_set_price(U256::zero()),
            Err(LendingError::InvalidPrice.into())
        );
    }

    #[test]
    fn test_set_price_admin_only() {
        let (env, mut oracle) = setup();
        env.set_caller(env.get_account(1));
        assert_eq!(
            oracle.try_set_price(U256::from(1u64)),
            Err(LendingError::Unauthorized.into())
        );
    }
}
